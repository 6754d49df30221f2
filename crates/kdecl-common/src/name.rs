//! Fully qualified names (`a.b.C`).
//!
//! Module names, registry keys and nominal type references all share this
//! representation. The root name has no segments and prints as an empty string.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct QualifiedName {
    segments: SmallVec<[String; 2]>,
}

impl QualifiedName {
    /// The empty (root) name.
    pub fn root() -> Self {
        Self::default()
    }

    /// A single-segment name.
    pub fn ident(name: impl Into<String>) -> Self {
        let mut segments = SmallVec::new();
        segments.push(name.into());
        Self { segments }
    }

    /// Parses a dotted path. Empty segments are dropped, so `""` is the root.
    pub fn parse(text: &str) -> Self {
        Self {
            segments: text
                .split('.')
                .filter(|segment| !segment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// True when this is exactly the single identifier `name`.
    pub fn is_ident(&self, name: &str) -> bool {
        self.segments.len() == 1 && self.segments[0] == name
    }

    pub fn last(&self) -> Option<&str> {
        self.segments.last().map(String::as_str)
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Returns `self.segment`.
    pub fn append(&self, segment: &str) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(
            segment
                .split('.')
                .filter(|part| !part.is_empty())
                .map(str::to_string),
        );
        Self { segments }
    }

    /// Returns `self.other`.
    pub fn join(&self, other: &QualifiedName) -> Self {
        let mut segments = self.segments.clone();
        segments.extend(other.segments.iter().cloned());
        Self { segments }
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment)?;
        }
        Ok(())
    }
}

impl From<String> for QualifiedName {
    fn from(text: String) -> Self {
        Self::parse(&text)
    }
}

impl From<&str> for QualifiedName {
    fn from(text: &str) -> Self {
        Self::parse(text)
    }
}

impl From<QualifiedName> for String {
    fn from(name: QualifiedName) -> Self {
        name.to_string()
    }
}

#[cfg(test)]
#[path = "tests/name_tests.rs"]
mod tests;
