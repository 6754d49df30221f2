//! Module trees: source sets, source files, and modules.

use crate::decl::Declaration;
use kdecl_common::QualifiedName;
use serde::{Deserialize, Serialize};

/// A module with its declarations and nested submodules.
///
/// `name` is fully qualified; the root module of a source has the root name.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleDecl {
    #[serde(default)]
    pub name: QualifiedName,
    #[serde(default)]
    pub declarations: Vec<Declaration>,
    #[serde(default)]
    pub submodules: Vec<ModuleDecl>,
}

impl ModuleDecl {
    pub fn new(name: impl Into<QualifiedName>, declarations: Vec<Declaration>) -> Self {
        Self {
            name: name.into(),
            declarations,
            submodules: Vec::new(),
        }
    }

    pub fn with_submodules(mut self, submodules: Vec<ModuleDecl>) -> Self {
        self.submodules = submodules;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    pub file_name: String,
    pub root: ModuleDecl,
}

impl SourceFile {
    pub fn new(file_name: impl Into<String>, root: ModuleDecl) -> Self {
        Self {
            file_name: file_name.into(),
            root,
        }
    }

    /// True when the file name ends with one of the declaration-only suffixes.
    pub fn is_declaration_source<S: AsRef<str>>(&self, suffixes: &[S]) -> bool {
        suffixes
            .iter()
            .any(|suffix| self.file_name.ends_with(suffix.as_ref()))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SourceSet {
    #[serde(default)]
    pub sources: Vec<SourceFile>,
}

impl SourceSet {
    pub fn new(sources: Vec<SourceFile>) -> Self {
        Self { sources }
    }

    /// Rebuilds the set by transforming every source's root module.
    pub fn transform(&self, mut f: impl FnMut(&ModuleDecl) -> ModuleDecl) -> SourceSet {
        SourceSet {
            sources: self
                .sources
                .iter()
                .map(|source| SourceFile {
                    file_name: source.file_name.clone(),
                    root: f(&source.root),
                })
                .collect(),
        }
    }
}
