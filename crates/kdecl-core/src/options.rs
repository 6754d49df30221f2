//! Pipeline configuration.

use serde::{Deserialize, Serialize};

/// Options for one [`LoweringPipeline`](crate::LoweringPipeline) run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoweringOptions {
    /// File-name suffixes of declaration-only sources. Only these sources
    /// get their function bodies inferred.
    pub declaration_suffixes: Vec<String>,
    /// Process sources on the rayon thread pool.
    pub parallel: bool,
    /// Keep a source untransformed when inference meets a construct it does
    /// not support, reporting it as skipped instead of failing the run.
    pub fallback_on_unsupported: bool,
}

impl Default for LoweringOptions {
    fn default() -> Self {
        Self {
            declaration_suffixes: vec![".d.ts".to_string()],
            parallel: false,
            fallback_on_unsupported: false,
        }
    }
}

impl LoweringOptions {
    /// Parses options from JSON. Missing fields take their defaults.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_fallback_on_unsupported(mut self, fallback: bool) -> Self {
        self.fallback_on_unsupported = fallback;
        self
    }
}

#[cfg(test)]
#[path = "tests/options_tests.rs"]
mod tests;
