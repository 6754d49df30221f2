//! Error taxonomy for the lowering passes.
//!
//! Unresolvable ancestors are not errors (they contribute no members), so they
//! have no variant here. Everything below signals a violated assumption about
//! the input and is raised to the caller of the unit's transform.

use crate::name::QualifiedName;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoweringError {
    #[error("cannot derive types in function `{function}` with statement of kind {kind}")]
    UnsupportedStatement { function: String, kind: &'static str },

    #[error("cannot derive types in function `{function}` from expression of kind {kind}")]
    UnsupportedExpression { function: String, kind: String },

    #[error("unexpected top-level entity {kind}")]
    UnexpectedTopLevel { kind: &'static str },

    #[error("unknown initializer {found} on parameter `{parameter}`")]
    MalformedInitializer { parameter: String, found: String },

    #[error("type alias `{alias}` never reaches a non-alias type")]
    CyclicAlias { alias: QualifiedName },

    #[error("malformed declaration model: {0}")]
    Json(#[from] serde_json::Error),
}

impl LoweringError {
    /// Stable short name of the error category, used as a structured log field.
    pub fn category(&self) -> &'static str {
        match self {
            Self::UnsupportedStatement { .. }
            | Self::UnsupportedExpression { .. }
            | Self::UnexpectedTopLevel { .. } => "unsupported-construct",
            Self::MalformedInitializer { .. } => "malformed-initializer",
            Self::CyclicAlias { .. } => "cyclic-alias",
            Self::Json(_) => "malformed-model",
        }
    }

    /// A construct the inference pass does not know how to handle.
    pub fn is_unsupported_construct(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedStatement { .. }
                | Self::UnsupportedExpression { .. }
                | Self::UnexpectedTopLevel { .. }
        )
    }
}
