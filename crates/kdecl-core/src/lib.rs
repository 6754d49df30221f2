//! Semantic lowering of translated declarations.
//!
//! [`LoweringPipeline`] runs the two passes over a source set:
//! `introduceTypes` (from `kdecl-infer`) fills in the signatures of functions
//! with bodies, then `lowerOverrides` (from `kdecl-overrides`) marks members
//! that override an ancestor's. The model types are re-exported from
//! `kdecl-model`.

pub mod options;
pub mod pipeline;
pub mod tracing_config;

pub use kdecl_common::{LoweringError, QualifiedName};
pub use kdecl_model as model;
pub use options::LoweringOptions;
pub use pipeline::{LoweringOutcome, LoweringPipeline, PipelineError, UnitFailure};
pub use tracing_config::init_tracing;
