//! The lowering pipeline: type inference, then override resolution.
//!
//! Inference is local to each source, so sources are independent units: a
//! failure is recorded against its source and the others still complete.
//! Override resolution starts only once the model context holds every
//! source (and the standard library).

use crate::options::LoweringOptions;
use kdecl_common::LoweringError;
use kdecl_infer::introduce_types_in_source;
use kdecl_model::{SourceFile, SourceSet};
use kdecl_overrides::{ModelContext, OverrideResolver};
use rayon::iter::{IntoParallelRefIterator, ParallelIterator};
use thiserror::Error;
use tracing::{debug, info_span, warn};

/// A source whose transform failed.
#[derive(Debug, Error)]
#[error("{file_name}: {error}")]
pub struct UnitFailure {
    pub file_name: String,
    #[source]
    pub error: LoweringError,
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("{} source(s) failed type inference; first: {}", .failures.len(), first_failure(.failures))]
    Inference { failures: Vec<UnitFailure> },

    #[error("cannot build model context: {0}")]
    Context(#[source] LoweringError),
}

fn first_failure(failures: &[UnitFailure]) -> String {
    failures
        .first()
        .map(ToString::to_string)
        .unwrap_or_default()
}

#[derive(Debug)]
pub struct LoweringOutcome {
    pub source_set: SourceSet,
    /// Sources kept untransformed under `fallbackOnUnsupported`.
    pub skipped: Vec<UnitFailure>,
}

#[derive(Debug, Clone, Default)]
pub struct LoweringPipeline {
    options: LoweringOptions,
}

impl LoweringPipeline {
    pub fn new(options: LoweringOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &LoweringOptions {
        &self.options
    }

    /// Lowers `sources`. `stdlib`, when given, only seeds ancestor
    /// resolution and is not part of the outcome.
    pub fn run(
        &self,
        sources: &SourceSet,
        stdlib: Option<&SourceSet>,
    ) -> Result<LoweringOutcome, PipelineError> {
        let _span = info_span!(
            "lowering",
            sources = sources.sources.len(),
            parallel = self.options.parallel
        )
        .entered();

        let (typed, skipped) = self.introduce_types(sources)?;
        let source_set = self.lower_overrides(&typed, stdlib)?;
        Ok(LoweringOutcome {
            source_set,
            skipped,
        })
    }

    fn introduce_types(
        &self,
        sources: &SourceSet,
    ) -> Result<(SourceSet, Vec<UnitFailure>), PipelineError> {
        let _span = info_span!("introduce_types").entered();
        let suffixes = self.options.declaration_suffixes.as_slice();
        let infer = |source: &SourceFile| introduce_types_in_source(source, suffixes);

        let results: Vec<Result<SourceFile, LoweringError>> = if self.options.parallel {
            sources.sources.par_iter().map(infer).collect()
        } else {
            sources.sources.iter().map(infer).collect()
        };

        let mut lowered = Vec::with_capacity(results.len());
        let mut skipped = Vec::new();
        let mut failures = Vec::new();
        for (source, result) in sources.sources.iter().zip(results) {
            let error = match result {
                Ok(file) => {
                    lowered.push(file);
                    continue;
                }
                Err(error) => error,
            };
            warn!(
                file = %source.file_name,
                category = error.category(),
                %error,
                "type inference failed"
            );
            let failure = UnitFailure {
                file_name: source.file_name.clone(),
                error,
            };
            if self.options.fallback_on_unsupported && failure.error.is_unsupported_construct() {
                lowered.push(source.clone());
                skipped.push(failure);
            } else {
                failures.push(failure);
            }
        }

        if !failures.is_empty() {
            return Err(PipelineError::Inference { failures });
        }
        debug!(skipped = skipped.len(), "type inference done");
        Ok((SourceSet { sources: lowered }, skipped))
    }

    fn lower_overrides(
        &self,
        typed: &SourceSet,
        stdlib: Option<&SourceSet>,
    ) -> Result<SourceSet, PipelineError> {
        let context = {
            let _span = info_span!("build_model_context").entered();
            ModelContext::build(typed, stdlib).map_err(PipelineError::Context)?
        };

        let _span = info_span!("lower_overrides", class_likes = context.class_like_count()).entered();
        let resolver = OverrideResolver::new(&context);
        let lower = |source: &SourceFile| SourceFile {
            file_name: source.file_name.clone(),
            root: resolver.lower_module(&source.root),
        };
        let sources: Vec<SourceFile> = if self.options.parallel {
            typed.sources.par_iter().map(lower).collect()
        } else {
            typed.sources.iter().map(lower).collect()
        };
        Ok(SourceSet { sources })
    }
}
