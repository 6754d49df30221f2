//! Tracing setup for hosts embedding the pipeline.
//!
//! Output is controlled by two environment variables:
//!
//! - `KDECL_LOG` (falling back to `RUST_LOG`): filter directives, e.g.
//!   `debug` or `kdecl_overrides=trace`
//! - `KDECL_LOG_FORMAT`: `text` (default) or `json`
//!
//! ```bash
//! KDECL_LOG=kdecl_infer=trace host-binary model.json
//! KDECL_LOG=debug KDECL_LOG_FORMAT=json host-binary model.json
//! ```
//!
//! Nothing is installed unless one of the filter variables is set.

use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, Registry, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    /// Newline-delimited JSON objects.
    Json,
}

impl LogFormat {
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "json" => Self::Json,
            _ => Self::Text,
        }
    }

    fn from_env() -> Self {
        Self::parse(&std::env::var("KDECL_LOG_FORMAT").unwrap_or_default())
    }
}

fn build_filter() -> EnvFilter {
    match std::env::var("KDECL_LOG") {
        Ok(directives) => EnvFilter::builder().parse_lossy(directives),
        Err(_) => EnvFilter::from_default_env(),
    }
}

/// Installs the global subscriber, writing to stderr.
///
/// Returns `false` when no filter variable is set or a subscriber is already
/// installed.
pub fn init_tracing() -> bool {
    if std::env::var_os("KDECL_LOG").is_none() && std::env::var_os("RUST_LOG").is_none() {
        return false;
    }

    let filter = build_filter();
    match LogFormat::from_env() {
        LogFormat::Json => {
            let json_layer = fmt::layer().json().with_writer(std::io::stderr);
            Registry::default().with(filter).with(json_layer).try_init().is_ok()
        }
        LogFormat::Text => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .try_init()
            .is_ok(),
    }
}
