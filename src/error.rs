//! Error types for configuration loading.

use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by [`ConfigSource::load`](crate::source::ConfigSource::load)
/// and by typed extraction.
///
/// Absent keys and coercion failures are never errors; they are handled by the
/// default-value fallback inside [`ConfigView`](crate::view::ConfigView).
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read config file {path:?}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no config file named '{0}.*' found in any candidate directory")]
    NoConfigFound(String),

    #[error("missing environment variable {0}")]
    MissingEnv(&'static str),

    #[error("failed to download config object s3://{bucket}/{key}: {source}")]
    Download {
        bucket: String,
        key: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("failed to parse config document: {0}")]
    Parse(#[from] config::ConfigError),
}
