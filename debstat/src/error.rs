//! Top-level error types.

use thiserror::Error;

use crate::config::ConfigError;
use crate::source::SourceError;

/// Result type for debstat operations.
pub type StatsResult<T> = Result<T, StatsError>;

/// Errors that abort a run. No report is produced when one of these occurs.
#[derive(Debug, Error)]
pub enum StatsError {
    /// The architecture is not in the allow-list.
    #[error(
        "unknown architecture '{0}' (expected one of: {})",
        crate::arch::Architecture::allowed_list()
    )]
    InvalidArchitecture(String),

    /// Downloading, reading or decompressing the Contents index failed.
    #[error("failed to acquire Contents index: {0}")]
    Acquisition(#[from] SourceError),

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),
}
