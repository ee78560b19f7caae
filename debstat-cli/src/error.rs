//! CLI error type and exit codes.

use thiserror::Error;

use debstat::config::ConfigError;
use debstat::source::SourceError;
use debstat::StatsError;

/// Exit code for configuration problems, including unknown architectures.
pub const EXIT_CONFIG: i32 = 2;

/// Exit code for download or decompression failures.
pub const EXIT_ACQUISITION: i32 = 3;

/// Exit code for everything else.
pub const EXIT_FAILURE: i32 = 1;

/// Errors reported by the `debstat` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Architecture not in the allow-list.
    #[error("Unknown architecture: {0} (expected one of: {})", debstat::Architecture::allowed_list())]
    InvalidArchitecture(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The Contents index could not be acquired.
    #[error("Failed to acquire Contents index: {0}")]
    Acquisition(#[source] SourceError),

    /// Interactive input failed.
    #[error("Failed to read input: {0}")]
    Prompt(String),

    /// Writing the report failed.
    #[error("Failed to write report: {0}")]
    Output(#[from] std::io::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::InvalidArchitecture(_) | CliError::Config(_) => EXIT_CONFIG,
            CliError::Acquisition(_) => EXIT_ACQUISITION,
            CliError::Prompt(_) | CliError::Output(_) => EXIT_FAILURE,
        }
    }
}

impl From<StatsError> for CliError {
    fn from(e: StatsError) -> Self {
        match e {
            StatsError::InvalidArchitecture(arch) => CliError::InvalidArchitecture(arch),
            StatsError::Acquisition(source) => CliError::Acquisition(source),
            StatsError::Config(config) => CliError::from(config),
        }
    }
}

impl From<SourceError> for CliError {
    fn from(e: SourceError) -> Self {
        CliError::Acquisition(e)
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Config(e.to_string())
    }
}
