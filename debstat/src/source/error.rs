//! Error types for Contents acquisition.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Result type for source operations.
pub type SourceResult<T> = Result<T, SourceError>;

/// Errors that can occur while fetching or opening a Contents index.
#[derive(Debug, Error)]
pub enum SourceError {
    /// Failed to build the HTTP client.
    #[error("failed to create HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// The request could not be sent or the body could not be read.
    #[error("failed to download {url}: {source}")]
    DownloadFailed {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The server answered with a non-success status.
    #[error("failed to download {url}: server returned HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Network timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout { url: String, timeout_secs: u64 },

    /// Failed to create or write the temporary download file.
    #[error("failed to write temporary download file: {0}")]
    TempFile(#[source] io::Error),

    /// Failed to open or read a local file.
    #[error("failed to read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The stream could not be decompressed or read.
    #[error("failed to read Contents stream: {0}")]
    Stream(#[source] io::Error),
}

impl SourceError {
    /// Classify a reqwest error for `url`.
    pub(crate) fn from_request(url: &str, timeout_secs: u64, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            SourceError::Timeout {
                url: url.to_string(),
                timeout_secs,
            }
        } else {
            SourceError::DownloadFailed {
                url: url.to_string(),
                source,
            }
        }
    }
}
