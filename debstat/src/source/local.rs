//! Contents index read from the local filesystem.

use std::fs::File;
use std::path::PathBuf;

use tracing::info;

use super::error::{SourceError, SourceResult};
use super::{open_decompressed, ContentsSource, ContentsStream};
use crate::arch::Architecture;

/// A Contents file already on disk, gzip-compressed or plain.
///
/// The architecture is not used to locate the file; the caller picked it.
#[derive(Debug, Clone)]
pub struct LocalSource {
    path: PathBuf,
}

impl LocalSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ContentsSource for LocalSource {
    fn open(&self, arch: Architecture) -> SourceResult<ContentsStream> {
        info!(arch = %arch, path = %self.path.display(), "Reading local Contents index");

        let file = File::open(&self.path).map_err(|e| SourceError::ReadFailed {
            path: self.path.clone(),
            source: e,
        })?;
        let reader = open_decompressed(file).map_err(|e| SourceError::ReadFailed {
            path: self.path.clone(),
            source: e,
        })?;

        Ok(ContentsStream::from_reader(reader))
    }

    fn describe(&self, _arch: Architecture) -> String {
        self.path.display().to_string()
    }
}
