//! Acquisition of decompressed Contents streams.
//!
//! The core only needs a `BufRead`. This module provides it:
//! - HTTP download into a scoped temporary file (`http`)
//! - Local Contents files, compressed or plain (`local`)
//! - Transparent gzip detection and decompression (`open_decompressed`)
//!
//! # Resource lifetime
//!
//! A [`ContentsStream`] owns everything backing it. For HTTP sources that
//! includes the temporary download file, which is deleted when the stream is
//! dropped, whether the scan finished or failed.

mod error;
mod http;
mod local;

use std::fmt;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use flate2::read::MultiGzDecoder;
use tempfile::NamedTempFile;

use crate::arch::Architecture;

pub use error::{SourceError, SourceResult};
pub use http::{HttpSource, ProgressCallback};
pub use local::LocalSource;

/// Buffer size for decompressed reads (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// gzip member header magic.
const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Something that can produce the Contents stream for an architecture.
pub trait ContentsSource {
    /// Acquire and open the decompressed Contents index for `arch`.
    fn open(&self, arch: Architecture) -> SourceResult<ContentsStream>;

    /// Human-readable description of where the index comes from.
    fn describe(&self, arch: Architecture) -> String;
}

/// A decompressed Contents stream and the resources backing it.
pub struct ContentsStream {
    reader: Box<dyn BufRead + Send>,
    download: Option<NamedTempFile>,
}

impl ContentsStream {
    /// Wrap an already-decompressed reader.
    pub fn from_reader(reader: impl BufRead + Send + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            download: None,
        }
    }

    /// Stream backed by a temporary file that is removed on drop.
    pub(crate) fn with_download(reader: Box<dyn BufRead + Send>, download: NamedTempFile) -> Self {
        Self {
            reader,
            download: Some(download),
        }
    }

    /// Path of the temporary download file, if this stream owns one.
    pub fn download_path(&self) -> Option<&Path> {
        self.download.as_ref().map(NamedTempFile::path)
    }
}

impl fmt::Debug for ContentsStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentsStream")
            .field("download", &self.download_path())
            .finish_non_exhaustive()
    }
}

impl Read for ContentsStream {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        self.reader.read(buf)
    }
}

impl BufRead for ContentsStream {
    fn fill_buf(&mut self) -> io::Result<&[u8]> {
        self.reader.fill_buf()
    }

    fn consume(&mut self, amt: usize) {
        self.reader.consume(amt)
    }
}

/// Wrap `inner` in a gzip decoder if it starts with the gzip magic bytes.
///
/// Plain input is passed through unchanged.
pub fn open_decompressed<R>(inner: R) -> io::Result<Box<dyn BufRead + Send>>
where
    R: Read + Send + 'static,
{
    let mut buffered = BufReader::with_capacity(BUFFER_SIZE, inner);
    let head = buffered.fill_buf()?;
    if head.starts_with(&GZIP_MAGIC) {
        let decoder = MultiGzDecoder::new(buffered);
        Ok(Box::new(BufReader::with_capacity(BUFFER_SIZE, decoder)))
    } else {
        Ok(Box::new(buffered))
    }
}
