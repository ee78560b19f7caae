//! HTTP-based Contents source.
//!
//! The compressed index is streamed to a temporary file first, then opened
//! through the gzip decoder. The temporary file lives exactly as long as the
//! returned [`ContentsStream`].

use std::fs::File;
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::time::Instant;

use reqwest::blocking::Client;
use tempfile::NamedTempFile;
use tracing::{debug, info};

use super::error::{SourceError, SourceResult};
use super::{open_decompressed, ContentsSource, ContentsStream};
use crate::arch::Architecture;
use crate::config::StatsConfig;

/// Buffer size for reading/writing during downloads (64KB).
const BUFFER_SIZE: usize = 64 * 1024;

/// Prefix of temporary download files.
const TEMP_PREFIX: &str = "debstat-";

/// Callback receiving `(bytes_downloaded, total_bytes)`.
///
/// `total_bytes` is 0 when the server does not send a content length.
pub type ProgressCallback = Box<dyn Fn(u64, u64) + Send + Sync>;

/// Downloads Contents indices from a Debian mirror.
pub struct HttpSource {
    client: Client,
    config: StatsConfig,
    progress: Option<ProgressCallback>,
}

impl std::fmt::Debug for HttpSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSource")
            .field("mirror", &self.config.mirror)
            .field("timeout", &self.config.timeout)
            .field("progress", &self.progress.is_some())
            .finish()
    }
}

impl HttpSource {
    /// Create a source for the mirror, suite and component in `config`.
    pub fn new(config: StatsConfig) -> SourceResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("debstat/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(SourceError::Client)?;

        Ok(Self {
            client,
            config,
            progress: None,
        })
    }

    /// Report download progress through `callback`.
    pub fn with_progress(mut self, callback: ProgressCallback) -> Self {
        self.progress = Some(callback);
        self
    }

    /// Download `url` into a fresh temporary file.
    fn download(&self, url: &str) -> SourceResult<NamedTempFile> {
        let timeout_secs = self.config.timeout.as_secs();
        let started = Instant::now();

        let mut response = self
            .client
            .get(url)
            .send()
            .map_err(|e| SourceError::from_request(url, timeout_secs, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let total_size = response.content_length().unwrap_or(0);
        debug!(url, total_size, "Download started");

        let mut temp = self.create_temp_file()?;
        let downloaded = self.stream_to(&mut response, temp.as_file_mut(), url, total_size)?;

        info!(
            url,
            bytes = downloaded,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Download complete"
        );
        Ok(temp)
    }

    fn create_temp_file(&self) -> SourceResult<NamedTempFile> {
        let mut builder = tempfile::Builder::new();
        builder.prefix(TEMP_PREFIX).suffix(".gz");
        let temp = match &self.config.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        };
        temp.map_err(SourceError::TempFile)
    }

    /// Stream the response body to `file`.
    fn stream_to(
        &self,
        response: &mut impl Read,
        file: &mut File,
        url: &str,
        total_size: u64,
    ) -> SourceResult<u64> {
        let timeout_secs = self.config.timeout.as_secs();
        let mut writer = BufWriter::new(file);
        let mut buffer = vec![0u8; BUFFER_SIZE];
        let mut downloaded = 0u64;

        loop {
            let bytes_read = response.read(&mut buffer).map_err(|e| {
                let timed_out = e
                    .get_ref()
                    .and_then(|inner| inner.downcast_ref::<reqwest::Error>())
                    .map_or(false, reqwest::Error::is_timeout);
                if timed_out {
                    SourceError::Timeout {
                        url: url.to_string(),
                        timeout_secs,
                    }
                } else {
                    SourceError::Stream(e)
                }
            })?;

            if bytes_read == 0 {
                break;
            }

            writer
                .write_all(&buffer[..bytes_read])
                .map_err(SourceError::TempFile)?;

            downloaded += bytes_read as u64;

            if let Some(ref cb) = self.progress {
                cb(downloaded, total_size);
            }
        }

        let file = writer
            .into_inner()
            .map_err(|e| SourceError::TempFile(e.into_error()))?;
        file.seek(SeekFrom::Start(0)).map_err(SourceError::TempFile)?;

        Ok(downloaded)
    }
}

impl ContentsSource for HttpSource {
    fn open(&self, arch: Architecture) -> SourceResult<ContentsStream> {
        let url = self.config.contents_url(arch);
        info!(arch = %arch, url = %url, "Downloading Contents index");

        let temp = self.download(&url)?;
        let file = temp.reopen().map_err(SourceError::TempFile)?;
        let reader = open_decompressed(file).map_err(SourceError::Stream)?;

        Ok(ContentsStream::with_download(reader, temp))
    }

    fn describe(&self, arch: Architecture) -> String {
        self.config.contents_url(arch)
    }
}
