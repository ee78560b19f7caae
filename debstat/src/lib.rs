//! debstat - file counts per package from Debian Contents indices
//!
//! This library downloads a Debian archive `Contents-<arch>.gz` index, streams
//! its lines through a parser and aggregator, and ranks packages by the number
//! of files they install.
//!
//! # Architecture
//!
//! ```text
//! ContentsSource (http / local file)
//!         │  decompressed BufRead
//!         ▼
//! LineReader ──► parse_line ──► Aggregator ──► top() ──► report
//! ```
//!
//! The core (`contents`) only sees a `BufRead`; acquisition and cleanup of the
//! underlying resource live in `source`.

pub mod arch;
pub mod config;
pub mod contents;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod report;
pub mod source;

pub use arch::Architecture;
pub use contents::{top, Aggregator, PackageCounts, RankedEntry, Scan, ScanStats};
pub use error::{StatsError, StatsResult};
pub use pipeline::{package_statistics, PackageStatistics};

/// Library version, taken from the crate manifest.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
