//! Streaming parse-and-aggregate over Contents records.
//!
//! This module is independent of how the records were obtained:
//! - Line records over any `BufRead` (`lines`)
//! - Record parsing into package names (`parser`)
//! - Per-package counting (`aggregator`)
//! - Top-K ranking with a name tie-break (`top`)
//! - Whole-stream drivers, sequential and parallel (`scan`)
//!
//! # Example
//!
//! ```
//! use debstat::contents::{scan, top};
//!
//! let input: &[u8] = b"a/x  s/pkgA\na/y  s/pkgA,t/pkgB\na/z  s/pkgB\n";
//! let result = scan(input)?;
//! let ranked = top(&result.counts, 10);
//!
//! assert_eq!(ranked[0].name, "pkgA");
//! assert_eq!(ranked[1].name, "pkgB");
//! # Ok::<(), std::io::Error>(())
//! ```

mod aggregator;
mod lines;
mod parser;
mod scan;
mod top;

pub use aggregator::{Aggregator, PackageCounts, ScanStats};
pub use lines::{strip_line_terminator, LineReader};
pub use parser::{parse_line, parse_record, MalformedLine, PackageNames};
pub use scan::{scan, scan_parallel, Scan, DEFAULT_BATCH_LINES};
pub use top::{top, RankedEntry};
