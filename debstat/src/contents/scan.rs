//! Drivers that fold a whole Contents stream into package counts.
//!
//! [`scan`] is the sequential baseline: one record is read, parsed and
//! counted before the next is requested. [`scan_parallel`] reads bounded
//! batches of records and folds each batch on the rayon pool, merging the
//! per-task maps by summing. Both produce identical results.

use std::io::{self, BufRead};
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info};

use super::aggregator::{Aggregator, PackageCounts, ScanStats};
use super::lines::LineReader;

/// Default number of records per batch in parallel mode.
pub const DEFAULT_BATCH_LINES: usize = 64 * 1024;

/// Minimum records per rayon task within a batch.
const MIN_TASK_LINES: usize = 1024;

/// Result of folding a stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scan {
    pub counts: PackageCounts,
    pub stats: ScanStats,
}

impl From<Aggregator> for Scan {
    fn from(aggregator: Aggregator) -> Self {
        let (counts, stats) = aggregator.finish();
        Self { counts, stats }
    }
}

/// Fold every record of `reader` sequentially.
pub fn scan<R: BufRead>(reader: R) -> io::Result<Scan> {
    let started = Instant::now();
    let mut lines = LineReader::new(reader);
    let mut aggregator = Aggregator::new();

    while let Some(record) = lines.next_line()? {
        aggregator.observe_line(record);
    }

    log_finished(&aggregator, started, "sequential");
    Ok(aggregator.into())
}

/// Fold `reader` in batches of `batch_lines` records on the rayon pool.
///
/// Memory is bounded by one batch of raw records plus the per-task maps.
/// A `batch_lines` of zero is treated as one.
pub fn scan_parallel<R: BufRead>(reader: R, batch_lines: usize) -> io::Result<Scan> {
    let started = Instant::now();
    let batch_lines = batch_lines.max(1);
    let mut lines = LineReader::new(reader);
    let mut total = Aggregator::new();
    let mut batch: Vec<Vec<u8>> = Vec::with_capacity(batch_lines);
    let mut batches = 0u64;

    loop {
        batch.clear();
        while batch.len() < batch_lines {
            match lines.next_line()? {
                Some(record) => batch.push(record.to_vec()),
                None => break,
            }
        }
        if batch.is_empty() {
            break;
        }

        let partial = batch
            .par_iter()
            .with_min_len(MIN_TASK_LINES)
            .fold(Aggregator::new, |mut aggregator, record| {
                aggregator.observe_line(record);
                aggregator
            })
            .reduce(Aggregator::new, |mut left, right| {
                left.absorb(right);
                left
            });
        total.absorb(partial);
        batches += 1;

        debug!(
            batch = batches,
            lines = total.stats().lines,
            packages = total.counts().len(),
            "Folded batch"
        );

        if batch.len() < batch_lines {
            break;
        }
    }

    log_finished(&total, started, "parallel");
    Ok(total.into())
}

fn log_finished(aggregator: &Aggregator, started: Instant, mode: &str) {
    let stats = aggregator.stats();
    info!(
        mode,
        lines = stats.lines,
        malformed = stats.malformed,
        associations = stats.associations,
        packages = aggregator.counts().len(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Contents scan complete"
    );
}
