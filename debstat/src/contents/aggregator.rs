//! Folding parsed records into per-package file counts.

use std::borrow::Cow;
use std::collections::hash_map::{self, HashMap};

use tracing::trace;

use super::parser::parse_record;

/// Mapping from package name to the number of files it owns.
///
/// A file listed under several packages counts once for each of them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageCounts {
    counts: HashMap<String, u64>,
}

impl PackageCounts {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment the count for `name`, inserting it at 1 if absent.
    ///
    /// Only allocates when the name is seen for the first time.
    pub fn increment(&mut self, name: &str) {
        match self.counts.get_mut(name) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(name.to_string(), 1);
            }
        }
    }

    /// Add every count in `other` to this mapping.
    pub fn merge(&mut self, other: PackageCounts) {
        if self.counts.is_empty() {
            self.counts = other.counts;
            return;
        }
        for (name, count) in other.counts {
            *self.counts.entry(name).or_insert(0) += count;
        }
    }

    /// Count recorded for `name`, if any.
    pub fn get(&self, name: &str) -> Option<u64> {
        self.counts.get(name).copied()
    }

    /// Number of distinct packages.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Sum of all counts: the number of (file, package) associations.
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// Iterate over `(name, count)` pairs in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> + '_ {
        self.counts.iter().map(|(name, count)| (name.as_str(), *count))
    }
}

impl<'a> FromIterator<(&'a str, u64)> for PackageCounts {
    fn from_iter<I: IntoIterator<Item = (&'a str, u64)>>(iter: I) -> Self {
        let mut counts = PackageCounts::new();
        for (name, count) in iter {
            *counts.counts.entry(name.to_string()).or_insert(0) += count;
        }
        counts
    }
}

impl IntoIterator for PackageCounts {
    type Item = (String, u64);
    type IntoIter = hash_map::IntoIter<String, u64>;

    fn into_iter(self) -> Self::IntoIter {
        self.counts.into_iter()
    }
}

/// Counters describing a completed fold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanStats {
    /// Records read from the line source.
    pub lines: u64,
    /// Records skipped because they had no path/package separator.
    pub malformed: u64,
    /// (file, package) associations observed.
    pub associations: u64,
}

impl ScanStats {
    /// Combine the counters of two independent folds.
    pub fn combine(self, other: ScanStats) -> ScanStats {
        ScanStats {
            lines: self.lines + other.lines,
            malformed: self.malformed + other.malformed,
            associations: self.associations + other.associations,
        }
    }
}

/// Sole owner of a [`PackageCounts`] while records are streamed through it.
#[derive(Debug, Default)]
pub struct Aggregator {
    counts: PackageCounts,
    stats: ScanStats,
}

impl Aggregator {
    /// Create an aggregator with an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one file for each name.
    pub fn observe<'a, I>(&mut self, names: I)
    where
        I: IntoIterator<Item = Cow<'a, str>>,
    {
        for name in names {
            self.counts.increment(&name);
            self.stats.associations += 1;
        }
    }

    /// Parse one record and observe its package names.
    ///
    /// Malformed records contribute nothing and are only counted.
    pub fn observe_line(&mut self, record: &[u8]) {
        self.stats.lines += 1;
        match parse_record(record) {
            Ok(names) => self.observe(names),
            Err(e) => {
                self.stats.malformed += 1;
                trace!(
                    line = self.stats.lines,
                    record = %String::from_utf8_lossy(record),
                    "{}",
                    e
                );
            }
        }
    }

    /// Counters accumulated so far.
    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Read-only view of the running mapping.
    pub fn counts(&self) -> &PackageCounts {
        &self.counts
    }

    /// Merge another aggregator's results into this one.
    pub fn absorb(&mut self, other: Aggregator) {
        self.counts.merge(other.counts);
        self.stats = self.stats.combine(other.stats);
    }

    /// Finish the fold, handing over the mapping.
    pub fn finish(self) -> (PackageCounts, ScanStats) {
        (self.counts, self.stats)
    }
}
