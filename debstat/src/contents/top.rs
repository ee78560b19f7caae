//! Top-K selection over package counts.
//!
//! Entries are ranked by count, highest first. Equal counts are ordered by
//! package name, ascending, so the output never depends on hash order.

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use super::aggregator::PackageCounts;

/// One row of the ranking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedEntry {
    pub name: String,
    pub count: u64,
}

impl RankedEntry {
    pub fn new(name: impl Into<String>, count: u64) -> Self {
        Self {
            name: name.into(),
            count,
        }
    }
}

/// Ranking key: greater means ranked higher.
#[derive(Debug, PartialEq, Eq)]
struct Rank<'a> {
    count: u64,
    name: &'a str,
}

impl Ord for Rank<'_> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.count
            .cmp(&other.count)
            .then_with(|| other.name.cmp(self.name))
    }
}

impl PartialOrd for Rank<'_> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Return the `k` highest-ranked packages, best first.
///
/// Keeps a min-heap of at most `k` entries, so the cost is O(n log k).
/// Returns fewer than `k` entries when there are fewer packages.
pub fn top(counts: &PackageCounts, k: usize) -> Vec<RankedEntry> {
    if k == 0 {
        return Vec::new();
    }

    let mut heap: BinaryHeap<Reverse<Rank<'_>>> = BinaryHeap::with_capacity(k.min(counts.len()));
    for (name, count) in counts.iter() {
        let rank = Rank { count, name };
        if heap.len() < k {
            heap.push(Reverse(rank));
        } else if let Some(mut worst) = heap.peek_mut() {
            if rank > worst.0 {
                *worst = Reverse(rank);
            }
        }
    }

    // Ascending order of Reverse<Rank> is descending rank.
    heap.into_sorted_vec()
        .into_iter()
        .map(|Reverse(rank)| RankedEntry::new(rank.name, rank.count))
        .collect()
}
