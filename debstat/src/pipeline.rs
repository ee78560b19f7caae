//! End-to-end run: acquire, fold, rank.

use tracing::info;

use crate::arch::Architecture;
use crate::config::StatsConfig;
use crate::contents::{scan, scan_parallel, top, RankedEntry, ScanStats, DEFAULT_BATCH_LINES};
use crate::error::StatsResult;
use crate::source::{ContentsSource, SourceError};

/// Outcome of a complete run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageStatistics {
    pub arch: Architecture,
    /// Highest-ranked packages, best first.
    pub ranking: Vec<RankedEntry>,
    /// Number of distinct packages seen.
    pub packages: usize,
    pub stats: ScanStats,
}

/// Acquire the Contents index for `arch` from `source` and rank its packages.
///
/// The stream, and any temporary file behind it, is released before this
/// returns, on success and on error alike.
pub fn package_statistics(
    source: &dyn ContentsSource,
    arch: Architecture,
    config: &StatsConfig,
) -> StatsResult<PackageStatistics> {
    let stream = source.open(arch)?;

    let result = (if config.parallel {
        scan_parallel(stream, DEFAULT_BATCH_LINES)
    } else {
        scan(stream)
    })
    .map_err(SourceError::Stream)?;

    let ranking = top(&result.counts, config.top);
    info!(
        arch = %arch,
        packages = result.counts.len(),
        reported = ranking.len(),
        "Ranking complete"
    );

    Ok(PackageStatistics {
        arch,
        ranking,
        packages: result.counts.len(),
        stats: result.stats,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    use crate::error::StatsError;
    use crate::source::{ContentsStream, SourceResult};

    struct StaticSource {
        body: &'static [u8],
        opened: Cell<Option<Architecture>>,
    }

    impl StaticSource {
        fn new(body: &'static [u8]) -> Self {
            Self {
                body,
                opened: Cell::new(None),
            }
        }
    }

    impl ContentsSource for StaticSource {
        fn open(&self, arch: Architecture) -> SourceResult<ContentsStream> {
            self.opened.set(Some(arch));
            Ok(ContentsStream::from_reader(self.body))
        }

        fn describe(&self, _arch: Architecture) -> String {
            "static".to_string()
        }
    }

    struct FailingSource;

    impl ContentsSource for FailingSource {
        fn open(&self, _arch: Architecture) -> SourceResult<ContentsStream> {
            Err(SourceError::HttpStatus {
                url: "https://example.invalid/Contents-all.gz".to_string(),
                status: 503,
            })
        }

        fn describe(&self, _arch: Architecture) -> String {
            "failing".to_string()
        }
    }

    #[test]
    fn test_example_ranking() {
        let source = StaticSource::new(b"a/x  s/pkgA\na/y  s/pkgA,t/pkgB\na/z  s/pkgB\nnoSeparatorHere\n");
        let result =
            package_statistics(&source, Architecture::Amd64, &StatsConfig::default()).unwrap();

        assert_eq!(source.opened.get(), Some(Architecture::Amd64));
        assert_eq!(
            result.ranking,
            vec![RankedEntry::new("pkgA", 2), RankedEntry::new("pkgB", 2)]
        );
        assert_eq!(result.packages, 2);
        assert_eq!(result.stats.malformed, 1);
    }

    #[test]
    fn test_top_limit_applied() {
        let source = StaticSource::new(b"a  s/one\nb  s/two\nc  s/two\n");
        let config = StatsConfig::default().with_top(1);
        let result = package_statistics(&source, Architecture::All, &config).unwrap();
        assert_eq!(result.ranking, vec![RankedEntry::new("two", 2)]);
    }

    #[test]
    fn test_parallel_mode_same_result() {
        let body: &'static [u8] = b"a  s/one\nb  s/two,s/one\nc  s/two\nbad\n";
        let sequential =
            package_statistics(&StaticSource::new(body), Architecture::All, &StatsConfig::default())
                .unwrap();
        let parallel = package_statistics(
            &StaticSource::new(body),
            Architecture::All,
            &StatsConfig::default().with_parallel(true),
        )
        .unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_acquisition_failure_propagates() {
        let err = package_statistics(&FailingSource, Architecture::All, &StatsConfig::default())
            .unwrap_err();
        assert!(matches!(
            err,
            StatsError::Acquisition(SourceError::HttpStatus { status: 503, .. })
        ));
    }
}
