//! Integration tests for the full acquire → fold → rank flow.
//!
//! These tests verify:
//! - Local gzip and plain Contents files give identical rankings
//! - HTTP download from a loopback server, including temp-file cleanup
//! - HTTP error statuses surface as acquisition failures
//!
//! Run with: `cargo test --test contents_integration`

use std::fs::File;
use std::io::{BufRead, BufReader, Read, Write};
use std::net::TcpListener;
use std::thread;

use flate2::write::GzEncoder;
use flate2::Compression;
use tempfile::TempDir;

use debstat::config::StatsConfig;
use debstat::contents::{scan, top, RankedEntry};
use debstat::source::{ContentsSource, HttpSource, LocalSource, SourceError};
use debstat::{package_statistics, Architecture, StatsError};

// ============================================================================
// Helper Functions
// ============================================================================

/// A small Contents index in the archive's layout.
const CONTENTS: &str = "\
bin/ash                                                 shells/ash
bin/busybox                                             utils/busybox
usr/bin/ash                                             shells/ash
usr/share/doc/ash/copyright                             shells/ash
usr/share/fonts/cns11643/a.png                          fonts/fonts-cns11643-pixmaps
usr/share/fonts/cns11643/b.png                          fonts/fonts-cns11643-pixmaps
usr/share/fonts/cns11643/c.png                          fonts/fonts-cns11643-pixmaps
usr/share/fonts/cns11643/d.png                          fonts/fonts-cns11643-pixmaps
usr/share/doc/sumo/index.html                           science/sumo-doc,science/sumo
usr/lib/x86_64-linux-gnu/libfoo.so.1                    non-free/libs/libfoo1
garbage-line-without-separator
";

fn gzip(data: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(data).unwrap();
    encoder.finish().unwrap()
}

fn expected_ranking() -> Vec<RankedEntry> {
    vec![
        RankedEntry::new("fonts-cns11643-pixmaps", 4),
        RankedEntry::new("ash", 3),
        RankedEntry::new("busybox", 1),
        RankedEntry::new("libfoo1", 1),
        RankedEntry::new("sumo", 1),
        RankedEntry::new("sumo-doc", 1),
    ]
}

/// Serve a single HTTP response on a loopback port. Returns the base URL.
fn serve_once(status_line: &'static str, body: Vec<u8>) -> (String, thread::JoinHandle<String>) {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();

    let handle = thread::spawn(move || {
        let (stream, _) = listener.accept().unwrap();
        let mut reader = BufReader::new(stream.try_clone().unwrap());

        let mut request_line = String::new();
        reader.read_line(&mut request_line).unwrap();
        loop {
            let mut header = String::new();
            reader.read_line(&mut header).unwrap();
            if header == "\r\n" || header.is_empty() {
                break;
            }
        }

        let mut stream = stream;
        write!(
            stream,
            "HTTP/1.1 {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n",
            status_line,
            body.len()
        )
        .unwrap();
        stream.write_all(&body).unwrap();
        stream.flush().unwrap();

        request_line
    });

    (format!("http://{}", addr), handle)
}

// ============================================================================
// Integration Tests
// ============================================================================

#[test]
fn test_local_gzip_and_plain_rank_identically() {
    let dir = TempDir::new().unwrap();
    let plain = dir.path().join("Contents-all");
    let compressed = dir.path().join("Contents-all.gz");
    std::fs::write(&plain, CONTENTS).unwrap();
    File::create(&compressed)
        .unwrap()
        .write_all(&gzip(CONTENTS.as_bytes()))
        .unwrap();

    let config = StatsConfig::default();
    let from_plain =
        package_statistics(&LocalSource::new(&plain), Architecture::All, &config).unwrap();
    let from_gzip =
        package_statistics(&LocalSource::new(&compressed), Architecture::All, &config).unwrap();

    assert_eq!(from_plain, from_gzip);
    assert_eq!(from_plain.ranking, expected_ranking());
    assert_eq!(from_plain.stats.lines, 11);
    assert_eq!(from_plain.stats.malformed, 1);
    assert_eq!(from_plain.stats.associations, 11);
}

#[test]
fn test_sum_of_counts_equals_associations() {
    let result = scan(CONTENTS.as_bytes()).unwrap();
    assert_eq!(result.counts.total(), result.stats.associations);
    assert_eq!(top(&result.counts, 100).len(), result.counts.len());
}

#[test]
fn test_http_download_and_cleanup() {
    let (base, server) = serve_once("200 OK", gzip(CONTENTS.as_bytes()));
    let temp = TempDir::new().unwrap();
    let config = StatsConfig::default()
        .with_mirror(format!("{}/debian", base))
        .with_temp_dir(temp.path().to_path_buf());

    let source = HttpSource::new(config).unwrap();
    let mut stream = source.open(Architecture::Arm64).unwrap();

    let download = stream.download_path().unwrap().to_path_buf();
    assert!(download.exists());
    assert!(download.starts_with(temp.path()));

    let mut text = String::new();
    stream.read_to_string(&mut text).unwrap();
    assert_eq!(text, CONTENTS);

    drop(stream);
    assert!(!download.exists(), "temporary download should be removed");

    let request = server.join().unwrap();
    assert_eq!(
        request.trim_end(),
        "GET /debian/dists/stable/main/Contents-arm64.gz HTTP/1.1"
    );
}

#[test]
fn test_http_pipeline_ranking() {
    let (base, server) = serve_once("200 OK", gzip(CONTENTS.as_bytes()));
    let temp = TempDir::new().unwrap();
    let config = StatsConfig::default()
        .with_mirror(base)
        .with_temp_dir(temp.path().to_path_buf())
        .with_top(2);

    let source = HttpSource::new(config.clone()).unwrap();
    let result = package_statistics(&source, Architecture::Amd64, &config).unwrap();
    server.join().unwrap();

    assert_eq!(result.ranking, expected_ranking()[..2].to_vec());
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_http_not_found_is_acquisition_failure() {
    let (base, server) = serve_once("404 Not Found", b"missing".to_vec());
    let temp = TempDir::new().unwrap();
    let config = StatsConfig::default()
        .with_mirror(base)
        .with_temp_dir(temp.path().to_path_buf());

    let source = HttpSource::new(config.clone()).unwrap();
    let err = package_statistics(&source, Architecture::I386, &config).unwrap_err();
    server.join().unwrap();

    assert!(matches!(
        err,
        StatsError::Acquisition(SourceError::HttpStatus { status: 404, .. })
    ));
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_corrupt_archive_is_acquisition_failure() {
    let mut corrupt = gzip(CONTENTS.as_bytes());
    let len = corrupt.len();
    corrupt.truncate(len / 2);

    let (base, server) = serve_once("200 OK", corrupt);
    let temp = TempDir::new().unwrap();
    let config = StatsConfig::default()
        .with_mirror(base)
        .with_temp_dir(temp.path().to_path_buf());

    let source = HttpSource::new(config.clone()).unwrap();
    let err = package_statistics(&source, Architecture::All, &config).unwrap_err();
    server.join().unwrap();

    assert!(matches!(err, StatsError::Acquisition(SourceError::Stream(_))));
    assert_eq!(std::fs::read_dir(temp.path()).unwrap().count(), 0);
}

#[test]
fn test_invalid_architecture_is_parse_error() {
    let err = "bogus".parse::<Architecture>().unwrap_err();
    assert!(matches!(err, StatsError::InvalidArchitecture(ref a) if a == "bogus"));
    assert!(err.to_string().contains("amd64"));
}
