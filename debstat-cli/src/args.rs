//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

/// Rank Debian packages by the number of files they install.
///
/// Downloads the Contents index for ARCH from a Debian mirror and prints the
/// packages owning the most files.
#[derive(Debug, Parser)]
#[command(name = "debstat", version)]
pub struct Cli {
    /// Architecture to inspect (all, amd64, arm64, armel, armhf, i386,
    /// mips64el, mipsel, ppc64el, s390x). Prompted for when omitted.
    pub arch: Option<String>,

    /// Number of packages to report
    #[arg(short = 'n', long)]
    pub top: Option<usize>,

    /// Debian mirror base URL
    #[arg(long)]
    pub mirror: Option<String>,

    /// Distribution suite (e.g. stable, testing, bookworm)
    #[arg(long)]
    pub suite: Option<String>,

    /// Archive component (e.g. main, contrib, non-free)
    #[arg(long)]
    pub component: Option<String>,

    /// HTTP timeout in seconds
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    pub timeout: Option<u64>,

    /// Read a local Contents file (gzip or plain) instead of downloading
    #[arg(long, value_name = "PATH")]
    pub file: Option<PathBuf>,

    /// Fold the index on all CPU cores
    #[arg(long)]
    pub parallel: bool,

    /// Configuration file (default: <config dir>/debstat/config.ini)
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Hide the download progress bar
    #[arg(short, long)]
    pub quiet: bool,
}
