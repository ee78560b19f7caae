//! debstat CLI - command-line interface
//!
//! Prints the packages of a Debian Contents index that own the most files,
//! one `"<rank>. <package> <count>"` line each.

mod args;
mod common;
mod error;
mod progress;

use std::io::{self, Write};
use std::process::ExitCode;

use clap::Parser;
use debstat::config::StatsConfig;
use debstat::report::write_ranking;
use debstat::source::{ContentsSource, HttpSource, LocalSource};
use debstat::{package_statistics, Architecture};
use tracing::debug;

use args::Cli;
use common::{resolve_architecture, resolve_config};
use error::CliError;
use progress::DownloadProgress;

fn main() -> ExitCode {
    let cli = Cli::parse();
    debstat::logging::init(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

fn run(cli: &Cli) -> Result<(), CliError> {
    let mut progress = None;
    let stdout = io::stdout();
    let result = execute(
        cli,
        |config, arch| open_source(cli, config, arch, &mut progress),
        &mut stdout.lock(),
    );
    if let Some(progress) = progress {
        progress.finish();
    }
    result
}

/// Pick the Contents source: a local file with `--file`, the mirror otherwise.
fn open_source(
    cli: &Cli,
    config: &StatsConfig,
    arch: Architecture,
    progress: &mut Option<DownloadProgress>,
) -> Result<Box<dyn ContentsSource>, CliError> {
    match cli.file {
        Some(ref path) => Ok(Box::new(LocalSource::new(path))),
        None => {
            let bar = DownloadProgress::new(arch.contents_file_name(), cli.quiet);
            let source = HttpSource::new(config.clone())?.with_progress(bar.callback());
            *progress = Some(bar);
            Ok(Box::new(source))
        }
    }
}

/// Resolve the architecture and settings, rank the packages, write the report.
///
/// The architecture is validated before the config is loaded or a source
/// is created.
fn execute<F, W>(cli: &Cli, source_for: F, out: &mut W) -> Result<(), CliError>
where
    F: FnOnce(&StatsConfig, Architecture) -> Result<Box<dyn ContentsSource>, CliError>,
    W: Write,
{
    let arch = resolve_architecture(cli.arch.as_deref())?;
    let config = resolve_config(cli)?;
    debug!(arch = %arch, ?config, "Resolved settings");

    let source = source_for(&config, arch)?;
    debug!(source = %source.describe(arch), "Reading Contents index");
    let statistics = package_statistics(source.as_ref(), arch, &config)?;

    write_ranking(out, &statistics.ranking)?;
    out.flush()?;
    Ok(())
}
