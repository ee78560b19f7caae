//! Resolution of settings from CLI arguments, config file and prompt.

use std::io::{self, BufRead, IsTerminal, Write};
use std::time::Duration;

use console::Term;
use debstat::config::StatsConfig;
use debstat::Architecture;
use dialoguer::Input;

use crate::args::Cli;
use crate::error::CliError;

/// Prompt shown when no architecture was passed on the command line.
const ARCH_PROMPT: &str = "Input contents architecture";

/// Resolve scan settings. CLI takes precedence, then config, then defaults.
pub fn resolve_config(cli: &Cli) -> Result<StatsConfig, CliError> {
    let mut config = StatsConfig::load(cli.config.as_deref())?;

    if let Some(ref mirror) = cli.mirror {
        config = config.with_mirror(mirror.clone());
    }
    if let Some(ref suite) = cli.suite {
        config = config.with_suite(suite.clone());
    }
    if let Some(ref component) = cli.component {
        config = config.with_component(component.clone());
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(Duration::from_secs(timeout));
    }
    if let Some(top) = cli.top {
        config = config.with_top(top);
    }
    if cli.parallel {
        config = config.with_parallel(true);
    }

    Ok(config)
}

/// Validate an architecture identifier against the allow-list.
pub fn parse_architecture(input: &str) -> Result<Architecture, CliError> {
    input.parse::<Architecture>().map_err(CliError::from)
}

/// Take the architecture from the CLI, or ask for it.
///
/// An interactive session gets a dialoguer prompt. Piped input is read as a
/// single line from stdin.
pub fn resolve_architecture(cli_arch: Option<&str>) -> Result<Architecture, CliError> {
    if let Some(arch) = cli_arch {
        return parse_architecture(arch);
    }

    let stderr = Term::stderr();
    if stderr.is_term() && io::stdin().is_terminal() {
        let answer = Input::<String>::new()
            .with_prompt(ARCH_PROMPT)
            .interact_text_on(&stderr)
            .map_err(|e| CliError::Prompt(e.to_string()))?;
        return parse_architecture(answer.trim());
    }

    eprint!("{}: ", ARCH_PROMPT);
    io::stderr().flush().ok();
    read_architecture(io::stdin().lock())
}

/// Read one architecture identifier from a line of `input`.
pub fn read_architecture(mut input: impl BufRead) -> Result<Architecture, CliError> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| CliError::Prompt(e.to_string()))?;
    if read == 0 {
        return Err(CliError::Prompt("no architecture given".to_string()));
    }
    parse_architecture(line.trim())
}
