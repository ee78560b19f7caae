//! Runtime configuration.
//!
//! Settings come from three layers, highest precedence first: command-line
//! flags, the INI configuration file, built-in defaults. This module owns the
//! last two; the CLI applies its flags on top with the `with_*` builders.
//!
//! ```ini
//! [source]
//! mirror = https://deb.debian.org/debian
//! suite = stable
//! component = main
//!
//! [download]
//! timeout = 300
//!
//! [report]
//! top = 10
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use ini::Ini;
use thiserror::Error;
use tracing::debug;

use crate::arch::Architecture;

/// Default Debian mirror.
pub const DEFAULT_MIRROR: &str = "https://ftp.uk.debian.org/debian";

/// Default distribution suite.
pub const DEFAULT_SUITE: &str = "stable";

/// Default archive component.
pub const DEFAULT_COMPONENT: &str = "main";

/// Default HTTP timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300; // 5 minutes

/// Default number of packages in the report.
pub const DEFAULT_TOP: usize = 10;

/// Errors raised while loading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read or parsed.
    #[error("failed to load {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },

    /// A setting has an unusable value.
    #[error("invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// Configuration for a Contents scan.
#[derive(Debug, Clone)]
pub struct StatsConfig {
    /// Base URL of the Debian mirror, e.g. `https://deb.debian.org/debian`.
    pub mirror: String,

    /// Distribution suite (`stable`, `bookworm`, ...).
    pub suite: String,

    /// Archive component (`main`, `contrib`, `non-free`).
    pub component: String,

    /// HTTP request timeout.
    pub timeout: Duration,

    /// Number of packages to report.
    pub top: usize,

    /// Directory for the temporary download. System temp dir when `None`.
    pub temp_dir: Option<PathBuf>,

    /// Fold the stream on the rayon pool instead of sequentially.
    pub parallel: bool,
}

impl Default for StatsConfig {
    fn default() -> Self {
        Self {
            mirror: DEFAULT_MIRROR.to_string(),
            suite: DEFAULT_SUITE.to_string(),
            component: DEFAULT_COMPONENT.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            top: DEFAULT_TOP,
            temp_dir: None,
            parallel: false,
        }
    }
}

impl StatsConfig {
    /// URL of the compressed Contents index for `arch`.
    pub fn contents_url(&self, arch: Architecture) -> String {
        format!(
            "{}/dists/{}/{}/{}",
            self.mirror.trim_end_matches('/'),
            self.suite,
            self.component,
            arch.contents_file_name()
        )
    }

    /// Set the mirror base URL.
    pub fn with_mirror(mut self, mirror: impl Into<String>) -> Self {
        self.mirror = mirror.into();
        self
    }

    /// Set the distribution suite.
    pub fn with_suite(mut self, suite: impl Into<String>) -> Self {
        self.suite = suite.into();
        self
    }

    /// Set the archive component.
    pub fn with_component(mut self, component: impl Into<String>) -> Self {
        self.component = component.into();
        self
    }

    /// Set the HTTP timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the number of packages to report.
    pub fn with_top(mut self, top: usize) -> Self {
        self.top = top;
        self
    }

    /// Set the temporary download directory.
    pub fn with_temp_dir(mut self, dir: PathBuf) -> Self {
        self.temp_dir = Some(dir);
        self
    }

    /// Enable or disable the parallel fold.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Load configuration.
    ///
    /// An explicit `path` must exist. Without one, the default location is
    /// used if present, otherwise built-in defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::from_file(path),
            None => match default_config_path() {
                Some(path) if path.is_file() => Self::from_file(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    /// Load configuration from an INI file on top of the defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        debug!(path = %path.display(), "Loading configuration");
        let ini = Ini::load_from_file(path).map_err(|e| ConfigError::Load {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::default().apply_ini(&ini)
    }

    /// Overlay the settings present in `ini`. Unknown keys are ignored.
    pub fn apply_ini(mut self, ini: &Ini) -> Result<Self, ConfigError> {
        if let Some(section) = ini.section(Some("source")) {
            if let Some(mirror) = section.get("mirror") {
                self.mirror = non_empty("source.mirror", mirror)?;
            }
            if let Some(suite) = section.get("suite") {
                self.suite = non_empty("source.suite", suite)?;
            }
            if let Some(component) = section.get("component") {
                self.component = non_empty("source.component", component)?;
            }
        }

        if let Some(section) = ini.section(Some("download")) {
            if let Some(timeout) = section.get("timeout") {
                let secs: u64 = parse_number("download.timeout", timeout)?;
                if secs == 0 {
                    return Err(invalid("download.timeout", timeout, "must be positive"));
                }
                self.timeout = Duration::from_secs(secs);
            }
            if let Some(dir) = section.get("temp_dir") {
                self.temp_dir = Some(PathBuf::from(non_empty("download.temp_dir", dir)?));
            }
        }

        if let Some(section) = ini.section(Some("report")) {
            if let Some(top) = section.get("top") {
                self.top = parse_number("report.top", top)?;
            }
            if let Some(parallel) = section.get("parallel") {
                self.parallel = parse_bool("report.parallel", parallel)?;
            }
        }

        Ok(self)
    }
}

/// Default configuration file location: `<config_dir>/debstat/config.ini`.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("debstat").join("config.ini"))
}

fn invalid(key: &str, value: &str, reason: &str) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

fn non_empty(key: &str, value: &str) -> Result<String, ConfigError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(invalid(key, value, "must not be empty"));
    }
    Ok(value.to_string())
}

fn parse_number<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .trim()
        .parse()
        .map_err(|e: T::Err| invalid(key, value, &e.to_string()))
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(invalid(key, value, "expected true or false")),
    }
}
