//! Debian architectures that publish a Contents index.

use std::fmt;
use std::str::FromStr;

use crate::error::StatsError;

/// A processor architecture accepted by the archive.
///
/// `All` is the architecture-independent index (`Contents-all.gz`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Architecture {
    All,
    Amd64,
    Arm64,
    Armel,
    Armhf,
    I386,
    Mips64el,
    Mipsel,
    Ppc64el,
    S390x,
}

impl Architecture {
    /// Every supported architecture, in archive listing order.
    pub const ALL: [Architecture; 10] = [
        Architecture::All,
        Architecture::Amd64,
        Architecture::Arm64,
        Architecture::Armel,
        Architecture::Armhf,
        Architecture::I386,
        Architecture::Mips64el,
        Architecture::Mipsel,
        Architecture::Ppc64el,
        Architecture::S390x,
    ];

    /// The identifier used in archive file names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Architecture::All => "all",
            Architecture::Amd64 => "amd64",
            Architecture::Arm64 => "arm64",
            Architecture::Armel => "armel",
            Architecture::Armhf => "armhf",
            Architecture::I386 => "i386",
            Architecture::Mips64el => "mips64el",
            Architecture::Mipsel => "mipsel",
            Architecture::Ppc64el => "ppc64el",
            Architecture::S390x => "s390x",
        }
    }

    /// File name of the compressed Contents index for this architecture.
    pub fn contents_file_name(&self) -> String {
        format!("Contents-{}.gz", self.as_str())
    }

    /// Comma-separated list of accepted identifiers, for error messages.
    pub fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(Architecture::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for Architecture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Architecture {
    type Err = StatsError;

    /// Matching is exact: identifiers are lowercase in the archive.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|arch| arch.as_str() == s)
            .ok_or_else(|| StatsError::InvalidArchitecture(s.to_string()))
    }
}
