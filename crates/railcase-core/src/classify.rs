//! Platform classification of test documentation.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::OnceLock;

/// Target platform of a case, as the remote `custom_operating_system` code.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Platform {
    /// Unspecified; the remote treats it as Windows.
    #[default]
    Default,
    Mac,
    Linux,
}

impl Platform {
    /// Numeric code used on the wire and in the delimited file.
    pub fn code(self) -> u8 {
        match self {
            Self::Default => 1,
            Self::Mac => 2,
            Self::Linux => 3,
        }
    }

    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(Self::Default),
            2 => Some(Self::Mac),
            3 => Some(Self::Linux),
            _ => None,
        }
    }
}

impl From<Platform> for u8 {
    fn from(platform: Platform) -> Self {
        platform.code()
    }
}

impl TryFrom<u8> for Platform {
    type Error = String;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| format!("unknown platform code {}", code))
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Default => write!(f, "default"),
            Self::Mac => write!(f, "mac"),
            Self::Linux => write!(f, "linux"),
        }
    }
}

fn mac_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(?:osx|darwin|macos|macosx)").expect("mac pattern is valid")
    })
}

fn linux_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"(?i)(?:linux|unix|amazon|centos|ubuntu|debian|fedora|opensuse|rhel)")
            .expect("linux pattern is valid")
    })
}

/// Classify a doc comment by platform keywords.
///
/// Matching is case-insensitive and by substring. Mac keywords take
/// precedence over Linux keywords.
pub fn classify(doc: &str) -> Platform {
    if mac_pattern().is_match(doc) {
        Platform::Mac
    } else if linux_pattern().is_match(doc) {
        Platform::Linux
    } else {
        Platform::Default
    }
}
