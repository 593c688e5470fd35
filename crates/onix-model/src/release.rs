use std::fmt;

use serde::{Deserialize, Serialize};

/// Declared ONIX release of a document, e.g. `"2.1"` or `"3.0"`.
///
/// Only the integer major part takes part in comparisons; it is read from
/// the leading digits of the attribute, so `"3.0"` is 3 and a value without
/// leading digits is 0.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReleaseVersion {
    raw: String,
    major: u32,
}

/// Mapping rules family selected by the release major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OnixBand {
    /// Releases in `[2, 3)`.
    V2,
    /// Releases in `[3, 4)`.
    V3,
}

impl ReleaseVersion {
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
        let major = digits.parse::<u32>().unwrap_or(0);
        Self {
            raw: trimmed.to_string(),
            major,
        }
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    /// Band of mapping rules for this release, `None` when unsupported.
    pub fn band(&self) -> Option<OnixBand> {
        match self.major {
            2 => Some(OnixBand::V2),
            3 => Some(OnixBand::V3),
            _ => None,
        }
    }
}

impl fmt::Display for ReleaseVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl OnixBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::V2 => "ONIX 2.x",
            Self::V3 => "ONIX 3.x",
        }
    }
}

impl fmt::Display for OnixBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
