//! HAL interface revisions

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A HAL callback interface revision
///
/// Revisions are totally ordered; a HAL that implements a revision also
/// implements every revision below it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum HalRevision {
    #[default]
    #[serde(rename = "1.0")]
    V1_0,
    #[serde(rename = "1.2")]
    V1_2,
    #[serde(rename = "1.5")]
    V1_5,
    #[serde(rename = "1.6")]
    V1_6,
}

impl HalRevision {
    /// All revisions, lowest first
    pub const ALL: [HalRevision; 4] = [
        HalRevision::V1_0,
        HalRevision::V1_2,
        HalRevision::V1_5,
        HalRevision::V1_6,
    ];

    /// Dotted version string, e.g. `"1.6"`
    pub fn as_str(&self) -> &'static str {
        match self {
            HalRevision::V1_0 => "1.0",
            HalRevision::V1_2 => "1.2",
            HalRevision::V1_5 => "1.5",
            HalRevision::V1_6 => "1.6",
        }
    }

    /// Compact encoding used for atomic storage
    pub fn to_u8(self) -> u8 {
        match self {
            HalRevision::V1_0 => 0,
            HalRevision::V1_2 => 1,
            HalRevision::V1_5 => 2,
            HalRevision::V1_6 => 3,
        }
    }

    /// Inverse of [`HalRevision::to_u8`]
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(HalRevision::V1_0),
            1 => Some(HalRevision::V1_2),
            2 => Some(HalRevision::V1_5),
            3 => Some(HalRevision::V1_6),
            _ => None,
        }
    }
}

impl fmt::Display for HalRevision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a revision string is not recognized
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown HAL revision '{0}' (expected one of 1.0, 1.2, 1.5, 1.6)")]
pub struct RevisionParseError(pub String);

impl FromStr for HalRevision {
    type Err = RevisionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let trimmed = trimmed
            .strip_prefix(['v', 'V'])
            .unwrap_or(trimmed);
        match trimmed.replace('_', ".").as_str() {
            "1.0" | "1" => Ok(HalRevision::V1_0),
            "1.2" => Ok(HalRevision::V1_2),
            "1.5" => Ok(HalRevision::V1_5),
            "1.6" => Ok(HalRevision::V1_6),
            _ => Err(RevisionParseError(s.to_string())),
        }
    }
}
