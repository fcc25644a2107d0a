use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

use crate::error::Error;

/// Lifecycle stage recorded with a journal entry.
///
/// Input is accepted case-insensitively; the canonical serialized form is
/// uppercase.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Status {
    #[default]
    #[serde(rename = "WIP")]
    Wip,
    #[serde(rename = "BETA")]
    Beta,
    #[serde(rename = "C")]
    Complete,
    #[serde(rename = "R")]
    Released,
}

impl Status {
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Wip => "WIP",
            Status::Beta => "BETA",
            Status::Complete => "C",
            Status::Released => "R",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = Error;

    fn from_str(source: &str) -> Result<Self, Self::Err> {
        match source.trim().to_uppercase().as_str() {
            "WIP" => Ok(Status::Wip),
            "BETA" => Ok(Status::Beta),
            "C" => Ok(Status::Complete),
            "R" => Ok(Status::Released),
            _ => Err(Error::InvalidStatus(source.trim().to_string())),
        }
    }
}

/// A single revision recorded in a project journal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    /// One-based revision number, assigned by counting the entries already
    /// recorded in the journal.
    pub revision: u32,
    /// Local date-time with UTC offset and location code, for example
    /// `2026-08-30T12:00:00+02:00@EARTH`.
    pub timestamp: String,
    /// Lifecycle status at the time of the revision.
    pub status: Status,
    /// Individual change descriptions, trimmed and non-empty. May be empty.
    pub changes: Vec<String>,
}
