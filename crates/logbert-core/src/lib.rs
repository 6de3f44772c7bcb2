//! Core types for the LogBERT log analysis engine
//! this crate holds the record types shared by the detector and the CLI.
pub mod filter;
pub mod parser;

pub use filter::{filter_by_level, filter_records, LevelFilter};
pub use parser::{parse, LogParser, PlainTextParser};

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Timestamp value used when a line carries no `YYYY-MM-DD HH:MM:SS` stamp
pub const UNKNOWN_TIMESTAMP: &str = "Unknown";

/// Format of the timestamps recognised inside a line
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// LOG LEVEL //

/// Log severity levels (ordered from lowest to highest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
    Error,
}

impl LogLevel {
    pub const ALL: [LogLevel; 4] = [
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
    ];

    /// Severity rank: DEBUG(0) < INFO(1) < WARN(2) < ERROR(3)
    pub fn rank(self) -> u8 {
        match self {
            LogLevel::Debug => 0,
            LogLevel::Info => 1,
            LogLevel::Warn => 2,
            LogLevel::Error => 3,
        }
    }

    /// The token as it appears in a log line
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Debug => "DEBUG",
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownLevel(pub String);

impl fmt::Display for UnknownLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown log level: {}", self.0)
    }
}

impl std::error::Error for UnknownLevel {}

impl FromStr for LogLevel {
    type Err = UnknownLevel;

    /// Parse log level from string (case-insensitive)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warn" | "warning" => Ok(Self::Warn),
            "error" | "err" => Ok(Self::Error),
            _ => Err(UnknownLevel(s.to_string())),
        }
    }
}

// LOG RECORD //

/// One non-blank input line after parsing.
///
/// Records are rebuilt from the raw text on every analysis run and never
/// mutated, so they carry no identity beyond their position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// the original line, untouched
    #[serde(rename = "line")]
    pub raw_text: String,

    /// first `YYYY-MM-DD HH:MM:SS` in the line, or [`UNKNOWN_TIMESTAMP`]
    pub timestamp: String,

    /// first whole-word level token, INFO when none is present
    pub level: LogLevel,
}

impl LogRecord {
    /// Timestamp as a chrono value, `None` for the `"Unknown"` sentinel
    /// or a stamp that is not a real calendar time (e.g. month 13).
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        if self.timestamp == UNKNOWN_TIMESTAMP {
            return None;
        }
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }

    pub fn has_timestamp(&self) -> bool {
        self.timestamp != UNKNOWN_TIMESTAMP
    }
}
