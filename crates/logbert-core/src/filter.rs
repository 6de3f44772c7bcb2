//! Severity filter: keep records at or above a minimum level

use crate::LogRecord;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

/// Minimum severity selected by the user. DEBUG lines are only reachable
/// through `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum LevelFilter {
    #[default]
    All,
    Error,
    Warn,
    Info,
}

impl LevelFilter {
    /// Resolve a filter name (case-insensitive). Unrecognised names keep
    /// everything, they are never an error.
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "all" => Self::All,
            "error" => Self::Error,
            "warn" => Self::Warn,
            "info" => Self::Info,
            other => {
                debug!(filter = other, "unknown level filter, keeping all records");
                Self::All
            }
        }
    }

    pub fn min_rank(self) -> u8 {
        match self {
            Self::All => 0,
            Self::Info => 1,
            Self::Warn => 2,
            Self::Error => 3,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Error => "error",
            Self::Warn => "warn",
            Self::Info => "info",
        }
    }
}

impl From<String> for LevelFilter {
    fn from(name: String) -> Self {
        Self::from_name(&name)
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filter by level name, the string-typed entry point
pub fn filter_by_level(records: Vec<LogRecord>, level_filter: &str) -> Vec<LogRecord> {
    filter_records(records, LevelFilter::from_name(level_filter))
}

pub fn filter_records(records: Vec<LogRecord>, filter: LevelFilter) -> Vec<LogRecord> {
    if filter == LevelFilter::All {
        return records;
    }
    let min_rank = filter.min_rank();
    records
        .into_iter()
        .filter(|r| r.level.rank() >= min_rank)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parse;

    #[test]
    fn test_from_name() {
        assert_eq!(LevelFilter::from_name("ERROR"), LevelFilter::Error);
        assert_eq!(LevelFilter::from_name("Warn"), LevelFilter::Warn);
        assert_eq!(LevelFilter::from_name("info"), LevelFilter::Info);
        assert_eq!(LevelFilter::from_name("all"), LevelFilter::All);
        assert_eq!(LevelFilter::from_name("debug"), LevelFilter::All);
        assert_eq!(LevelFilter::from_name("verbose"), LevelFilter::All);
    }

    #[test]
    fn test_info_filter_drops_debug() {
        let records = parse("DEBUG a\nINFO b\nno level\nWARN c");
        let kept = filter_by_level(records, "info");
        let lines: Vec<&str> = kept.iter().map(|r| r.raw_text.as_str()).collect();
        assert_eq!(lines, vec!["INFO b", "no level", "WARN c"]);
    }

    #[test]
    fn test_unknown_filter_keeps_all() {
        let records = parse("DEBUG a\nERROR b");
        assert_eq!(filter_by_level(records.clone(), "nonsense"), records);
    }
}
