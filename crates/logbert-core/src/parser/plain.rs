// Plain text log parser: free-form lines with optional embedded tokens
// e.g. "2024-01-15 10:30:45 ERROR Database connection failed"

use super::LogParser;
use crate::{LogLevel, LogRecord, UNKNOWN_TIMESTAMP};
use regex::Regex;

pub struct PlainTextParser {
    // YYYY-MM-DD HH:MM:SS anywhere in the line
    timestamp_pattern: Regex,
    // Level as a whole word (ASCII word boundary), uppercase only
    level_pattern: Regex,
}

impl PlainTextParser {
    pub fn new() -> Self {
        Self {
            timestamp_pattern: Regex::new(r"[0-9]{4}-[0-9]{2}-[0-9]{2} [0-9]{2}:[0-9]{2}:[0-9]{2}")
                .expect("timestamp pattern is valid"),
            level_pattern: Regex::new(r"(?-u:\b)(DEBUG|INFO|WARN|ERROR)(?-u:\b)")
                .expect("level pattern is valid"),
        }
    }

    pub fn extract_timestamp(&self, line: &str) -> String {
        self.timestamp_pattern
            .find(line)
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| UNKNOWN_TIMESTAMP.to_string())
    }

    pub fn extract_level(&self, line: &str) -> LogLevel {
        let Some(m) = self.level_pattern.find(line) else {
            return LogLevel::Info;
        };
        match m.as_str() {
            "DEBUG" => LogLevel::Debug,
            "WARN" => LogLevel::Warn,
            "ERROR" => LogLevel::Error,
            _ => LogLevel::Info,
        }
    }
}

impl Default for PlainTextParser {
    fn default() -> Self {
        Self::new()
    }
}

impl LogParser for PlainTextParser {
    fn name(&self) -> &'static str {
        "plain"
    }

    fn parse_line(&self, line: &str) -> LogRecord {
        LogRecord {
            raw_text: line.to_string(),
            timestamp: self.extract_timestamp(line),
            level: self.extract_level(line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_level_wins() {
        let parser = PlainTextParser::new();
        let record = parser.parse_line("WARN retry after ERROR on upstream");
        assert_eq!(record.level, LogLevel::Warn);
    }

    #[test]
    fn test_level_must_be_whole_word() {
        let parser = PlainTextParser::new();
        // WARNING and ERRORS are not level tokens, lowercase is ignored
        assert_eq!(parser.extract_level("WARNING disk nearly full"), LogLevel::Info);
        assert_eq!(parser.extract_level("3 ERRORS found"), LogLevel::Info);
        assert_eq!(parser.extract_level("error: lowercase"), LogLevel::Info);
        assert_eq!(parser.extract_level("[DEBUG] cache warm"), LogLevel::Debug);
    }

    #[test]
    fn test_non_ascii_letter_is_a_boundary() {
        let parser = PlainTextParser::new();
        let record = parser.parse_line("2024-01-15 10:30:45 éERROR disk failed");
        assert_eq!(record.level, LogLevel::Error);
        assert_eq!(parser.extract_level("naïveWARN"), LogLevel::Warn);
    }

    #[test]
    fn test_timestamp_anywhere_in_line() {
        let parser = PlainTextParser::new();
        assert_eq!(
            parser.extract_timestamp("node-3 | 2024-01-15 10:30:45 | ERROR x"),
            "2024-01-15 10:30:45"
        );
        assert_eq!(parser.extract_timestamp("2024/01/15 10:30:45 ERROR x"), UNKNOWN_TIMESTAMP);
        assert_eq!(parser.extract_timestamp("2024-01-15T10:30:45 ERROR x"), UNKNOWN_TIMESTAMP);
    }

    #[test]
    fn test_malformed_line_degrades() {
        let parser = PlainTextParser::new();
        let record = parser.parse_line("something odd happened");
        assert_eq!(record.timestamp, UNKNOWN_TIMESTAMP);
        assert_eq!(record.level, LogLevel::Info);
        assert_eq!(record.raw_text, "something odd happened");
    }
}
