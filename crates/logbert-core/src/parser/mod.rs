//! log parser - turn a raw text blob into structured records

pub mod plain;

pub use plain::PlainTextParser;

use crate::LogRecord;
use std::sync::LazyLock;

static DEFAULT_PARSER: LazyLock<PlainTextParser> = LazyLock::new(PlainTextParser::new);

// Parser trait - every line format implements this.
// Parsing never fails: a line that matches nothing still becomes a record
// with fallback values.
pub trait LogParser: Send + Sync {
    fn name(&self) -> &'static str;
    fn parse_line(&self, line: &str) -> LogRecord;

    // split on newline, drop blank lines, keep the order of the rest
    fn parse_text(&self, raw_text: &str) -> Vec<LogRecord> {
        raw_text
            .split('\n')
            .filter(|line| !line.trim().is_empty())
            .map(|line| self.parse_line(line))
            .collect()
    }
}

/// Parse a raw text blob with the default plain-text parser
pub fn parse(raw_text: &str) -> Vec<LogRecord> {
    DEFAULT_PARSER.parse_text(raw_text)
}
