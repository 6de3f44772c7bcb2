use logbert_core::{filter_by_level, parse, LevelFilter, LogLevel, LogParser, PlainTextParser, UNKNOWN_TIMESTAMP};
use proptest::prelude::*;

const MIXED_LOGS: &str = "2024-01-15 10:30:22 INFO Application started successfully
2024-01-15 10:30:45 ERROR Database connection failed - timeout after 30s
2024-01-15 10:31:00 WARN Retrying connection attempt 1/3
2024-01-15 10:31:05 DEBUG pool size=10
2024-01-15 10:31:15 INFO Connection established successfully
2024-01-15 10:32:00 ERROR Memory usage exceeded 90% threshold
2024-01-15 10:32:30 WARN Garbage collection triggered";

// ============ PARSER TESTS ============

#[test]
fn test_parse_sample_block() {
    let records = parse(MIXED_LOGS);

    assert_eq!(records.len(), 7);
    assert_eq!(records[1].timestamp, "2024-01-15 10:30:45");
    assert_eq!(records[1].level, LogLevel::Error);
    assert_eq!(
        records[1].raw_text,
        "2024-01-15 10:30:45 ERROR Database connection failed - timeout after 30s"
    );
    assert_eq!(records[3].level, LogLevel::Debug);
}

#[test]
fn test_parser_fallback() {
    let parser = PlainTextParser::new();
    assert_eq!(parser.name(), "plain");

    // Invalid format falls back, never errors
    let raw = "random text that doesnt match";
    let record = parser.parse_line(raw);

    assert_eq!(record.raw_text, raw);
    assert_eq!(record.timestamp, UNKNOWN_TIMESTAMP);
    assert_eq!(record.level, LogLevel::Info);
}

#[test]
fn test_windows_line_endings_are_kept_in_raw_text() {
    let records = parse("INFO a\r\nERROR b\r\n");
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].raw_text, "INFO a\r");
    assert_eq!(records[1].level, LogLevel::Error);
}

#[test]
fn test_record_serializes_with_line_field() {
    let record = parse("2024-01-15 10:30:45 WARN slow query").remove(0);
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["line"], "2024-01-15 10:30:45 WARN slow query");
    assert_eq!(json["level"], "WARN");
    assert_eq!(json["timestamp"], "2024-01-15 10:30:45");
}

// ============ FILTER TESTS ============

#[test]
fn test_warn_filter_keeps_warn_and_error_in_order() {
    let filtered = filter_by_level(parse(MIXED_LOGS), "warn");
    let levels: Vec<LogLevel> = filtered.iter().map(|r| r.level).collect();

    assert_eq!(
        levels,
        vec![LogLevel::Error, LogLevel::Warn, LogLevel::Error, LogLevel::Warn]
    );
    assert!(filtered[0].raw_text.contains("Database connection failed"));
    assert!(filtered[3].raw_text.contains("Garbage collection"));
}

#[test]
fn test_all_filter_is_identity() {
    let records = parse(MIXED_LOGS);
    assert_eq!(logbert_core::filter_records(records.clone(), LevelFilter::All), records);
}

// ============ PROPERTIES ============

fn log_line() -> impl Strategy<Value = String> {
    let level = prop_oneof![
        Just("DEBUG"),
        Just("INFO"),
        Just("WARN"),
        Just("ERROR"),
        Just("")
    ];
    (level, "[a-z ]{0,30}").prop_map(|(level, msg)| format!("{} {}", level, msg))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_one_record_per_non_blank_line(lines in prop::collection::vec(log_line(), 0..40)) {
        let raw = lines.join("\n");
        let records = parse(&raw);
        let expected: Vec<&str> = raw.split('\n').filter(|l| !l.trim().is_empty()).collect();

        prop_assert_eq!(records.len(), expected.len());
        for (record, line) in records.iter().zip(expected) {
            prop_assert_eq!(record.raw_text.as_str(), line);
        }
    }

    #[test]
    fn prop_error_filter_is_order_preserving_subsequence(lines in prop::collection::vec(log_line(), 0..40)) {
        let records = parse(&lines.join("\n"));
        let filtered = filter_by_level(records.clone(), "error");

        prop_assert!(filtered.iter().all(|r| r.level == LogLevel::Error));
        let expected: Vec<_> = records.into_iter().filter(|r| r.level == LogLevel::Error).collect();
        prop_assert_eq!(filtered, expected);
    }

    #[test]
    fn prop_parse_never_panics(raw in ".*") {
        let _ = parse(&raw);
    }
}
