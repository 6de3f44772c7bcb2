// Terminal rendering: stat cards, anomaly table, feed lines

use colored::Colorize;
use comfy_table::{presets::UTF8_FULL, Table};
use logbert_anomaly::{AnomalyResult, StatsSnapshot};
use logbert_core::LogLevel;

const LINE_WIDTH: usize = 70;

pub fn level_colored(level: LogLevel) -> String {
    let label = level.as_str();
    match level {
        LogLevel::Error => label.red().to_string(),
        LogLevel::Warn => label.yellow().to_string(),
        LogLevel::Info => label.green().to_string(),
        LogLevel::Debug => label.blue().to_string(),
    }
}

// char-safe truncation with an ellipsis
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let cut: String = s.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut)
}

pub fn format_score(score: f64) -> String {
    format!("{:.3}", score)
}

pub fn format_rate(rate: f64) -> String {
    format!("{:.1}%", rate)
}

pub fn print_stats(stats: &StatsSnapshot) {
    println!("\n{}", "📊 Analysis Summary".cyan().bold());
    println!("{}", "─".repeat(50).dimmed());
    println!("  {:<18} {}", "Total Logs:", stats.total.to_string().blue().bold());
    println!("  {:<18} {}", "Anomalies Found:", stats.anomalies.to_string().red().bold());
    println!("  {:<18} {}", "Anomaly Rate:", format_rate(stats.rate).yellow().bold());
    println!(
        "  {:<18} {}",
        "Highest Score:",
        format!("{:.2}", stats.highest_score).magenta().bold()
    );
}

pub fn anomaly_table(results: &[AnomalyResult], rca_enabled: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec!["#", "Score", "Time", "Level", "Log Line"];
    if rca_enabled {
        header.push("Root Cause Analysis");
    }
    table.set_header(header);

    for (rank, anomaly) in results.iter().enumerate() {
        let mut row = vec![
            (rank + 1).to_string(),
            format_score(anomaly.score).red().bold().to_string(),
            anomaly.record.timestamp.clone(),
            level_colored(anomaly.record.level),
            truncate(&anomaly.record.raw_text, LINE_WIDTH),
        ];
        if rca_enabled {
            row.push(anomaly.root_cause.green().to_string());
        }
        table.add_row(row);
    }
    table
}

pub fn print_results(results: &[AnomalyResult], rca_enabled: bool) {
    if results.is_empty() {
        println!("\n{}", "✓ No anomalies above threshold.".green());
        return;
    }
    println!("\n{}", "🚨 Detected Anomalies".red().bold());
    println!("{}", anomaly_table(results, rca_enabled));
}

pub fn print_feed_line(line: &str, level: LogLevel) {
    println!("{} [{}] {}", "+".dimmed(), level_colored(level), truncate(line, LINE_WIDTH + 20));
}
