//! Analysis session: the text buffer, latest results and the busy guard

use crate::config::{DetectionConfig, MonitorConfig};
use crate::detection::AnomalyResult;
use crate::error::EngineError;
use crate::feed::FeedTick;
use crate::pipeline::{AnalysisPipeline, AnalysisReport, StatsSnapshot};
use std::time::Duration;
use tokio::time::{Instant, sleep_until};
use tracing::{debug, info, warn};

// demo data loaded when no input is given
pub const SAMPLE_LOGS: &str = "2024-01-15 10:30:22 INFO Application started successfully
2024-01-15 10:30:45 ERROR Database connection failed - timeout after 30s
2024-01-15 10:31:00 WARN Retrying connection attempt 1/3
2024-01-15 10:31:15 INFO Connection established successfully
2024-01-15 10:32:00 ERROR Memory usage exceeded 90% threshold
2024-01-15 10:32:30 WARN Garbage collection triggered
2024-01-15 10:33:00 INFO User authentication successful for user_123
2024-01-15 10:33:15 ERROR API request failed - service unavailable
2024-01-15 10:33:30 WARN Network latency spike detected: 2.5s";

// owns the raw text buffer and the latest results shown to the user
pub struct AnalysisSession {
    raw_text: String,
    config: DetectionConfig,
    analysis_latency: Duration,
    results: Option<Vec<AnomalyResult>>,
    stats: StatsSnapshot,
    busy: bool,
}

/// A full analysis that has passed the precondition checks. It carries a
/// snapshot of the text and config taken when it was requested.
#[derive(Debug, Clone)]
pub struct PendingAnalysis {
    raw_text: String,
    config: DetectionConfig,
    ready_at: Instant,
}

impl PendingAnalysis {
    /// Wait out the simulated processing latency. Safe to call repeatedly
    /// (e.g. from a `select!` loop): it waits for a fixed deadline.
    pub async fn wait(&self) {
        sleep_until(self.ready_at).await
    }

    pub fn execute(&self, pipeline: &mut AnalysisPipeline) -> AnalysisReport {
        pipeline.run_analysis(&self.raw_text, &self.config, true)
    }
}

impl AnalysisSession {
    pub fn new(config: DetectionConfig, monitor: &MonitorConfig) -> Self {
        Self {
            raw_text: String::new(),
            config,
            analysis_latency: monitor.analysis_latency(),
            results: None,
            stats: StatsSnapshot::default(),
            busy: false,
        }
    }

    pub fn with_text(mut self, raw_text: impl Into<String>) -> Self {
        self.raw_text = raw_text.into();
        self
    }

    pub fn raw_text(&self) -> &str {
        &self.raw_text
    }

    pub fn set_text(&mut self, raw_text: impl Into<String>) {
        self.raw_text = raw_text.into();
    }

    // newline first, like appending to a text area
    pub fn append_line(&mut self, line: &str) {
        self.raw_text.push('\n');
        self.raw_text.push_str(line);
    }

    pub fn config(&self) -> &DetectionConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: DetectionConfig) {
        self.config = config;
    }

    /// `None` until the first analysis has produced results
    pub fn results(&self) -> Option<&[AnomalyResult]> {
        self.results.as_deref()
    }

    pub fn stats(&self) -> &StatsSnapshot {
        &self.stats
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    fn has_input(&self) -> bool {
        !self.raw_text.trim().is_empty()
    }

    /// Check preconditions and mark the session busy.
    pub fn begin_full_analysis(&mut self) -> Result<PendingAnalysis, EngineError> {
        if !self.has_input() {
            warn!("full analysis rejected: no log data");
            return Err(EngineError::EmptyInput);
        }
        if self.busy {
            warn!("full analysis rejected: one is already running");
            return Err(EngineError::AnalysisInProgress);
        }

        self.busy = true;
        info!(bytes = self.raw_text.len(), "full analysis started");
        Ok(PendingAnalysis {
            raw_text: self.raw_text.clone(),
            config: self.config,
            ready_at: Instant::now() + self.analysis_latency,
        })
    }

    /// Store a finished run. Stats are only replaced when the report has them.
    pub fn finish(&mut self, report: AnalysisReport) {
        if let Some(stats) = report.stats {
            self.stats = stats;
        }
        self.results = Some(report.results);
        self.busy = false;
    }

    // pending run dropped without finishing (shutdown)
    pub fn abandon_full_analysis(&mut self) {
        if self.busy {
            debug!("pending full analysis abandoned");
        }
        self.busy = false;
    }

    /// begin + wait + execute + finish in one call
    pub async fn run_full_analysis(
        &mut self,
        pipeline: &mut AnalysisPipeline,
    ) -> Result<&StatsSnapshot, EngineError> {
        let pending = self.begin_full_analysis()?;
        pending.wait().await;
        let report = pending.execute(pipeline);
        self.finish(report);
        info!(
            total = self.stats.total,
            anomalies = self.stats.anomalies,
            "full analysis complete"
        );
        Ok(&self.stats)
    }

    /// Lightweight run: refreshes results only, never the stats. Skipped for
    /// blank input. Not blocked by a pending full analysis.
    pub fn auto_analyze(&mut self, pipeline: &mut AnalysisPipeline) -> bool {
        if !self.has_input() {
            return false;
        }
        let report = pipeline.run_analysis(&self.raw_text, &self.config, false);
        debug!(anomalies = report.results.len(), "auto analysis refreshed results");
        self.results = Some(report.results);
        true
    }

    /// Append a feed line and re-analyze when the tick asks for it.
    /// Returns whether a re-analysis ran.
    pub fn apply_tick(&mut self, tick: FeedTick, pipeline: &mut AnalysisPipeline) -> bool {
        self.append_line(&tick.line);
        tick.reanalyze && self.auto_analyze(pipeline)
    }
}
