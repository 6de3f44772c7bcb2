//! Analysis pipeline: parse -> filter -> detect -> stats

use crate::config::DetectionConfig;
use crate::detection::{AnomalyDetector, AnomalyResult};
use crate::random::{RandomSource, ThreadRandom};
use logbert_core::{LogParser, PlainTextParser, filter_records};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Headline numbers for one full analysis run
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSnapshot {
    pub total: usize,       // filtered record count
    pub anomalies: usize,
    pub rate: f64,          // anomalies / total * 100, 0 when total is 0
    pub highest_score: f64, // score of the top-ranked anomaly, 0 when none
}

impl StatsSnapshot {
    /// `results` must already be ranked, highest score first
    pub fn from_run(total: usize, results: &[AnomalyResult]) -> Self {
        let anomalies = results.len();
        let rate = if total > 0 {
            anomalies as f64 / total as f64 * 100.0
        } else {
            0.0
        };
        Self {
            total,
            anomalies,
            rate,
            highest_score: results.first().map(|a| a.score).unwrap_or(0.0),
        }
    }
}

/// Output of one pipeline run. `stats` is `None` for lightweight runs that
/// must leave the headline numbers untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisReport {
    pub results: Vec<AnomalyResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stats: Option<StatsSnapshot>,
}

pub struct AnalysisPipeline {
    parser: Box<dyn LogParser>,
    rng: Box<dyn RandomSource>,
}

impl AnalysisPipeline {
    pub fn new() -> Self {
        Self::with_random(Box::new(ThreadRandom))
    }

    pub fn with_random(rng: Box<dyn RandomSource>) -> Self {
        Self {
            parser: Box::new(PlainTextParser::new()),
            rng,
        }
    }

    /// Run the whole pipeline. Blank input is the caller's concern: it simply
    /// yields an empty report here.
    pub fn run_analysis(
        &mut self,
        raw_text: &str,
        config: &DetectionConfig,
        update_stats: bool,
    ) -> AnalysisReport {
        let records = self.parser.parse_text(raw_text);
        let filtered = filter_records(records, config.level_filter);

        let detector = AnomalyDetector::case_insensitive(config.case_insensitive);
        let results = detector.detect(&filtered, config.threshold, &mut *self.rng);

        debug!(
            parser = self.parser.name(),
            total = filtered.len(),
            anomalies = results.len(),
            filter = %config.level_filter,
            threshold = config.threshold,
            update_stats,
            "analysis run complete"
        );

        let stats = update_stats.then(|| StatsSnapshot::from_run(filtered.len(), &results));
        AnalysisReport { results, stats }
    }
}

impl Default for AnalysisPipeline {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot run with thread randomness
pub fn run_analysis(raw_text: &str, config: &DetectionConfig, update_stats: bool) -> AnalysisReport {
    AnalysisPipeline::new().run_analysis(raw_text, config, update_stats)
}
