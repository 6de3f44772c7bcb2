//! Anomaly detection: score every record, keep the ones above threshold

use crate::advisor::RootCauseAdvisor;
use crate::random::RandomSource;
use crate::scorer::AnomalyScorer;
use logbert_core::LogRecord;
use serde::{Deserialize, Serialize};

// represents a detected anomaly
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnomalyResult {
    #[serde(flatten)]
    pub record: LogRecord,
    pub score: f64,        // in [0, 1]
    pub index: usize,      // position in the scored (filtered) sequence
    pub root_cause: String,
}

// main anomaly detector
#[derive(Debug, Clone, Copy, Default)]
pub struct AnomalyDetector {
    scorer: AnomalyScorer,
    advisor: RootCauseAdvisor,
}

impl AnomalyDetector {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_insensitive(enabled: bool) -> Self {
        Self {
            scorer: AnomalyScorer::new().case_insensitive(enabled),
            advisor: RootCauseAdvisor::new().case_insensitive(enabled),
        }
    }

    /// Records scoring strictly above `threshold`, highest score first.
    /// Equal scores keep their input order.
    pub fn detect(
        &self,
        records: &[LogRecord],
        threshold: f64,
        rng: &mut dyn RandomSource,
    ) -> Vec<AnomalyResult> {
        let mut anomalies: Vec<AnomalyResult> = records
            .iter()
            .enumerate()
            .filter_map(|(index, record)| {
                let score = self.scorer.score(&record.raw_text, rng);
                if score <= threshold {
                    return None;
                }
                let root_cause = self.advisor.advise(&record.raw_text, rng).to_string();
                Some(AnomalyResult {
                    record: record.clone(),
                    score,
                    index,
                    root_cause,
                })
            })
            .collect();

        // sort by score descending, stable
        anomalies.sort_by(|a, b| b.score.total_cmp(&a.score));
        anomalies
    }
}

/// Detect with the default (case-sensitive) detector
pub fn detect_anomalies(
    records: &[LogRecord],
    threshold: f64,
    rng: &mut dyn RandomSource,
) -> Vec<AnomalyResult> {
    AnomalyDetector::new().detect(records, threshold, rng)
}
