//! Keyword-signal anomaly scorer
//!
//! Each signal group adds its weight once when any of its keywords occurs
//! as a substring of the line. Groups are independent and accumulate; a
//! jitter in `[0, JITTER_RANGE)` is added and the total is capped at 1.0.

use crate::random::RandomSource;

/// Upper bound (exclusive) of the random jitter added to every score
pub const JITTER_RANGE: f64 = 0.2;

pub const MAX_SCORE: f64 = 1.0;

#[derive(Debug, Clone, Copy)]
pub struct SignalGroup {
    pub keywords: &'static [&'static str],
    pub weight: f64,
}

pub const SIGNAL_GROUPS: [SignalGroup; 5] = [
    SignalGroup { keywords: &["ERROR", "FATAL"], weight: 0.7 },
    SignalGroup { keywords: &["exception", "failed"], weight: 0.6 },
    SignalGroup { keywords: &["timeout", "connection"], weight: 0.5 },
    SignalGroup { keywords: &["memory", "disk"], weight: 0.4 },
    SignalGroup { keywords: &["slow", "performance"], weight: 0.3 },
];

impl SignalGroup {
    fn matches(&self, text: &str, case_insensitive: bool) -> bool {
        if case_insensitive {
            self.keywords.iter().any(|k| text.contains(&k.to_lowercase()))
        } else {
            self.keywords.iter().any(|k| text.contains(k))
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AnomalyScorer {
    case_insensitive: bool,
}

impl AnomalyScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = enabled;
        self
    }

    /// Sum of the weights of every matching signal group, without jitter
    /// or clamping.
    pub fn base_score(&self, raw_text: &str) -> f64 {
        let lowered;
        let text = if self.case_insensitive {
            lowered = raw_text.to_lowercase();
            lowered.as_str()
        } else {
            raw_text
        };

        SIGNAL_GROUPS
            .iter()
            .filter(|group| group.matches(text, self.case_insensitive))
            .map(|group| group.weight)
            .sum()
    }

    /// Base score plus jitter, capped at [`MAX_SCORE`]. Always in `[0, 1]`.
    pub fn score(&self, raw_text: &str, rng: &mut dyn RandomSource) -> f64 {
        let jitter = rng.next_f64() * JITTER_RANGE;
        (self.base_score(raw_text) + jitter).min(MAX_SCORE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_no_signals() {
        let scorer = AnomalyScorer::new();
        assert_eq!(scorer.base_score("2024-01-15 10:30:22 INFO Application started successfully"), 0.0);
    }

    #[test]
    fn test_group_counted_once() {
        let scorer = AnomalyScorer::new();
        // both keywords of the same group present
        assert!(approx(scorer.base_score("connection timeout"), 0.5));
        assert!(approx(scorer.base_score("ERROR FATAL"), 0.7));
    }

    #[test]
    fn test_groups_accumulate() {
        let scorer = AnomalyScorer::new();
        assert!(approx(scorer.base_score("memory is slow"), 0.7));
        assert!(approx(scorer.base_score("ERROR disk failed"), 1.7));
    }

    #[test]
    fn test_case_sensitive_by_default() {
        let scorer = AnomalyScorer::new();
        assert_eq!(scorer.base_score("error: Connection Failed"), 0.0);
        // "Memory" does not contain "memory"
        assert_eq!(scorer.base_score("Memory usage exceeded"), 0.0);
    }

    #[test]
    fn test_case_insensitive_flag() {
        let scorer = AnomalyScorer::new().case_insensitive(true);
        assert!(approx(scorer.base_score("error: Connection Failed"), 1.8));
        assert!(approx(scorer.base_score("Memory usage exceeded"), 0.4));
    }

    #[test]
    fn test_score_is_clamped() {
        let scorer = AnomalyScorer::new();
        let mut rng = SequenceRandom::new(vec![0.99]);
        assert_eq!(scorer.score("ERROR failed timeout", &mut rng), 1.0);
    }

    #[test]
    fn test_jitter_range() {
        let scorer = AnomalyScorer::new();
        let mut zero = SequenceRandom::zero();
        assert_eq!(scorer.score("memory", &mut zero), 0.4);

        let mut high = SequenceRandom::new(vec![0.5]);
        assert!(approx(scorer.score("memory", &mut high), 0.5));
    }
}
