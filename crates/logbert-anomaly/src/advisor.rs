//! Root cause advisor - keyword priority rules with a random fallback

use crate::random::{RandomSource, pick};

pub const DATABASE_CAUSE: &str = "Database connectivity issue - check connection pool settings";
pub const MEMORY_CAUSE: &str = "Memory management issue - potential memory leak detected";
pub const PERFORMANCE_CAUSE: &str = "Performance degradation - check system resources";

// used when no rule matches
pub const GENERIC_CAUSES: [&str; 4] = [
    "Resource contention detected",
    "Authentication service timeout",
    "Cache invalidation required",
    "Load balancer health check failed",
];

// checked in order, first match wins
const RULES: [(&[&str], &str); 3] = [
    (&["database", "connection"], DATABASE_CAUSE),
    (&["memory", "heap"], MEMORY_CAUSE),
    (&["timeout", "slow"], PERFORMANCE_CAUSE),
];

#[derive(Debug, Clone, Copy, Default)]
pub struct RootCauseAdvisor {
    case_insensitive: bool,
}

impl RootCauseAdvisor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn case_insensitive(mut self, enabled: bool) -> Self {
        self.case_insensitive = enabled;
        self
    }

    /// The rule-based hypothesis, `None` when only the generic fallback applies
    pub fn matching_rule(&self, raw_text: &str) -> Option<&'static str> {
        let lowered;
        let text = if self.case_insensitive {
            lowered = raw_text.to_lowercase();
            lowered.as_str()
        } else {
            raw_text
        };

        RULES
            .iter()
            .find(|(keywords, _)| keywords.iter().any(|k| text.contains(k)))
            .map(|(_, cause)| *cause)
    }

    pub fn advise(&self, raw_text: &str, rng: &mut dyn RandomSource) -> &'static str {
        match self.matching_rule(raw_text) {
            Some(cause) => cause,
            None => *pick(rng, &GENERIC_CAUSES),
        }
    }
}
