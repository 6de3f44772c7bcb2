//! Synthetic log feed for real-time demo mode
//!
//! A background task fabricates one log line per period and hands it to a
//! callback. The callback owns whatever it writes to; the feed never touches
//! the analysis buffer directly.

use crate::config::MonitorConfig;
use crate::random::{RandomSource, ThreadRandom, pick};
use chrono::{NaiveDateTime, Utc};
use logbert_core::{LogLevel, TIMESTAMP_FORMAT};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior, interval_at};
use tracing::{debug, info, warn};

pub const FEED_LEVELS: [LogLevel; 4] = [
    LogLevel::Info,
    LogLevel::Warn,
    LogLevel::Error,
    LogLevel::Debug,
];

pub const FEED_MESSAGES: [&str; 8] = [
    "User authentication successful",
    "Database connection timeout",
    "Memory usage at 85%",
    "API request processed",
    "Cache miss detected",
    "Network latency spike detected",
    "Service unavailable",
    "Configuration updated",
];

/// One synthesized line plus whether it should trigger a lightweight
/// re-analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedTick {
    pub line: String,
    pub reanalyze: bool,
}

pub struct FeedGenerator {
    rng: Box<dyn RandomSource>,
    reanalyze_probability: f64,
}

impl FeedGenerator {
    pub fn new() -> Self {
        Self::with_random(Box::new(ThreadRandom))
    }

    pub fn with_random(rng: Box<dyn RandomSource>) -> Self {
        Self {
            rng,
            reanalyze_probability: MonitorConfig::default().reanalyze_probability,
        }
    }

    pub fn reanalyze_probability(mut self, probability: f64) -> Self {
        self.reanalyze_probability = probability;
        self
    }

    pub fn next_line_at(&mut self, now: NaiveDateTime) -> String {
        let level = pick(&mut *self.rng, &FEED_LEVELS);
        let message = pick(&mut *self.rng, &FEED_MESSAGES);
        format!("{} {} {}", now.format(TIMESTAMP_FORMAT), level, message)
    }

    // stamped with the current UTC wall clock
    pub fn next_line(&mut self) -> String {
        self.next_line_at(Utc::now().naive_utc())
    }

    pub fn roll_reanalyze(&mut self) -> bool {
        self.rng.next_f64() < self.reanalyze_probability
    }

    pub fn next_tick(&mut self) -> FeedTick {
        let line = self.next_line();
        let reanalyze = self.roll_reanalyze();
        FeedTick { line, reanalyze }
    }
}

impl Default for FeedGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a running feed task. Dropping it cancels the task.
pub struct FeedHandle {
    task: JoinHandle<()>,
    stop_tx: Option<oneshot::Sender<()>>,
}

impl FeedHandle {
    /// Stop the timer and wait for the task to exit. A tick that is in
    /// progress runs to completion first.
    pub async fn stop(mut self) {
        if let Some(tx) = self.stop_tx.take() {
            let _ = tx.send(());
        }
        if let Err(e) = (&mut self.task).await {
            warn!(error = %e, "synthetic feed task ended abnormally");
        }
    }
}

impl Drop for FeedHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Spawn the periodic feed on the current tokio runtime. The first line is
/// produced one full `period` after the call.
pub fn start_feed<F>(mut generator: FeedGenerator, period: Duration, mut on_tick: F) -> FeedHandle
where
    F: FnMut(FeedTick) + Send + 'static,
{
    let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

    let task = tokio::spawn(async move {
        let mut ticker = interval_at(Instant::now() + period, period);
        // ticks never overlap; a slow callback pushes the schedule back
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = &mut stop_rx => break,
                _ = ticker.tick() => {
                    let tick = generator.next_tick();
                    debug!(line = %tick.line, reanalyze = tick.reanalyze, "feed tick");
                    on_tick(tick);
                }
            }
        }
        info!("synthetic feed stopped");
    });

    info!(period_ms = period.as_millis() as u64, "synthetic feed started");
    FeedHandle {
        task,
        stop_tx: Some(stop_tx),
    }
}

pub async fn stop_feed(handle: FeedHandle) {
    handle.stop().await
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    Stopped,
    Running,
}

/// Two-state wrapper around [`start_feed`]: starting twice is a no-op
pub struct SyntheticFeed {
    config: MonitorConfig,
    handle: Option<FeedHandle>,
}

impl SyntheticFeed {
    pub fn new(config: MonitorConfig) -> Self {
        Self { config, handle: None }
    }

    pub fn state(&self) -> FeedState {
        match &self.handle {
            Some(_) => FeedState::Running,
            None => FeedState::Stopped,
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == FeedState::Running
    }

    /// Start with a thread-random generator. Returns `false` if already running.
    pub fn start<F>(&mut self, on_tick: F) -> bool
    where
        F: FnMut(FeedTick) + Send + 'static,
    {
        self.start_with(FeedGenerator::new(), on_tick)
    }

    pub fn start_with<F>(&mut self, generator: FeedGenerator, on_tick: F) -> bool
    where
        F: FnMut(FeedTick) + Send + 'static,
    {
        if self.is_running() {
            return false;
        }
        let generator = generator.reanalyze_probability(self.config.reanalyze_probability);
        self.handle = Some(start_feed(generator, self.config.tick_interval(), on_tick));
        true
    }

    /// Returns `false` if it was not running.
    pub async fn stop(&mut self) -> bool {
        match self.handle.take() {
            Some(handle) => {
                handle.stop().await;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SequenceRandom;
    use chrono::NaiveDate;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(10, 30, 22)
            .unwrap()
    }

    #[test]
    fn test_line_format() {
        let mut generator = FeedGenerator::with_random(Box::new(SequenceRandom::new(vec![0.5, 0.125])));
        let line = generator.next_line_at(fixed_now());
        assert_eq!(line, "2024-01-15 10:30:22 ERROR Database connection timeout");
    }

    #[test]
    fn test_generated_line_parses_back() {
        let mut generator = FeedGenerator::with_random(Box::new(SequenceRandom::new(vec![0.8, 0.3])));
        let line = generator.next_line_at(fixed_now());
        let record = logbert_core::parse(&line).remove(0);
        assert_eq!(record.level, LogLevel::Debug);
        assert_eq!(record.timestamp, "2024-01-15 10:30:22");
        assert!(record.raw_text.ends_with("Memory usage at 85%"));
    }

    #[test]
    fn test_reanalyze_probability() {
        let mut generator = FeedGenerator::with_random(Box::new(SequenceRandom::new(vec![0.29, 0.3])));
        assert!(generator.roll_reanalyze());
        assert!(!generator.roll_reanalyze());

        let mut never = FeedGenerator::with_random(Box::new(SequenceRandom::zero())).reanalyze_probability(0.0);
        assert!(!never.roll_reanalyze());
    }
}
