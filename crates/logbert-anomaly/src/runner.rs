//! Real-time monitor loop: feed ticks and full analyses on one task

use crate::config::MonitorConfig;
use crate::error::EngineError;
use crate::feed::{FeedGenerator, FeedTick, SyntheticFeed};
use crate::pipeline::AnalysisPipeline;
use crate::session::{AnalysisSession, PendingAnalysis};
use std::future::Future;
use tokio::sync::mpsc;
use tracing::{info, warn};

/// What happened during a monitor loop iteration
#[derive(Debug, Clone, PartialEq)]
pub enum MonitorEvent {
    /// a synthetic line was appended to the buffer
    Line(String),
    /// results refreshed by a tick, stats untouched
    AutoAnalysis,
    /// a full analysis finished, stats replaced
    FullAnalysis,
    /// a full analysis request was refused
    Rejected(EngineError),
}

// main runner that drives real-time monitoring
pub struct MonitorRunner {
    session: AnalysisSession,
    pipeline: AnalysisPipeline,
    feed: SyntheticFeed,
    generator: Option<FeedGenerator>,
}

impl MonitorRunner {
    pub fn new(session: AnalysisSession, pipeline: AnalysisPipeline, monitor: MonitorConfig) -> Self {
        Self {
            session,
            pipeline,
            feed: SyntheticFeed::new(monitor),
            generator: None,
        }
    }

    // custom generator for the feed (seeded or scripted)
    pub fn with_generator(mut self, generator: FeedGenerator) -> Self {
        self.generator = Some(generator);
        self
    }

    pub fn session(&self) -> &AnalysisSession {
        &self.session
    }

    pub fn into_session(self) -> AnalysisSession {
        self.session
    }

    /// Run until `shutdown` resolves. A full analysis is requested at start;
    /// feed ticks keep arriving while it is pending. The feed is always
    /// stopped before returning.
    pub async fn run<S, F>(&mut self, shutdown: S, mut on_event: F)
    where
        S: Future<Output = ()>,
        F: FnMut(&MonitorEvent, &AnalysisSession),
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<FeedTick>();
        let generator = self.generator.take().unwrap_or_default();
        self.feed.start_with(generator, move |tick| {
            // receiver gone means the loop already exited
            let _ = tx.send(tick);
        });

        let mut pending = match self.session.begin_full_analysis() {
            Ok(pending) => Some(pending),
            Err(e) => {
                on_event(&MonitorEvent::Rejected(e), &self.session);
                None
            }
        };

        tokio::pin!(shutdown);
        info!("monitor loop running");

        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                Some(tick) = rx.recv() => {
                    let line = tick.line.clone();
                    let reanalyzed = self.session.apply_tick(tick, &mut self.pipeline);
                    on_event(&MonitorEvent::Line(line), &self.session);
                    if reanalyzed {
                        on_event(&MonitorEvent::AutoAnalysis, &self.session);
                    }
                }
                _ = wait_pending(&pending) => {
                    if let Some(done) = pending.take() {
                        let report = done.execute(&mut self.pipeline);
                        self.session.finish(report);
                        on_event(&MonitorEvent::FullAnalysis, &self.session);
                    }
                }
                else => {
                    warn!("monitor loop has nothing left to wait on");
                    break;
                }
            }
        }

        if pending.take().is_some() {
            self.session.abandon_full_analysis();
        }
        self.feed.stop().await;
        info!("monitor loop stopped");
    }
}

async fn wait_pending(pending: &Option<PendingAnalysis>) {
    match pending {
        Some(p) => p.wait().await,
        None => std::future::pending().await,
    }
}
