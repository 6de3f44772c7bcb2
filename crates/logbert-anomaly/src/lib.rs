//! LogBERT anomaly detection engine

pub mod advisor;
pub mod config;
pub mod detection;
pub mod error;
pub mod feed;
pub mod pipeline;
pub mod random;
pub mod runner;
pub mod scorer;
pub mod session;

pub use advisor::RootCauseAdvisor;
pub use config::{DetectionConfig, EngineConfig, MonitorConfig, load_config};
pub use detection::{AnomalyDetector, AnomalyResult, detect_anomalies};
pub use error::EngineError;
pub use feed::{FeedGenerator, FeedHandle, FeedState, FeedTick, SyntheticFeed, start_feed, stop_feed};
pub use pipeline::{AnalysisPipeline, AnalysisReport, StatsSnapshot, run_analysis};
pub use random::{RandomSource, SeededRandom, SequenceRandom, ThreadRandom};
pub use runner::{MonitorEvent, MonitorRunner};
pub use scorer::AnomalyScorer;
pub use session::{AnalysisSession, PendingAnalysis, SAMPLE_LOGS};
