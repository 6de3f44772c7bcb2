//! Engine-level errors surfaced to the presentation layer

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    #[error("Please enter some log data first!")]
    EmptyInput,

    #[error("an analysis is already running")]
    AnalysisInProgress,
}
