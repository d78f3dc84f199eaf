// Error types for the topic-discovery pipeline.
//
// All library-level failures flow through PipelineError. The binary wraps
// these in anyhow at the CLI boundary; the library never panics on bad input.

use thiserror::Error;

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Error, Debug, Clone)]
pub enum PipelineError {
    /// The document collection is empty, or collocation/vocabulary filtering
    /// left nothing to train on. Detected before any expensive training.
    #[error("empty input: {message}")]
    EmptyInput { message: String },

    /// The search range would produce no candidates.
    #[error("invalid search range: start={start}, limit={limit}, step={step} (need start < limit and step > 0)")]
    InvalidRange {
        start: usize,
        limit: usize,
        step: usize,
    },

    /// Model training failed for one candidate. Carries the topic count so
    /// a failed candidate in the search loop is attributable.
    #[error("training failed for {num_topics} topics: {reason}")]
    Training { num_topics: usize, reason: String },
}

impl PipelineError {
    pub fn empty_input(message: impl Into<String>) -> Self {
        Self::EmptyInput {
            message: message.into(),
        }
    }

    pub fn training(num_topics: usize, reason: impl Into<String>) -> Self {
        Self::Training {
            num_topics,
            reason: reason.into(),
        }
    }
}
