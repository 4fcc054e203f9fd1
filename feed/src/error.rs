//! Feed error types.

use rust_decimal::Decimal;
use thiserror::Error;

/// Errors that can occur when constructing or running the feed.
///
/// Malformed user input is never an error: unparsable or out-of-domain
/// amounts and manual rates are rejected silently by the controller.
#[derive(Debug, Error)]
pub enum FeedError {
    /// Initial rate must be strictly positive.
    #[error("Initial rate must be positive, got {0}")]
    NonPositiveInitialRate(Decimal),

    /// Random walk step bound is invalid.
    #[error("Walk step bound must be a positive rate quantum, got {0}")]
    InvalidStepBound(Decimal),

    /// Drift threshold must be strictly positive.
    #[error("Drift threshold must be positive, got {0}%")]
    NonPositiveDriftThreshold(Decimal),

    /// History must hold at least one record.
    #[error("History capacity must be non-zero")]
    ZeroHistoryCapacity,

    /// Timer durations must be strictly positive.
    #[error("{name} must be a positive duration")]
    NonPositiveDuration { name: &'static str },

    /// The feed task was already stopped.
    #[error("Feed already stopped")]
    AlreadyStopped,

    /// The feed task panicked or was cancelled.
    #[error("Feed task failed: {0}")]
    TaskFailed(String),
}

/// Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;
