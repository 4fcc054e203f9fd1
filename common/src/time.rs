//! Time utilities and constants for the fxpulse feed.

use chrono::{DateTime, Duration, Utc};

/// Feed timing constants.
pub mod constants {
    use super::Duration;

    /// Cadence of the simulated rate tick (3 seconds).
    pub fn rate_tick_interval() -> Duration {
        Duration::seconds(3)
    }

    /// Display lifetime of a transient warning (5 seconds).
    pub fn warning_ttl() -> Duration {
        Duration::seconds(5)
    }
}

/// A timestamp with timezone (always UTC for fxpulse).
pub type Timestamp = DateTime<Utc>;

/// Get the current timestamp.
pub fn now() -> Timestamp {
    Utc::now()
}

/// Check if a timestamp has expired (is in the past).
pub fn is_expired(expiry: Timestamp) -> bool {
    now() > expiry
}

/// Calculate expiry time from now.
pub fn expires_in(duration: Duration) -> Timestamp {
    now() + duration
}

/// Duration extensions for convenient construction.
pub trait DurationExt {
    fn as_std(&self) -> std::time::Duration;
}

impl DurationExt for Duration {
    fn as_std(&self) -> std::time::Duration {
        self.to_std().unwrap_or(std::time::Duration::ZERO)
    }
}
