//! Feed configuration.

use chrono::Duration;
use fxpulse_common::{constants, Currency, CurrencyPair};
use rust_decimal::Decimal;

use crate::error::{FeedError, FeedResult};

/// Configuration for the rate feed.
#[derive(Debug, Clone)]
pub struct FeedConfig {
    /// The fixed currency pair quoted by the feed.
    pub pair: CurrencyPair,
    /// Starting rate for the random walk.
    pub initial_rate: Decimal,
    /// Maximum absolute change per tick; each step is drawn uniformly
    /// from [-step_bound, +step_bound].
    pub step_bound: Decimal,
    /// Cadence of the simulated rate tick.
    pub tick_interval: Duration,
    /// Percentage deviation beyond which an active override is revoked.
    pub drift_threshold_pct: Decimal,
    /// Display lifetime of a transient warning.
    pub warning_ttl: Duration,
    /// Maximum number of retained conversion records.
    pub history_capacity: usize,
    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            pair: CurrencyPair::new(Currency::eur(), Currency::usd()),
            initial_rate: Decimal::new(11, 1),
            step_bound: Decimal::new(5, 2),
            tick_interval: constants::rate_tick_interval(),
            drift_threshold_pct: Decimal::TWO,
            warning_ttl: constants::warning_ttl(),
            history_capacity: 5,
            seed: None,
        }
    }
}

impl FeedConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> FeedResult<()> {
        if self.initial_rate <= Decimal::ZERO {
            return Err(FeedError::NonPositiveInitialRate(self.initial_rate));
        }
        if self.step_bound <= Decimal::ZERO {
            return Err(FeedError::InvalidStepBound(self.step_bound));
        }
        if self.drift_threshold_pct <= Decimal::ZERO {
            return Err(FeedError::NonPositiveDriftThreshold(
                self.drift_threshold_pct,
            ));
        }
        if self.history_capacity == 0 {
            return Err(FeedError::ZeroHistoryCapacity);
        }
        if self.tick_interval <= Duration::zero() {
            return Err(FeedError::NonPositiveDuration {
                name: "tick_interval",
            });
        }
        if self.warning_ttl <= Duration::zero() {
            return Err(FeedError::NonPositiveDuration {
                name: "warning_ttl",
            });
        }
        Ok(())
    }
}
