//! Run metrics for a feed driving session.

use rust_decimal::Decimal;
use tracing::info;

/// Counters accumulated while driving the feed.
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    /// Scenario steps executed.
    pub steps_executed: u64,
    /// Amount entries forwarded to the feed.
    pub amounts_entered: u64,
    /// Direction toggles forwarded to the feed.
    pub toggles: u64,
    /// Manual rate applications forwarded to the feed.
    pub manual_applies: u64,
    /// Conversions recorded by the feed over the run.
    pub conversions_recorded: u64,
    /// Automatic override revocations observed.
    pub overrides_revoked: u64,
    /// Real rate when the run ended.
    pub final_rate: Option<Decimal>,
}

impl RunMetrics {
    /// Create empty metrics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one executed step.
    pub fn record_step(&mut self) {
        self.steps_executed += 1;
    }

    /// Record an amount entry.
    pub fn record_amount(&mut self) {
        self.amounts_entered += 1;
    }

    /// Record a direction toggle.
    pub fn record_toggle(&mut self) {
        self.toggles += 1;
    }

    /// Record a manual rate application.
    pub fn record_manual_apply(&mut self) {
        self.manual_applies += 1;
    }

    /// Log a human-readable summary of the run.
    pub fn summarize(&self) {
        info!("Run complete");
        info!("Steps executed: {}", self.steps_executed);
        info!("Amounts entered: {}", self.amounts_entered);
        info!("Direction toggles: {}", self.toggles);
        info!("Manual rates applied: {}", self.manual_applies);
        info!("Conversions recorded: {}", self.conversions_recorded);
        info!("Overrides revoked: {}", self.overrides_revoked);
        if let Some(rate) = self.final_rate {
            info!("Final real rate: {}", rate);
        }
    }
}
