//! Manual rate override policy.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Current override state as exposed to the presentation layer.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OverrideState {
    /// Whether the manual rate currently supersedes the real rate.
    pub active: bool,
    /// The most recently accepted manual rate, if any. Retained after
    /// deactivation.
    pub rate: Option<Decimal>,
}

/// Holds an optional manually-set rate and revokes it when it drifts
/// too far from the simulated real rate.
#[derive(Debug, Clone)]
pub struct OverridePolicy {
    state: OverrideState,
    drift_threshold_pct: Decimal,
}

impl OverridePolicy {
    /// Create a policy with the given drift threshold (percent).
    pub fn new(drift_threshold_pct: Decimal) -> Self {
        Self {
            state: OverrideState::default(),
            drift_threshold_pct,
        }
    }

    /// Current override state.
    pub fn state(&self) -> &OverrideState {
        &self.state
    }

    /// Whether the override currently supersedes the real rate.
    pub fn is_active(&self) -> bool {
        self.state.active
    }

    /// Apply a candidate manual rate from raw user text.
    ///
    /// Accepted only if the text parses to a decimal strictly greater
    /// than zero; rejected silently otherwise. Returns whether the
    /// candidate was accepted.
    pub fn apply(&mut self, text: &str) -> bool {
        match text.trim().parse::<Decimal>() {
            Ok(rate) if rate > Decimal::ZERO => {
                self.state.active = true;
                self.state.rate = Some(rate);
                info!(rate = %rate, "manual rate activated");
                true
            }
            _ => {
                debug!(text, "manual rate rejected");
                false
            }
        }
    }

    /// Explicitly deactivate the override. No warning is emitted; this
    /// distinguishes a manual clear from an automatic revoke.
    pub fn clear(&mut self) {
        if self.state.active {
            info!("manual rate cleared");
        }
        self.state.active = false;
    }

    /// React to a change of the real rate.
    ///
    /// If the override is active and the new real rate deviates from it
    /// by more than the threshold, the override is revoked and the
    /// warning text to display is returned.
    pub fn on_real_rate_changed(&mut self, new_real: Decimal) -> Option<String> {
        let manual = match (self.state.active, self.state.rate) {
            (true, Some(rate)) => rate,
            _ => return None,
        };

        let drift_pct = (new_real - manual).abs() / manual * Decimal::ONE_HUNDRED;
        if drift_pct <= self.drift_threshold_pct {
            return None;
        }

        self.state.active = false;
        info!(
            manual = %manual,
            real = %new_real,
            drift_pct = %drift_pct,
            "manual rate revoked on drift"
        );
        Some(format!(
            "Manual rate was deactivated due to a {}% difference with real rate",
            self.drift_threshold_pct
        ))
    }

    /// The rate conversions should use right now.
    pub fn effective_rate(&self, real_rate: Decimal) -> Decimal {
        match (self.state.active, self.state.rate) {
            (true, Some(rate)) => rate,
            _ => real_rate,
        }
    }
}
