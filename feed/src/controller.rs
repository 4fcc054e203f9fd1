//! Event-driven converter controller.
//!
//! All state mutation flows through [`ConverterController::dispatch`]:
//! rate ticks, user input, direction toggles, and override actions are
//! discrete events, and recomputation is an explicit synchronous
//! consequence of each accepted event rather than an implicit reactive
//! effect. The controller is the only holder of mutable state.

use chrono::Duration;
use fxpulse_common::{round_rate, time, Currency, CurrencyPair, Money, Timestamp};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use crate::config::FeedConfig;
use crate::engine::{ConversionEngine, Direction};
use crate::error::FeedResult;
use crate::history::{ConversionRecord, HistoryLog};
use crate::policy::{OverridePolicy, OverrideState};

/// A discrete event consumed by the controller.
#[derive(Debug, Clone)]
pub enum ConverterEvent {
    /// The simulated real rate changed.
    RateTick(Decimal),
    /// The user edited the amount field.
    SetInputAmount(String),
    /// The user flipped the conversion direction.
    ToggleDirection,
    /// The user edited the manual rate field. Has no effect on
    /// conversion until applied.
    SetManualRateText(String),
    /// The user pressed apply on the manual rate field.
    ApplyManualRate,
    /// The user reset to the real rate.
    ClearManualRate,
}

/// Transient warning with an explicit expiry instant, cleared by the
/// next dispatched event at or after that instant.
#[derive(Debug, Clone)]
struct Warning {
    text: String,
    expires_at: Timestamp,
}

/// Read-only view of the converter state for the presentation layer.
#[derive(Debug, Clone, Serialize)]
pub struct ConverterSnapshot {
    /// The quoted currency pair.
    pub pair: CurrencyPair,
    /// Current simulated real rate (4 dp).
    pub real_rate: Decimal,
    /// Rate conversions currently use: override when active (4 dp).
    pub effective_rate: Decimal,
    /// Manual override state.
    pub override_state: OverrideState,
    /// Current conversion direction.
    pub direction: Direction,
    /// Input-side currency for the current direction.
    pub input_currency: Currency,
    /// Output-side currency for the current direction.
    pub output_currency: Currency,
    /// Raw amount text as entered.
    pub input_text: String,
    /// Raw manual rate text as entered.
    pub manual_rate_text: String,
    /// Formatted output amount, or `None` when the input is invalid.
    pub output_text: Option<String>,
    /// Currently displayed warning, if any.
    pub warning: Option<String>,
    /// Retained conversion records, newest first.
    pub history: Vec<ConversionRecord>,
}

/// Orchestrates the rate feed state machine.
pub struct ConverterController {
    pair: CurrencyPair,
    real_rate: Decimal,
    direction: Direction,
    input_text: String,
    manual_text: String,
    output: Option<Decimal>,
    engine: ConversionEngine,
    policy: OverridePolicy,
    history: HistoryLog,
    warning: Option<Warning>,
    warning_ttl: Duration,
    revocations: u64,
}

impl ConverterController {
    /// Create a controller from a validated configuration.
    pub fn new(config: &FeedConfig) -> FeedResult<Self> {
        config.validate()?;

        Ok(Self {
            pair: config.pair.clone(),
            real_rate: round_rate(config.initial_rate),
            direction: Direction::BaseToQuote,
            input_text: String::new(),
            manual_text: String::new(),
            output: None,
            engine: ConversionEngine::new(),
            policy: OverridePolicy::new(config.drift_threshold_pct),
            history: HistoryLog::with_capacity(config.history_capacity),
            warning: None,
            warning_ttl: config.warning_ttl,
            revocations: 0,
        })
    }

    /// Dispatch an event, stamped with the current wall clock.
    pub fn dispatch(&mut self, event: ConverterEvent) {
        self.dispatch_at(event, time::now());
    }

    /// Dispatch an event with an explicit timestamp. Deterministic
    /// variant used for replay and tests.
    pub fn dispatch_at(&mut self, event: ConverterEvent, now: Timestamp) {
        self.expire_warning(now);

        match event {
            ConverterEvent::RateTick(new_rate) => {
                self.real_rate = round_rate(new_rate);
                if let Some(text) = self.policy.on_real_rate_changed(self.real_rate) {
                    self.revocations += 1;
                    self.warning = Some(Warning {
                        text,
                        expires_at: now + self.warning_ttl,
                    });
                }
                self.recompute(now);
            }
            ConverterEvent::SetInputAmount(text) => {
                self.input_text = text;
                self.recompute(now);
            }
            ConverterEvent::ToggleDirection => {
                if let Some(output) = self.output {
                    self.input_text = output.to_string();
                }
                self.direction = self.direction.toggled();
                self.recompute(now);
            }
            ConverterEvent::SetManualRateText(text) => {
                self.manual_text = text;
            }
            ConverterEvent::ApplyManualRate => {
                if self.policy.apply(&self.manual_text) {
                    self.recompute(now);
                }
            }
            ConverterEvent::ClearManualRate => {
                self.policy.clear();
                self.recompute(now);
            }
        }
    }

    /// Recompute the output from current state, appending a history
    /// record for every successful conversion of a positive amount.
    fn recompute(&mut self, now: Timestamp) {
        let amount = match ConversionEngine::parse_amount(&self.input_text) {
            Some(amount) if amount > Decimal::ZERO => amount,
            _ => {
                self.output = None;
                return;
            }
        };

        let rate = self.policy.effective_rate(self.real_rate);
        match self.engine.convert(amount, self.direction, rate) {
            Some(output) => {
                self.output = Some(output);
                let record = ConversionRecord::new(
                    self.real_rate,
                    rate,
                    Money::new(amount, self.direction.input_currency(&self.pair)),
                    Money::new(output, self.direction.output_currency(&self.pair)),
                    now,
                );
                debug!(
                    id = %record.id,
                    input = %record.input,
                    output = %record.output,
                    used_rate = %record.used_rate,
                    "conversion recorded"
                );
                self.history.push(record);
            }
            None => {
                self.output = None;
            }
        }
    }

    fn expire_warning(&mut self, now: Timestamp) {
        if let Some(warning) = &self.warning {
            if now >= warning.expires_at {
                self.warning = None;
            }
        }
    }

    /// Current simulated real rate.
    pub fn real_rate(&self) -> Decimal {
        self.real_rate
    }

    /// Rate conversions currently use.
    pub fn effective_rate(&self) -> Decimal {
        self.policy.effective_rate(self.real_rate)
    }

    /// Current conversion direction.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Manual override state.
    pub fn override_state(&self) -> &OverrideState {
        self.policy.state()
    }

    /// Retained conversion history.
    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    /// Currently displayed warning text, if any.
    pub fn warning(&self) -> Option<&str> {
        self.warning.as_ref().map(|w| w.text.as_str())
    }

    /// Total conversions recorded over the feed lifetime.
    pub fn conversions_recorded(&self) -> u64 {
        self.history.total_recorded()
    }

    /// Total automatic override revocations.
    pub fn overrides_revoked(&self) -> u64 {
        self.revocations
    }

    /// Read-only snapshot of the aggregate state.
    pub fn snapshot(&self) -> ConverterSnapshot {
        ConverterSnapshot {
            pair: self.pair.clone(),
            real_rate: self.real_rate,
            effective_rate: round_rate(self.effective_rate()),
            override_state: self.policy.state().clone(),
            direction: self.direction,
            input_currency: self.direction.input_currency(&self.pair),
            output_currency: self.direction.output_currency(&self.pair),
            input_text: self.input_text.clone(),
            manual_rate_text: self.manual_text.clone(),
            output_text: self.output.map(|v| v.to_string()),
            warning: self.warning.as_ref().map(|w| w.text.clone()),
            history: self.history.records(),
        }
    }
}
