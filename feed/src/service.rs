//! Async feed runtime.
//!
//! Wires the rate simulator to the controller on a tokio interval and
//! serializes user actions through the same lock, so the
//! tick / drift-check / recompute sequence never interleaves with a
//! user action.

use std::sync::Arc;

use fxpulse_common::DurationExt;
use serde::Serialize;
use rust_decimal::Decimal;
use tokio::sync::{watch, RwLock};
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info};

use crate::config::FeedConfig;
use crate::controller::{ConverterController, ConverterEvent, ConverterSnapshot};
use crate::error::{FeedError, FeedResult};
use crate::simulator::RateSimulator;

/// Aggregate counters for a feed run.
#[derive(Debug, Clone, Serialize)]
pub struct FeedStats {
    /// Current simulated real rate.
    pub real_rate: Decimal,
    /// Whether the manual override is active.
    pub override_active: bool,
    /// Total conversions recorded over the feed lifetime.
    pub conversions_recorded: u64,
    /// Total automatic override revocations.
    pub overrides_revoked: u64,
}

/// A running rate feed.
///
/// Owns the controller behind a single lock and a background task that
/// steps the random walk on the configured cadence. Stopping the feed
/// guarantees no further tick is dispatched once `stop` returns.
pub struct RateFeed {
    controller: Arc<RwLock<ConverterController>>,
    shutdown: watch::Sender<bool>,
    task: Option<JoinHandle<()>>,
}

impl RateFeed {
    /// Validate the configuration and start the tick loop.
    pub fn spawn(config: FeedConfig) -> FeedResult<Self> {
        config.validate()?;

        let controller = Arc::new(RwLock::new(ConverterController::new(&config)?));
        let mut simulator =
            RateSimulator::new(config.initial_rate, config.step_bound, config.seed)?;
        let (shutdown, mut shutdown_rx) = watch::channel(false);

        let tick = config.tick_interval.as_std();
        let ctl = Arc::clone(&controller);

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // consume the immediate first tick; the rate first moves one
            // full interval after spawn
            interval.tick().await;

            loop {
                tokio::select! {
                    biased;
                    changed = shutdown_rx.changed() => {
                        if changed.is_err() || *shutdown_rx.borrow_and_update() {
                            break;
                        }
                    }
                    _ = interval.tick() => {
                        let new_rate = simulator.step();
                        let mut controller = ctl.write().await;
                        controller.dispatch(ConverterEvent::RateTick(new_rate));
                        debug!(rate = %new_rate, "tick dispatched");
                    }
                }
            }

            debug!("feed tick loop stopped");
        });

        info!(pair = %config.pair, initial_rate = %config.initial_rate, "rate feed started");

        Ok(Self {
            controller,
            shutdown,
            task: Some(task),
        })
    }

    /// Forward a user-shaped event into the controller.
    pub async fn dispatch(&self, event: ConverterEvent) {
        self.controller.write().await.dispatch(event);
    }

    /// Set the amount field from raw text.
    pub async fn set_input_amount(&self, text: impl Into<String>) {
        self.dispatch(ConverterEvent::SetInputAmount(text.into()))
            .await;
    }

    /// Flip the conversion direction.
    pub async fn toggle_direction(&self) {
        self.dispatch(ConverterEvent::ToggleDirection).await;
    }

    /// Set the manual rate field from raw text.
    pub async fn set_manual_rate_text(&self, text: impl Into<String>) {
        self.dispatch(ConverterEvent::SetManualRateText(text.into()))
            .await;
    }

    /// Validate and activate the manual rate.
    pub async fn apply_manual_rate(&self) {
        self.dispatch(ConverterEvent::ApplyManualRate).await;
    }

    /// Reset to the real rate.
    pub async fn clear_manual_rate(&self) {
        self.dispatch(ConverterEvent::ClearManualRate).await;
    }

    /// Read-only snapshot of the aggregate state.
    pub async fn snapshot(&self) -> ConverterSnapshot {
        self.controller.read().await.snapshot()
    }

    /// Aggregate counters for the run so far.
    pub async fn stats(&self) -> FeedStats {
        let controller = self.controller.read().await;
        FeedStats {
            real_rate: controller.real_rate(),
            override_active: controller.override_state().active,
            conversions_recorded: controller.conversions_recorded(),
            overrides_revoked: controller.overrides_revoked(),
        }
    }

    /// Stop the tick loop and wait for it to finish. After this returns
    /// no further tick can mutate the controller.
    pub async fn stop(&mut self) -> FeedResult<()> {
        let task = self.task.take().ok_or(FeedError::AlreadyStopped)?;
        let _ = self.shutdown.send(true);
        task.await
            .map_err(|e| FeedError::TaskFailed(e.to_string()))?;
        info!("rate feed stopped");
        Ok(())
    }
}
