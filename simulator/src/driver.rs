//! Scenario driver for a running feed.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use fxpulse_feed::RateFeed;

use crate::metrics::RunMetrics;
use crate::scenario::{Scenario, ScenarioStep};

/// Walks scenario steps against a running feed, or drives it with
/// random input in continuous mode.
pub struct ScenarioDriver {
    feed: RateFeed,
    metrics: RunMetrics,
    speed: f64,
    rng: StdRng,
}

impl ScenarioDriver {
    /// Create a driver over a running feed.
    pub fn new(feed: RateFeed, speed: f64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };

        Self {
            feed,
            metrics: RunMetrics::new(),
            speed,
            rng,
        }
    }

    /// Run a scripted scenario to completion.
    pub async fn run(&mut self, scenario: Scenario) -> anyhow::Result<()> {
        for step in &scenario.steps {
            self.execute_step(step).await?;
            self.metrics.record_step();
        }
        Ok(())
    }

    /// Drive the feed with random user input until interrupted or the
    /// duration elapses.
    pub async fn continuous(&mut self, duration: Option<Duration>) -> anyhow::Result<()> {
        let pace = self.scaled(Duration::from_secs(1));
        let deadline = duration.map(|d| tokio::time::Instant::now() + d);
        let mut iterations = 0u64;

        loop {
            if let Some(deadline) = deadline {
                if tokio::time::Instant::now() >= deadline {
                    break;
                }
            }

            let amount = self.rng.gen_range(1..=10_000);
            self.feed.set_input_amount(amount.to_string()).await;
            self.metrics.record_amount();

            if self.rng.gen_ratio(1, 10) {
                self.feed.toggle_direction().await;
                self.metrics.record_toggle();
            }

            iterations += 1;
            if iterations % 5 == 0 {
                self.log_snapshot().await?;
            }

            tokio::select! {
                _ = tokio::time::sleep(pace) => {}
                _ = tokio::signal::ctrl_c() => {
                    info!("Interrupted");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Execute a single scenario step.
    async fn execute_step(&mut self, step: &ScenarioStep) -> anyhow::Result<()> {
        match step {
            ScenarioStep::Wait { seconds } => {
                let adjusted = self.scaled(Duration::from_secs(*seconds));
                info!("Waiting {}s (adjusted: {:?})", seconds, adjusted);
                tokio::time::sleep(adjusted).await;
            }
            ScenarioStep::SetAmount { value } => {
                info!("Entering amount: {}", value);
                self.feed.set_input_amount(value.clone()).await;
                self.metrics.record_amount();
            }
            ScenarioStep::ToggleDirection => {
                info!("Toggling direction");
                self.feed.toggle_direction().await;
                self.metrics.record_toggle();
            }
            ScenarioStep::ApplyManualRate { rate } => {
                info!("Applying manual rate: {}", rate);
                self.feed.set_manual_rate_text(rate.clone()).await;
                self.feed.apply_manual_rate().await;
                self.metrics.record_manual_apply();
            }
            ScenarioStep::ClearManualRate => {
                info!("Clearing manual rate");
                self.feed.clear_manual_rate().await;
            }
            ScenarioStep::ShowSnapshot => {
                self.log_snapshot().await?;
            }
        }

        Ok(())
    }

    /// Log the current feed snapshot and retained history.
    async fn log_snapshot(&self) -> anyhow::Result<()> {
        let snapshot = self.feed.snapshot().await;

        info!(
            pair = %snapshot.pair,
            real_rate = %snapshot.real_rate,
            effective_rate = %snapshot.effective_rate,
            manual = snapshot.override_state.active,
            direction = ?snapshot.direction,
            input = %snapshot.input_text,
            output = snapshot.output_text.as_deref().unwrap_or(""),
            "snapshot"
        );

        if let Some(warning) = &snapshot.warning {
            warn!(warning = %warning, "feed warning");
        }

        for record in &snapshot.history {
            info!(
                time = %record.timestamp_display(),
                from = %record.input,
                to = %record.output,
                real_rate = %record.real_rate,
                used_rate = %record.used_rate,
                "history"
            );
        }

        debug!(json = %serde_json::to_string(&snapshot)?, "snapshot json");
        Ok(())
    }

    /// Stop the feed and fold its counters into the run metrics.
    pub async fn finish(mut self) -> anyhow::Result<RunMetrics> {
        let stats = self.feed.stats().await;
        self.metrics.conversions_recorded = stats.conversions_recorded;
        self.metrics.overrides_revoked = stats.overrides_revoked;
        self.metrics.final_rate = Some(stats.real_rate);

        self.feed.stop().await?;
        Ok(self.metrics)
    }

    fn scaled(&self, duration: Duration) -> Duration {
        duration.div_f64(self.speed)
    }
}
