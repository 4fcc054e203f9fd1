//! Random-walk rate simulation.

use fxpulse_common::{round_rate, RATE_DP};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use tracing::debug;

use crate::error::{FeedError, FeedResult};

/// Produces a new simulated rate on each step via a bounded random walk.
///
/// Steps are drawn uniformly in whole rate quanta (4 decimal places), so
/// every transition stays in exact decimal arithmetic. The walk has no
/// lower bound; the rate may in principle drift non-positive over long
/// runs.
pub struct RateSimulator {
    rate: Decimal,
    step_quanta: i64,
    rng: StdRng,
}

impl RateSimulator {
    /// Create a new simulator starting at `initial_rate`.
    ///
    /// `step_bound` is the maximum absolute change per step and must be
    /// a positive multiple of the rate quantum (0.0001).
    pub fn new(initial_rate: Decimal, step_bound: Decimal, seed: Option<u64>) -> FeedResult<Self> {
        let rng = match seed {
            Some(s) => StdRng::seed_from_u64(s),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(initial_rate, step_bound, rng)
    }

    /// Create a simulator with an explicit RNG.
    pub fn with_rng(initial_rate: Decimal, step_bound: Decimal, rng: StdRng) -> FeedResult<Self> {
        if initial_rate <= Decimal::ZERO {
            return Err(FeedError::NonPositiveInitialRate(initial_rate));
        }

        let quanta = Decimal::from(10_i64.pow(RATE_DP));
        let step_quanta = (step_bound * quanta)
            .trunc()
            .to_i64()
            .filter(|q| *q > 0)
            .ok_or(FeedError::InvalidStepBound(step_bound))?;

        Ok(Self {
            rate: round_rate(initial_rate),
            step_quanta,
            rng,
        })
    }

    /// Current rate.
    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Advance the walk one step and return the new rate.
    pub fn step(&mut self) -> Decimal {
        let delta_quanta = self.rng.gen_range(-self.step_quanta..=self.step_quanta);
        let delta = Decimal::new(delta_quanta, RATE_DP);
        self.rate = round_rate(self.rate + delta);

        debug!(rate = %self.rate, delta = %delta, "rate stepped");
        self.rate
    }
}
