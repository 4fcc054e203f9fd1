//! End-to-end controller scenarios and conversion properties.

use chrono::{Duration, TimeZone, Utc};
use fxpulse_common::Timestamp;
use fxpulse_feed::{
    ConversionEngine, ConverterController, ConverterEvent, Direction, FeedConfig,
};
use proptest::prelude::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn controller() -> ConverterController {
    ConverterController::new(&FeedConfig::default()).unwrap()
}

fn t0() -> Timestamp {
    Utc.with_ymd_and_hms(2026, 1, 1, 9, 30, 0).unwrap()
}

#[test]
fn history_keeps_exactly_last_five_newest_first() {
    let mut c = controller();
    for i in 1..=9 {
        c.dispatch_at(ConverterEvent::SetInputAmount(i.to_string()), t0());
    }

    let history = c.snapshot().history;
    assert_eq!(history.len(), 5);
    let inputs: Vec<String> = history.iter().map(|r| r.input.value.to_string()).collect();
    assert_eq!(inputs, vec!["9.00", "8.00", "7.00", "6.00", "5.00"]);
}

#[test]
fn override_lifecycle_drift_then_expiry() {
    let mut c = controller();
    c.dispatch_at(ConverterEvent::SetManualRateText("1.2".into()), t0());
    c.dispatch_at(ConverterEvent::ApplyManualRate, t0());
    c.dispatch_at(ConverterEvent::SetInputAmount("100".into()), t0());
    assert_eq!(c.snapshot().output_text.as_deref(), Some("120.00"));

    // within threshold: override survives
    c.dispatch_at(ConverterEvent::RateTick(dec!(1.21)), t0() + Duration::seconds(3));
    assert!(c.snapshot().override_state.active);

    // |1.25 - 1.2| / 1.2 * 100 > 2: revoked, warning shown
    c.dispatch_at(ConverterEvent::RateTick(dec!(1.25)), t0() + Duration::seconds(6));
    let snapshot = c.snapshot();
    assert!(!snapshot.override_state.active);
    assert!(snapshot.warning.is_some());
    assert_eq!(snapshot.output_text.as_deref(), Some("125.00"));

    // warning persists below the 5s lifetime, expires at it
    c.dispatch_at(ConverterEvent::RateTick(dec!(1.25)), t0() + Duration::seconds(10));
    assert!(c.snapshot().warning.is_some());
    c.dispatch_at(ConverterEvent::RateTick(dec!(1.25)), t0() + Duration::seconds(11));
    assert!(c.snapshot().warning.is_none());
}

#[test]
fn invalid_manual_rates_never_activate() {
    let mut c = controller();
    for text in ["0", "-1.5", "", "abc"] {
        c.dispatch_at(ConverterEvent::SetManualRateText(text.into()), t0());
        c.dispatch_at(ConverterEvent::ApplyManualRate, t0());
        assert!(!c.snapshot().override_state.active, "{text:?}");
    }
}

#[test]
fn toggle_round_trips_the_displayed_value() {
    let mut c = controller();
    c.dispatch_at(ConverterEvent::SetInputAmount("100".into()), t0());
    assert_eq!(c.snapshot().output_text.as_deref(), Some("110.00"));

    c.dispatch_at(ConverterEvent::ToggleDirection, t0());
    let snapshot = c.snapshot();
    assert_eq!(snapshot.input_text, "110.00");
    assert_eq!(snapshot.output_text.as_deref(), Some("100.00"));
}

#[test]
fn invalid_amount_clears_output_and_logs_nothing() {
    let mut c = controller();
    c.dispatch_at(ConverterEvent::SetInputAmount("100".into()), t0());
    let recorded = c.conversions_recorded();

    c.dispatch_at(ConverterEvent::SetInputAmount("abc".into()), t0());
    assert!(c.snapshot().output_text.is_none());

    c.dispatch_at(ConverterEvent::SetInputAmount("-100".into()), t0());
    assert!(c.snapshot().output_text.is_none());

    assert_eq!(c.conversions_recorded(), recorded);
}

proptest! {
    /// Forward then reverse conversion returns the original amount
    /// within one rounding step each way.
    #[test]
    fn round_trip_within_rounding_tolerance(
        amount_cents in 1i64..=100_000_000,
        rate_quanta in 5_000i64..=20_000,
    ) {
        let engine = ConversionEngine::new();
        let amount = Decimal::new(amount_cents, 2);
        let rate = Decimal::new(rate_quanta, 4);

        let forward = engine.convert(amount, Direction::BaseToQuote, rate).unwrap();
        let back = engine.convert(forward, Direction::QuoteToBase, rate).unwrap();

        let error = (back - amount).abs();
        prop_assert!(
            error <= dec!(0.02),
            "amount={amount} rate={rate} forward={forward} back={back} error={error}"
        );
    }

    /// The history never exceeds its capacity whatever the input mix.
    #[test]
    fn history_never_exceeds_capacity(inputs in proptest::collection::vec("[0-9]{1,4}|abc|-5|0", 0..40)) {
        let mut c = controller();
        for text in inputs {
            c.dispatch_at(ConverterEvent::SetInputAmount(text), t0());
            prop_assert!(c.snapshot().history.len() <= 5);
        }
    }
}
