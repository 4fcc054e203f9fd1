//! Conversion engine and direction handling.

use fxpulse_common::{round_amount, Currency, CurrencyPair};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Which of the two currencies is the input side of a conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    /// Input in the base currency, output in the quote currency.
    BaseToQuote,
    /// Input in the quote currency, output in the base currency.
    QuoteToBase,
}

impl Direction {
    /// The opposite direction.
    pub fn toggled(self) -> Self {
        match self {
            Direction::BaseToQuote => Direction::QuoteToBase,
            Direction::QuoteToBase => Direction::BaseToQuote,
        }
    }

    /// Input-side currency for this direction.
    pub fn input_currency(self, pair: &CurrencyPair) -> Currency {
        match self {
            Direction::BaseToQuote => pair.base.clone(),
            Direction::QuoteToBase => pair.quote.clone(),
        }
    }

    /// Output-side currency for this direction.
    pub fn output_currency(self, pair: &CurrencyPair) -> Currency {
        match self {
            Direction::BaseToQuote => pair.quote.clone(),
            Direction::QuoteToBase => pair.base.clone(),
        }
    }
}

/// Computes conversion outputs under the currently effective rate.
#[derive(Debug, Clone, Default)]
pub struct ConversionEngine;

impl ConversionEngine {
    /// Create a new engine.
    pub fn new() -> Self {
        Self
    }

    /// Parse raw amount text into a decimal amount.
    ///
    /// Returns `None` for text that does not parse to a number.
    pub fn parse_amount(text: &str) -> Option<Decimal> {
        text.trim().parse::<Decimal>().ok()
    }

    /// Convert an amount under the effective rate.
    ///
    /// Base-to-quote multiplies, quote-to-base divides; the result is
    /// rounded half away from zero to 2 decimal places. Returns `None`
    /// when the arithmetic is undefined (division by a zero rate) or
    /// overflows.
    pub fn convert(
        &self,
        amount: Decimal,
        direction: Direction,
        effective_rate: Decimal,
    ) -> Option<Decimal> {
        let raw = match direction {
            Direction::BaseToQuote => amount.checked_mul(effective_rate)?,
            Direction::QuoteToBase => amount.checked_div(effective_rate)?,
        };
        Some(round_amount(raw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fxpulse_common::{Currency, CurrencyPair};
    use rust_decimal_macros::dec;

    #[test]
    fn test_base_to_quote_multiplies() {
        let engine = ConversionEngine::new();
        let out = engine
            .convert(dec!(100), Direction::BaseToQuote, dec!(1.1))
            .unwrap();
        assert_eq!(out.to_string(), "110.00");
    }

    #[test]
    fn test_quote_to_base_divides() {
        let engine = ConversionEngine::new();
        let out = engine
            .convert(dec!(110), Direction::QuoteToBase, dec!(1.1))
            .unwrap();
        assert_eq!(out.to_string(), "100.00");
    }

    #[test]
    fn test_rounding_at_scale() {
        let engine = ConversionEngine::new();
        let out = engine
            .convert(dec!(9999999), Direction::BaseToQuote, dec!(1.1))
            .unwrap();
        assert_eq!(out.to_string(), "10999998.90");
    }

    #[test]
    fn test_division_by_zero_rate_fails() {
        let engine = ConversionEngine::new();
        assert!(engine
            .convert(dec!(100), Direction::QuoteToBase, dec!(0))
            .is_none());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(ConversionEngine::parse_amount(" 100.5 "), Some(dec!(100.5)));
        assert_eq!(ConversionEngine::parse_amount("-100"), Some(dec!(-100)));
        assert_eq!(ConversionEngine::parse_amount("abc"), None);
        assert_eq!(ConversionEngine::parse_amount(""), None);
    }

    #[test]
    fn test_direction_toggle_and_currencies() {
        let pair = CurrencyPair::new(Currency::eur(), Currency::usd());

        let d = Direction::BaseToQuote;
        assert_eq!(d.input_currency(&pair), Currency::eur());
        assert_eq!(d.output_currency(&pair), Currency::usd());

        let t = d.toggled();
        assert_eq!(t, Direction::QuoteToBase);
        assert_eq!(t.input_currency(&pair), Currency::usd());
        assert_eq!(t.toggled(), Direction::BaseToQuote);
    }
}
