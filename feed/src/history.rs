//! Bounded conversion history.

use std::collections::VecDeque;

use fxpulse_common::{round_amount, round_rate, ConversionId, Money, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A completed conversion. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRecord {
    /// Unique record ID.
    pub id: ConversionId,
    /// The simulated real rate at conversion time (4 dp).
    pub real_rate: Decimal,
    /// The rate actually applied: override if active, else real (4 dp).
    pub used_rate: Decimal,
    /// Input amount and currency (2 dp).
    pub input: Money,
    /// Output amount and currency (2 dp).
    pub output: Money,
    /// When the conversion was recorded.
    pub recorded_at: Timestamp,
}

impl ConversionRecord {
    /// Create a new record, normalizing rates to 4 dp and amounts to 2 dp.
    pub fn new(
        real_rate: Decimal,
        used_rate: Decimal,
        input: Money,
        output: Money,
        recorded_at: Timestamp,
    ) -> Self {
        Self {
            id: ConversionId::new(),
            real_rate: round_rate(real_rate),
            used_rate: round_rate(used_rate),
            input: Money::new(round_amount(input.value), input.currency),
            output: Money::new(round_amount(output.value), output.currency),
            recorded_at,
        }
    }

    /// Wall-clock display time of the record.
    pub fn timestamp_display(&self) -> String {
        self.recorded_at.format("%H:%M:%S").to_string()
    }
}

/// Newest-first log of completed conversions with a fixed capacity.
#[derive(Debug, Clone)]
pub struct HistoryLog {
    entries: VecDeque<ConversionRecord>,
    capacity: usize,
    total_recorded: u64,
}

impl HistoryLog {
    /// Create a log retaining at most `capacity` records.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            total_recorded: 0,
        }
    }

    /// Prepend a record, evicting the oldest entries beyond capacity.
    pub fn push(&mut self, record: ConversionRecord) {
        self.entries.push_front(record);
        self.entries.truncate(self.capacity);
        self.total_recorded += 1;
    }

    /// Number of retained records.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the log is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total records ever pushed, including evicted ones.
    pub fn total_recorded(&self) -> u64 {
        self.total_recorded
    }

    /// Most recent record, if any.
    pub fn latest(&self) -> Option<&ConversionRecord> {
        self.entries.front()
    }

    /// Iterate newest first.
    pub fn iter(&self) -> impl Iterator<Item = &ConversionRecord> {
        self.entries.iter()
    }

    /// Clone out the retained records, newest first.
    pub fn records(&self) -> Vec<ConversionRecord> {
        self.entries.iter().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use fxpulse_common::Currency;
    use rust_decimal_macros::dec;

    fn record(amount: Decimal) -> ConversionRecord {
        ConversionRecord::new(
            dec!(1.1),
            dec!(1.1),
            Money::new(amount, Currency::eur()),
            Money::new(amount * dec!(1.1), Currency::usd()),
            Utc.with_ymd_and_hms(2026, 1, 1, 12, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_record_normalizes_scales() {
        let r = record(dec!(100));
        assert_eq!(r.real_rate.to_string(), "1.1000");
        assert_eq!(r.used_rate.to_string(), "1.1000");
        assert_eq!(r.input.value.to_string(), "100.00");
        assert_eq!(r.output.value.to_string(), "110.00");
        assert_eq!(r.timestamp_display(), "12:00:00");
    }

    #[test]
    fn test_push_is_newest_first() {
        let mut log = HistoryLog::with_capacity(5);
        log.push(record(dec!(1)));
        log.push(record(dec!(2)));

        assert_eq!(log.latest().unwrap().input.value, dec!(2.00));
        let amounts: Vec<_> = log.iter().map(|r| r.input.value).collect();
        assert_eq!(amounts, vec![dec!(2.00), dec!(1.00)]);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut log = HistoryLog::with_capacity(5);
        for i in 1..=8 {
            log.push(record(Decimal::from(i)));
        }

        assert_eq!(log.len(), 5);
        assert_eq!(log.total_recorded(), 8);
        let amounts: Vec<_> = log.iter().map(|r| r.input.value).collect();
        assert_eq!(
            amounts,
            vec![
                dec!(8.00),
                dec!(7.00),
                dec!(6.00),
                dec!(5.00),
                dec!(4.00)
            ]
        );
    }

    #[test]
    fn test_identical_amounts_stay_distinct() {
        let mut log = HistoryLog::with_capacity(5);
        log.push(record(dec!(100)));
        log.push(record(dec!(100)));

        assert_eq!(log.len(), 2);
        let ids: Vec<_> = log.iter().map(|r| r.id).collect();
        assert_ne!(ids[0], ids[1]);
    }
}
