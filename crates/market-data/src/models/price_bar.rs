use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single daily price observation.
///
/// Close prices are stored as integer minor-currency units (cents),
/// rounded from the provider's floating-point close.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PriceBar {
    pub date: NaiveDate,
    pub close_cents: i64,
    pub volume: i64,
}

impl PriceBar {
    /// Close price as a float in major units. Used for return derivation.
    pub fn close(&self) -> f64 {
        self.close_cents as f64 / 100.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_close_converts_minor_units() {
        let bar = PriceBar {
            date: NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            close_cents: 12_345,
            volume: 1000,
        };
        assert!((bar.close() - 123.45).abs() < f64::EPSILON);
    }
}
