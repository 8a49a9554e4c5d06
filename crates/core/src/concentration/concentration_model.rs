use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Alert severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Warning,
    Critical,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Critical => "critical",
        }
    }
}

/// Which concentration rule fired.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertCategory {
    Sector,
    Country,
    HomeBias,
    SingleHolding,
}

impl AlertCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertCategory::Sector => "sector",
            AlertCategory::Country => "country",
            AlertCategory::HomeBias => "home_bias",
            AlertCategory::SingleHolding => "single_holding",
        }
    }
}

/// A single concentration warning. Immutable once produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcentrationAlert {
    pub category: AlertCategory,
    /// The bucket or holding the alert is about, e.g. "Financials" or
    /// "Canada".
    pub name: String,
    pub weight_pct: Decimal,
    pub threshold_pct: Decimal,
    pub severity: Severity,
}

/// Output of one concentration audit run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConcentrationReport {
    pub alerts: Vec<ConcentrationAlert>,
    /// Look-through sector exposure, percent of portfolio per bucket.
    pub sector_weights: BTreeMap<String, Decimal>,
    /// Look-through country exposure, percent of portfolio per bucket.
    pub country_weights: BTreeMap<String, Decimal>,
    pub home_bias_pct: Decimal,
}
