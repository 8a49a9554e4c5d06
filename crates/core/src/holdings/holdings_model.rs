use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Asset class of a position.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AssetClass {
    Equity,
    FixedIncome,
    Cash,
    Crypto,
    Other,
}

impl AssetClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            AssetClass::Equity => "equity",
            AssetClass::FixedIncome => "fixed_income",
            AssetClass::Cash => "cash",
            AssetClass::Crypto => "crypto",
            AssetClass::Other => "other",
        }
    }
}

/// A raw position as delivered by the holdings/account source, already
/// joined with its owning account's metadata. All monetary amounts are
/// integer minor-currency units (cents) in a single reporting currency.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RawPosition {
    pub symbol: String,
    pub description: Option<String>,
    pub asset_class: AssetClass,
    pub units: Decimal,
    pub cost_basis_cents: i64,
    pub market_value_cents: i64,
    pub currency: String,
    pub exchange: Option<String>,
    pub last_price_cents: i64,
    pub account_name: String,
    pub account_type: String,
}

/// One row of the canonical holdings table. Gain and weight fields are
/// derived during the table build, never stored inputs.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HoldingRow {
    pub symbol: String,
    /// Exchange-qualified symbol (e.g. "VGRO.TO").
    pub normalized_symbol: String,
    pub description: Option<String>,
    pub asset_class: AssetClass,
    pub units: Decimal,
    pub cost_basis_cents: i64,
    pub market_value_cents: i64,
    pub currency: String,
    pub exchange: Option<String>,
    pub last_price_cents: i64,
    pub account_name: String,
    pub account_type: String,
    pub gain_loss_cents: i64,
    pub gain_loss_pct: Decimal,
    /// Percent of total portfolio market value, rounded to 2 decimals.
    pub weight_pct: Decimal,
}

/// The canonical holdings table consumed by every downstream stage.
///
/// Invariant: the `weight_pct` values of all rows sum to 100 (within
/// rounding) whenever `total_value_cents > 0`, and are all 0 otherwise.
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct HoldingsTable {
    pub rows: Vec<HoldingRow>,
    pub total_value_cents: i64,
    pub total_cost_cents: i64,
}

impl HoldingsTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Unique normalized symbols, in first-seen order.
    pub fn symbols(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        self.rows
            .iter()
            .filter(|row| seen.insert(row.normalized_symbol.clone()))
            .map(|row| row.normalized_symbol.clone())
            .collect()
    }

    /// Combined weight of all rows carrying the given normalized symbol
    /// (0 if the symbol is not present).
    pub fn weight_of(&self, normalized_symbol: &str) -> Decimal {
        self.rows
            .iter()
            .filter(|row| row.normalized_symbol == normalized_symbol)
            .map(|row| row.weight_pct)
            .sum()
    }
}
