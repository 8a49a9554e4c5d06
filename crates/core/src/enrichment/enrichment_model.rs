use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use blindspot_market_data::{Composition, PriceBar};

/// Daily price series per normalized symbol. Symbols whose fetch failed or
/// returned nothing are simply absent.
pub type PriceHistoryMap = HashMap<String, Vec<PriceBar>>;

/// Resolved sector/country composition per normalized symbol.
pub type CompositionMap = HashMap<String, Composition>;

/// One cached composition row: the sector x country cross-product of a
/// symbol's resolved weights, so `weight_pct` is sector% x country% / 100.
/// A symbol missing one axis produces no rows; the in-memory composition
/// map is what downstream stages consume, the records are cache-only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CompositionRecord {
    pub symbol: String,
    pub sector: String,
    pub country: String,
    pub weight_pct: Decimal,
    /// Which resolution strategy produced this row.
    pub source: String,
    pub fetched_at: DateTime<Utc>,
}

/// Everything the enrichment pass produced for one batch of symbols.
#[derive(Debug, Clone, Default)]
pub struct EnrichmentData {
    pub price_history: PriceHistoryMap,
    pub compositions: CompositionMap,
}
