use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A pair of holdings that move together. The pair is canonicalized so
/// (A, B) and (B, A) collapse into one record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiddenTwin {
    pub symbol_a: String,
    pub symbol_b: String,
    /// Pearson coefficient of daily returns, rounded to 4 decimals.
    pub correlation: f64,
    pub explanation: String,
}

/// Output of one correlation analysis run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorrelationReport {
    /// Sorted by descending absolute correlation.
    pub hidden_twins: Vec<HiddenTwin>,
    /// Symmetric symbol x symbol matrix; empty when fewer than two symbols
    /// had a usable return series.
    pub correlation_matrix: BTreeMap<String, BTreeMap<String, f64>>,
}
