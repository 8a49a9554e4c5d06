use serde::{Deserialize, Serialize};

/// A strategic signal surfaced to the user. Generated and rule-based
/// fallback signals share this shape; ids distinguish them by convention
/// (fallbacks use the `SIG-AUTO-` prefix).
///
/// Field names stay snake_case because this is the schema the generation
/// backend is instructed to emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub signal_id: String,
    pub title: String,
    pub description: String,
    /// "info" | "warning" | "critical"
    pub severity: String,
    /// e.g. "concentration", "correlation", "home_bias"
    pub category: String,
    pub affected_holdings: Vec<String>,
    pub recommendation: String,
}
