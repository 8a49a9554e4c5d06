use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::concentration::ConcentrationReport;
use crate::correlation::CorrelationReport;
use crate::signals::Signal;

/// The composite output of one analysis run. Never mutated after
/// creation; each run produces a new record and history is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub id: Uuid,
    pub portfolio_id: String,
    pub concentration: ConcentrationReport,
    pub correlation: CorrelationReport,
    pub signals: Vec<Signal>,
    /// Narrative summary: the raw backend response on success, a synthetic
    /// line otherwise.
    pub summary: String,
    pub analyzed_at: DateTime<Utc>,
}
