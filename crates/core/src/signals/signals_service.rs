//! Signal generation and merge.
//!
//! Dispatches the assembled context to the configured generation backend,
//! parses the response defensively, then tops the generated list up with
//! rule-based fallback signals so threshold findings are never silently
//! dropped when the backend misses (or is down).

use std::sync::Arc;

use log::{error, info};
use serde_json::Value;

use blindspot_ai::GenerationBackend;

use crate::concentration::{AlertCategory, ConcentrationReport};
use crate::correlation::CorrelationReport;
use crate::holdings::HoldingsTable;
use crate::pii::strip_pii;
use crate::signals::{build_analysis_prompt, parse_signals, Signal};

pub struct SignalService {
    backend: Arc<dyn GenerationBackend>,
}

impl SignalService {
    pub fn new(backend: Arc<dyn GenerationBackend>) -> Self {
        Self { backend }
    }

    /// Generate signals for one analysis run.
    ///
    /// Returns the merged signal list and the summary text: the raw
    /// backend response on success, or a synthetic line naming the backend
    /// and the failure. Backend errors never propagate.
    pub async fn generate(
        &self,
        holdings: &HoldingsTable,
        concentration: &ConcentrationReport,
        correlation: &CorrelationReport,
    ) -> (Vec<Signal>, String) {
        let (system_prompt, user_prompt) = build_analysis_prompt(holdings, concentration, correlation);

        // The context crosses the trust boundary to an external provider,
        // so it goes through the PII filter first.
        let user_prompt = match strip_pii(&Value::String(user_prompt)) {
            Value::String(sanitized) => sanitized,
            other => other.to_string(),
        };

        let (generated, summary) = match self.backend.generate(&system_prompt, &user_prompt).await
        {
            Ok(raw) => (parse_signals(&raw), raw),
            Err(e) => {
                error!("Signal generation failed on {}: {}", self.backend.id(), e);
                (
                    Vec::new(),
                    format!("AI analysis unavailable ({}): {}", self.backend.id(), e),
                )
            }
        };

        info!(
            "Backend {} produced {} signals",
            self.backend.id(),
            generated.len()
        );

        (merge_signals(generated, concentration, correlation), summary)
    }
}

/// Merge generated signals with rule-based fallbacks.
///
/// Order-stable: generated signals first, then synthesized ones in the
/// order alerts and twins were produced. A concentration alert is skipped
/// when a generated title already contains its subject name
/// (case-insensitively); a twin is skipped when a generated signal lists
/// both symbols among its affected holdings. Fallback ids continue the
/// sequence after the generated signals.
pub fn merge_signals(
    generated: Vec<Signal>,
    concentration: &ConcentrationReport,
    correlation: &CorrelationReport,
) -> Vec<Signal> {
    let mut signals = generated.clone();
    let mut counter = signals.len() + 1;

    for alert in &concentration.alerts {
        let subject = alert.name.to_lowercase();
        if generated
            .iter()
            .any(|s| s.title.to_lowercase().contains(&subject))
        {
            continue;
        }

        match alert.category {
            AlertCategory::HomeBias => {
                signals.push(Signal {
                    signal_id: format!("SIG-AUTO-{:03}", counter),
                    title: format!("Canadian Home Bias: {:.0}%", alert.weight_pct),
                    description: format!(
                        "Your portfolio has {:.1}% exposure to Canadian assets, \
                         exceeding the {:.0}% threshold. Canada represents only ~3% of \
                         global market capitalization. Over-concentration in your home \
                         market increases vulnerability to domestic economic shocks.",
                        alert.weight_pct, alert.threshold_pct
                    ),
                    severity: alert.severity.as_str().to_string(),
                    category: "home_bias".to_string(),
                    affected_holdings: Vec::new(),
                    recommendation: "Consider increasing international diversification \
                                     through global equity ETFs (e.g., XAW, VXC) to reduce \
                                     home bias."
                        .to_string(),
                });
            }
            AlertCategory::Sector => {
                signals.push(Signal {
                    signal_id: format!("SIG-AUTO-{:03}", counter),
                    title: format!(
                        "{} Sector Concentration: {:.0}%",
                        alert.name, alert.weight_pct
                    ),
                    description: format!(
                        "Your look-through {} sector exposure is {:.1}%, exceeding \
                         the {:.0}% threshold. A sector-specific downturn could have an \
                         outsized impact on your portfolio.",
                        alert.name, alert.weight_pct, alert.threshold_pct
                    ),
                    severity: alert.severity.as_str().to_string(),
                    category: "concentration".to_string(),
                    affected_holdings: Vec::new(),
                    recommendation: format!(
                        "Review holdings with {} exposure and consider rebalancing.",
                        alert.name
                    ),
                });
            }
            // Country and single-holding alerts stay alert-only; they
            // still consume an id so numbering is stable across runs.
            AlertCategory::Country | AlertCategory::SingleHolding => {}
        }

        counter += 1;
    }

    for twin in &correlation.hidden_twins {
        if generated.iter().any(|s| {
            s.affected_holdings.contains(&twin.symbol_a)
                && s.affected_holdings.contains(&twin.symbol_b)
        }) {
            continue;
        }

        signals.push(Signal {
            signal_id: format!("SIG-AUTO-{:03}", counter),
            title: format!("Hidden Twin: {} & {}", twin.symbol_a, twin.symbol_b),
            description: twin.explanation.clone(),
            severity: "warning".to_string(),
            category: "correlation".to_string(),
            affected_holdings: vec![twin.symbol_a.clone(), twin.symbol_b.clone()],
            recommendation: format!(
                "Review whether holding both {} and {} provides meaningful \
                 diversification given their {:.0}% correlation.",
                twin.symbol_a,
                twin.symbol_b,
                twin.correlation * 100.0
            ),
        });
        counter += 1;
    }

    signals
}
