//! Pipeline orchestrator.
//!
//! Sequences normalize -> enrich -> audit -> correlate -> generate and
//! assembles the final result. Linear by design; every stage consumes the
//! previous stage's output.

use std::sync::Arc;

use chrono::Utc;
use log::info;
use uuid::Uuid;

use blindspot_ai::GenerationBackend;
use blindspot_market_data::MarketDataProvider;

use crate::analysis::{AnalysisRepositoryTrait, AnalysisResult};
use crate::concentration::run_concentration_audit;
use crate::correlation::run_correlation_analysis;
use crate::enrichment::{EnrichmentData, EnrichmentRepositoryTrait, EnrichmentService};
use crate::errors::Result;
use crate::holdings::{HoldingsService, HoldingsSourceTrait};
use crate::signals::SignalService;

pub struct AnalysisService {
    holdings: HoldingsService,
    enrichment: EnrichmentService,
    signals: SignalService,
    repository: Arc<dyn AnalysisRepositoryTrait>,
}

impl AnalysisService {
    pub fn new(
        holdings_source: Arc<dyn HoldingsSourceTrait>,
        market_data: Arc<dyn MarketDataProvider>,
        enrichment_repository: Arc<dyn EnrichmentRepositoryTrait>,
        backend: Arc<dyn GenerationBackend>,
        repository: Arc<dyn AnalysisRepositoryTrait>,
    ) -> Self {
        Self {
            holdings: HoldingsService::new(holdings_source),
            enrichment: EnrichmentService::new(market_data, enrichment_repository),
            signals: SignalService::new(backend),
            repository,
        }
    }

    /// Run the complete analysis pipeline for one portfolio.
    ///
    /// `skip_enrichment` bypasses the market-data fetches and feeds empty
    /// enrichment maps to the downstream stages, which degrade gracefully.
    /// An unknown portfolio id propagates from the holdings source; a
    /// portfolio with no positions short-circuits to an empty result that
    /// is returned but not persisted.
    pub async fn run_full_analysis(
        &self,
        portfolio_id: &str,
        skip_enrichment: bool,
    ) -> Result<AnalysisResult> {
        info!("Analysis pipeline started for {}", portfolio_id);

        let holdings = self.holdings.load_holdings_table(portfolio_id).await?;

        if holdings.is_empty() {
            return Ok(AnalysisResult {
                id: Uuid::new_v4(),
                portfolio_id: portfolio_id.to_string(),
                concentration: Default::default(),
                correlation: Default::default(),
                signals: Vec::new(),
                summary: "No positions found. Please sync your brokerage account first."
                    .to_string(),
                analyzed_at: Utc::now(),
            });
        }

        let enrichment = if skip_enrichment {
            info!("Enrichment skipped, running on cached/empty data");
            EnrichmentData::default()
        } else {
            self.enrichment.collect(&holdings.symbols()).await
        };

        let concentration = run_concentration_audit(&holdings, &enrichment.compositions);
        let correlation = run_correlation_analysis(&enrichment.price_history, &holdings);

        let (signals, summary) = self
            .signals
            .generate(&holdings, &concentration, &correlation)
            .await;

        let result = AnalysisResult {
            id: Uuid::new_v4(),
            portfolio_id: portfolio_id.to_string(),
            concentration,
            correlation,
            signals,
            summary: if summary.is_empty() {
                "Analysis complete.".to_string()
            } else {
                summary
            },
            analyzed_at: Utc::now(),
        };

        // Single append-only write; persistence failures propagate.
        self.repository.save(&result).await?;

        info!(
            "Analysis pipeline complete for {}: {} signals, {} alerts",
            portfolio_id,
            result.signals.len(),
            result.concentration.alerts.len()
        );

        Ok(result)
    }
}
