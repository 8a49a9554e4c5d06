//! Enrichment collector.
//!
//! Fetches trailing price history and sector/country composition for a
//! batch of symbols. Both passes are best-effort per symbol: a provider
//! failure is logged and the symbol skipped, never escalated, so one bad
//! ticker cannot sink the batch.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use log::{error, info, warn};
use rust_decimal_macros::dec;

use blindspot_market_data::resolver::ResolvedComposition;
use blindspot_market_data::{CompositionResolverChain, MarketDataProvider};

use crate::constants::DEFAULT_LOOKBACK_DAYS;
use crate::enrichment::{
    CompositionMap, CompositionRecord, EnrichmentData, EnrichmentRepositoryTrait, PriceHistoryMap,
};

pub struct EnrichmentService {
    provider: Arc<dyn MarketDataProvider>,
    resolver: CompositionResolverChain,
    repository: Arc<dyn EnrichmentRepositoryTrait>,
}

impl EnrichmentService {
    pub fn new(
        provider: Arc<dyn MarketDataProvider>,
        repository: Arc<dyn EnrichmentRepositoryTrait>,
    ) -> Self {
        let resolver = CompositionResolverChain::with_provider(provider.clone());
        Self {
            provider,
            resolver,
            repository,
        }
    }

    /// Run both enrichment passes over one batch of symbols.
    pub async fn collect(&self, symbols: &[String]) -> EnrichmentData {
        EnrichmentData {
            price_history: self.collect_price_history(symbols).await,
            compositions: self.collect_compositions(symbols).await,
        }
    }

    /// Fetch the trailing daily price series for each symbol and replace
    /// the cached series with the fresh one. Symbols that fail or return
    /// nothing are absent from the map.
    pub async fn collect_price_history(&self, symbols: &[String]) -> PriceHistoryMap {
        let end = Utc::now();
        let start = end - Duration::days(DEFAULT_LOOKBACK_DAYS);

        let mut history = PriceHistoryMap::new();
        for symbol in symbols {
            match self.provider.get_historical_bars(symbol, start, end).await {
                Ok(bars) if bars.is_empty() => {
                    warn!("No price data for {}", symbol);
                }
                Ok(bars) => {
                    if let Err(e) = self.repository.replace_price_history(symbol, &bars).await {
                        error!("Failed to cache price history for {}: {}", symbol, e);
                    }
                    info!("Fetched {} price bars for {}", bars.len(), symbol);
                    history.insert(symbol.clone(), bars);
                }
                Err(e) => {
                    error!("Price history fetch failed for {}: {}", symbol, e);
                }
            }
        }
        history
    }

    /// Resolve the sector/country composition for each symbol and replace
    /// its cached cross-product rows. Every symbol gets a map entry, even
    /// when resolution came back empty; empty is a valid low-confidence
    /// outcome and also clears any stale cache rows for the symbol.
    pub async fn collect_compositions(&self, symbols: &[String]) -> CompositionMap {
        let fetched_at = Utc::now();

        let mut compositions = CompositionMap::new();
        for symbol in symbols {
            let resolved = self.resolver.resolve(symbol).await;
            let records = composition_records(symbol, &resolved, fetched_at);

            if let Err(e) = self.repository.replace_composition(symbol, &records).await {
                error!("Failed to cache composition for {}: {}", symbol, e);
            }
            info!(
                "Composition for {}: {} sectors, {} countries ({})",
                symbol,
                resolved.composition.sectors.len(),
                resolved.composition.countries.len(),
                resolved.source
            );
            compositions.insert(symbol.clone(), resolved.composition);
        }
        compositions
    }
}

/// Expand a resolved composition into its sector x country cross-product
/// cache rows, sorted for stable persistence order.
pub fn composition_records(
    symbol: &str,
    resolved: &ResolvedComposition,
    fetched_at: DateTime<Utc>,
) -> Vec<CompositionRecord> {
    let mut records = Vec::new();
    for (sector, sector_pct) in &resolved.composition.sectors {
        for (country, country_pct) in &resolved.composition.countries {
            records.push(CompositionRecord {
                symbol: symbol.to_string(),
                sector: sector.clone(),
                country: country.clone(),
                weight_pct: (sector_pct * country_pct / dec!(100)).round_dp(2),
                source: resolved.source.to_string(),
                fetched_at,
            });
        }
    }
    records.sort_by(|a, b| (&a.sector, &a.country).cmp(&(&b.sector, &b.country)));
    records
}
