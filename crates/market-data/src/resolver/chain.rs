//! Ordered composition-resolver chain.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::errors::MarketDataError;
use crate::lookthrough;
use crate::models::Composition;
use crate::provider::MarketDataProvider;
use crate::resolver::country_to_code;

/// A single composition-resolution strategy.
///
/// Returning an empty [`Composition`] means "I have nothing for this
/// symbol"; the chain then asks the next resolver. Errors are treated the
/// same way so a provider outage degrades to the next strategy rather than
/// failing the symbol.
#[async_trait]
pub trait CompositionResolver: Send + Sync {
    /// Short name for logging.
    fn id(&self) -> &'static str;

    async fn resolve(&self, symbol: &str) -> Result<Composition, MarketDataError>;
}

/// Resolver backed by the curated ETF look-through table.
pub struct StaticLookthroughResolver;

#[async_trait]
impl CompositionResolver for StaticLookthroughResolver {
    fn id(&self) -> &'static str {
        "STATIC_LOOKTHROUGH"
    }

    async fn resolve(&self, symbol: &str) -> Result<Composition, MarketDataError> {
        Ok(lookthrough::lookup(symbol).unwrap_or_default())
    }
}

/// Resolver that classifies a single security from its instrument profile,
/// treating the one sector/country as a 100% weight.
pub struct ProfileResolver {
    provider: Arc<dyn MarketDataProvider>,
}

impl ProfileResolver {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl CompositionResolver for ProfileResolver {
    fn id(&self) -> &'static str {
        "PROFILE"
    }

    async fn resolve(&self, symbol: &str) -> Result<Composition, MarketDataError> {
        let profile = self.provider.get_profile(symbol).await?;

        let Some(sector) = profile.sector else {
            return Ok(Composition::default());
        };

        let country_code = profile
            .country
            .as_deref()
            .map(country_to_code)
            .unwrap_or("OTH");

        let mut composition = Composition::default();
        composition.sectors.insert(sector, dec!(100.0));
        composition
            .countries
            .insert(country_code.to_string(), dec!(100.0));
        Ok(composition)
    }
}

/// Resolver that uses provider fund-level sector weightings (no country
/// data at this level).
pub struct FundSectorResolver {
    provider: Arc<dyn MarketDataProvider>,
}

impl FundSectorResolver {
    pub fn new(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self { provider }
    }
}

#[async_trait]
impl CompositionResolver for FundSectorResolver {
    fn id(&self) -> &'static str {
        "FUND_SECTORS"
    }

    async fn resolve(&self, symbol: &str) -> Result<Composition, MarketDataError> {
        let sectors: HashMap<String, Decimal> =
            self.provider.get_fund_sector_weightings(symbol).await?;

        Ok(Composition {
            sectors,
            countries: HashMap::new(),
        })
    }
}

/// A resolved composition together with the strategy that produced it.
#[derive(Debug, Clone)]
pub struct ResolvedComposition {
    pub composition: Composition,
    /// Id of the winning resolver, or `"UNRESOLVED"` when every strategy
    /// came back empty.
    pub source: &'static str,
}

/// The ordered resolver chain.
///
/// Strategies are queried in priority order; the first non-empty result
/// wins. If every strategy comes back empty (or errors) the symbol resolves
/// to an empty composition, which is a valid low-confidence outcome.
pub struct CompositionResolverChain {
    resolvers: Vec<Box<dyn CompositionResolver>>,
}

impl CompositionResolverChain {
    pub fn new(resolvers: Vec<Box<dyn CompositionResolver>>) -> Self {
        Self { resolvers }
    }

    /// Standard chain: static table, then instrument profile, then fund
    /// sector weightings.
    pub fn with_provider(provider: Arc<dyn MarketDataProvider>) -> Self {
        Self::new(vec![
            Box::new(StaticLookthroughResolver),
            Box::new(ProfileResolver::new(provider.clone())),
            Box::new(FundSectorResolver::new(provider)),
        ])
    }

    /// Resolve the composition for a symbol.
    pub async fn resolve(&self, symbol: &str) -> ResolvedComposition {
        for resolver in &self.resolvers {
            match resolver.resolve(symbol).await {
                Ok(composition) if !composition.is_empty() => {
                    debug!(
                        "Composition for {} resolved by {}",
                        symbol,
                        resolver.id()
                    );
                    return ResolvedComposition {
                        composition,
                        source: resolver.id(),
                    };
                }
                Ok(_) => {}
                Err(e) => {
                    debug!(
                        "Composition resolver {} failed for {}: {}",
                        resolver.id(),
                        symbol,
                        e
                    );
                }
            }
        }

        ResolvedComposition {
            composition: Composition::default(),
            source: "UNRESOLVED",
        }
    }
}
