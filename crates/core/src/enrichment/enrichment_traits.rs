use async_trait::async_trait;

use blindspot_market_data::PriceBar;

use crate::enrichment::CompositionRecord;
use crate::errors::Result;

/// Persistence for enrichment caches. Writes are replace-style and
/// symbol-scoped: each call drops whatever was cached for the symbol and
/// stores the fresh rows, so re-running enrichment never duplicates data.
#[async_trait]
pub trait EnrichmentRepositoryTrait: Send + Sync {
    async fn replace_price_history(&self, symbol: &str, bars: &[PriceBar]) -> Result<()>;

    /// An empty `records` slice is a valid write: it clears the cache for
    /// a symbol whose composition resolved to nothing.
    async fn replace_composition(&self, symbol: &str, records: &[CompositionRecord])
        -> Result<()>;
}
