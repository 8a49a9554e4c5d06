//! Market data provider trait definition.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

use crate::errors::MarketDataError;
use crate::models::{InstrumentProfile, PriceBar};

/// Trait for market data providers.
///
/// Implement this trait to add support for a new market data source.
/// Profile and fund-weighting lookups are optional capabilities; the
/// default implementations return [`MarketDataError::NotSupported`] so the
/// composition resolver chain can fall through to the next strategy.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Unique identifier for this provider.
    ///
    /// Should be a constant string like "YAHOO". Used for logging and
    /// error attribution.
    fn id(&self) -> &'static str;

    /// Fetch historical daily bars for a symbol.
    ///
    /// Bars are returned ordered by date ascending, close prices already
    /// converted to integer minor-currency units.
    async fn get_historical_bars(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PriceBar>, MarketDataError>;

    /// Fetch instrument profile (name, quote type, sector, country).
    async fn get_profile(&self, symbol: &str) -> Result<InstrumentProfile, MarketDataError> {
        let _ = symbol;
        Err(MarketDataError::NotSupported {
            operation: "profile".to_string(),
            provider: self.id().to_string(),
        })
    }

    /// Fetch fund-level sector weightings (percentages in 0-100).
    ///
    /// Only meaningful for ETFs and mutual funds; an empty map means the
    /// provider has no breakdown for this symbol.
    async fn get_fund_sector_weightings(
        &self,
        symbol: &str,
    ) -> Result<HashMap<String, Decimal>, MarketDataError> {
        let _ = symbol;
        Err(MarketDataError::NotSupported {
            operation: "fund_sector_weightings".to_string(),
            provider: self.id().to_string(),
        })
    }
}
