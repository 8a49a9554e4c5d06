//! Yahoo Finance market data provider.
//!
//! Historical bars come through the `yahoo_finance_api` library; profile and
//! fund sector weightings use the quoteSummary endpoint, which requires
//! crumb/cookie authentication.

mod models;

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use lazy_static::lazy_static;
use num_traits::FromPrimitive;
use reqwest::header;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use tracing::{debug, warn};
use urlencoding::encode;
use yahoo_finance_api as yahoo;

use crate::errors::MarketDataError;
use crate::models::{InstrumentProfile, PriceBar};
use crate::provider::MarketDataProvider;

use models::{YahooQuoteSummaryResponse, YahooQuoteSummaryResult};

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

// ============================================================================
// Crumb/Cookie Authentication
// ============================================================================

/// Cached Yahoo authentication data
#[derive(Debug, Clone)]
struct CrumbData {
    cookie: String,
    crumb: String,
}

lazy_static! {
    /// Global cache for the Yahoo authentication crumb
    static ref YAHOO_CRUMB: RwLock<Option<CrumbData>> = RwLock::default();
}

// ============================================================================
// Yahoo Provider
// ============================================================================

/// Yahoo Finance market data provider.
pub struct YahooProvider {
    connector: yahoo::YahooConnector,
}

impl YahooProvider {
    /// Create a new Yahoo Finance provider.
    pub fn new() -> Result<Self, MarketDataError> {
        let connector =
            yahoo::YahooConnector::new().map_err(|e| MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: format!("Failed to initialize Yahoo connector: {}", e),
            })?;
        Ok(Self { connector })
    }

    // ========================================================================
    // Crumb/Cookie Authentication
    // ========================================================================

    /// Ensure we have a valid Yahoo authentication crumb.
    async fn ensure_crumb(&self) -> Result<CrumbData, MarketDataError> {
        {
            let guard = YAHOO_CRUMB.read().unwrap_or_else(|e| e.into_inner());
            if let Some(crumb) = guard.as_ref() {
                return Ok(crumb.clone());
            }
        }

        self.fetch_crumb().await
    }

    /// Fetch a new Yahoo authentication crumb.
    async fn fetch_crumb(&self) -> Result<CrumbData, MarketDataError> {
        let client = reqwest::Client::new();

        // Step 1: Get cookie from fc.yahoo.com
        let response = client.get("https://fc.yahoo.com").send().await.map_err(|e| {
            MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: format!("Failed to get cookie: {}", e),
            }
        })?;

        let cookie = response
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|h| h.to_str().ok())
            .and_then(|s| s.split_once(';').map(|(v, _)| v.to_string()))
            .ok_or_else(|| MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: "Failed to parse Yahoo cookie".to_string(),
            })?;

        // Step 2: Get crumb using cookie
        let crumb = client
            .get("https://query1.finance.yahoo.com/v1/test/getcrumb")
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &cookie)
            .send()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: format!("Failed to get crumb: {}", e),
            })?
            .text()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: format!("Failed to read crumb: {}", e),
            })?;

        let data = CrumbData { cookie, crumb };

        {
            let mut guard = YAHOO_CRUMB.write().unwrap_or_else(|e| e.into_inner());
            *guard = Some(data.clone());
        }

        Ok(data)
    }

    /// Drop the cached crumb after an authentication failure.
    fn clear_crumb(&self) {
        let mut guard = YAHOO_CRUMB.write().unwrap_or_else(|e| e.into_inner());
        *guard = None;
    }

    // ========================================================================
    // quoteSummary Fetching
    // ========================================================================

    /// Fetch a quoteSummary result for the given modules.
    async fn fetch_quote_summary(
        &self,
        symbol: &str,
        modules: &str,
    ) -> Result<YahooQuoteSummaryResult, MarketDataError> {
        let crumb = self.ensure_crumb().await?;

        let url = format!(
            "https://query1.finance.yahoo.com/v10/finance/quoteSummary/{}?modules={}&crumb={}",
            encode(symbol),
            modules,
            encode(&crumb.crumb)
        );

        let client = reqwest::Client::new();
        let response = client
            .get(&url)
            .header(header::USER_AGENT, USER_AGENT)
            .header(header::COOKIE, &crumb.cookie)
            .send()
            .await
            .map_err(|e| MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: format!("quoteSummary request failed: {}", e),
            })?;

        if response.status() == reqwest::StatusCode::UNAUTHORIZED {
            self.clear_crumb();
            return Err(MarketDataError::ProviderError {
                provider: "YAHOO".to_string(),
                message: "Yahoo authentication expired".to_string(),
            });
        }

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited {
                provider: "YAHOO".to_string(),
            });
        }

        let data: YahooQuoteSummaryResponse =
            response
                .json()
                .await
                .map_err(|e| MarketDataError::ProviderError {
                    provider: "YAHOO".to_string(),
                    message: format!("Failed to parse quoteSummary response: {}", e),
                })?;

        data.quote_summary
            .result
            .into_iter()
            .next()
            .ok_or_else(|| MarketDataError::SymbolNotFound(symbol.to_string()))
    }

    /// Convert chrono DateTime<Utc> to time::OffsetDateTime for the Yahoo API.
    fn chrono_to_offset_datetime(dt: DateTime<Utc>) -> OffsetDateTime {
        OffsetDateTime::from_unix_timestamp(dt.timestamp())
            .unwrap_or_else(|_| OffsetDateTime::now_utc())
    }

    /// Convert a Yahoo quote to a daily price bar.
    fn yahoo_quote_to_bar(&self, yahoo_quote: &yahoo::Quote) -> Option<PriceBar> {
        let timestamp: DateTime<Utc> = Utc
            .timestamp_opt(yahoo_quote.timestamp as i64, 0)
            .single()?;

        if !yahoo_quote.close.is_finite() {
            return None;
        }

        Some(PriceBar {
            date: timestamp.date_naive(),
            close_cents: (yahoo_quote.close * 100.0).round() as i64,
            volume: yahoo_quote.volume as i64,
        })
    }
}

// ============================================================================
// MarketDataProvider Implementation
// ============================================================================

#[async_trait]
impl MarketDataProvider for YahooProvider {
    fn id(&self) -> &'static str {
        "YAHOO"
    }

    async fn get_historical_bars(
        &self,
        symbol: &str,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    ) -> Result<Vec<PriceBar>, MarketDataError> {
        debug!(
            "Fetching historical bars for {} from {} to {} from Yahoo",
            symbol, start, end
        );

        let start_time = Self::chrono_to_offset_datetime(start);
        let end_time = Self::chrono_to_offset_datetime(end);

        let response = self
            .connector
            .get_quote_history(symbol, start_time, end_time)
            .await
            .map_err(|e| {
                if matches!(e, yahoo::YahooError::NoQuotes | yahoo::YahooError::NoResult) {
                    MarketDataError::SymbolNotFound(symbol.to_string())
                } else {
                    MarketDataError::ProviderError {
                        provider: "YAHOO".to_string(),
                        message: e.to_string(),
                    }
                }
            })?;

        let quotes = response.quotes().map_err(|e| {
            warn!("No quotes returned for {}: {}", symbol, e);
            MarketDataError::NoDataForRange
        })?;

        let mut bars: Vec<PriceBar> = quotes
            .iter()
            .filter_map(|q| self.yahoo_quote_to_bar(q))
            .collect();

        if bars.is_empty() {
            return Err(MarketDataError::NoDataForRange);
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    async fn get_profile(&self, symbol: &str) -> Result<InstrumentProfile, MarketDataError> {
        debug!("Fetching profile for {} from Yahoo", symbol);

        let result = self
            .fetch_quote_summary(symbol, "price,summaryProfile")
            .await?;

        let price = result.price.as_ref();
        let summary = result.summary_profile.as_ref();

        Ok(InstrumentProfile {
            name: price.and_then(|p| p.long_name.clone().or_else(|| p.short_name.clone())),
            quote_type: price
                .and_then(|p| p.quote_type.clone())
                .map(|t| t.to_uppercase()),
            sector: summary.and_then(|s| s.sector.clone()),
            country: summary.and_then(|s| s.country.clone()),
        })
    }

    async fn get_fund_sector_weightings(
        &self,
        symbol: &str,
    ) -> Result<HashMap<String, Decimal>, MarketDataError> {
        debug!("Fetching fund sector weightings for {} from Yahoo", symbol);

        let result = self.fetch_quote_summary(symbol, "topHoldings").await?;

        let mut weightings = HashMap::new();
        if let Some(top_holdings) = result.top_holdings {
            for entry in top_holdings.sector_weightings {
                for (sector, detail) in entry {
                    let Some(raw) = detail.raw else { continue };
                    // Fractions on the wire, percentages in the model.
                    let Some(pct) = Decimal::from_f64(raw * 100.0) else {
                        continue;
                    };
                    weightings.insert(format_sector(&sector), pct.round_dp(2));
                }
            }
        }

        Ok(weightings)
    }
}

/// Format a snake_case Yahoo sector key as a display name
/// ("consumer_cyclical" -> "Consumer Cyclical").
fn format_sector(sector: &str) -> String {
    sector
        .split('_')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().chain(chars).collect(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_sector() {
        assert_eq!(format_sector("technology"), "Technology");
        assert_eq!(format_sector("consumer_cyclical"), "Consumer Cyclical");
        assert_eq!(format_sector("realestate"), "Realestate");
    }

    #[test]
    fn test_yahoo_quote_to_bar_rounds_to_cents() {
        let provider = YahooProvider::new().unwrap();
        let quote = yahoo::Quote {
            timestamp: 1_704_153_600, // 2024-01-02 00:00:00 UTC
            open: 100.0,
            high: 101.0,
            low: 99.0,
            volume: 5000,
            close: 100.456,
            adjclose: 100.456,
        };
        let bar = provider.yahoo_quote_to_bar(&quote).unwrap();
        assert_eq!(bar.close_cents, 10_046);
        assert_eq!(bar.volume, 5000);
    }

    #[test]
    fn test_yahoo_quote_to_bar_rejects_non_finite_close() {
        let provider = YahooProvider::new().unwrap();
        let quote = yahoo::Quote {
            timestamp: 1_704_153_600,
            open: 100.0,
            high: 101.0,
            low: 99.0,
            volume: 5000,
            close: f64::NAN,
            adjclose: 0.0,
        };
        assert!(provider.yahoo_quote_to_bar(&quote).is_none());
    }
}
