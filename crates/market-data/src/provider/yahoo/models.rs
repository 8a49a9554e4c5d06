//! Yahoo Finance API response models.
//!
//! These models parse the quoteSummary API responses used for profile and
//! fund-weighting lookups; historical bars come through the library API.

use serde::Deserialize;

/// Main response wrapper for quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResponse {
    pub quote_summary: YahooQuoteSummary,
}

/// Quote summary container
#[derive(Debug, Deserialize)]
pub struct YahooQuoteSummary {
    pub result: Vec<YahooQuoteSummaryResult>,
    // Note: error field exists in API but we handle errors via HTTP status/empty results
}

/// Individual result from quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooQuoteSummaryResult {
    pub price: Option<YahooPriceData>,
    pub summary_profile: Option<YahooSummaryProfile>,
    pub top_holdings: Option<YahooTopHoldings>,
}

/// Price data from quoteSummary API
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooPriceData {
    pub short_name: Option<String>,
    pub long_name: Option<String>,
    pub quote_type: Option<String>,
}

/// Detail value with raw and formatted variants.
/// Yahoo returns these as nested objects like {"raw": 0.30, "fmt": "30%"}
/// or empty objects {} when no data is available.
#[derive(Debug, Deserialize, Clone)]
pub struct YahooDetail {
    pub raw: Option<f64>,
    // Note: fmt field exists but we only use raw values
}

/// Summary profile data (company info)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooSummaryProfile {
    pub sector: Option<String>,
    pub country: Option<String>,
}

/// Top holdings data for ETFs and Mutual Funds
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct YahooTopHoldings {
    /// Sector weightings - each element is a map with sector name as key
    /// e.g., [{"technology": {"raw": 0.30}}, {"healthcare": {"raw": 0.15}}]
    #[serde(default)]
    pub sector_weightings: Vec<std::collections::HashMap<String, YahooDetail>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_detail() {
        let json = r#"{"raw": 0.2915, "fmt": "29.15%"}"#;
        let detail: YahooDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.raw, Some(0.2915));
    }

    #[test]
    fn test_deserialize_detail_empty_object() {
        let json = r#"{}"#;
        let detail: YahooDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.raw, None);
    }

    #[test]
    fn test_deserialize_summary_profile() {
        let json = r#"{
            "sector": "Technology",
            "industry": "Consumer Electronics",
            "country": "United States"
        }"#;
        let profile: YahooSummaryProfile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.sector, Some("Technology".to_string()));
        assert_eq!(profile.country, Some("United States".to_string()));
    }

    #[test]
    fn test_deserialize_top_holdings() {
        // Yahoo returns sector weightings as an array of single-key objects
        let json = r#"{
            "sectorWeightings": [
                {"realestate": {"raw": 0.0261, "fmt": "2.61%"}},
                {"consumer_cyclical": {"raw": 0.1023, "fmt": "10.23%"}},
                {"technology": {"raw": 0.2915, "fmt": "29.15%"}}
            ]
        }"#;
        let holdings: YahooTopHoldings = serde_json::from_str(json).unwrap();
        assert_eq!(holdings.sector_weightings.len(), 3);
        assert_eq!(
            holdings.sector_weightings[2]
                .get("technology")
                .and_then(|d| d.raw),
            Some(0.2915)
        );
    }

    #[test]
    fn test_deserialize_top_holdings_empty() {
        let json = r#"{"sectorWeightings": []}"#;
        let holdings: YahooTopHoldings = serde_json::from_str(json).unwrap();
        assert!(holdings.sector_weightings.is_empty());
    }
}
