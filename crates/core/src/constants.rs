//! Thresholds and static classification sets for the analysis pipeline.

use std::collections::HashSet;

use lazy_static::lazy_static;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Sector look-through weight that raises a warning alert.
pub const SECTOR_WARNING_PCT: Decimal = dec!(25.0);

/// Sector look-through weight that raises a critical alert.
pub const SECTOR_CRITICAL_PCT: Decimal = dec!(40.0);

/// Country look-through weight that raises a warning alert.
pub const COUNTRY_WARNING_PCT: Decimal = dec!(35.0);

/// Home-country weight that raises a home-bias alert.
pub const HOME_BIAS_WARNING_PCT: Decimal = dec!(60.0);

/// Home-country weight at which the home-bias alert escalates to critical.
pub const HOME_BIAS_CRITICAL_PCT: Decimal = dec!(75.0);

/// Single-row portfolio weight that raises a single-holding alert.
pub const SINGLE_HOLDING_WARNING_PCT: Decimal = dec!(20.0);

/// ISO-3 code of the investor's home market.
pub const HOME_COUNTRY_CODE: &str = "CAN";

/// Bucket name for holdings with unknown composition.
pub const OTHER_BUCKET: &str = "Other";

/// Absolute correlation at which a pair becomes a hidden twin.
pub const HIDDEN_TWIN_THRESHOLD: f64 = 0.80;

/// Absolute correlation at which twin wording strengthens.
pub const STRONG_TWIN_THRESHOLD: f64 = 0.95;

/// Minimum valid return observations per symbol, and minimum aligned rows,
/// for the correlation matrix.
pub const MIN_RETURN_OBSERVATIONS: usize = 20;

/// Trailing price-history window fetched during enrichment, in days.
pub const DEFAULT_LOOKBACK_DAYS: i64 = 365 * 3;

/// Suffix appended to Canadian-listed bare tickers.
pub const CANADIAN_SUFFIX: &str = ".TO";

lazy_static! {
    /// Exchange codes treated as Canadian listings.
    pub static ref CANADIAN_EXCHANGES: HashSet<&'static str> =
        ["TSX", "TSE", "CVE", "NEO", "XTSE", "XCNQ"].into_iter().collect();

    /// Known Canadian-listed instruments, used when exchange metadata is
    /// absent or unreliable.
    pub static ref KNOWN_TSX_TICKERS: HashSet<&'static str> = [
        "VGRO", "VBAL", "VEQT", "XGRO", "XEQT", "XBAL",
        "VFV", "XIC", "XUS", "VCN", "VAB", "ZAG", "ZSP", "VUN",
        "XIU", "XEF", "XEC", "ZEB", "ZWB", "HXT", "HXS", "BTCC",
    ]
    .into_iter()
    .collect();
}
