//! Static look-through table for known multi-asset/ETF symbols.
//!
//! These breakdowns are curated for popular Canadian asset-allocation ETFs
//! where provider fund data is unreliable or missing. They are the
//! highest-confidence composition source and override provider lookups.

use std::collections::HashMap;

use lazy_static::lazy_static;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::Composition;

fn composition(
    sectors: &[(&str, Decimal)],
    countries: &[(&str, Decimal)],
) -> Composition {
    Composition {
        sectors: sectors
            .iter()
            .map(|(name, pct)| (name.to_string(), *pct))
            .collect(),
        countries: countries
            .iter()
            .map(|(code, pct)| (code.to_string(), *pct))
            .collect(),
    }
}

lazy_static! {
    /// Known sector/country breakdowns keyed by normalized symbol.
    static ref ETF_LOOKTHROUGH: HashMap<&'static str, Composition> = {
        let mut table = HashMap::new();

        table.insert(
            "VGRO.TO",
            composition(
                &[
                    ("Financials", dec!(18.5)),
                    ("Technology", dec!(14.2)),
                    ("Industrials", dec!(10.1)),
                    ("Healthcare", dec!(8.5)),
                    ("Consumer Discretionary", dec!(7.8)),
                    ("Energy", dec!(5.2)),
                    ("Materials", dec!(4.1)),
                    ("Utilities", dec!(3.0)),
                    ("Real Estate", dec!(3.5)),
                    ("Communication Services", dec!(5.1)),
                    ("Fixed Income", dec!(20.0)),
                ],
                &[
                    ("USA", dec!(42.0)),
                    ("CAN", dec!(24.0)),
                    ("JPN", dec!(4.5)),
                    ("GBR", dec!(3.2)),
                    ("CHN", dec!(2.8)),
                    ("DEU", dec!(2.0)),
                    ("FRA", dec!(1.8)),
                    ("AUS", dec!(1.5)),
                    ("OTHER", dec!(18.2)),
                ],
            ),
        );

        table.insert(
            "VEQT.TO",
            composition(
                &[
                    ("Financials", dec!(19.5)),
                    ("Technology", dec!(18.0)),
                    ("Industrials", dec!(11.5)),
                    ("Healthcare", dec!(10.5)),
                    ("Consumer Discretionary", dec!(9.5)),
                    ("Energy", dec!(6.0)),
                    ("Materials", dec!(5.0)),
                    ("Utilities", dec!(3.5)),
                    ("Real Estate", dec!(3.5)),
                    ("Communication Services", dec!(6.0)),
                    ("Consumer Staples", dec!(7.0)),
                ],
                &[
                    ("USA", dec!(44.0)),
                    ("CAN", dec!(30.0)),
                    ("JPN", dec!(5.5)),
                    ("GBR", dec!(3.8)),
                    ("CHN", dec!(3.5)),
                    ("DEU", dec!(2.2)),
                    ("FRA", dec!(2.0)),
                    ("AUS", dec!(1.8)),
                    ("OTHER", dec!(7.2)),
                ],
            ),
        );

        table.insert(
            "XGRO.TO",
            composition(
                &[
                    ("Financials", dec!(18.0)),
                    ("Technology", dec!(14.5)),
                    ("Industrials", dec!(10.0)),
                    ("Healthcare", dec!(8.8)),
                    ("Consumer Discretionary", dec!(7.5)),
                    ("Energy", dec!(5.5)),
                    ("Materials", dec!(4.0)),
                    ("Utilities", dec!(3.2)),
                    ("Real Estate", dec!(3.0)),
                    ("Communication Services", dec!(5.5)),
                    ("Fixed Income", dec!(20.0)),
                ],
                &[
                    ("USA", dec!(41.0)),
                    ("CAN", dec!(25.0)),
                    ("JPN", dec!(4.2)),
                    ("GBR", dec!(3.0)),
                    ("CHN", dec!(2.5)),
                    ("DEU", dec!(2.0)),
                    ("FRA", dec!(1.8)),
                    ("AUS", dec!(1.5)),
                    ("OTHER", dec!(19.0)),
                ],
            ),
        );

        table.insert(
            "XEQT.TO",
            composition(
                &[
                    ("Financials", dec!(20.0)),
                    ("Technology", dec!(18.5)),
                    ("Industrials", dec!(11.0)),
                    ("Healthcare", dec!(10.0)),
                    ("Consumer Discretionary", dec!(9.0)),
                    ("Energy", dec!(6.5)),
                    ("Materials", dec!(5.0)),
                    ("Utilities", dec!(3.5)),
                    ("Real Estate", dec!(3.5)),
                    ("Communication Services", dec!(6.0)),
                    ("Consumer Staples", dec!(7.0)),
                ],
                &[
                    ("USA", dec!(45.0)),
                    ("CAN", dec!(25.0)),
                    ("JPN", dec!(5.0)),
                    ("GBR", dec!(3.5)),
                    ("CHN", dec!(3.0)),
                    ("DEU", dec!(2.5)),
                    ("FRA", dec!(2.0)),
                    ("AUS", dec!(1.8)),
                    ("OTHER", dec!(12.2)),
                ],
            ),
        );

        table.insert(
            "VFV.TO",
            composition(
                &[
                    ("Technology", dec!(29.0)),
                    ("Healthcare", dec!(13.0)),
                    ("Financials", dec!(13.0)),
                    ("Consumer Discretionary", dec!(10.5)),
                    ("Communication Services", dec!(9.0)),
                    ("Industrials", dec!(8.5)),
                    ("Consumer Staples", dec!(6.0)),
                    ("Energy", dec!(4.0)),
                    ("Utilities", dec!(2.5)),
                    ("Real Estate", dec!(2.5)),
                    ("Materials", dec!(2.0)),
                ],
                &[("USA", dec!(100.0))],
            ),
        );

        table.insert(
            "XIC.TO",
            composition(
                &[
                    ("Financials", dec!(35.0)),
                    ("Energy", dec!(16.0)),
                    ("Materials", dec!(11.0)),
                    ("Industrials", dec!(11.0)),
                    ("Technology", dec!(8.0)),
                    ("Utilities", dec!(5.0)),
                    ("Communication Services", dec!(5.0)),
                    ("Consumer Discretionary", dec!(4.0)),
                    ("Consumer Staples", dec!(3.0)),
                    ("Healthcare", dec!(1.0)),
                    ("Real Estate", dec!(1.0)),
                ],
                &[("CAN", dec!(100.0))],
            ),
        );

        table
    };
}

/// Look up the static composition for a normalized symbol, if known.
pub fn lookup(symbol: &str) -> Option<Composition> {
    ETF_LOOKTHROUGH.get(symbol).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_fund_resolves() {
        let composition = lookup("VFV.TO").unwrap();
        assert_eq!(composition.countries.get("USA"), Some(&dec!(100.0)));
        assert_eq!(composition.sectors.get("Technology"), Some(&dec!(29.0)));
    }

    #[test]
    fn test_unknown_symbol_is_none() {
        assert!(lookup("AAPL").is_none());
        // Table is keyed by normalized symbol, bare tickers miss.
        assert!(lookup("VFV").is_none());
    }
}
