//! Concentration auditor.
//!
//! Computes portfolio-level look-through sector and country exposure and
//! raises threshold alerts. Pure function of the holdings table and the
//! composition map; an empty table yields an empty report, not an error.

use std::collections::BTreeMap;

use log::info;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::concentration::{AlertCategory, ConcentrationAlert, ConcentrationReport, Severity};
use crate::constants::{
    COUNTRY_WARNING_PCT, HOME_BIAS_CRITICAL_PCT, HOME_BIAS_WARNING_PCT, HOME_COUNTRY_CODE,
    OTHER_BUCKET, SECTOR_CRITICAL_PCT, SECTOR_WARNING_PCT, SINGLE_HOLDING_WARNING_PCT,
};
use crate::enrichment::CompositionMap;
use crate::holdings::HoldingsTable;

/// Run the full concentration audit.
///
/// Each holding's contribution to a sector (or country) bucket is its
/// portfolio weight times the bucket's fractional weight for the holding's
/// normalized symbol. Holdings with no composition on an axis land in the
/// "Other" bucket on that axis with their full weight.
pub fn run_concentration_audit(
    holdings: &HoldingsTable,
    compositions: &CompositionMap,
) -> ConcentrationReport {
    if holdings.is_empty() || holdings.total_value_cents == 0 {
        return ConcentrationReport::default();
    }

    let total_value = Decimal::from(holdings.total_value_cents);
    let mut sector_weights: BTreeMap<String, Decimal> = BTreeMap::new();
    let mut country_weights: BTreeMap<String, Decimal> = BTreeMap::new();

    for row in &holdings.rows {
        // Unrounded weight so bucket sums don't accumulate rounding error.
        let holding_weight =
            Decimal::from(row.market_value_cents) / total_value * dec!(100);

        let composition = compositions.get(&row.normalized_symbol);
        let sectors = composition.map(|c| &c.sectors).filter(|s| !s.is_empty());
        let countries = composition.map(|c| &c.countries).filter(|c| !c.is_empty());

        match sectors {
            Some(sectors) => {
                for (sector, pct) in sectors {
                    *sector_weights.entry(sector.clone()).or_default() +=
                        holding_weight * pct / dec!(100);
                }
            }
            None => {
                *sector_weights.entry(OTHER_BUCKET.to_string()).or_default() += holding_weight;
            }
        }

        match countries {
            Some(countries) => {
                for (country, pct) in countries {
                    *country_weights.entry(country.clone()).or_default() +=
                        holding_weight * pct / dec!(100);
                }
            }
            None => {
                *country_weights.entry(OTHER_BUCKET.to_string()).or_default() += holding_weight;
            }
        }
    }

    for weight in sector_weights.values_mut() {
        *weight = weight.round_dp(2);
    }
    for weight in country_weights.values_mut() {
        *weight = weight.round_dp(2);
    }

    let home_bias_pct = country_weights
        .get(HOME_COUNTRY_CODE)
        .copied()
        .unwrap_or_default();

    let mut alerts = Vec::new();

    for (sector, &pct) in &sector_weights {
        if pct >= SECTOR_CRITICAL_PCT {
            alerts.push(ConcentrationAlert {
                category: AlertCategory::Sector,
                name: sector.clone(),
                weight_pct: pct,
                threshold_pct: SECTOR_CRITICAL_PCT,
                severity: Severity::Critical,
            });
        } else if pct >= SECTOR_WARNING_PCT {
            alerts.push(ConcentrationAlert {
                category: AlertCategory::Sector,
                name: sector.clone(),
                weight_pct: pct,
                threshold_pct: SECTOR_WARNING_PCT,
                severity: Severity::Warning,
            });
        }
    }

    // The generic country check also applies to the home country; home
    // bias is evaluated on top of it, not instead of it.
    for (country, &pct) in &country_weights {
        if pct >= COUNTRY_WARNING_PCT {
            alerts.push(ConcentrationAlert {
                category: AlertCategory::Country,
                name: country.clone(),
                weight_pct: pct,
                threshold_pct: COUNTRY_WARNING_PCT,
                severity: Severity::Warning,
            });
        }
    }

    if home_bias_pct >= HOME_BIAS_WARNING_PCT {
        alerts.push(ConcentrationAlert {
            category: AlertCategory::HomeBias,
            name: "Canada".to_string(),
            weight_pct: home_bias_pct,
            threshold_pct: HOME_BIAS_WARNING_PCT,
            severity: if home_bias_pct >= HOME_BIAS_CRITICAL_PCT {
                Severity::Critical
            } else {
                Severity::Warning
            },
        });
    }

    // Per row, not per deduplicated symbol.
    for row in &holdings.rows {
        if row.weight_pct >= SINGLE_HOLDING_WARNING_PCT {
            alerts.push(ConcentrationAlert {
                category: AlertCategory::SingleHolding,
                name: row.symbol.clone(),
                weight_pct: row.weight_pct,
                threshold_pct: SINGLE_HOLDING_WARNING_PCT,
                severity: Severity::Warning,
            });
        }
    }

    info!(
        "Concentration audit complete: {} alerts, home bias {}%",
        alerts.len(),
        home_bias_pct
    );

    ConcentrationReport {
        alerts,
        sector_weights,
        country_weights,
        home_bias_pct,
    }
}
