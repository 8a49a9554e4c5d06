use std::collections::HashMap;

use rust_decimal_macros::dec;

use blindspot_market_data::Composition;

use crate::concentration::{run_concentration_audit, AlertCategory, Severity};
use crate::enrichment::CompositionMap;
use crate::holdings::{build_holdings_table, AssetClass, HoldingsTable, RawPosition};

fn position(symbol: &str, market_value_cents: i64) -> RawPosition {
    RawPosition {
        symbol: symbol.to_string(),
        description: None,
        asset_class: AssetClass::Equity,
        units: dec!(1),
        cost_basis_cents: market_value_cents,
        market_value_cents,
        currency: "CAD".to_string(),
        exchange: None,
        last_price_cents: market_value_cents,
        account_name: "TFSA".to_string(),
        account_type: "tfsa".to_string(),
    }
}

fn table(positions: Vec<RawPosition>) -> HoldingsTable {
    build_holdings_table(positions)
}

fn composition(sectors: &[(&str, f64)], countries: &[(&str, f64)]) -> Composition {
    Composition {
        sectors: sectors
            .iter()
            .map(|(k, v)| (k.to_string(), rust_decimal::Decimal::try_from(*v).unwrap()))
            .collect(),
        countries: countries
            .iter()
            .map(|(k, v)| (k.to_string(), rust_decimal::Decimal::try_from(*v).unwrap()))
            .collect(),
    }
}

#[test]
fn test_empty_table_yields_empty_report() {
    let report = run_concentration_audit(&HoldingsTable::default(), &CompositionMap::new());
    assert!(report.alerts.is_empty());
    assert!(report.sector_weights.is_empty());
    assert!(report.country_weights.is_empty());
    assert_eq!(report.home_bias_pct, dec!(0));
}

#[test]
fn test_look_through_aggregation() {
    // 50/50 split: an ETF that is 60% Technology / 40% Financials and a
    // pure Technology stock.
    let holdings = table(vec![position("FUND", 500_000), position("AAPL", 500_000)]);
    let mut compositions = CompositionMap::new();
    compositions.insert(
        "FUND".to_string(),
        composition(
            &[("Technology", 60.0), ("Financials", 40.0)],
            &[("USA", 100.0)],
        ),
    );
    compositions.insert(
        "AAPL".to_string(),
        composition(&[("Technology", 100.0)], &[("USA", 100.0)]),
    );

    let report = run_concentration_audit(&holdings, &compositions);

    // 50 * 0.60 + 50 * 1.00 = 80
    assert_eq!(report.sector_weights.get("Technology"), Some(&dec!(80.00)));
    assert_eq!(report.sector_weights.get("Financials"), Some(&dec!(20.00)));
    assert_eq!(report.country_weights.get("USA"), Some(&dec!(100.00)));
}

#[test]
fn test_unknown_composition_lands_in_other_bucket() {
    let holdings = table(vec![position("KNOWN", 750_000), position("MYSTERY", 250_000)]);
    let mut compositions = CompositionMap::new();
    compositions.insert(
        "KNOWN".to_string(),
        composition(&[("Financials", 100.0)], &[("CAN", 100.0)]),
    );
    // MYSTERY has no entry at all; a present-but-empty entry behaves the
    // same way.
    compositions.insert("EMPTY".to_string(), Composition::default());

    let report = run_concentration_audit(&holdings, &compositions);

    assert_eq!(report.sector_weights.get("Other"), Some(&dec!(25.00)));
    assert_eq!(report.country_weights.get("Other"), Some(&dec!(25.00)));
}

#[test]
fn test_sector_thresholds_warning_then_critical() {
    // Technology at exactly 40% of the portfolio -> critical; Financials
    // at 30% -> warning; Utilities at 24.9% -> nothing.
    let holdings = table(vec![position("MIX", 1_000_000)]);
    let mut compositions = CompositionMap::new();
    compositions.insert(
        "MIX".to_string(),
        composition(
            &[
                ("Technology", 40.0),
                ("Financials", 30.0),
                ("Utilities", 24.9),
                ("Energy", 5.1),
            ],
            &[("USA", 100.0)],
        ),
    );

    let report = run_concentration_audit(&holdings, &compositions);

    let sector_alerts: HashMap<&str, Severity> = report
        .alerts
        .iter()
        .filter(|a| a.category == AlertCategory::Sector)
        .map(|a| (a.name.as_str(), a.severity))
        .collect();

    assert_eq!(sector_alerts.get("Technology"), Some(&Severity::Critical));
    assert_eq!(sector_alerts.get("Financials"), Some(&Severity::Warning));
    assert!(!sector_alerts.contains_key("Utilities"));
    assert!(!sector_alerts.contains_key("Energy"));
}

#[test]
fn test_home_bias_stacks_on_country_alert() {
    // 70% Canada: generic country warning AND a home-bias warning.
    let holdings = table(vec![position("XIC", 700_000), position("VFV", 300_000)]);
    let mut compositions = CompositionMap::new();
    compositions.insert(
        "XIC".to_string(),
        composition(&[("Financials", 100.0)], &[("CAN", 100.0)]),
    );
    compositions.insert(
        "VFV".to_string(),
        composition(&[("Technology", 100.0)], &[("USA", 100.0)]),
    );

    let report = run_concentration_audit(&holdings, &compositions);

    assert_eq!(report.home_bias_pct, dec!(70.00));

    let country = report
        .alerts
        .iter()
        .find(|a| a.category == AlertCategory::Country && a.name == "CAN");
    assert!(country.is_some());

    let home_bias = report
        .alerts
        .iter()
        .find(|a| a.category == AlertCategory::HomeBias)
        .unwrap();
    assert_eq!(home_bias.name, "Canada");
    assert_eq!(home_bias.severity, Severity::Warning);
}

#[test]
fn test_home_bias_critical_at_75() {
    let holdings = table(vec![position("XIC", 750_000), position("VFV", 250_000)]);
    let mut compositions = CompositionMap::new();
    compositions.insert(
        "XIC".to_string(),
        composition(&[("Financials", 100.0)], &[("CAN", 100.0)]),
    );
    compositions.insert(
        "VFV".to_string(),
        composition(&[("Technology", 100.0)], &[("USA", 100.0)]),
    );

    let report = run_concentration_audit(&holdings, &compositions);

    let home_bias = report
        .alerts
        .iter()
        .find(|a| a.category == AlertCategory::HomeBias)
        .unwrap();
    assert_eq!(home_bias.severity, Severity::Critical);
}

#[test]
fn test_single_holding_alert_per_row() {
    // The same symbol in two accounts fires twice; the small row does not
    // fire.
    let mut a = position("BIG", 400_000);
    a.account_name = "TFSA".to_string();
    let mut b = position("BIG", 400_000);
    b.account_name = "RRSP".to_string();
    let holdings = table(vec![a, b, position("SMALL", 200_000)]);

    let report = run_concentration_audit(&holdings, &CompositionMap::new());

    let single: Vec<_> = report
        .alerts
        .iter()
        .filter(|a| a.category == AlertCategory::SingleHolding)
        .collect();
    assert_eq!(single.len(), 2);
    assert!(single.iter().all(|a| a.name == "BIG"));
}

#[test]
fn test_zero_total_value_yields_empty_report() {
    let holdings = table(vec![position("A", 0)]);
    let report = run_concentration_audit(&holdings, &CompositionMap::new());
    assert!(report.alerts.is_empty());
    assert!(report.sector_weights.is_empty());
}
