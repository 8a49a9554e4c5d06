use chrono::{Duration, NaiveDate};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};
use rust_decimal_macros::dec;

use blindspot_market_data::PriceBar;

use crate::constants::HIDDEN_TWIN_THRESHOLD;
use crate::correlation::{
    compute_correlation_matrix, daily_returns, find_hidden_twins, pearson,
    run_correlation_analysis,
};
use crate::enrichment::PriceHistoryMap;
use crate::holdings::{build_holdings_table, AssetClass, HoldingsTable, RawPosition};

fn start_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

/// Build a daily bar series from a return series, starting at $100.
fn bars_from_returns(returns: &[f64]) -> Vec<PriceBar> {
    let mut price = 100.0_f64;
    let mut bars = vec![PriceBar {
        date: start_date(),
        close_cents: (price * 100.0).round() as i64,
        volume: 1_000,
    }];
    for (i, r) in returns.iter().enumerate() {
        price *= 1.0 + r;
        bars.push(PriceBar {
            date: start_date() + Duration::days(i as i64 + 1),
            close_cents: (price * 100.0).round() as i64,
            volume: 1_000,
        });
    }
    bars
}

fn random_walk(rng: &mut StdRng, len: usize) -> Vec<f64> {
    let normal = Normal::new(0.0005, 0.02).unwrap();
    (0..len).map(|_| normal.sample(rng)).collect()
}

fn holdings(weights: &[(&str, i64)]) -> HoldingsTable {
    build_holdings_table(
        weights
            .iter()
            .map(|(symbol, value)| RawPosition {
                symbol: symbol.to_string(),
                description: None,
                asset_class: AssetClass::Equity,
                units: dec!(1),
                cost_basis_cents: *value,
                market_value_cents: *value,
                currency: "CAD".to_string(),
                exchange: None,
                last_price_cents: *value,
                account_name: "TFSA".to_string(),
                account_type: "tfsa".to_string(),
            })
            .collect(),
    )
}

#[test]
fn test_daily_returns_requires_minimum_observations() {
    let bars = bars_from_returns(&vec![0.01; 19]);
    assert!(daily_returns(&bars).is_none());

    let bars = bars_from_returns(&vec![0.01; 20]);
    let returns = daily_returns(&bars).unwrap();
    assert_eq!(returns.len(), 20);
}

#[test]
fn test_daily_returns_sorts_before_differencing() {
    let mut bars = bars_from_returns(&vec![0.01; 25]);
    bars.reverse();
    let returns = daily_returns(&bars).unwrap();
    // Every return computed forward in time, so all near +1%.
    assert!(returns.values().all(|r| (r - 0.01).abs() < 1e-3));
}

#[test]
fn test_pearson_perfect_and_inverse() {
    let a = [0.01, -0.02, 0.03, 0.005, -0.01];
    let doubled: Vec<f64> = a.iter().map(|r| r * 2.0).collect();
    let inverted: Vec<f64> = a.iter().map(|r| -r).collect();

    assert!((pearson(&a, &doubled) - 1.0).abs() < 1e-9);
    assert!((pearson(&a, &inverted) + 1.0).abs() < 1e-9);
}

#[test]
fn test_pearson_zero_variance_is_zero() {
    let flat = [0.0; 5];
    let a = [0.01, -0.02, 0.03, 0.005, -0.01];
    assert_eq!(pearson(&flat, &a), 0.0);
}

#[test]
fn test_matrix_symmetric_with_unit_diagonal() {
    let mut rng = StdRng::seed_from_u64(7);
    let mut histories = PriceHistoryMap::new();
    for symbol in ["AAA", "BBB", "CCC"] {
        histories.insert(
            symbol.to_string(),
            bars_from_returns(&random_walk(&mut rng, 100)),
        );
    }

    let (symbols, matrix) = compute_correlation_matrix(&histories);
    assert_eq!(symbols.len(), 3);
    for i in 0..3 {
        assert!((matrix[i][i] - 1.0).abs() < 1e-12);
        for j in 0..3 {
            assert_eq!(matrix[i][j], matrix[j][i]);
        }
    }
}

#[test]
fn test_noisy_twin_detected_and_independent_walks_not() {
    let mut rng = StdRng::seed_from_u64(42);
    let base = random_walk(&mut rng, 250);
    let noise = Normal::new(0.0, 0.002).unwrap();
    let twin: Vec<f64> = base.iter().map(|r| r + noise.sample(&mut rng)).collect();
    let independent = random_walk(&mut rng, 250);

    let mut histories = PriceHistoryMap::new();
    histories.insert("BASE".to_string(), bars_from_returns(&base));
    histories.insert("TWIN".to_string(), bars_from_returns(&twin));
    histories.insert("INDEP".to_string(), bars_from_returns(&independent));

    let table = holdings(&[("BASE", 400_000), ("TWIN", 400_000), ("INDEP", 200_000)]);
    let report = run_correlation_analysis(&histories, &table);

    assert_eq!(report.hidden_twins.len(), 1);
    let twin = &report.hidden_twins[0];
    assert_eq!(
        (twin.symbol_a.as_str(), twin.symbol_b.as_str()),
        ("BASE", "TWIN")
    );
    assert!(twin.correlation > 0.95);
    assert!(twin.explanation.contains("very strongly positively"));
    assert!(twin.explanation.contains("80.0%"));

    // Independent walks stay below the twin threshold.
    let r = report.correlation_matrix["BASE"]["INDEP"];
    assert!(r.abs() < HIDDEN_TWIN_THRESHOLD);
}

#[test]
fn test_fewer_than_two_usable_symbols_yields_empty_matrix() {
    let mut histories = PriceHistoryMap::new();
    histories.insert("ONLY".to_string(), bars_from_returns(&vec![0.01; 100]));
    histories.insert("SHORT".to_string(), bars_from_returns(&vec![0.01; 5]));

    let (symbols, matrix) = compute_correlation_matrix(&histories);
    assert!(symbols.is_empty());
    assert!(matrix.is_empty());
}

#[test]
fn test_misaligned_dates_drop_below_minimum() {
    // Two long series with under 20 overlapping dates.
    let a = bars_from_returns(&vec![0.01; 30]);
    let mut b = bars_from_returns(&vec![0.01; 30]);
    for bar in &mut b {
        bar.date += Duration::days(15);
    }

    let mut histories = PriceHistoryMap::new();
    histories.insert("A".to_string(), a);
    histories.insert("B".to_string(), b);

    let (symbols, _) = compute_correlation_matrix(&histories);
    assert!(symbols.is_empty());
}

#[test]
fn test_twins_sorted_by_descending_absolute_correlation() {
    let symbols = vec!["A".to_string(), "B".to_string(), "C".to_string()];
    let matrix = vec![
        vec![1.0, 0.85, -0.99],
        vec![0.85, 1.0, 0.10],
        vec![-0.99, 0.10, 1.0],
    ];

    let twins = find_hidden_twins(&symbols, &matrix, &HoldingsTable::default(), 0.80);
    assert_eq!(twins.len(), 2);
    assert_eq!(twins[0].correlation, -0.99);
    assert_eq!(twins[1].correlation, 0.85);
    assert!(twins[0].explanation.contains("negatively"));
    // Symbols absent from the holdings table count as zero weight.
    assert!(twins[0].explanation.contains("0.0%"));
}
