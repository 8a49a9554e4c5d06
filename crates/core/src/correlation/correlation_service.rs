//! Correlation engine.
//!
//! Derives daily return series from cached price history, aligns them on
//! common dates (inner join), computes the Pearson correlation matrix and
//! surfaces "hidden twin" pairs: holdings that look different but move
//! together.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use log::info;

use blindspot_market_data::PriceBar;

use crate::constants::{HIDDEN_TWIN_THRESHOLD, MIN_RETURN_OBSERVATIONS, STRONG_TWIN_THRESHOLD};
use crate::correlation::{CorrelationReport, HiddenTwin};
use crate::enrichment::PriceHistoryMap;
use crate::holdings::HoldingsTable;

/// Full correlation analysis over one batch of price histories.
pub fn run_correlation_analysis(
    price_histories: &PriceHistoryMap,
    holdings: &HoldingsTable,
) -> CorrelationReport {
    let (symbols, matrix) = compute_correlation_matrix(price_histories);
    let hidden_twins = find_hidden_twins(&symbols, &matrix, holdings, HIDDEN_TWIN_THRESHOLD);

    info!(
        "Correlation analysis complete: {} symbols in matrix, {} hidden twins",
        symbols.len(),
        hidden_twins.len()
    );

    let mut correlation_matrix = BTreeMap::new();
    for (i, symbol) in symbols.iter().enumerate() {
        let row: BTreeMap<String, f64> = symbols
            .iter()
            .enumerate()
            .map(|(j, other)| (other.clone(), round4(matrix[i][j])))
            .collect();
        correlation_matrix.insert(symbol.clone(), row);
    }

    CorrelationReport {
        hidden_twins,
        correlation_matrix,
    }
}

/// Daily percent-change returns keyed by date, leading undefined return
/// dropped. `None` when fewer than the minimum observations survive.
pub fn daily_returns(bars: &[PriceBar]) -> Option<BTreeMap<NaiveDate, f64>> {
    if bars.len() < MIN_RETURN_OBSERVATIONS + 1 {
        return None;
    }

    let mut sorted: Vec<&PriceBar> = bars.iter().collect();
    sorted.sort_by_key(|b| b.date);

    let mut returns = BTreeMap::new();
    for pair in sorted.windows(2) {
        let prev = pair[0].close();
        let curr = pair[1].close();
        if prev != 0.0 {
            returns.insert(pair[1].date, (curr - prev) / prev);
        }
    }

    (returns.len() >= MIN_RETURN_OBSERVATIONS).then_some(returns)
}

/// Pearson correlation matrix over return series aligned on common dates.
///
/// Symbols with too few observations are excluded; if fewer than 2 symbols
/// qualify, or fewer than the minimum aligned rows remain after the inner
/// date join, the matrix is empty. Symbols come back sorted.
pub fn compute_correlation_matrix(
    price_histories: &PriceHistoryMap,
) -> (Vec<String>, Vec<Vec<f64>>) {
    let mut return_series: BTreeMap<&str, BTreeMap<NaiveDate, f64>> = BTreeMap::new();
    for (symbol, bars) in price_histories {
        if let Some(returns) = daily_returns(bars) {
            return_series.insert(symbol.as_str(), returns);
        }
    }

    if return_series.len() < 2 {
        return (Vec::new(), Vec::new());
    }

    // Inner join: keep only dates where every qualifying symbol has a
    // return.
    let mut series_iter = return_series.values();
    let mut common_dates: BTreeSet<NaiveDate> = series_iter
        .next()
        .map(|s| s.keys().copied().collect())
        .unwrap_or_default();
    for series in series_iter {
        common_dates.retain(|d| series.contains_key(d));
    }

    if common_dates.len() < MIN_RETURN_OBSERVATIONS {
        return (Vec::new(), Vec::new());
    }

    let symbols: Vec<String> = return_series.keys().map(|s| s.to_string()).collect();
    let aligned: Vec<Vec<f64>> = return_series
        .values()
        .map(|series| common_dates.iter().map(|d| series[d]).collect())
        .collect();

    let n = symbols.len();
    let mut matrix = vec![vec![0.0; n]; n];
    for i in 0..n {
        matrix[i][i] = 1.0;
        for j in (i + 1)..n {
            let r = pearson(&aligned[i], &aligned[j]);
            matrix[i][j] = r;
            matrix[j][i] = r;
        }
    }

    (symbols, matrix)
}

/// Standard Pearson coefficient; 0 when either series has zero variance.
pub fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let n = a.len().min(b.len());
    if n == 0 {
        return 0.0;
    }

    let mean_a = a[..n].iter().sum::<f64>() / n as f64;
    let mean_b = b[..n].iter().sum::<f64>() / n as f64;

    let mut cov = 0.0;
    let mut var_a = 0.0;
    let mut var_b = 0.0;
    for k in 0..n {
        let da = a[k] - mean_a;
        let db = b[k] - mean_b;
        cov += da * db;
        var_a += da * da;
        var_b += db * db;
    }

    if var_a == 0.0 || var_b == 0.0 {
        return 0.0;
    }
    cov / (var_a.sqrt() * var_b.sqrt())
}

/// Scan the upper triangle for pairs at or above the threshold. One record
/// per unordered pair, sorted by descending absolute correlation.
pub fn find_hidden_twins(
    symbols: &[String],
    matrix: &[Vec<f64>],
    holdings: &HoldingsTable,
    threshold: f64,
) -> Vec<HiddenTwin> {
    let mut twins = Vec::new();

    for i in 0..symbols.len() {
        for j in (i + 1)..symbols.len() {
            let r = matrix[i][j];
            if r.abs() >= threshold {
                twins.push(HiddenTwin {
                    symbol_a: symbols[i].clone(),
                    symbol_b: symbols[j].clone(),
                    correlation: round4(r),
                    explanation: twin_explanation(&symbols[i], &symbols[j], r, holdings),
                });
            }
        }
    }

    twins.sort_by(|a, b| {
        b.correlation
            .abs()
            .partial_cmp(&a.correlation.abs())
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    twins
}

fn twin_explanation(
    symbol_a: &str,
    symbol_b: &str,
    correlation: f64,
    holdings: &HoldingsTable,
) -> String {
    let direction = if correlation > 0.0 {
        "positively"
    } else {
        "negatively"
    };
    let strength = if correlation.abs() >= STRONG_TWIN_THRESHOLD {
        "very strongly"
    } else {
        "strongly"
    };

    let combined_weight = holdings.weight_of(symbol_a) + holdings.weight_of(symbol_b);

    format!(
        "{} and {} are {} {} correlated (r={:.2}). Combined they represent {:.1}% \
         of your portfolio. These holdings may not provide the diversification \
         benefit you expect.",
        symbol_a, symbol_b, strength, direction, correlation, combined_weight
    )
}

fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
