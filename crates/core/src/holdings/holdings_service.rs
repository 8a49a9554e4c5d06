//! Normalizer - builds the canonical holdings table.

use std::sync::Arc;

use log::info;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::{CANADIAN_EXCHANGES, CANADIAN_SUFFIX, KNOWN_TSX_TICKERS};
use crate::errors::Result;
use crate::holdings::{HoldingRow, HoldingsSourceTrait, HoldingsTable, RawPosition};

/// Normalize a ticker for market-data compatibility.
///
/// - Already suffixed -> unchanged (the operation is idempotent)
/// - Canadian exchange code -> append the Canadian-market suffix
/// - Bare symbol on the known-TSX allow-list -> append the suffix
/// - Otherwise unchanged (assumed primary-listed, typically US)
pub fn normalize_ticker(symbol: &str, exchange: Option<&str>) -> String {
    if symbol.is_empty() || symbol.contains('.') {
        return symbol.to_string();
    }

    if let Some(exchange) = exchange {
        if CANADIAN_EXCHANGES.contains(exchange.to_uppercase().as_str()) {
            return format!("{}{}", symbol, CANADIAN_SUFFIX);
        }
    }

    if KNOWN_TSX_TICKERS.contains(symbol.to_uppercase().as_str()) {
        return format!("{}{}", symbol, CANADIAN_SUFFIX);
    }

    symbol.to_string()
}

/// Build the canonical holdings table from raw positions.
///
/// Derivations per row: gain = market value - cost basis; gain percent =
/// gain / cost basis * 100 (0 when cost basis is 0); weight percent =
/// row market value / total market value * 100 rounded to 2 decimals
/// (0 when total is 0). Empty input yields an empty table, not an error.
pub fn build_holdings_table(positions: Vec<RawPosition>) -> HoldingsTable {
    if positions.is_empty() {
        return HoldingsTable::default();
    }

    let total_value_cents: i64 = positions.iter().map(|p| p.market_value_cents).sum();
    let total_cost_cents: i64 = positions.iter().map(|p| p.cost_basis_cents).sum();

    let rows = positions
        .into_iter()
        .map(|position| {
            let gain_loss_cents = position.market_value_cents - position.cost_basis_cents;
            let gain_loss_pct = if position.cost_basis_cents != 0 {
                (Decimal::from(gain_loss_cents) / Decimal::from(position.cost_basis_cents)
                    * dec!(100))
                .round_dp(2)
            } else {
                Decimal::ZERO
            };

            let weight_pct = if total_value_cents > 0 {
                (Decimal::from(position.market_value_cents) / Decimal::from(total_value_cents)
                    * dec!(100))
                .round_dp(2)
            } else {
                Decimal::ZERO
            };

            HoldingRow {
                normalized_symbol: normalize_ticker(
                    &position.symbol,
                    position.exchange.as_deref(),
                ),
                symbol: position.symbol,
                description: position.description,
                asset_class: position.asset_class,
                units: position.units,
                cost_basis_cents: position.cost_basis_cents,
                market_value_cents: position.market_value_cents,
                currency: position.currency,
                exchange: position.exchange,
                last_price_cents: position.last_price_cents,
                account_name: position.account_name,
                account_type: position.account_type,
                gain_loss_cents,
                gain_loss_pct,
                weight_pct,
            }
        })
        .collect();

    HoldingsTable {
        rows,
        total_value_cents,
        total_cost_cents,
    }
}

/// Service facade over the holdings source.
pub struct HoldingsService {
    source: Arc<dyn HoldingsSourceTrait>,
}

impl HoldingsService {
    pub fn new(source: Arc<dyn HoldingsSourceTrait>) -> Self {
        Self { source }
    }

    /// Load a portfolio's positions and build the canonical table.
    pub async fn load_holdings_table(&self, portfolio_id: &str) -> Result<HoldingsTable> {
        let positions = self.source.get_positions(portfolio_id).await?;
        let table = build_holdings_table(positions);

        info!(
            "Built holdings table for {}: {} positions, total value {} cents",
            portfolio_id,
            table.rows.len(),
            table.total_value_cents
        );

        Ok(table)
    }
}
