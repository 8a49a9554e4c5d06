use async_trait::async_trait;

use crate::errors::Result;
use crate::holdings::RawPosition;

/// External holdings/account source (the brokerage-aggregation side).
///
/// Returns every position of a portfolio joined with its account metadata.
/// An unknown portfolio id is an [`Error::NotFound`](crate::Error::NotFound),
/// the only lookup allowed to abort an analysis run.
#[async_trait]
pub trait HoldingsSourceTrait: Send + Sync {
    async fn get_positions(&self, portfolio_id: &str) -> Result<Vec<RawPosition>>;
}
