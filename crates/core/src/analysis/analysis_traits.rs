use async_trait::async_trait;

use crate::analysis::AnalysisResult;
use crate::errors::Result;

/// Append-only persistence for analysis results. One record per run;
/// failures propagate to the caller, the pipeline does not retry.
#[async_trait]
pub trait AnalysisRepositoryTrait: Send + Sync {
    async fn save(&self, result: &AnalysisResult) -> Result<()>;
}
