//! The DimensionJudge boundary: pluggable per-dimension comparison

pub mod lexical;

pub use lexical::LexicalJudge;

use crate::error::Result;
use crate::model::{Dimension, DimensionResult, OccupationFacts, ResumeFacts};
use async_trait::async_trait;

/// External judge for one comparison dimension.
///
/// Production deployments back this with a reasoning service (one prompt per
/// dimension); the orchestrator only relies on the returned shape. A judge
/// is never invoked when the occupation has no data for the dimension.
#[async_trait]
pub trait DimensionJudge: Send + Sync {
    async fn judge(
        &self,
        dimension: Dimension,
        resume: &ResumeFacts,
        occupation: &OccupationFacts,
    ) -> Result<DimensionResult>;
}
