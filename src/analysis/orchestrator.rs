//! Sequential orchestration of the six dimension judges

use crate::judge::DimensionJudge;
use crate::model::{Dimension, DimensionResult, OccupationFacts, ResumeFacts};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

/// Incremental per-dimension result callback, invoked in declared order.
pub type DimensionCallback<'a> = &'a (dyn Fn(Dimension, &DimensionResult) + Send + Sync);

/// Runs every dimension judge against one resume/occupation pair.
///
/// Dimensions run sequentially so streamed updates arrive in the fixed
/// declared order. An optional pause between dimensions paces a progress UI;
/// it is not a correctness requirement.
pub struct DimensionOrchestrator {
    judge: Arc<dyn DimensionJudge>,
    pacing: Duration,
}

impl DimensionOrchestrator {
    pub fn new(judge: Arc<dyn DimensionJudge>) -> Self {
        Self {
            judge,
            pacing: Duration::ZERO,
        }
    }

    pub fn with_pacing(mut self, pacing: Duration) -> Self {
        self.pacing = pacing;
        self
    }

    /// Judge all six dimensions, always returning exactly six results.
    ///
    /// A dimension with no occupation data short-circuits to a neutral
    /// fallback; a judge failure is recorded as a zero-score result for that
    /// dimension only and never aborts the other five.
    pub async fn run_all(
        &self,
        resume: &ResumeFacts,
        occupation: &OccupationFacts,
        on_result: Option<DimensionCallback<'_>>,
    ) -> BTreeMap<Dimension, DimensionResult> {
        let mut results = BTreeMap::new();

        for (index, dimension) in Dimension::ALL.into_iter().enumerate() {
            if index > 0 && !self.pacing.is_zero() {
                tokio::time::sleep(self.pacing).await;
            }

            let result = if !occupation.has_dimension_data(dimension) {
                log::debug!("{}: no occupation data, using fallback score", dimension);
                DimensionResult::fallback(dimension)
            } else {
                match self.judge.judge(dimension, resume, occupation).await {
                    Ok(mut result) => {
                        result.dimension = dimension;
                        result.score = if result.score.is_finite() {
                            result.score.clamp(0.0, 100.0)
                        } else {
                            0.0
                        };
                        result
                    }
                    Err(e) => {
                        log::warn!("judge failed for {}: {}", dimension, e);
                        DimensionResult::failed(dimension, e.to_string())
                    }
                }
            };

            if let Some(callback) = on_result {
                callback(dimension, &result);
            }
            results.insert(dimension, result);
        }

        results
    }
}
