//! Top-level analysis pipeline wiring suppliers, judges, and sinks

use crate::analysis::cache::AnalysisCache;
use crate::analysis::gaps::GapPrioritizer;
use crate::analysis::orchestrator::{DimensionCallback, DimensionOrchestrator};
use crate::analysis::recommend::RecommendationGenerator;
use crate::analysis::score::ScoreAggregator;
use crate::error::{OccufitError, Result};
use crate::model::{Analysis, AnalysisStatus, OccupationFacts, ResumeFacts};
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;
use std::time::Instant;

/// Supplies parsed resume facts by resume id; `None` means the resume exists
/// but has not been structured yet.
#[async_trait]
pub trait ResumeFactsSupplier: Send + Sync {
    async fn get_resume_facts(&self, resume_id: &str) -> Result<Option<ResumeFacts>>;
}

/// Supplies the cached occupation profile for an O*NET code.
#[async_trait]
pub trait OccupationFactsSupplier: Send + Sync {
    async fn get_occupation_facts(&self, occupation_code: &str) -> Result<Option<OccupationFacts>>;
}

/// Durable storage for completed analyses; returns the stored analysis id.
#[async_trait]
pub trait AnalysisSink: Send + Sync {
    async fn save_analysis(&self, analysis: &Analysis) -> Result<String>;
}

/// Result of one pipeline run. The analysis is always fully computed;
/// persistence failure is reported alongside it rather than replacing it.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub analysis: Analysis,
    pub analysis_id: Option<String>,
    pub persistence_error: Option<String>,
    pub from_cache: bool,
}

/// Coordinates one full resume-vs-occupation analysis:
/// fetch facts, judge all dimensions, prioritize gaps, aggregate scores,
/// generate recommendations, assemble and persist the record.
pub struct AnalysisPipeline {
    resumes: Arc<dyn ResumeFactsSupplier>,
    occupations: Arc<dyn OccupationFactsSupplier>,
    sink: Arc<dyn AnalysisSink>,
    orchestrator: DimensionOrchestrator,
    cache: AnalysisCache,
}

impl AnalysisPipeline {
    pub fn new(
        resumes: Arc<dyn ResumeFactsSupplier>,
        occupations: Arc<dyn OccupationFactsSupplier>,
        sink: Arc<dyn AnalysisSink>,
        orchestrator: DimensionOrchestrator,
        cache: AnalysisCache,
    ) -> Self {
        Self {
            resumes,
            occupations,
            sink,
            orchestrator,
            cache,
        }
    }

    /// Run (or serve from cache) the analysis for one resume/occupation pair.
    ///
    /// Fails fast with `ResumeNotReady` / `OccupationNotFound` before any
    /// dimension work; everything after fact fetch always yields an Analysis.
    pub async fn analyze(
        &self,
        resume_id: &str,
        occupation_code: &str,
        on_dimension_update: Option<DimensionCallback<'_>>,
    ) -> Result<AnalysisOutcome> {
        let started = Instant::now();

        let resume = self
            .resumes
            .get_resume_facts(resume_id)
            .await?
            .ok_or_else(|| OccufitError::ResumeNotReady(resume_id.to_string()))?;
        let occupation = self
            .occupations
            .get_occupation_facts(occupation_code)
            .await?
            .ok_or_else(|| OccufitError::OccupationNotFound(occupation_code.to_string()))?;

        let cache_key = AnalysisCache::key(resume_id, occupation_code);
        if let Some(cached) = self.cache.get(&cache_key) {
            log::info!(
                "serving cached analysis for {} vs {}",
                resume_id,
                occupation_code
            );
            return Ok(AnalysisOutcome {
                analysis: cached,
                analysis_id: None,
                persistence_error: None,
                from_cache: true,
            });
        }

        log::info!("analyzing resume {} against {}", resume_id, occupation_code);
        let dimension_scores = self
            .orchestrator
            .run_all(&resume, &occupation, on_dimension_update)
            .await;

        let gaps = GapPrioritizer::prioritize(&dimension_scores, Some(&occupation));
        let summary = ScoreAggregator::aggregate(&dimension_scores);
        let recommendations = RecommendationGenerator::generate(&dimension_scores, &gaps);

        let analysis = Analysis {
            resume_id: resume_id.to_string(),
            // The profile's own code is authoritative even when the lookup
            // key is an alias (e.g. a file stem).
            occupation_code: occupation.code.clone(),
            occupation_title: occupation.title.clone(),
            analysis_date: Utc::now(),
            overall_fit_score: summary.overall_score,
            fit_category: summary.fit_category,
            dimension_scores,
            score_breakdown: summary.score_breakdown,
            gaps,
            recommendations,
            improvement_impact: summary.improvement_impact,
            time_to_qualify: summary.time_to_qualify,
            processing_time_ms: started.elapsed().as_millis() as u64,
            status: AnalysisStatus::Completed,
            error_message: None,
        };

        self.cache.put(cache_key, analysis.clone());

        // Computation and persistence are separable: a failed save still
        // returns the computed analysis.
        let (analysis_id, persistence_error) = match self.sink.save_analysis(&analysis).await {
            Ok(id) => (Some(id), None),
            Err(e) => {
                log::error!("failed to persist analysis: {}", e);
                (None, Some(e.to_string()))
            }
        };

        Ok(AnalysisOutcome {
            analysis,
            analysis_id,
            persistence_error,
            from_cache: false,
        })
    }
}
