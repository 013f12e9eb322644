//! The fit-scoring and gap-analysis core

pub mod cache;
pub mod gaps;
pub mod orchestrator;
pub mod pipeline;
pub mod recommend;
pub mod score;

pub use cache::{AnalysisCache, Clock, SystemClock};
pub use gaps::GapPrioritizer;
pub use orchestrator::{DimensionCallback, DimensionOrchestrator};
pub use pipeline::{
    AnalysisOutcome, AnalysisPipeline, AnalysisSink, OccupationFactsSupplier, ResumeFactsSupplier,
};
pub use recommend::RecommendationGenerator;
pub use score::{dimension_weight, round10, ScoreAggregator, ScoreSummary};
