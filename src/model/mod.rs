//! Data model: structured resume facts, occupation profiles, and analysis records

pub mod analysis;
pub mod dimension;
pub mod occupation;
pub mod resume;

pub use analysis::{
    Analysis, AnalysisStatus, BreakdownEntry, FitCategory, GapPriority, ImprovementItem,
    PrioritizedGap, PrioritizedGaps, Priority, Recommendation, RecommendedAction, ScoreBreakdown,
    TimeEstimate, TimeToQualify,
};
pub use dimension::{Confidence, Dimension, DimensionResult, Importance};
pub use occupation::{
    EducationShare, JobZone, OccupationFacts, OccupationTask, RatedFact, TechnologySkill,
};
pub use resume::{EducationEntry, ExperienceEntry, ResumeFacts, SkillProfile};
