//! The durable analysis record and its derived parts

use crate::model::dimension::{Confidence, Dimension, DimensionResult, Importance};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Completed (or failed) fit analysis for one resume/occupation pair.
///
/// Append-only historical record; never mutated after creation except for
/// the status/error fields on a failed run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub resume_id: String,
    pub occupation_code: String,
    pub occupation_title: String,
    pub analysis_date: DateTime<Utc>,
    pub overall_fit_score: f64,
    pub fit_category: FitCategory,
    pub dimension_scores: BTreeMap<Dimension, DimensionResult>,
    pub score_breakdown: ScoreBreakdown,
    pub gaps: PrioritizedGaps,
    pub recommendations: Vec<Recommendation>,
    pub improvement_impact: Vec<ImprovementItem>,
    pub time_to_qualify: TimeToQualify,
    pub processing_time_ms: u64,
    pub status: AnalysisStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl Analysis {
    /// Analysis-shaped record for a failed run, so callers never see a bare
    /// error where a report is expected.
    pub fn failed(
        resume_id: impl Into<String>,
        occupation_code: impl Into<String>,
        occupation_title: impl Into<String>,
        message: impl Into<String>,
        processing_time_ms: u64,
        analysis_date: DateTime<Utc>,
    ) -> Self {
        Self {
            resume_id: resume_id.into(),
            occupation_code: occupation_code.into(),
            occupation_title: occupation_title.into(),
            analysis_date,
            overall_fit_score: 0.0,
            fit_category: FitCategory::for_score(0.0),
            dimension_scores: BTreeMap::new(),
            score_breakdown: ScoreBreakdown::default(),
            gaps: PrioritizedGaps::default(),
            recommendations: Vec::new(),
            improvement_impact: Vec::new(),
            time_to_qualify: TimeToQualify::default(),
            processing_time_ms,
            status: AnalysisStatus::Failed,
            error_message: Some(message.into()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisStatus {
    Completed,
    Failed,
}

/// Qualitative fit bucket with presentation metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FitCategory {
    pub category: String,
    pub color: String,
    pub description: String,
}

impl FitCategory {
    /// Category for an overall score; lower bounds are inclusive.
    pub fn for_score(score: f64) -> Self {
        let (category, color, description) = if score >= 85.0 {
            (
                "Excellent Match",
                "#22c55e",
                "Your background aligns strongly with this occupation.",
            )
        } else if score >= 70.0 {
            (
                "Good Match",
                "#3b82f6",
                "Your background covers most of what this occupation requires.",
            )
        } else if score >= 55.0 {
            (
                "Moderate Match",
                "#eab308",
                "You have a workable foundation with clear areas to develop.",
            )
        } else if score >= 40.0 {
            (
                "Developing Match",
                "#f97316",
                "Meaningful gaps remain, but a transition is achievable with focused effort.",
            )
        } else {
            (
                "Early Career Match",
                "#ef4444",
                "This occupation requires substantial new skills and experience.",
            )
        };
        Self {
            category: category.to_string(),
            color: color.to_string(),
            description: description.to_string(),
        }
    }
}

/// Dimensions stratified by their own raw score.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreBreakdown {
    pub strengths: Vec<BreakdownEntry>,
    pub adequate: Vec<BreakdownEntry>,
    pub needs_improvement: Vec<BreakdownEntry>,
    pub critical: Vec<BreakdownEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakdownEntry {
    pub dimension: String,
    pub score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,
    pub matches: usize,
    pub gaps: usize,
    pub confidence: Confidence,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// Gap buckets ordered by how urgently each gap blocks qualification.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizedGaps {
    pub critical: Vec<PrioritizedGap>,
    pub important: Vec<PrioritizedGap>,
    pub nice_to_have: Vec<PrioritizedGap>,
}

impl PrioritizedGaps {
    pub fn is_empty(&self) -> bool {
        self.critical.is_empty() && self.important.is_empty() && self.nice_to_have.is_empty()
    }

    /// All gaps in bucket order (critical first).
    pub fn iter_all(&self) -> impl Iterator<Item = &PrioritizedGap> {
        self.critical
            .iter()
            .chain(&self.important)
            .chain(&self.nice_to_have)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GapPriority {
    Critical,
    Important,
    NiceToHave,
}

/// One missing occupation requirement priced by O*NET importance.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrioritizedGap {
    pub dimension: Dimension,
    pub item: String,
    pub importance_score: f64,
    pub priority: GapPriority,
    pub importance: Importance,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    pub priority: Priority,
    pub category: String,
    pub title: String,
    pub actions: Vec<RecommendedAction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendedAction {
    pub action: String,
    pub timeframe: String,
    pub impact: String,
}

/// How much the overall score would rise if a dimension reached 80.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementItem {
    pub dimension: Dimension,
    pub current_score: f64,
    pub target_score: f64,
    pub impact: f64,
    pub priority: Priority,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeToQualify {
    pub total_months: u32,
    pub time_estimates: Vec<TimeEstimate>,
    pub summary: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeEstimate {
    pub area: String,
    pub months: u32,
    pub reason: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_category_boundaries_are_inclusive() {
        assert_eq!(FitCategory::for_score(85.0).category, "Excellent Match");
        assert_eq!(FitCategory::for_score(84.9).category, "Good Match");
        assert_eq!(FitCategory::for_score(70.0).category, "Good Match");
        assert_eq!(FitCategory::for_score(69.9).category, "Moderate Match");
        assert_eq!(FitCategory::for_score(55.0).category, "Moderate Match");
        assert_eq!(FitCategory::for_score(40.0).category, "Developing Match");
        assert_eq!(FitCategory::for_score(39.9).category, "Early Career Match");
    }

    #[test]
    fn test_gap_priority_serializes_snake_case() {
        let json = serde_json::to_string(&GapPriority::NiceToHave).unwrap();
        assert_eq!(json, "\"nice_to_have\"");
    }

    #[test]
    fn test_failed_analysis_shape() {
        let failed = Analysis::failed("r1", "11-0000.00", "Managers", "boom", 12, Utc::now());
        assert_eq!(failed.status, AnalysisStatus::Failed);
        assert_eq!(failed.error_message.as_deref(), Some("boom"));
        assert!(failed.dimension_scores.is_empty());
    }
}
