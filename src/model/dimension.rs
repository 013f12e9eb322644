//! The six fixed comparison dimensions and per-dimension judgment results

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the six fixed resume-vs-occupation comparison axes.
///
/// Declaration order is the processing and streaming order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Dimension {
    Tasks,
    Skills,
    Education,
    WorkActivities,
    Knowledge,
    Tools,
}

impl Dimension {
    pub const ALL: [Dimension; 6] = [
        Dimension::Tasks,
        Dimension::Skills,
        Dimension::Education,
        Dimension::WorkActivities,
        Dimension::Knowledge,
        Dimension::Tools,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Tasks => "tasks",
            Dimension::Skills => "skills",
            Dimension::Education => "education",
            Dimension::WorkActivities => "workActivities",
            Dimension::Knowledge => "knowledge",
            Dimension::Tools => "tools",
        }
    }

    /// Human-readable name for reports.
    pub fn display_name(&self) -> &'static str {
        match self {
            Dimension::Tasks => "Tasks",
            Dimension::Skills => "Skills",
            Dimension::Education => "Education",
            Dimension::WorkActivities => "Work Activities",
            Dimension::Knowledge => "Knowledge",
            Dimension::Tools => "Tools",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Judge-reported certainty in its own score, used as a discount multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Low,
    Medium,
    High,
}

impl Confidence {
    pub fn multiplier(&self) -> f64 {
        match self {
            Confidence::High => 1.0,
            Confidence::Medium => 0.9,
            Confidence::Low => 0.8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Importance {
    Low,
    Medium,
    High,
}

/// Outcome of judging one dimension for one resume/occupation pair.
///
/// `score` is always present (fallback or zero on failure, never missing);
/// `matches` and `gaps` default to empty, never null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionResult {
    pub dimension: Dimension,
    pub score: f64,
    #[serde(default)]
    pub matches: Vec<String>,
    #[serde(default)]
    pub gaps: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<Confidence>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub importance: Option<Importance>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meets_requirements: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub education_level: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternative_tools: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub strength_areas: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub recommendations: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DimensionResult {
    pub fn new(dimension: Dimension, score: f64) -> Self {
        Self {
            dimension,
            score,
            matches: Vec::new(),
            gaps: Vec::new(),
            confidence: None,
            importance: None,
            meets_requirements: None,
            education_level: None,
            alternative_tools: Vec::new(),
            strength_areas: Vec::new(),
            recommendations: Vec::new(),
            note: None,
            error: None,
        }
    }

    /// Neutral result used when the occupation has no data for a dimension.
    pub fn fallback(dimension: Dimension) -> Self {
        let mut result = match dimension {
            Dimension::Education => {
                let mut r = Self::new(dimension, 75.0);
                r.meets_requirements = Some(true);
                r
            }
            _ => Self::new(dimension, 50.0),
        };
        result.note = Some(format!(
            "No {} data available for this occupation; neutral score assigned",
            dimension.display_name().to_lowercase()
        ));
        result
    }

    /// Zero-score result recording an isolated judge failure.
    pub fn failed(dimension: Dimension, message: impl Into<String>) -> Self {
        let mut result = Self::new(dimension, 0.0);
        result.error = Some(message.into());
        result
    }

    /// Confidence with the medium default applied.
    pub fn effective_confidence(&self) -> Confidence {
        self.confidence.unwrap_or(Confidence::Medium)
    }
}
