//! O*NET-style occupation profile, read-only input to the analysis core

use crate::model::dimension::Dimension;
use serde::{Deserialize, Serialize};

fn default_importance() -> f64 {
    50.0
}

/// Cached occupation profile for one O*NET code.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupationFacts {
    pub code: String,
    pub title: String,
    #[serde(default)]
    pub tasks: Vec<OccupationTask>,
    #[serde(default)]
    pub skills: Vec<RatedFact>,
    #[serde(default)]
    pub technology_skills: Vec<TechnologySkill>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub work_activities: Vec<RatedFact>,
    #[serde(default)]
    pub knowledge: Vec<RatedFact>,
    #[serde(default)]
    pub education: Vec<EducationShare>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_zone: Option<JobZone>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupationTask {
    pub text: String,
    #[serde(default = "default_importance")]
    pub importance: f64,
}

/// Named occupation fact with an O*NET importance rating (0-100).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatedFact {
    pub name: String,
    #[serde(default = "default_importance")]
    pub importance: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<f64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnologySkill {
    pub name: String,
    #[serde(default)]
    pub hot: bool,
}

/// Share of occupation incumbents reporting an education category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationShare {
    pub category: String,
    pub percentage: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobZone {
    pub zone: u8,
    pub education_needed: String,
}

impl OccupationFacts {
    /// Whether this profile has any data to judge a dimension against.
    ///
    /// Education counts the job zone as signal even when the respondent
    /// distribution is missing.
    pub fn has_dimension_data(&self, dimension: Dimension) -> bool {
        match dimension {
            Dimension::Tasks => !self.tasks.is_empty(),
            Dimension::Skills => !self.skills.is_empty(),
            Dimension::Education => !self.education.is_empty() || self.job_zone.is_some(),
            Dimension::WorkActivities => !self.work_activities.is_empty(),
            Dimension::Knowledge => !self.knowledge.is_empty(),
            Dimension::Tools => !self.tools.is_empty() || !self.technology_skills.is_empty(),
        }
    }

    /// Name/text plus importance for every fact in a dimension.
    ///
    /// Tools and technology skills carry no O*NET importance rating and get
    /// the neutral 50. Education has no matchable fact list.
    pub fn rated_facts(&self, dimension: Dimension) -> Vec<(&str, f64)> {
        match dimension {
            Dimension::Tasks => self
                .tasks
                .iter()
                .map(|t| (t.text.as_str(), t.importance))
                .collect(),
            Dimension::Skills => Self::rated(&self.skills),
            Dimension::WorkActivities => Self::rated(&self.work_activities),
            Dimension::Knowledge => Self::rated(&self.knowledge),
            Dimension::Tools => self
                .tools
                .iter()
                .map(|t| (t.as_str(), default_importance()))
                .chain(
                    self.technology_skills
                        .iter()
                        .map(|t| (t.name.as_str(), if t.hot { 75.0 } else { default_importance() })),
                )
                .collect(),
            Dimension::Education => Vec::new(),
        }
    }

    /// Education category reported by the largest share of incumbents.
    pub fn modal_education(&self) -> Option<&str> {
        self.education
            .iter()
            .max_by(|a, b| a.percentage.total_cmp(&b.percentage))
            .map(|e| e.category.as_str())
    }

    fn rated(facts: &[RatedFact]) -> Vec<(&str, f64)> {
        facts
            .iter()
            .map(|f| (f.name.as_str(), f.importance))
            .collect()
    }
}
