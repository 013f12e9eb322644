//! Actionable recommendation blocks derived from dimension gaps

use crate::model::{
    Dimension, DimensionResult, PrioritizedGaps, Priority, Recommendation, RecommendedAction,
};
use std::collections::BTreeMap;

use super::score::education_months;

/// Builds one recommendation block per dimension that has gaps or fails a
/// requirement, sorted high / medium / low.
pub struct RecommendationGenerator;

impl RecommendationGenerator {
    pub fn generate(
        results: &BTreeMap<Dimension, DimensionResult>,
        gaps: &PrioritizedGaps,
    ) -> Vec<Recommendation> {
        let mut by_dimension: BTreeMap<Dimension, Vec<(String, f64)>> = BTreeMap::new();
        for gap in gaps.iter_all() {
            by_dimension
                .entry(gap.dimension)
                .or_default()
                .push((gap.item.clone(), gap.importance_score));
        }
        // Bucket order is not importance order: an unmatched gap sits in
        // `important` at the default 50 and can precede a matched sub-60 gap
        // from `nice_to_have`. Sort each list before taking the top items.
        for items in by_dimension.values_mut() {
            items.sort_by(|a, b| b.1.total_cmp(&a.1));
        }

        let mut recommendations = Vec::new();

        for dimension in Dimension::ALL {
            let result = match results.get(&dimension) {
                Some(result) => result,
                None => continue,
            };

            if dimension == Dimension::Education {
                if result.meets_requirements == Some(false) {
                    recommendations.push(Self::education_block(result));
                }
                continue;
            }

            let items = by_dimension
                .get(&dimension)
                .cloned()
                .unwrap_or_else(|| {
                    result
                        .gaps
                        .iter()
                        .map(|g| (g.clone(), 50.0))
                        .collect()
                });
            if items.is_empty() {
                continue;
            }

            recommendations.push(Self::dimension_block(dimension, items));
        }

        recommendations.sort_by_key(|r| r.priority);
        recommendations
    }

    fn dimension_block(dimension: Dimension, items: Vec<(String, f64)>) -> Recommendation {
        let (priority, category, title, verb, timeframe, take) = match dimension {
            Dimension::Skills => (
                Priority::High,
                "Skill Development",
                "Close priority skill gaps",
                ActionVerb::Learn,
                "3-6 months",
                5,
            ),
            Dimension::Tasks => (
                Priority::Medium,
                "Work Experience",
                "Build experience with core occupation tasks",
                ActionVerb::SeekExperience,
                "6-12 months",
                3,
            ),
            Dimension::Tools => (
                Priority::Medium,
                "Tools & Technology",
                "Get hands-on with the occupation's tooling",
                ActionVerb::HandsOn,
                "1-3 months",
                5,
            ),
            Dimension::WorkActivities => (
                Priority::Medium,
                "Work Activities",
                "Broaden exposure to day-to-day activities",
                ActionVerb::Practice,
                "3-6 months",
                3,
            ),
            Dimension::Knowledge => (
                Priority::Low,
                "Knowledge Areas",
                "Deepen domain knowledge",
                ActionVerb::Study,
                "2-4 months",
                3,
            ),
            // Education handled separately
            Dimension::Education => unreachable!("education uses its own block"),
        };

        let actions = items
            .into_iter()
            .take(take)
            .map(|(item, importance)| RecommendedAction {
                action: verb.render(&item),
                timeframe: timeframe.to_string(),
                impact: impact_for(importance, priority),
            })
            .collect();

        Recommendation {
            priority,
            category: category.to_string(),
            title: title.to_string(),
            actions,
        }
    }

    fn education_block(result: &DimensionResult) -> Recommendation {
        let level = result
            .education_level
            .clone()
            .unwrap_or_else(|| "the required education level".to_string());
        let months = education_months(&level);

        Recommendation {
            priority: Priority::High,
            category: "Education".to_string(),
            title: "Meet the education requirement".to_string(),
            actions: vec![RecommendedAction {
                action: format!("Complete {}", level),
                timeframe: format!("about {} months", months),
                impact: "critical".to_string(),
            }],
        }
    }
}

enum ActionVerb {
    Learn,
    SeekExperience,
    HandsOn,
    Practice,
    Study,
}

impl ActionVerb {
    fn render(&self, item: &str) -> String {
        match self {
            ActionVerb::Learn => format!("Learn {}", item),
            ActionVerb::SeekExperience => {
                format!("Seek opportunities to gain experience in: {}", item)
            }
            ActionVerb::HandsOn => format!("Gain hands-on experience with {}", item),
            ActionVerb::Practice => format!("Practice and document experience with {}", item),
            ActionVerb::Study => format!("Study {}", item),
        }
    }
}

fn impact_for(importance_score: f64, priority: Priority) -> String {
    if importance_score >= 80.0 {
        match priority {
            Priority::High => "critical",
            _ => "high",
        }
    } else if importance_score >= 60.0 {
        "medium"
    } else {
        match priority {
            Priority::Low => "low",
            _ => "medium",
        }
    }
    .to_string()
}
