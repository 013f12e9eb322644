//! Weighted score aggregation, fit categorization, and qualification timing

use crate::model::{
    BreakdownEntry, Dimension, DimensionResult, FitCategory, ImprovementItem, Priority,
    ScoreBreakdown, TimeEstimate, TimeToQualify,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Everything the aggregator derives from one set of dimension results.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreSummary {
    pub overall_score: f64,
    pub fit_category: FitCategory,
    pub score_breakdown: ScoreBreakdown,
    pub improvement_impact: Vec<ImprovementItem>,
    pub time_to_qualify: TimeToQualify,
}

/// Fixed weight for a dimension name; unknown names get 0.10.
pub fn dimension_weight(name: &str) -> f64 {
    match name {
        "tasks" => 0.25,
        "skills" => 0.25,
        "technology" | "technologySkills" => 0.20,
        "education" => 0.15,
        "workActivities" => 0.10,
        "knowledge" => 0.05,
        "tools" => 0.10,
        _ => 0.10,
    }
}

/// Round to one decimal place.
pub fn round10(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Pure aggregation over per-dimension results; no hidden state.
pub struct ScoreAggregator;

impl ScoreAggregator {
    pub fn aggregate(results: &BTreeMap<Dimension, DimensionResult>) -> ScoreSummary {
        let overall_score = Self::overall_score(results);
        ScoreSummary {
            overall_score,
            fit_category: FitCategory::for_score(overall_score),
            score_breakdown: Self::score_breakdown(results),
            improvement_impact: Self::improvement_impact(results),
            time_to_qualify: Self::time_to_qualify(results),
        }
    }

    /// Confidence-adjusted weighted average, rounded to one decimal.
    pub fn overall_score(results: &BTreeMap<Dimension, DimensionResult>) -> f64 {
        let mut weighted = 0.0;
        let mut total_weight = 0.0;

        for (dimension, result) in results {
            let weight = dimension_weight(dimension.as_str());
            let adjusted = sanitize(result.score) * result.effective_confidence().multiplier();
            weighted += adjusted * weight;
            total_weight += weight;
        }

        if total_weight == 0.0 {
            0.0
        } else {
            round10(weighted / total_weight)
        }
    }

    /// Every dimension lands in exactly one bucket by its own raw score.
    fn score_breakdown(results: &BTreeMap<Dimension, DimensionResult>) -> ScoreBreakdown {
        let mut breakdown = ScoreBreakdown::default();

        for (dimension, result) in results {
            let entry = BreakdownEntry {
                dimension: dimension.display_name().to_string(),
                score: sanitize(result.score),
                importance: result.importance,
                matches: result.matches.len(),
                gaps: result.gaps.len(),
                confidence: result.effective_confidence(),
            };
            let score = entry.score;
            if score >= 80.0 {
                breakdown.strengths.push(entry);
            } else if score >= 65.0 {
                breakdown.adequate.push(entry);
            } else if score >= 50.0 {
                breakdown.needs_improvement.push(entry);
            } else {
                breakdown.critical.push(entry);
            }
        }

        for bucket in [
            &mut breakdown.strengths,
            &mut breakdown.adequate,
            &mut breakdown.needs_improvement,
            &mut breakdown.critical,
        ] {
            bucket.sort_by(|a, b| b.score.total_cmp(&a.score));
        }

        breakdown
    }

    /// Overall-score points recoverable by lifting each weak dimension to 80.
    fn improvement_impact(results: &BTreeMap<Dimension, DimensionResult>) -> Vec<ImprovementItem> {
        let mut items: Vec<ImprovementItem> = results
            .iter()
            .filter(|(_, result)| sanitize(result.score) < 80.0)
            .map(|(&dimension, result)| {
                let score = sanitize(result.score);
                let weight = dimension_weight(dimension.as_str());
                let current_contribution = (score / 100.0) * weight;
                let potential_contribution = 0.8 * weight;
                let impact = ((potential_contribution - current_contribution) * 100.0).round();

                let gap = 100.0 - score;
                let priority = if gap * weight > 15.0 {
                    Priority::High
                } else if gap * weight > 8.0 {
                    Priority::Medium
                } else {
                    Priority::Low
                };

                ImprovementItem {
                    dimension,
                    current_score: score,
                    target_score: 80.0,
                    impact,
                    priority,
                }
            })
            .collect();

        items.sort_by(|a, b| b.impact.total_cmp(&a.impact));
        items
    }

    /// Months of preparation implied by education, skill, and task gaps.
    fn time_to_qualify(results: &BTreeMap<Dimension, DimensionResult>) -> TimeToQualify {
        let mut estimates = Vec::new();

        if let Some(education) = results.get(&Dimension::Education) {
            if education.meets_requirements == Some(false) {
                let level = education.education_level.as_deref().unwrap_or("");
                let months = education_months(level);
                estimates.push(TimeEstimate {
                    area: "Education".to_string(),
                    months,
                    reason: if level.is_empty() {
                        "Complete the required education level".to_string()
                    } else {
                        format!("Complete {}", level)
                    },
                });
            }
        }

        if let Some(skills) = results.get(&Dimension::Skills) {
            let score = sanitize(skills.score);
            if score < 70.0 {
                let months = (skills.gaps.len() as f64 * 2.0 + (70.0 - score) / 10.0)
                    .ceil()
                    .min(24.0) as u32;
                estimates.push(TimeEstimate {
                    area: "Skills".to_string(),
                    months,
                    reason: format!("Develop {} missing skills", skills.gaps.len()),
                });
            }
        }

        if let Some(tasks) = results.get(&Dimension::Tasks) {
            let score = sanitize(tasks.score);
            if score < 60.0 {
                let months = (((60.0 - score) / 5.0).ceil() * 3.0).min(36.0) as u32;
                estimates.push(TimeEstimate {
                    area: "Work Experience".to_string(),
                    months,
                    reason: "Gain hands-on experience with core occupation tasks".to_string(),
                });
            }
        }

        let total_months: u32 = estimates.iter().map(|e| e.months).sum();
        TimeToQualify {
            total_months,
            summary: qualification_summary(total_months),
            time_estimates: estimates,
        }
    }
}

/// Months to reach a required education level, keyed on level keywords.
pub(crate) fn education_months(level: &str) -> u32 {
    let lower = level.to_lowercase();
    if lower.contains("bachelor") {
        48
    } else if lower.contains("master") || lower.contains("associate") {
        24
    } else if lower.contains("certif") {
        6
    } else {
        12
    }
}

fn qualification_summary(total_months: u32) -> String {
    match total_months {
        0 => "Ready now: you meet the core requirements for this occupation.".to_string(),
        1..=3 => format!(
            "Short-term preparation: roughly {} months of focused effort.",
            total_months
        ),
        4..=6 => format!("Medium-term preparation: roughly {} months.", total_months),
        7..=12 => format!("Long-term preparation: about {} months.", total_months),
        13..=24 => format!(
            "Extended preparation: about {} months (one to two years).",
            total_months
        ),
        _ => format!("Multi-year transition: roughly {} months.", total_months),
    }
}

/// Malformed scores degrade to 0 rather than failing the whole analysis.
fn sanitize(score: f64) -> f64 {
    if score.is_finite() {
        score.clamp(0.0, 100.0)
    } else {
        0.0
    }
}
