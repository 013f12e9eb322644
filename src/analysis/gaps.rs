//! Gap prioritization against occupation importance ratings

use crate::model::{
    Dimension, DimensionResult, GapPriority, Importance, OccupationFacts, PrioritizedGap,
    PrioritizedGaps,
};
use std::collections::BTreeMap;

const DEFAULT_IMPORTANCE: f64 = 50.0;

/// Prices each dimension gap by matching it back to an occupation fact and
/// buckets it as critical / important / nice_to_have.
pub struct GapPrioritizer;

impl GapPrioritizer {
    /// Bucket every gap across all dimensions.
    ///
    /// With occupation facts available, a gap's importance comes from the
    /// best substring match against the dimension's fact list; without them,
    /// a dimension-level heuristic applies.
    pub fn prioritize(
        results: &BTreeMap<Dimension, DimensionResult>,
        occupation: Option<&OccupationFacts>,
    ) -> PrioritizedGaps {
        let mut buckets = PrioritizedGaps::default();

        for (&dimension, result) in results {
            if result.gaps.is_empty() {
                continue;
            }
            match occupation {
                Some(facts) => Self::bucket_by_importance(dimension, result, facts, &mut buckets),
                None => Self::bucket_by_heuristic(dimension, result, &mut buckets),
            }
        }

        buckets
    }

    fn bucket_by_importance(
        dimension: Dimension,
        result: &DimensionResult,
        occupation: &OccupationFacts,
        buckets: &mut PrioritizedGaps,
    ) {
        let candidates = occupation.rated_facts(dimension);

        // (item, importance, whether a fact matched)
        let mut priced: Vec<(String, f64, bool)> = result
            .gaps
            .iter()
            .map(|gap| match best_match_importance(gap, &candidates) {
                Some(importance) => (gap.clone(), importance, true),
                None => (gap.clone(), DEFAULT_IMPORTANCE, false),
            })
            .collect();
        priced.sort_by(|a, b| b.1.total_cmp(&a.1));

        for (item, importance_score, matched) in priced {
            // An unmatched gap still lands in `important` at the default score
            let priority = if !matched {
                GapPriority::Important
            } else if importance_score >= 80.0 {
                GapPriority::Critical
            } else if importance_score >= 60.0 {
                GapPriority::Important
            } else {
                GapPriority::NiceToHave
            };
            push(
                buckets,
                PrioritizedGap {
                    dimension,
                    item,
                    importance_score,
                    priority,
                    importance: importance_label(importance_score),
                },
            );
        }
    }

    fn bucket_by_heuristic(
        dimension: Dimension,
        result: &DimensionResult,
        buckets: &mut PrioritizedGaps,
    ) {
        let priority = match dimension {
            Dimension::Tasks | Dimension::Skills if result.score < 50.0 => GapPriority::Critical,
            Dimension::Education | Dimension::Tools if result.score < 70.0 => {
                GapPriority::Important
            }
            _ => GapPriority::NiceToHave,
        };
        let importance_score = match priority {
            GapPriority::Critical => 80.0,
            GapPriority::Important => 60.0,
            GapPriority::NiceToHave => DEFAULT_IMPORTANCE,
        };

        for item in &result.gaps {
            push(
                buckets,
                PrioritizedGap {
                    dimension,
                    item: item.clone(),
                    importance_score,
                    priority,
                    importance: importance_label(importance_score),
                },
            );
        }
    }
}

/// Best case-insensitive substring match (either direction) against the
/// dimension's fact list; the longest matching fact wins.
///
/// Deliberately naive: paraphrased gap text can miss, and the bucket
/// thresholds are calibrated to this looseness.
fn best_match_importance(gap: &str, candidates: &[(&str, f64)]) -> Option<f64> {
    let gap_lower = gap.to_lowercase();
    let mut best: Option<(usize, f64)> = None;

    for (name, importance) in candidates {
        let name_lower = name.to_lowercase();
        if name_lower.contains(&gap_lower) || gap_lower.contains(&name_lower) {
            if best.map_or(true, |(len, _)| name.len() > len) {
                best = Some((name.len(), *importance));
            }
        }
    }

    best.map(|(_, importance)| importance)
}

fn importance_label(score: f64) -> Importance {
    if score >= 80.0 {
        Importance::High
    } else if score >= 60.0 {
        Importance::Medium
    } else {
        Importance::Low
    }
}

fn push(buckets: &mut PrioritizedGaps, gap: PrioritizedGap) {
    match gap.priority {
        GapPriority::Critical => buckets.critical.push(gap),
        GapPriority::Important => buckets.important.push(gap),
        GapPriority::NiceToHave => buckets.nice_to_have.push(gap),
    }
}
