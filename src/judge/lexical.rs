//! Built-in deterministic judge using exact and fuzzy lexical matching

use crate::error::Result;
use crate::judge::DimensionJudge;
use crate::model::{
    Confidence, Dimension, DimensionResult, OccupationFacts, ResumeFacts,
};
use async_trait::async_trait;
use strsim::jaro_winkler;

const DEFAULT_FUZZY_THRESHOLD: f64 = 0.85;

/// Local judge that scores a dimension as importance-weighted coverage of
/// the occupation's facts by resume evidence.
///
/// An occupation fact counts as matched when resume evidence contains it
/// case-insensitively (either direction) or a resume term clears the
/// Jaro-Winkler threshold against it.
pub struct LexicalJudge {
    fuzzy_threshold: f64,
}

impl Default for LexicalJudge {
    fn default() -> Self {
        Self::new(DEFAULT_FUZZY_THRESHOLD)
    }
}

impl LexicalJudge {
    pub fn new(fuzzy_threshold: f64) -> Self {
        Self {
            fuzzy_threshold: fuzzy_threshold.clamp(0.0, 1.0),
        }
    }

    /// Resume strings that can evidence a dimension.
    fn evidence_terms(resume: &ResumeFacts, dimension: Dimension) -> Vec<String> {
        let mut terms: Vec<String> = match dimension {
            Dimension::Tasks => resume
                .experience
                .iter()
                .flat_map(|e| e.responsibilities.iter().chain(&e.achievements))
                .cloned()
                .chain(std::iter::once(resume.summary.clone()))
                .collect(),
            Dimension::Skills => resume.skills.all().iter().map(|s| s.to_string()).collect(),
            Dimension::Education => resume
                .education
                .iter()
                .flat_map(|e| [e.degree.clone(), e.field.clone()])
                .collect(),
            Dimension::WorkActivities => resume
                .experience
                .iter()
                .flat_map(|e| {
                    e.responsibilities
                        .iter()
                        .cloned()
                        .chain(std::iter::once(e.role.clone()))
                })
                .collect(),
            Dimension::Knowledge => resume
                .education
                .iter()
                .map(|e| e.field.clone())
                .chain(resume.skills.core.iter().cloned())
                .chain(resume.skills.technical.iter().cloned())
                .chain(std::iter::once(resume.summary.clone()))
                .collect(),
            Dimension::Tools => resume
                .skills
                .tools
                .iter()
                .chain(&resume.skills.technical)
                .chain(&resume.skills.programming_languages)
                .cloned()
                .collect(),
        };
        terms.retain(|t| !t.trim().is_empty());
        terms
    }

    fn is_match(&self, fact: &str, terms: &[String]) -> bool {
        let fact_lower = fact.to_lowercase();
        terms.iter().any(|term| {
            let term_lower = term.to_lowercase();
            term_lower.contains(&fact_lower)
                || fact_lower.contains(&term_lower)
                || jaro_winkler(&term_lower, &fact_lower) >= self.fuzzy_threshold
        })
    }

    fn confidence_for(terms: &[String]) -> Confidence {
        if terms.is_empty() {
            Confidence::Low
        } else if terms.len() >= 8 {
            Confidence::High
        } else {
            Confidence::Medium
        }
    }

    /// Coverage scoring for every dimension except education.
    fn judge_coverage(
        &self,
        dimension: Dimension,
        resume: &ResumeFacts,
        occupation: &OccupationFacts,
    ) -> DimensionResult {
        let terms = Self::evidence_terms(resume, dimension);
        let facts = occupation.rated_facts(dimension);

        let mut matched_weight = 0.0;
        let mut total_weight = 0.0;
        let mut matches = Vec::new();
        let mut gaps: Vec<(String, f64)> = Vec::new();

        for (name, importance) in &facts {
            total_weight += importance;
            if self.is_match(name, &terms) {
                matched_weight += importance;
                matches.push(name.to_string());
            } else {
                gaps.push((name.to_string(), *importance));
            }
        }

        let score = if total_weight == 0.0 {
            50.0
        } else {
            (matched_weight / total_weight * 100.0).round()
        };

        // Most important unmet facts first
        gaps.sort_by(|a, b| b.1.total_cmp(&a.1));

        let mut result = DimensionResult::new(dimension, score);
        result.confidence = Some(Self::confidence_for(&terms));
        result.strength_areas = matches.iter().take(3).cloned().collect();
        result.matches = matches;
        result.gaps = gaps.into_iter().map(|(name, _)| name).collect();
        result
    }

    /// Education is judged by degree level against the occupation's job zone
    /// or modal education category, not by coverage.
    fn judge_education(resume: &ResumeFacts, occupation: &OccupationFacts) -> DimensionResult {
        let required_level = occupation
            .job_zone
            .as_ref()
            .map(|z| z.education_needed.clone())
            .or_else(|| occupation.modal_education().map(str::to_string));

        let required_rank = required_level.as_deref().map(degree_rank).unwrap_or(0);
        let attained_rank = resume
            .education
            .iter()
            .map(|e| degree_rank(&e.degree))
            .max()
            .unwrap_or(0);

        let meets = attained_rank >= required_rank;
        let score = if meets {
            (85 + 5 * attained_rank.saturating_sub(required_rank).min(3) as i32) as f64
        } else {
            (75 - 15 * (required_rank - attained_rank) as i32).max(30) as f64
        };

        let mut result = DimensionResult::new(Dimension::Education, score);
        result.meets_requirements = Some(meets);
        result.education_level = required_level.clone();
        result.confidence = Some(if resume.education.is_empty() {
            Confidence::Low
        } else {
            Confidence::High
        });
        result.matches = resume
            .education
            .iter()
            .filter(|e| !e.degree.trim().is_empty())
            .map(|e| {
                if e.field.trim().is_empty() {
                    e.degree.clone()
                } else {
                    format!("{} in {}", e.degree, e.field)
                }
            })
            .collect();
        if !meets {
            if let Some(level) = required_level {
                result.gaps = vec![level];
            }
        }
        result
    }
}

#[async_trait]
impl DimensionJudge for LexicalJudge {
    async fn judge(
        &self,
        dimension: Dimension,
        resume: &ResumeFacts,
        occupation: &OccupationFacts,
    ) -> Result<DimensionResult> {
        let result = match dimension {
            Dimension::Education => Self::judge_education(resume, occupation),
            _ => self.judge_coverage(dimension, resume, occupation),
        };
        log::debug!(
            "lexical judge: {} scored {:.0} ({} matches, {} gaps)",
            dimension,
            result.score,
            result.matches.len(),
            result.gaps.len()
        );
        Ok(result)
    }
}

/// Ordinal degree level; 0 means unrecognized.
fn degree_rank(text: &str) -> u8 {
    let lower = text.to_lowercase();
    if lower.contains("doctor") || lower.contains("phd") || lower.contains("ph.d") {
        5
    } else if lower.contains("master") || lower.contains("mba") {
        4
    } else if lower.contains("bachelor") {
        3
    } else if lower.contains("associate") {
        2
    } else if lower.contains("certificat") || lower.contains("high school") || lower.contains("diploma") {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{EducationEntry, JobZone, RatedFact, SkillProfile};

    fn occupation_with_skills(skills: Vec<(&str, f64)>) -> OccupationFacts {
        let mut occupation: OccupationFacts =
            serde_json::from_str(r#"{"code": "15-1252.00", "title": "Software Developers"}"#)
                .unwrap();
        occupation.skills = skills
            .into_iter()
            .map(|(name, importance)| RatedFact {
                name: name.to_string(),
                importance,
                level: None,
            })
            .collect();
        occupation
    }

    fn resume_with_skills(technical: Vec<&str>) -> ResumeFacts {
        ResumeFacts {
            skills: SkillProfile {
                technical: technical.into_iter().map(String::from).collect(),
                ..Default::default()
            },
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_exact_match_scores_full_coverage() {
        let judge = LexicalJudge::default();
        let occupation = occupation_with_skills(vec![("Python", 85.0)]);
        let resume = resume_with_skills(vec!["Python"]);

        let result = judge
            .judge(Dimension::Skills, &resume, &occupation)
            .await
            .unwrap();
        assert_eq!(result.score, 100.0);
        assert_eq!(result.matches, vec!["Python"]);
        assert!(result.gaps.is_empty());
    }

    #[tokio::test]
    async fn test_coverage_is_importance_weighted() {
        let judge = LexicalJudge::default();
        let occupation = occupation_with_skills(vec![("Python", 80.0), ("COBOL", 20.0)]);
        let resume = resume_with_skills(vec!["Python"]);

        let result = judge
            .judge(Dimension::Skills, &resume, &occupation)
            .await
            .unwrap();
        assert_eq!(result.score, 80.0);
        assert_eq!(result.gaps, vec!["COBOL"]);
    }

    #[tokio::test]
    async fn test_fuzzy_match_tolerates_close_spelling() {
        let judge = LexicalJudge::default();
        let occupation = occupation_with_skills(vec![("Kubernetes", 70.0)]);
        let resume = resume_with_skills(vec!["Kuberneters"]);

        let result = judge
            .judge(Dimension::Skills, &resume, &occupation)
            .await
            .unwrap();
        assert_eq!(result.score, 100.0);
    }

    #[tokio::test]
    async fn test_gaps_sorted_by_importance() {
        let judge = LexicalJudge::default();
        let occupation =
            occupation_with_skills(vec![("COBOL", 20.0), ("Fortran", 90.0), ("Ada", 55.0)]);
        let resume = resume_with_skills(vec!["Python"]);

        let result = judge
            .judge(Dimension::Skills, &resume, &occupation)
            .await
            .unwrap();
        assert_eq!(result.gaps, vec!["Fortran", "Ada", "COBOL"]);
    }

    #[tokio::test]
    async fn test_education_meets_requirement() {
        let judge = LexicalJudge::default();
        let mut occupation = occupation_with_skills(vec![]);
        occupation.job_zone = Some(JobZone {
            zone: 4,
            education_needed: "Bachelor's degree".into(),
        });
        let resume = ResumeFacts {
            education: vec![EducationEntry {
                degree: "Bachelor of Science".into(),
                field: "Computer Science".into(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let result = judge
            .judge(Dimension::Education, &resume, &occupation)
            .await
            .unwrap();
        assert_eq!(result.meets_requirements, Some(true));
        assert!(result.score >= 85.0);
        assert!(result.gaps.is_empty());
    }

    #[tokio::test]
    async fn test_education_gap_names_required_level() {
        let judge = LexicalJudge::default();
        let mut occupation = occupation_with_skills(vec![]);
        occupation.job_zone = Some(JobZone {
            zone: 5,
            education_needed: "Master's degree".into(),
        });
        let resume = ResumeFacts {
            education: vec![EducationEntry {
                degree: "Associate of Arts".into(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let result = judge
            .judge(Dimension::Education, &resume, &occupation)
            .await
            .unwrap();
        assert_eq!(result.meets_requirements, Some(false));
        assert!(result.score < 75.0);
        assert_eq!(result.gaps, vec!["Master's degree"]);
        assert_eq!(result.education_level.as_deref(), Some("Master's degree"));
    }

    #[test]
    fn test_degree_rank_ordering() {
        assert!(degree_rank("PhD in Physics") > degree_rank("Master of Science"));
        assert!(degree_rank("Master of Science") > degree_rank("Bachelor of Arts"));
        assert!(degree_rank("Bachelor of Arts") > degree_rank("Associate's degree"));
        assert_eq!(degree_rank("Bootcamp"), 0);
    }
}
