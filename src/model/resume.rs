//! Structured resume facts produced by the external resume parser

use serde::{Deserialize, Serialize};

/// Parsed resume content, immutable input to the analysis pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeFacts {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub experience: Vec<ExperienceEntry>,
    #[serde(default)]
    pub skills: SkillProfile,
    #[serde(default)]
    pub education: Vec<EducationEntry>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExperienceEntry {
    #[serde(default)]
    pub company: String,
    #[serde(default)]
    pub role: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
    #[serde(default)]
    pub responsibilities: Vec<String>,
    #[serde(default)]
    pub achievements: Vec<String>,
}

/// Categorized skill lists extracted from the resume.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillProfile {
    #[serde(default)]
    pub core: Vec<String>,
    #[serde(default)]
    pub technical: Vec<String>,
    #[serde(default)]
    pub soft: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub certifications: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub programming_languages: Vec<String>,
}

impl SkillProfile {
    /// Every skill string across all categories.
    pub fn all(&self) -> Vec<&str> {
        self.core
            .iter()
            .chain(&self.technical)
            .chain(&self.soft)
            .chain(&self.tools)
            .chain(&self.certifications)
            .chain(&self.languages)
            .chain(&self.programming_languages)
            .map(String::as_str)
            .collect()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EducationEntry {
    #[serde(default)]
    pub degree: String,
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub institution: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skill_profile_all_flattens_categories() {
        let profile = SkillProfile {
            core: vec!["Problem solving".into()],
            technical: vec!["Kubernetes".into()],
            programming_languages: vec!["Rust".into()],
            ..Default::default()
        };
        let all = profile.all();
        assert_eq!(all.len(), 3);
        assert!(all.contains(&"Rust"));
    }

    #[test]
    fn test_resume_facts_deserializes_with_missing_fields() {
        let facts: ResumeFacts = serde_json::from_str("{}").unwrap();
        assert!(facts.experience.is_empty());
        assert!(facts.skills.all().is_empty());
    }
}
