//! JSON-file implementations of the supplier and sink interfaces

use crate::analysis::{AnalysisSink, OccupationFactsSupplier, ResumeFactsSupplier};
use crate::error::{OccufitError, Result};
use crate::model::{Analysis, OccupationFacts, ResumeFacts};
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Maps resume ids and occupation codes to JSON documents on disk.
#[derive(Debug, Default)]
pub struct FileCatalog {
    resumes: HashMap<String, PathBuf>,
    occupations: HashMap<String, PathBuf>,
}

impl FileCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resume(mut self, resume_id: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        self.resumes.insert(resume_id.into(), path.into());
        self
    }

    pub fn with_occupation(
        mut self,
        occupation_code: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        self.occupations.insert(occupation_code.into(), path.into());
        self
    }

    async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
        let content = tokio::fs::read_to_string(path).await?;
        serde_json::from_str(&content).map_err(|e| {
            OccufitError::InvalidInput(format!("{}: {}", path.display(), e))
        })
    }
}

#[async_trait]
impl ResumeFactsSupplier for FileCatalog {
    async fn get_resume_facts(&self, resume_id: &str) -> Result<Option<ResumeFacts>> {
        match self.resumes.get(resume_id) {
            Some(path) => Ok(Some(Self::read_json(path).await?)),
            None => Ok(None),
        }
    }
}

#[async_trait]
impl OccupationFactsSupplier for FileCatalog {
    async fn get_occupation_facts(&self, occupation_code: &str) -> Result<Option<OccupationFacts>> {
        match self.occupations.get(occupation_code) {
            Some(path) => Ok(Some(Self::read_json(path).await?)),
            None => Ok(None),
        }
    }
}

/// Append-only analysis store: one pretty-printed JSON file per run, named
/// `{resumeId}_{occupationCode}_{timestamp}.json`.
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    dir: PathBuf,
}

impl DirectoryStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_alphanumeric() || c == '-' || c == '.' { c } else { '-' })
        .collect()
}

#[async_trait]
impl AnalysisSink for DirectoryStore {
    async fn save_analysis(&self, analysis: &Analysis) -> Result<String> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| OccufitError::Persistence(format!("{}: {}", self.dir.display(), e)))?;

        let analysis_id = format!(
            "{}_{}_{}",
            sanitize_component(&analysis.resume_id),
            sanitize_component(&analysis.occupation_code),
            analysis.analysis_date.format("%Y%m%dT%H%M%S")
        );
        let path = self.dir.join(format!("{}.json", analysis_id));
        let content = serde_json::to_string_pretty(analysis)?;
        tokio::fs::write(&path, content)
            .await
            .map_err(|e| OccufitError::Persistence(format!("{}: {}", path.display(), e)))?;

        log::debug!("saved analysis to {}", path.display());
        Ok(analysis_id)
    }
}
