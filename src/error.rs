//! Error handling for the occupation fit analyzer

use thiserror::Error;

#[derive(Error, Debug)]
pub enum OccufitError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Resume '{0}' has no structured data yet")]
    ResumeNotReady(String),

    #[error("Occupation '{0}' not found")]
    OccupationNotFound(String),

    #[error("Dimension judge failed for {dimension}: {message}")]
    DimensionJudge { dimension: String, message: String },

    #[error("Persistence error: {0}")]
    Persistence(String),

    #[error("Analysis failed: {0}")]
    AnalysisFailed(String),
}

pub type Result<T> = std::result::Result<T, OccufitError>;

/// Convert anyhow errors to our custom error type
impl From<anyhow::Error> for OccufitError {
    fn from(err: anyhow::Error) -> Self {
        OccufitError::AnalysisFailed(err.to_string())
    }
}
