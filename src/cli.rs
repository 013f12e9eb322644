//! CLI interface for the occupation fit analyzer

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "occufit")]
#[command(about = "Resume-to-occupation fit analyzer")]
#[command(
    long_about = "Compare a structured resume against an O*NET occupation profile across six dimensions, producing a weighted fit score, prioritized gaps, and time-boxed recommendations"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume against an occupation profile
    Analyze {
        /// Path to structured resume facts (JSON)
        #[arg(short, long)]
        resume: PathBuf,

        /// Path to occupation profile (JSON)
        #[arg(short = 'o', long)]
        occupation: PathBuf,

        /// Output format: console, json, markdown
        #[arg(short, long, default_value = "console")]
        format: String,

        /// Show per-dimension matches and gaps
        #[arg(short, long)]
        detailed: bool,

        /// Directory to save the analysis record in (overrides config)
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Skip the inter-dimension pacing delay
        #[arg(long)]
        no_pacing: bool,
    },

    /// Show or manage configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file path
    Path,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        "markdown" | "md" => Ok(crate::config::OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("console").unwrap(), OutputFormat::Console);
        assert_eq!(parse_output_format("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(parse_output_format("md").unwrap(), OutputFormat::Markdown);
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension(&PathBuf::from("resume.json"), &["json"]).is_ok());
        assert!(validate_file_extension(&PathBuf::from("resume.pdf"), &["json"]).is_err());
        assert!(validate_file_extension(&PathBuf::from("resume"), &["json"]).is_err());
    }
}
