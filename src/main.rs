//! OccuFit: resume-to-occupation fit analyzer CLI

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use occufit::analysis::{
    AnalysisCache, AnalysisPipeline, DimensionOrchestrator, SystemClock,
};
use occufit::cli::{Cli, Commands, ConfigAction};
use occufit::config::Config;
use occufit::error::{OccufitError, Result};
use occufit::judge::LexicalJudge;
use occufit::model::Analysis;
use occufit::output::formatter_for;
use occufit::store::{DirectoryStore, FileCatalog};
use std::path::{Path, PathBuf};
use std::process;
use std::sync::Arc;
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

fn load_config(cli: &Cli) -> Result<Config> {
    match &cli.config {
        Some(path) => Config::load_from(path.clone()),
        None => Config::load(),
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze {
            resume,
            occupation,
            format,
            detailed,
            save,
            no_pacing,
        } => {
            occufit::cli::validate_file_extension(&resume, &["json"])
                .map_err(|e| OccufitError::InvalidInput(format!("Resume file: {}", e)))?;
            occufit::cli::validate_file_extension(&occupation, &["json"])
                .map_err(|e| OccufitError::InvalidInput(format!("Occupation file: {}", e)))?;

            let output_format =
                occufit::cli::parse_output_format(&format).map_err(OccufitError::InvalidInput)?;

            run_analysis(AnalysisArgs {
                resume,
                occupation,
                output_format,
                detailed: detailed || config.output.detailed,
                save,
                no_pacing,
                config,
            })
            .await
        }

        Commands::Config { action } => run_config(action, config),
    }
}

struct AnalysisArgs {
    resume: PathBuf,
    occupation: PathBuf,
    output_format: occufit::config::OutputFormat,
    detailed: bool,
    save: Option<PathBuf>,
    no_pacing: bool,
    config: Config,
}

async fn run_analysis(args: AnalysisArgs) -> Result<()> {
    let resume_id = file_stem(&args.resume);
    let occupation_key = file_stem(&args.occupation);

    info!(
        "analyzing {} against {}",
        args.resume.display(),
        args.occupation.display()
    );

    let catalog = Arc::new(
        FileCatalog::new()
            .with_resume(resume_id.as_str(), &args.resume)
            .with_occupation(occupation_key.as_str(), &args.occupation),
    );
    let store = DirectoryStore::new(
        args.save
            .unwrap_or_else(|| args.config.analysis.analyses_dir.clone()),
    );

    let pacing = if args.no_pacing {
        Duration::ZERO
    } else {
        Duration::from_millis(args.config.analysis.pacing_ms)
    };
    let orchestrator =
        DimensionOrchestrator::new(Arc::new(LexicalJudge::new(args.config.judge.fuzzy_threshold)))
            .with_pacing(pacing);

    let pipeline = AnalysisPipeline::new(
        catalog.clone(),
        catalog,
        Arc::new(store),
        orchestrator,
        AnalysisCache::new(args.config.analysis.cache_ttl_secs, Arc::new(SystemClock)),
    );

    let bar = ProgressBar::new(6);
    bar.set_style(
        ProgressStyle::with_template("{bar:24} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let progress = bar.clone();
    let on_update = move |dimension: occufit::model::Dimension,
                          result: &occufit::model::DimensionResult| {
        progress.set_message(format!(
            "{}: {:.0}",
            dimension.display_name(),
            result.score
        ));
        progress.inc(1);
    };

    let outcome = match pipeline
        .analyze(&resume_id, &occupation_key, Some(&on_update))
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            // Callers always get an analysis-shaped report, never a bare error
            bar.finish_and_clear();
            let failed = Analysis::failed(
                &resume_id,
                &occupation_key,
                "(unknown)",
                e.to_string(),
                0,
                chrono::Utc::now(),
            );
            let formatter = formatter_for(args.output_format, args.detailed, false);
            println!("{}", formatter.format_analysis(&failed)?);
            return Err(e);
        }
    };
    bar.finish_and_clear();

    let use_colors = args.config.output.color_output;
    let formatter = formatter_for(args.output_format, args.detailed, use_colors);
    println!("{}", formatter.format_analysis(&outcome.analysis)?);

    if outcome.from_cache {
        info!("served from the recent-analysis cache");
    }
    if let Some(id) = &outcome.analysis_id {
        info!("analysis saved as {}", id);
    }
    if let Some(persistence_error) = &outcome.persistence_error {
        warn!(
            "{}",
            format!("analysis computed but not saved: {}", persistence_error).yellow()
        );
    }

    Ok(())
}

fn run_config(action: Option<ConfigAction>, config: Config) -> Result<()> {
    match action.unwrap_or(ConfigAction::Show) {
        ConfigAction::Show => {
            let content = toml::to_string_pretty(&config)
                .map_err(|e| OccufitError::Configuration(e.to_string()))?;
            println!("{}", content);
        }
        ConfigAction::Reset => {
            Config::default().save()?;
            println!("Configuration reset to defaults");
        }
        ConfigAction::Path => {
            println!("{}", Config::config_path().display());
        }
    }
    Ok(())
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("input")
        .to_string()
}
