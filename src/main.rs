use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use thiserror::Error;

use symptom_triage::assessment::{assess_detailed, ReferenceData, ReferenceError};
use symptom_triage::config::{self, ConfigError, EngineConfig};

#[derive(Parser, Debug)]
#[command(name = "symptom-triage", version)]
#[command(about = "Prints the triage assessment for the given symptoms as JSON")]
struct Cli {
    /// Load symptoms.json and conditions.json from DIR
    /// (default: $SYMPTOM_TRIAGE_CATALOG, ~/SymptomTriage/catalog, then the bundled catalog)
    #[arg(long, value_name = "DIR")]
    catalog: Option<PathBuf>,
    /// Engine settings as JSON (top_n, normalization_depth, ...)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Include recognized/unmatched symptoms and evidence
    #[arg(long)]
    detailed: bool,
    /// Free-text symptoms, e.g. "chest pain"
    #[arg(value_name = "SYMPTOM")]
    symptoms: Vec<String>,
}

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Output serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Explicit directory, then the configured one if it exists, then bundled.
fn load_reference(
    explicit: Option<&Path>,
    configured: Option<PathBuf>,
) -> Result<ReferenceData, ReferenceError> {
    if let Some(dir) = explicit {
        return ReferenceData::load(dir);
    }
    match configured {
        Some(dir) if dir.is_dir() => ReferenceData::load(&dir),
        _ => {
            tracing::debug!("Using bundled reference catalog");
            ReferenceData::bundled()
        }
    }
}

fn run(cli: Cli) -> Result<String, CliError> {
    let engine_config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };
    let reference = load_reference(cli.catalog.as_deref(), config::catalog_dir())?;

    let report = assess_detailed(&cli.symptoms, &reference, &engine_config);
    if !report.unmatched.is_empty() {
        tracing::info!(
            unmatched = report.unmatched.len(),
            "Some symptoms were not recognized"
        );
    }

    let json = if cli.detailed {
        serde_json::to_string_pretty(&report)?
    } else {
        serde_json::to_string_pretty(&report.result)?
    };
    Ok(json)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    symptom_triage::init_tracing();
    tracing::debug!("{} v{}", config::APP_NAME, config::APP_VERSION);

    match run(cli) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Assessment aborted");
            ExitCode::FAILURE
        }
    }
}
