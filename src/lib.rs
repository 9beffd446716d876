pub mod assessment; // Normalizer -> Matcher -> Ranker -> Severity -> Triage -> Result
pub mod config;

pub use assessment::{
    assess, assess_detailed, format_probability, triage_color, triage_label, AnalysisResult,
    AssessmentReport, DiseaseCandidate, ReferenceData, TriageLevel,
};
pub use config::EngineConfig;

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. Logs go to stderr so that stdout
/// can carry machine-readable results.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .with_writer(std::io::stderr)
        .init();
}
