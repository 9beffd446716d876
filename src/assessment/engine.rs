use crate::config::{ConfigError, EngineConfig};

use super::classify::classify;
use super::matcher::match_conditions;
use super::normalize::normalize;
use super::ranker::rank;
use super::reference::ReferenceData;
use super::severity::{red_flags, severity_score};
use super::types::{AnalysisResult, AssessmentReport, DEFAULT_MAIN_DISEASE};

/// Run the full pipeline and keep the diagnostics.
///
/// Never fails: unknown text is reported in `unmatched`, and empty input
/// yields the default (routine) result. `config` must already have passed
/// [`EngineConfig::validate`]; [`DefaultAssessmentEngine::new`] enforces this.
pub fn assess_detailed<S: AsRef<str>>(
    symptoms: &[S],
    reference: &ReferenceData,
    config: &EngineConfig,
) -> AssessmentReport {
    let normalized = normalize(symptoms, reference);
    let ranked = rank(match_conditions(&normalized, reference), config);

    let top_raw_score = ranked.first().map(|c| c.score.raw_score);
    let severity = severity_score(&normalized, reference, top_raw_score, config);
    let flags = red_flags(&normalized, reference);
    let triage = classify(severity, !flags.is_empty());

    let main_disease = ranked
        .first()
        .filter(|c| c.probability >= config.min_confidence)
        .map_or_else(|| DEFAULT_MAIN_DISEASE.to_string(), |c| c.score.name.clone());

    if !flags.is_empty() {
        tracing::warn!(red_flags = ?flags, "Red-flag symptom present, triage forced urgent");
    }
    tracing::info!(
        recognized = normalized.len(),
        unmatched = normalized.unmatched.len(),
        candidates = ranked.len(),
        severity,
        triage = triage.code(),
        "Assessment complete"
    );

    AssessmentReport {
        result: AnalysisResult {
            main_disease,
            possible_diseases: ranked.iter().map(|c| c.to_candidate()).collect(),
            severity_score: severity,
            triage: triage.code(),
        },
        recognized: normalized.codes.iter().cloned().collect(),
        unmatched: normalized.unmatched,
        red_flags: flags,
        evidence: ranked.iter().map(|c| c.score.to_evidence()).collect(),
    }
}

/// `assess(symptoms) -> AnalysisResult`: a pure function of the symptom set
/// and the read-only catalog.
pub fn assess<S: AsRef<str>>(
    symptoms: &[S],
    reference: &ReferenceData,
    config: &EngineConfig,
) -> AnalysisResult {
    assess_detailed(symptoms, reference, config).result
}

/// Assessment entry point for callers that hold an engine value.
pub trait AssessmentEngine {
    fn assess<S: AsRef<str>>(&self, symptoms: &[S]) -> AnalysisResult;

    fn assess_detailed<S: AsRef<str>>(&self, symptoms: &[S]) -> AssessmentReport;
}

/// Binds a borrowed catalog to a validated config. Holds no mutable state, so
/// one value can serve any number of threads.
#[derive(Debug, Clone)]
pub struct DefaultAssessmentEngine<'a> {
    reference: &'a ReferenceData,
    config: EngineConfig,
}

impl<'a> DefaultAssessmentEngine<'a> {
    pub fn new(reference: &'a ReferenceData, config: EngineConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self { reference, config })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}

impl AssessmentEngine for DefaultAssessmentEngine<'_> {
    fn assess<S: AsRef<str>>(&self, symptoms: &[S]) -> AnalysisResult {
        assess(symptoms, self.reference, &self.config)
    }

    fn assess_detailed<S: AsRef<str>>(&self, symptoms: &[S]) -> AssessmentReport {
        assess_detailed(symptoms, self.reference, &self.config)
    }
}
