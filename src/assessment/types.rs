use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Label used when no candidate is confident enough to be named.
pub const DEFAULT_MAIN_DISEASE: &str = "General Concern";

// ---------------------------------------------------------------------------
// Reference data: Symptom & Condition
// ---------------------------------------------------------------------------

/// A recognized symptom (loaded from symptoms.json).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Symptom {
    /// Canonical code, e.g. `chest_pain`.
    pub code: String,
    pub label: String,
    /// Severity weight in [0.0, 1.0]. Symptoms without one do not take part
    /// in the severity mean.
    #[serde(default)]
    pub severity: Option<f64>,
    /// Urgent-leaning symptom: forces the severity floor and urgent triage.
    #[serde(default)]
    pub red_flag: bool,
    /// Alternative free-text spellings accepted by the normalizer.
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// A condition in the differential (loaded from conditions.json).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Condition {
    pub name: String,
    /// Baseline prevalence weight added to every non-zero match.
    #[serde(default)]
    pub prevalence: f64,
    /// Symptom code -> contribution weight.
    pub weights: BTreeMap<String, f64>,
}

// ---------------------------------------------------------------------------
// TriageLevel
// ---------------------------------------------------------------------------

/// Three-level urgency classification. Ordered from most to least urgent.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum TriageLevel {
    /// Seek care now.
    Urgent = 1,
    /// Contact a clinician soon.
    Moderate = 2,
    /// Monitor.
    #[default]
    Routine = 3,
}

impl TriageLevel {
    /// Resolve any integer (or its absence) to a level. Anything other than
    /// 1 or 2 is routine.
    pub fn from_code(code: Option<i32>) -> Self {
        match code {
            Some(1) => Self::Urgent,
            Some(2) => Self::Moderate,
            _ => Self::Routine,
        }
    }

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Urgent => "urgent",
            Self::Moderate => "moderate",
            Self::Routine => "routine",
        }
    }
}

// ---------------------------------------------------------------------------
// AnalysisResult
// ---------------------------------------------------------------------------

/// One entry of the differential.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DiseaseCandidate {
    pub name: String,
    /// In [0.0, 1.0]. Candidates of one result need not sum to 1.
    pub probability: f64,
}

/// The engine's output value. Field names on the wire are a stable contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalysisResult {
    pub main_disease: String,
    /// Most probable first; ties by name ascending.
    pub possible_diseases: Vec<DiseaseCandidate>,
    pub severity_score: f64,
    pub triage: u8,
}

impl Default for AnalysisResult {
    fn default() -> Self {
        Self {
            main_disease: DEFAULT_MAIN_DISEASE.to_string(),
            possible_diseases: Vec::new(),
            severity_score: 0.0,
            triage: TriageLevel::Routine.code(),
        }
    }
}

impl AnalysisResult {
    pub fn triage_level(&self) -> TriageLevel {
        TriageLevel::from_code(Some(i32::from(self.triage)))
    }
}

// ---------------------------------------------------------------------------
// Evidence & AssessmentReport
// ---------------------------------------------------------------------------

/// One symptom's contribution to a condition's raw score.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Contribution {
    pub symptom: String,
    pub weight: f64,
}

/// Why a candidate was surfaced.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CandidateEvidence {
    pub name: String,
    pub raw_score: f64,
    pub prevalence: f64,
    pub contributions: Vec<Contribution>,
}

/// The result plus the diagnostics a caller may want to log or audit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AssessmentReport {
    pub result: AnalysisResult,
    /// Recognized symptom codes, sorted.
    pub recognized: Vec<String>,
    /// Input text that matched no known symptom, in first-seen order.
    pub unmatched: Vec<String>,
    /// Red-flag codes present in the input, sorted.
    pub red_flags: Vec<String>,
    /// Evidence for each entry of `result.possible_diseases`, same order.
    pub evidence: Vec<CandidateEvidence>,
}

// ---------------------------------------------------------------------------
// ReferenceError
// ---------------------------------------------------------------------------

/// Reference catalog failures. Every variant is fatal at startup.
#[derive(Error, Debug)]
pub enum ReferenceError {
    #[error("Reference data load failed ({0}): {1}")]
    Load(String, #[source] std::io::Error),

    #[error("Reference data parse failed ({0}): {1}")]
    Parse(String, #[source] serde_json::Error),

    #[error("Reference catalog has no {0}")]
    EmptyCatalog(&'static str),

    #[error("Symptom code '{0}' is blank after normalization")]
    BlankSymptomCode(String),

    #[error("Duplicate symptom code: {0}")]
    DuplicateSymptom(String),

    #[error("Symptom key '{key}' maps to both '{first}' and '{second}'")]
    AliasConflict {
        key: String,
        first: String,
        second: String,
    },

    #[error("Symptom '{code}' has severity {value} outside [0, 1]")]
    SeverityOutOfRange { code: String, value: f64 },

    #[error("Condition name is blank")]
    BlankConditionName,

    #[error("Duplicate condition name: {0}")]
    DuplicateCondition(String),

    #[error("Condition '{0}' lists no symptoms")]
    EmptyCondition(String),

    #[error("Condition '{condition}' references unknown symptom '{symptom}'")]
    UnknownSymptom { condition: String, symptom: String },

    #[error("Condition '{condition}' has invalid weight {value} for '{symptom}'")]
    InvalidWeight {
        condition: String,
        symptom: String,
        value: f64,
    },

    #[error("Condition '{condition}' has invalid prevalence {value}")]
    InvalidPrevalence { condition: String, value: f64 },
}
