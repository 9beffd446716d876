//! Symptom-to-triage assessment.
//!
//! Pipeline, leaves first:
//! 1. `normalize`: free text to recognized symptom codes
//! 2. `matcher`: weighted condition scores with evidence
//! 3. `ranker`: significance cutoff, ordering, top-K normalization
//! 4. `severity`: 0..1 severity with the red-flag floor
//! 5. `classify`: the severity/red-flag to triage table
//! 6. `engine`: assembles the `AnalysisResult`; `presentation` renders it
//!
//! The catalog (`reference`) is loaded once, validated, and passed by
//! reference into every call. Nothing here holds mutable state.

pub mod classify;
pub mod engine;
pub mod matcher;
pub mod normalize;
pub mod presentation;
pub mod ranker;
pub mod reference;
pub mod severity;
pub mod types;

pub use engine::{assess, assess_detailed, AssessmentEngine, DefaultAssessmentEngine};
pub use presentation::{
    care_advice, format_probability, severity_or_default, triage_color, triage_label, TriageColor,
};
pub use reference::ReferenceData;
pub use types::{
    AnalysisResult, AssessmentReport, CandidateEvidence, Condition, Contribution,
    DiseaseCandidate, ReferenceError, Symptom, TriageLevel, DEFAULT_MAIN_DISEASE,
};
