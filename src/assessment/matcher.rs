use serde::Serialize;

use super::normalize::NormalizedSymptoms;
use super::reference::ReferenceData;
use super::types::{CandidateEvidence, Contribution};

/// Raw score of one condition, with the contributions that produced it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionScore {
    pub name: String,
    pub raw_score: f64,
    pub prevalence: f64,
    /// In symptom-code order.
    pub contributions: Vec<Contribution>,
}

impl ConditionScore {
    pub fn to_evidence(&self) -> CandidateEvidence {
        CandidateEvidence {
            name: self.name.clone(),
            raw_score: self.raw_score,
            prevalence: self.prevalence,
            contributions: self.contributions.clone(),
        }
    }
}

/// Score every condition that shares at least one symptom with the input.
///
/// raw score = sum of matched contribution weights + prevalence. Conditions
/// come out in catalog (name) order and symptoms are visited in code order,
/// so the float sums are identical for any permutation of the input.
pub fn match_conditions(
    symptoms: &NormalizedSymptoms,
    reference: &ReferenceData,
) -> Vec<ConditionScore> {
    if symptoms.is_empty() {
        return Vec::new();
    }

    reference
        .conditions()
        .iter()
        .filter_map(|condition| {
            let contributions: Vec<Contribution> = symptoms
                .iter()
                .filter_map(|code| {
                    condition.weights.get(code).map(|&weight| Contribution {
                        symptom: code.to_string(),
                        weight,
                    })
                })
                .collect();

            if contributions.is_empty() {
                return None;
            }

            let matched: f64 = contributions.iter().map(|c| c.weight).sum();
            Some(ConditionScore {
                name: condition.name.clone(),
                raw_score: matched + condition.prevalence,
                prevalence: condition.prevalence,
                contributions,
            })
        })
        .collect()
}
