use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;

use super::normalize::canonical_key;
use super::types::{Condition, ReferenceError, Symptom};

pub const SYMPTOMS_FILE: &str = "symptoms.json";
pub const CONDITIONS_FILE: &str = "conditions.json";

/// Placeholder catalog shipped with the crate. Clinical accuracy of these
/// weights is not asserted; deployments point the loader at their own files.
const BUNDLED_SYMPTOMS: &str = include_str!("../../resources/symptoms.json");
const BUNDLED_CONDITIONS: &str = include_str!("../../resources/conditions.json");

/// Validated, read-only symptom and condition tables.
///
/// Built once at startup and shared by reference; nothing mutates it
/// afterwards, so concurrent assessments need no locking.
#[derive(Debug, Clone)]
pub struct ReferenceData {
    symptoms: BTreeMap<String, Symptom>,
    /// Sorted by name.
    conditions: Vec<Condition>,
    /// Canonical key (code, label or alias) -> symptom code.
    lookup: HashMap<String, String>,
}

impl ReferenceData {
    /// Load and validate `symptoms.json` + `conditions.json` from a directory.
    pub fn load(catalog_dir: &Path) -> Result<Self, ReferenceError> {
        let symptoms_path = catalog_dir.join(SYMPTOMS_FILE);
        let conditions_path = catalog_dir.join(CONDITIONS_FILE);

        let symptoms_json = std::fs::read_to_string(&symptoms_path)
            .map_err(|e| ReferenceError::Load(symptoms_path.display().to_string(), e))?;
        let conditions_json = std::fs::read_to_string(&conditions_path)
            .map_err(|e| ReferenceError::Load(conditions_path.display().to_string(), e))?;

        let reference = Self::from_json(&symptoms_json, &conditions_json)?;
        tracing::info!(
            dir = %catalog_dir.display(),
            symptoms = reference.symptom_count(),
            conditions = reference.condition_count(),
            "Reference catalog loaded"
        );
        Ok(reference)
    }

    /// The catalog embedded at build time.
    pub fn bundled() -> Result<Self, ReferenceError> {
        Self::from_json(BUNDLED_SYMPTOMS, BUNDLED_CONDITIONS)
    }

    pub fn from_json(symptoms_json: &str, conditions_json: &str) -> Result<Self, ReferenceError> {
        let symptoms: Vec<Symptom> = serde_json::from_str(symptoms_json)
            .map_err(|e| ReferenceError::Parse(SYMPTOMS_FILE.into(), e))?;
        let conditions: Vec<Condition> = serde_json::from_str(conditions_json)
            .map_err(|e| ReferenceError::Parse(CONDITIONS_FILE.into(), e))?;
        Self::from_parts(symptoms, conditions)
    }

    /// Validate raw tables. Any inconsistency rejects the whole catalog.
    pub fn from_parts(
        symptoms: Vec<Symptom>,
        mut conditions: Vec<Condition>,
    ) -> Result<Self, ReferenceError> {
        if symptoms.is_empty() {
            return Err(ReferenceError::EmptyCatalog("symptoms"));
        }
        if conditions.is_empty() {
            return Err(ReferenceError::EmptyCatalog("conditions"));
        }

        let mut by_code = BTreeMap::new();
        let mut lookup: HashMap<String, String> = HashMap::new();

        for symptom in symptoms {
            // Normalized output is a set of codes, so every code must resolve.
            if canonical_key(&symptom.code).is_empty() {
                return Err(ReferenceError::BlankSymptomCode(symptom.code));
            }
            if let Some(value) = symptom.severity {
                if !(0.0..=1.0).contains(&value) {
                    return Err(ReferenceError::SeverityOutOfRange {
                        code: symptom.code,
                        value,
                    });
                }
            }

            let keys = std::iter::once(&symptom.code)
                .chain(std::iter::once(&symptom.label))
                .chain(symptom.aliases.iter())
                .map(|k| canonical_key(k))
                .filter(|k| !k.is_empty());
            for key in keys {
                match lookup.get(&key) {
                    Some(existing) if *existing != symptom.code => {
                        return Err(ReferenceError::AliasConflict {
                            key,
                            first: existing.clone(),
                            second: symptom.code.clone(),
                        });
                    }
                    Some(_) => {}
                    None => {
                        lookup.insert(key, symptom.code.clone());
                    }
                }
            }

            if by_code.contains_key(&symptom.code) {
                return Err(ReferenceError::DuplicateSymptom(symptom.code));
            }
            by_code.insert(symptom.code.clone(), symptom);
        }

        let mut names = HashSet::new();
        for condition in &conditions {
            if condition.name.trim().is_empty() {
                return Err(ReferenceError::BlankConditionName);
            }
            if !names.insert(condition.name.as_str()) {
                return Err(ReferenceError::DuplicateCondition(condition.name.clone()));
            }
            if !condition.prevalence.is_finite() || condition.prevalence < 0.0 {
                return Err(ReferenceError::InvalidPrevalence {
                    condition: condition.name.clone(),
                    value: condition.prevalence,
                });
            }
            if condition.weights.is_empty() {
                return Err(ReferenceError::EmptyCondition(condition.name.clone()));
            }
            for (code, &weight) in &condition.weights {
                if !by_code.contains_key(code) {
                    return Err(ReferenceError::UnknownSymptom {
                        condition: condition.name.clone(),
                        symptom: code.clone(),
                    });
                }
                if !weight.is_finite() || weight <= 0.0 {
                    return Err(ReferenceError::InvalidWeight {
                        condition: condition.name.clone(),
                        symptom: code.clone(),
                        value: weight,
                    });
                }
            }
        }
        conditions.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(Self {
            symptoms: by_code,
            conditions,
            lookup,
        })
    }

    /// Map a canonical key (see [`canonical_key`]) to its symptom code.
    pub fn resolve(&self, key: &str) -> Option<&str> {
        self.lookup.get(key).map(String::as_str)
    }

    pub fn symptom(&self, code: &str) -> Option<&Symptom> {
        self.symptoms.get(code)
    }

    pub fn is_red_flag(&self, code: &str) -> bool {
        self.symptom(code).is_some_and(|s| s.red_flag)
    }

    pub fn symptoms(&self) -> impl Iterator<Item = &Symptom> {
        self.symptoms.values()
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn symptom_count(&self) -> usize {
        self.symptoms.len()
    }

    pub fn condition_count(&self) -> usize {
        self.conditions.len()
    }

    /// Small catalog with round numbers for exact-value tests (no file I/O).
    #[cfg(test)]
    pub(crate) fn load_test() -> Self {
        fn symptom(code: &str, severity: Option<f64>, red_flag: bool) -> Symptom {
            Symptom {
                code: code.into(),
                label: code.replace('_', " "),
                severity,
                red_flag,
                aliases: vec![],
            }
        }
        fn condition(name: &str, prevalence: f64, weights: &[(&str, f64)]) -> Condition {
            Condition {
                name: name.into(),
                prevalence,
                weights: weights.iter().map(|(c, w)| (c.to_string(), *w)).collect(),
            }
        }

        Self::from_parts(
            vec![
                symptom("cough", Some(0.2), false),
                symptom("fever", Some(0.6), false),
                symptom("rash", None, false),
                symptom("chest_pain", Some(0.9), true),
            ],
            vec![
                condition("Bronchitis", 0.5, &[("cough", 2.0), ("fever", 0.5)]),
                condition("Flu", 0.5, &[("cough", 1.0), ("fever", 2.0)]),
                condition("Measles", 0.2, &[("rash", 2.0), ("fever", 1.0)]),
                condition("Angina", 0.1, &[("chest_pain", 3.0)]),
                condition("Allergy", 0.0, &[("rash", 0.3)]),
            ],
        )
        .expect("test catalog is valid")
    }
}
