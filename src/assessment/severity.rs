use crate::config::EngineConfig;

use super::normalize::NormalizedSymptoms;
use super::reference::ReferenceData;

/// Share of the score taken by the mean symptom severity.
pub const SYMPTOM_SHARE: f64 = 0.6;
/// Share of the score taken by the rescaled top condition score.
pub const CONDITION_SHARE: f64 = 0.4;
/// Minimum severity whenever a red-flag symptom is present. No combination
/// of weights may mask an urgent symptom.
pub const RED_FLAG_FLOOR: f64 = 0.85;

/// Red-flag codes present in the set, in code order.
pub fn red_flags(symptoms: &NormalizedSymptoms, reference: &ReferenceData) -> Vec<String> {
    symptoms
        .iter()
        .filter(|code| reference.is_red_flag(code))
        .map(str::to_string)
        .collect()
}

pub fn has_red_flag(symptoms: &NormalizedSymptoms, reference: &ReferenceData) -> bool {
    symptoms.iter().any(|code| reference.is_red_flag(code))
}

/// Mean severity weight of the matched symptoms that define one; 0 if none do.
fn mean_severity(symptoms: &NormalizedSymptoms, reference: &ReferenceData) -> f64 {
    let weights: Vec<f64> = symptoms
        .iter()
        .filter_map(|code| reference.symptom(code).and_then(|s| s.severity))
        .collect();
    if weights.is_empty() {
        return 0.0;
    }
    weights.iter().sum::<f64>() / weights.len() as f64
}

/// Aggregate severity in [0.0, 1.0].
///
/// `clamp(mean_severity * 0.6 + min(top_raw / score_normalization, 1) * 0.4)`,
/// raised to [`RED_FLAG_FLOOR`] when any red flag is present.
pub fn severity_score(
    symptoms: &NormalizedSymptoms,
    reference: &ReferenceData,
    top_raw_score: Option<f64>,
    config: &EngineConfig,
) -> f64 {
    if symptoms.is_empty() {
        return 0.0;
    }

    let rescaled = top_raw_score
        .map(|raw| raw / config.score_normalization)
        .filter(|v| v.is_finite())
        .map_or(0.0, |v| v.clamp(0.0, 1.0));

    let weighted =
        mean_severity(symptoms, reference) * SYMPTOM_SHARE + rescaled * CONDITION_SHARE;
    let mut score = if weighted.is_finite() {
        weighted.clamp(0.0, 1.0)
    } else {
        0.0
    };

    if has_red_flag(symptoms, reference) {
        score = score.max(RED_FLAG_FLOOR);
    }
    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::normalize::normalize;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    #[test]
    fn empty_set_is_zero() {
        let reference = ReferenceData::load_test();
        let empty: [&str; 0] = [];
        let symptoms = normalize(&empty, &reference);
        assert_eq!(
            severity_score(&symptoms, &reference, Some(4.0), &EngineConfig::default()),
            0.0
        );
    }

    #[test]
    fn weighted_combination() {
        let reference = ReferenceData::load_test();
        let symptoms = normalize(&["cough", "fever"], &reference);
        // mean(0.2, 0.6) = 0.4; top 3.5 / 5 = 0.7
        let score = severity_score(&symptoms, &reference, Some(3.5), &EngineConfig::default());
        assert!(approx(score, 0.4 * 0.6 + 0.7 * 0.4));
    }

    #[test]
    fn symptoms_without_weight_skip_the_mean() {
        let reference = ReferenceData::load_test();
        let symptoms = normalize(&["rash", "fever"], &reference);
        let score = severity_score(&symptoms, &reference, None, &EngineConfig::default());
        assert!(approx(score, 0.6 * 0.6));

        let only_rash = normalize(&["rash"], &reference);
        let score = severity_score(&only_rash, &reference, Some(2.5), &EngineConfig::default());
        assert!(approx(score, 0.5 * 0.4));
    }

    #[test]
    fn condition_term_saturates() {
        let reference = ReferenceData::load_test();
        let symptoms = normalize(&["fever"], &reference);
        let score = severity_score(&symptoms, &reference, Some(50.0), &EngineConfig::default());
        assert!(approx(score, 0.6 * 0.6 + 0.4));
    }

    #[test]
    fn red_flag_forces_floor() {
        let reference = ReferenceData::load_test();
        let symptoms = normalize(&["chest pain"], &reference);
        let score = severity_score(&symptoms, &reference, None, &EngineConfig::default());
        assert_eq!(score, RED_FLAG_FLOOR);
        assert!(has_red_flag(&symptoms, &reference));
        assert_eq!(red_flags(&symptoms, &reference), vec!["chest_pain"]);
    }

    #[test]
    fn red_flag_does_not_lower_a_higher_score() {
        let reference = ReferenceData::load_test();
        let symptoms = normalize(&["chest pain"], &reference);
        let score = severity_score(&symptoms, &reference, Some(5.0), &EngineConfig::default());
        assert!(approx(score, 0.9 * 0.6 + 0.4));
        assert!(score > RED_FLAG_FLOOR);
    }

    #[test]
    fn non_finite_top_score_ignored() {
        let reference = ReferenceData::load_test();
        let symptoms = normalize(&["fever"], &reference);
        let score =
            severity_score(&symptoms, &reference, Some(f64::NAN), &EngineConfig::default());
        assert!(approx(score, 0.6 * 0.6));
    }

    #[test]
    fn always_within_unit_interval() {
        let reference = ReferenceData::load_test();
        let inputs: [&[&str]; 3] = [
            &["cough"],
            &["fever", "rash"],
            &["chest pain", "fever", "cough"],
        ];
        for input in inputs {
            let symptoms = normalize(input, &reference);
            for top in [None, Some(0.0), Some(1.0), Some(1e9)] {
                let score = severity_score(&symptoms, &reference, top, &EngineConfig::default());
                assert!((0.0..=1.0).contains(&score));
            }
        }
    }
}
