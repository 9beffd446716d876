use std::cmp::Ordering;

use crate::config::EngineConfig;

use super::matcher::ConditionScore;
use super::types::DiseaseCandidate;

/// A surfaced condition: its raw score and evidence plus the normalized
/// probability.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCandidate {
    pub score: ConditionScore,
    pub probability: f64,
}

impl RankedCandidate {
    pub fn to_candidate(&self) -> DiseaseCandidate {
        DiseaseCandidate {
            name: self.score.name.clone(),
            probability: self.probability,
        }
    }
}

/// Higher raw score first; equal scores by name ascending.
fn by_score_then_name(a: &ConditionScore, b: &ConditionScore) -> Ordering {
    b.raw_score
        .total_cmp(&a.raw_score)
        .then_with(|| a.name.cmp(&b.name))
}

/// Build the differential.
///
/// 1. Drop scores under `min_significance`.
/// 2. Order by score, then name.
/// 3. Divide each score by the sum of the top `normalization_depth` scores,
///    so a long tail of weak matches cannot dilute the leaders.
/// 4. Keep the first `top_n`.
pub fn rank(mut scores: Vec<ConditionScore>, config: &EngineConfig) -> Vec<RankedCandidate> {
    scores.retain(|s| s.raw_score.is_finite() && s.raw_score >= config.min_significance);
    scores.sort_by(by_score_then_name);

    let denominator: f64 = scores
        .iter()
        .take(config.normalization_depth.max(config.top_n))
        .map(|s| s.raw_score)
        .sum();
    if !denominator.is_finite() || denominator <= 0.0 {
        return Vec::new();
    }

    scores.truncate(config.top_n);
    scores
        .into_iter()
        .map(|score| {
            let probability = (score.raw_score / denominator).clamp(0.0, 1.0);
            RankedCandidate { score, probability }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(name: &str, raw_score: f64) -> ConditionScore {
        ConditionScore {
            name: name.into(),
            raw_score,
            prevalence: 0.0,
            contributions: vec![],
        }
    }

    fn names(ranked: &[RankedCandidate]) -> Vec<&str> {
        ranked.iter().map(|r| r.score.name.as_str()).collect()
    }

    #[test]
    fn empty_mapping_ranks_nothing() {
        assert!(rank(vec![], &EngineConfig::default()).is_empty());
    }

    #[test]
    fn orders_by_score_descending() {
        let ranked = rank(
            vec![score("A", 1.0), score("B", 3.0), score("C", 2.0)],
            &EngineConfig::default(),
        );
        assert_eq!(names(&ranked), vec!["B", "C", "A"]);
    }

    #[test]
    fn ties_broken_by_name() {
        let ranked = rank(
            vec![score("Zeta", 2.0), score("Alpha", 2.0), score("Mu", 2.0)],
            &EngineConfig::default(),
        );
        assert_eq!(names(&ranked), vec!["Alpha", "Mu", "Zeta"]);
        assert_eq!(ranked[0].probability, ranked[2].probability);
    }

    #[test]
    fn truncates_to_top_n() {
        let config = EngineConfig {
            top_n: 2,
            ..Default::default()
        };
        let ranked = rank(
            vec![score("A", 4.0), score("B", 3.0), score("C", 2.0), score("D", 1.0)],
            &config,
        );
        assert_eq!(names(&ranked), vec!["A", "B"]);
    }

    #[test]
    fn normalizes_against_top_k_not_global_sum() {
        let config = EngineConfig {
            top_n: 2,
            normalization_depth: 3,
            ..Default::default()
        };
        let ranked = rank(
            vec![
                score("A", 4.0),
                score("B", 3.0),
                score("C", 1.0),
                score("D", 1.0),
                score("E", 1.0),
            ],
            &config,
        );
        // denominator = 4 + 3 + 1 (C wins the 1.0 tie by name)
        assert_eq!(ranked[0].probability, 4.0 / 8.0);
        assert_eq!(ranked[1].probability, 3.0 / 8.0);
        let total: f64 = ranked.iter().map(|r| r.probability).sum();
        assert!(total < 1.0);
    }

    #[test]
    fn below_significance_excluded_even_in_top_n() {
        let config = EngineConfig {
            min_significance: 1.5,
            ..Default::default()
        };
        let ranked = rank(vec![score("A", 2.0), score("B", 1.0)], &config);
        assert_eq!(names(&ranked), vec!["A"]);
        assert_eq!(ranked[0].probability, 1.0);
    }

    #[test]
    fn all_insignificant_gives_empty() {
        let ranked = rank(
            vec![score("A", 0.1), score("B", 0.2)],
            &EngineConfig::default(),
        );
        assert!(ranked.is_empty());
    }

    #[test]
    fn non_finite_scores_dropped() {
        let ranked = rank(
            vec![score("A", f64::NAN), score("B", f64::INFINITY), score("C", 1.0)],
            &EngineConfig::default(),
        );
        assert_eq!(names(&ranked), vec!["C"]);
    }

    #[test]
    fn probabilities_sorted_descending() {
        let ranked = rank(
            vec![score("A", 0.9), score("B", 2.5), score("C", 2.5), score("D", 1.7)],
            &EngineConfig::default(),
        );
        for pair in ranked.windows(2) {
            assert!(pair[0].probability >= pair[1].probability);
            if pair[0].probability == pair[1].probability {
                assert!(pair[0].score.name < pair[1].score.name);
            }
        }
    }

    #[test]
    fn projects_to_public_candidate() {
        let ranked = rank(vec![score("A", 2.0)], &EngineConfig::default());
        let candidate = ranked[0].to_candidate();
        assert_eq!(candidate.name, "A");
        assert_eq!(candidate.probability, 1.0);
    }
}
