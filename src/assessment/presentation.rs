//! Display helpers for renderers. Every function here is total: absent or
//! out-of-range input resolves to the routine bucket / zero severity, the same
//! defaults [`AnalysisResult`](super::types::AnalysisResult) carries.

use serde::{Deserialize, Serialize};

use super::types::{AnalysisResult, TriageLevel};

/// Categorical triage color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriageColor {
    /// Urgent. Red banner.
    Red,
    /// Moderate. Amber banner.
    Amber,
    /// Routine. Green banner.
    Green,
}

impl TriageColor {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Amber => "amber",
            Self::Green => "green",
        }
    }

    /// sRGB hex, e.g. for a web or mobile renderer.
    pub fn hex(self) -> &'static str {
        match self {
            Self::Red => "#D32F2F",
            Self::Amber => "#FFA000",
            Self::Green => "#388E3C",
        }
    }
}

impl TriageLevel {
    pub fn color(self) -> TriageColor {
        match self {
            Self::Urgent => TriageColor::Red,
            Self::Moderate => TriageColor::Amber,
            Self::Routine => TriageColor::Green,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Urgent => "Urgent",
            Self::Moderate => "Moderate",
            Self::Routine => "Routine",
        }
    }

    /// Recommended next action shown alongside the label.
    pub fn advice(self) -> &'static str {
        match self {
            Self::Urgent => {
                "Seek medical care now. If symptoms are severe or worsening, contact emergency services."
            }
            Self::Moderate => "Contact a healthcare professional within the next day.",
            Self::Routine => {
                "Monitor your symptoms at home and consult a professional if they persist or worsen."
            }
        }
    }
}

impl AnalysisResult {
    pub fn color(&self) -> TriageColor {
        self.triage_level().color()
    }

    pub fn label(&self) -> &'static str {
        self.triage_level().label()
    }

    pub fn advice(&self) -> &'static str {
        self.triage_level().advice()
    }
}

pub fn triage_color(triage: Option<i32>) -> TriageColor {
    TriageLevel::from_code(triage).color()
}

pub fn triage_label(triage: Option<i32>) -> &'static str {
    TriageLevel::from_code(triage).label()
}

pub fn care_advice(triage: Option<i32>) -> &'static str {
    TriageLevel::from_code(triage).advice()
}

/// Severity as displayed: absent or NaN is 0, anything else clamped to [0, 1].
pub fn severity_or_default(severity: Option<f64>) -> f64 {
    match severity {
        Some(value) if !value.is_nan() => value.clamp(0.0, 1.0),
        _ => 0.0,
    }
}

/// Whole-percent string: 0.42 -> "42%". NaN reads as 0, input clamped to [0, 1].
pub fn format_probability(probability: f64) -> String {
    let p = if probability.is_nan() {
        0.0
    } else {
        probability.clamp(0.0, 1.0)
    };
    format!("{}%", (p * 100.0).round() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_probability_rounds_to_whole_percent() {
        assert_eq!(format_probability(0.5), "50%");
        assert_eq!(format_probability(0.42), "42%");
        assert_eq!(format_probability(0.004), "0%");
        assert_eq!(format_probability(0.996), "100%");
        assert_eq!(format_probability(1.0), "100%");
        assert_eq!(format_probability(0.0), "0%");
    }

    #[test]
    fn format_probability_is_total() {
        assert_eq!(format_probability(f64::NAN), "0%");
        assert_eq!(format_probability(-0.3), "0%");
        assert_eq!(format_probability(7.0), "100%");
        assert_eq!(format_probability(f64::INFINITY), "100%");
        assert_eq!(format_probability(f64::NEG_INFINITY), "0%");
    }

    #[test]
    fn labels_per_bucket() {
        assert_eq!(triage_label(Some(1)), "Urgent");
        assert_eq!(triage_label(Some(2)), "Moderate");
        assert_eq!(triage_label(Some(3)), "Routine");
    }

    #[test]
    fn absent_or_invalid_triage_is_routine() {
        assert_eq!(triage_label(None), triage_label(Some(3)));
        assert_eq!(triage_label(Some(0)), "Routine");
        assert_eq!(triage_label(Some(-1)), "Routine");
        assert_eq!(triage_color(Some(99)), triage_color(Some(3)));
        assert_eq!(triage_color(None), TriageColor::Green);
        assert_eq!(care_advice(Some(42)), care_advice(Some(3)));
    }

    #[test]
    fn colors_are_distinct() {
        let colors = [triage_color(Some(1)), triage_color(Some(2)), triage_color(Some(3))];
        assert_eq!(colors, [TriageColor::Red, TriageColor::Amber, TriageColor::Green]);
        assert_ne!(TriageColor::Red.hex(), TriageColor::Green.hex());
        assert_eq!(TriageColor::Amber.as_str(), "amber");
    }

    #[test]
    fn severity_defaults() {
        assert_eq!(severity_or_default(None), 0.0);
        assert_eq!(severity_or_default(Some(f64::NAN)), 0.0);
        assert_eq!(severity_or_default(Some(1.7)), 1.0);
        assert_eq!(severity_or_default(Some(0.3)), 0.3);
    }

    #[test]
    fn result_helpers_match_free_functions() {
        for code in [0u8, 1, 2, 3, 200] {
            let result = AnalysisResult {
                triage: code,
                ..Default::default()
            };
            let triage = Some(i32::from(code));
            assert_eq!(result.color(), triage_color(triage));
            assert_eq!(result.label(), triage_label(triage));
            assert_eq!(result.advice(), care_advice(triage));
        }
        assert_eq!(AnalysisResult::default().color(), TriageColor::Green);
    }

    #[test]
    fn urgent_advice_mentions_care_now() {
        assert!(care_advice(Some(1)).contains("care now"));
    }
}
