//! Triage classifier: the one authoritative severity-to-triage table.
//!
//! | condition                                 | triage       |
//! |-------------------------------------------|--------------|
//! | any red flag, or severity >= 0.75         | 1 (urgent)   |
//! | 0.40 <= severity < 0.75                   | 2 (moderate) |
//! | severity < 0.40 and no red flag           | 3 (routine)  |
//!
//! Color, label and advice helpers all go through [`TriageLevel`] and never
//! compare severities themselves.

use super::types::TriageLevel;

pub const URGENT_THRESHOLD: f64 = 0.75;
pub const MODERATE_THRESHOLD: f64 = 0.40;

/// Pure and total. NaN severity is treated as 0.
pub fn classify(severity: f64, red_flag: bool) -> TriageLevel {
    let severity = if severity.is_nan() { 0.0 } else { severity };

    if red_flag || severity >= URGENT_THRESHOLD {
        TriageLevel::Urgent
    } else if severity >= MODERATE_THRESHOLD {
        TriageLevel::Moderate
    } else {
        TriageLevel::Routine
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_boundaries() {
        assert_eq!(classify(0.0, false), TriageLevel::Routine);
        assert_eq!(classify(0.399, false), TriageLevel::Routine);
        assert_eq!(classify(0.40, false), TriageLevel::Moderate);
        assert_eq!(classify(0.749, false), TriageLevel::Moderate);
        assert_eq!(classify(0.75, false), TriageLevel::Urgent);
        assert_eq!(classify(1.0, false), TriageLevel::Urgent);
    }

    #[test]
    fn red_flag_always_urgent() {
        for severity in [0.0, 0.2, 0.5, 0.9, f64::NAN] {
            assert_eq!(classify(severity, true), TriageLevel::Urgent);
        }
    }

    #[test]
    fn nan_is_routine_without_red_flag() {
        assert_eq!(classify(f64::NAN, false), TriageLevel::Routine);
    }

    #[test]
    fn red_flag_never_decreases_urgency() {
        let mut severity = 0.0;
        while severity <= 1.0 {
            assert!(classify(severity, true) <= classify(severity, false));
            severity += 0.01;
        }
    }
}
