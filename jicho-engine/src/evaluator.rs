//! Entity risk evaluator
//!
//! Applies a region's historical baseline multiplier to the corpus
//! score and classifies the result into a severity band. Threshold
//! comparisons are strict: a score of exactly 0.8 is HIGH, not
//! CRITICAL.

use serde::Serialize;

use jicho_core::AlertLevel;

use crate::OverallScore;

/// Classification of one entity (or the nation)
#[derive(Debug, Clone, Copy, Serialize)]
pub struct RiskRating {
    pub level: AlertLevel,
    /// Baseline-adjusted score, clamped to [0, 1]
    pub adjusted: f64,
}

/// Fixed threshold bands, strict lower bounds
pub fn classify(score: f64) -> AlertLevel {
    if score > 0.8 {
        AlertLevel::Critical
    } else if score > 0.6 {
        AlertLevel::High
    } else if score > 0.4 {
        AlertLevel::Medium
    } else {
        AlertLevel::Low
    }
}

/// Evaluate an overall score for one entity
///
/// With a baseline multiplier `m` the adjusted score is
/// `value * (1 + m)` clamped to [0, 1]; without one the score passes
/// through unmodified. A multiplier never dampens the score below the
/// unmodified value.
pub fn evaluate(overall: &OverallScore, baseline: Option<f64>) -> RiskRating {
    let adjusted = match baseline {
        Some(m) => (overall.value * (1.0 + m.max(0.0))).clamp(0.0, 1.0),
        None => overall.value,
    };

    RiskRating {
        level: classify(adjusted),
        adjusted,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jicho_core::CRISIS_INDICATORS;

    fn overall(value: f64) -> OverallScore {
        let mut o = OverallScore::zero(CRISIS_INDICATORS);
        o.value = value;
        o
    }

    #[test]
    fn test_threshold_bands() {
        assert_eq!(evaluate(&overall(0.85), None).level, AlertLevel::Critical);
        assert_eq!(evaluate(&overall(0.65), None).level, AlertLevel::High);
        assert_eq!(evaluate(&overall(0.45), None).level, AlertLevel::Medium);
        assert_eq!(evaluate(&overall(0.2), None).level, AlertLevel::Low);
    }

    #[test]
    fn test_exact_boundaries_fall_into_lower_band() {
        assert_eq!(classify(0.8), AlertLevel::High);
        assert_eq!(classify(0.6), AlertLevel::Medium);
        assert_eq!(classify(0.4), AlertLevel::Low);
    }

    #[test]
    fn test_entity_amplification_boundary() {
        // 0.5 * (1 + 0.6) = 0.8 exactly: HIGH, not CRITICAL
        let rating = evaluate(&overall(0.5), Some(0.6));
        assert!((rating.adjusted - 0.8).abs() < 1e-12);
        assert_eq!(rating.level, AlertLevel::High);
    }

    #[test]
    fn test_amplification_clamps_to_one() {
        let rating = evaluate(&overall(0.9), Some(0.7));
        assert_eq!(rating.adjusted, 1.0);
        assert_eq!(rating.level, AlertLevel::Critical);
    }

    #[test]
    fn test_baseline_never_dampens() {
        let rating = evaluate(&overall(0.3), Some(0.0));
        assert!(rating.adjusted >= 0.3);
    }

    #[test]
    fn test_no_profile_passes_through() {
        let rating = evaluate(&overall(0.42), None);
        assert_eq!(rating.adjusted, 0.42);
        assert_eq!(rating.level, AlertLevel::Medium);
    }
}
