//! Weighted recommendation priority.

const IMPACT_WEIGHT: f64 = 0.4;
const URGENCY_WEIGHT: f64 = 0.4;
const CONFIDENCE_WEIGHT: f64 = 0.2;

/// The three normalised inputs to the priority formula, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoreTerms {
    pub impact: f64,
    pub urgency: f64,
    pub confidence: f64,
}

impl ScoreTerms {
    pub fn new(impact: f64, urgency: f64, confidence: f64) -> Self {
        Self {
            impact: unit(impact),
            urgency: unit(urgency),
            confidence: unit(confidence),
        }
    }

    /// Weighted sum scaled to `[0, 100]`, rounded to one decimal.
    pub fn priority(self) -> f64 {
        let raw = self.impact * IMPACT_WEIGHT
            + self.urgency * URGENCY_WEIGHT
            + self.confidence * CONFIDENCE_WEIGHT;
        ((raw * 100.0).min(100.0) * 10.0).round() / 10.0
    }
}

fn unit(x: f64) -> f64 {
    if x.is_nan() {
        return 0.0;
    }
    x.clamp(0.0, 1.0)
}

/// `min(1, amount / reference)`, zero for non-positive references.
pub fn ratio(amount: f64, reference: f64) -> f64 {
    if reference <= 0.0 {
        return 0.0;
    }
    unit(amount / reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn weighted_sum_rounded_to_one_decimal() {
        // 0.22×0.4 + 0.4889×0.4 + 0.85×0.2 = 0.45356
        let terms = ScoreTerms::new(0.22, 110_000.0 / 450_000.0 * 100.0 / 50.0, 0.85);
        assert_eq!(terms.priority(), 45.4);
    }

    #[test]
    fn all_max_terms_give_100() {
        assert_eq!(ScoreTerms::new(3.0, 2.0, 1.5).priority(), 100.0);
        assert_eq!(ScoreTerms::new(0.0, 0.0, 0.0).priority(), 0.0);
    }

    proptest! {
        #[test]
        fn priority_stays_in_range(i in -2.0f64..3.0, u in -2.0f64..3.0, c in -2.0f64..3.0) {
            let p = ScoreTerms::new(i, u, c).priority();
            prop_assert!((0.0..=100.0).contains(&p));
        }
    }
}
