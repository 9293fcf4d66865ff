//! The uniform priority formula and its normalisers.

use fincenter_core::models::Severity;

/// Bounds applied to every urgency factor.
pub const URGENCY_RANGE: (f64, f64) = (1.0, 2.0);

/// `severity_weight × financial_impact × urgency × 10`, with impact clamped
/// to `[0, 1]` and urgency to `[1, 2]`.
pub fn priority_score(severity: Severity, financial_impact: f64, urgency: f64) -> f64 {
    severity.weight() * financial_impact.clamp(0.0, 1.0) * clamp_urgency(urgency) * 10.0
}

/// `amount / reference`, clamped to `[0, 1]`.
pub fn normalized_impact(amount: f64, reference: f64) -> f64 {
    if reference <= 0.0 {
        return 0.0;
    }
    (amount / reference).clamp(0.0, 1.0)
}

pub fn clamp_urgency(urgency: f64) -> f64 {
    let (low, high) = URGENCY_RANGE;
    urgency.clamp(low, high)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn critical_overdue_invoice_example() {
        let score = priority_score(Severity::Critical, 0.85, 1.9);
        assert!((score - 48.45).abs() < 1e-9);
    }

    #[test]
    fn inputs_are_clamped() {
        assert_eq!(priority_score(Severity::Info, 5.0, 1.0), 10.0);
        assert_eq!(priority_score(Severity::Info, 1.0, 9.0), 20.0);
        assert_eq!(priority_score(Severity::Info, 1.0, 0.2), 10.0);
        assert_eq!(priority_score(Severity::Warning, -1.0, 1.0), 0.0);
    }

    #[test]
    fn impact_normalisation() {
        assert_eq!(normalized_impact(250_000.0, 500_000.0), 0.5);
        assert_eq!(normalized_impact(900_000.0, 500_000.0), 1.0);
        assert_eq!(normalized_impact(10.0, 0.0), 0.0);
    }
}
