use fincenter_core::constants::BUDGET_REFERENCE_AMOUNT;
use fincenter_core::errors::FincenterResult;
use fincenter_core::ledger::{department_year_totals, format_amount, slug};
use fincenter_core::models::{Decision, DecisionSource, Severity};

use super::{log_skipped, CandidateSource, SourceContext};
use crate::scoring;

/// Departments whose yearly spend, summed over categories, exceeds plan by
/// more than 5%.
pub struct BudgetSource;

fn severity_for(overrun_pct: f64) -> Option<Severity> {
    if overrun_pct > 20.0 {
        Some(Severity::Critical)
    } else if overrun_pct > 5.0 {
        Some(Severity::Warning)
    } else {
        None
    }
}

impl CandidateSource for BudgetSource {
    fn source(&self) -> DecisionSource {
        DecisionSource::Budget
    }

    fn candidates(&self, ctx: &SourceContext<'_>) -> FincenterResult<Vec<Decision>> {
        let (totals, skipped) = department_year_totals(&ctx.ledger.budget_periods()?);
        let mut out = Vec::new();

        for p in &totals {
            let Some((budget, actual)) = p.figures() else {
                continue;
            };
            let overrun = actual - budget;
            let overrun_pct = overrun / budget * 100.0;
            let Some(severity) = severity_for(overrun_pct) else {
                continue;
            };
            let impact = scoring::normalized_impact(overrun.abs(), BUDGET_REFERENCE_AMOUNT);
            out.push(Decision {
                id: format!("budget_overrun_{}_{}", slug(&p.department), p.year),
                source: self.source(),
                severity,
                title: format!("Budget overrun: {}", p.department),
                description: format!(
                    "Department '{}' actual spend ({} EUR) exceeds budget ({} EUR) by {overrun_pct:.1}%.",
                    p.department,
                    format_amount(actual),
                    format_amount(budget),
                ),
                recommended_action: "Review discretionary spending and freeze non-critical purchases. \
                    Request variance explanation from department head."
                    .to_string(),
                financial_impact: overrun.abs(),
                priority_score: scoring::priority_score(severity, impact, 1.0),
            });
        }
        log_skipped(self.source(), skipped);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_thresholds_are_exclusive() {
        assert_eq!(severity_for(20.0), Some(Severity::Warning));
        assert_eq!(severity_for(20.1), Some(Severity::Critical));
        assert_eq!(severity_for(5.0), None);
        assert_eq!(severity_for(-10.0), None);
    }
}
