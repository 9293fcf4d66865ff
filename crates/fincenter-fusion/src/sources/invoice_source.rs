use chrono::Duration;

use fincenter_core::constants::INVOICE_REFERENCE_AMOUNT;
use fincenter_core::errors::FincenterResult;
use fincenter_core::ledger::format_amount;
use fincenter_core::models::{Decision, DecisionSource, Severity};
use fincenter_core::traits::InvoiceFilter;

use super::{log_skipped, CandidateSource, SourceContext};
use crate::scoring;

const WARNING_DAYS: i64 = 30;
const CRITICAL_DAYS: i64 = 60;

/// Unpaid invoices at least 30 days past due.
pub struct InvoiceSource;

fn severity_for(days_overdue: i64) -> Option<Severity> {
    if days_overdue >= CRITICAL_DAYS {
        Some(Severity::Critical)
    } else if days_overdue >= WARNING_DAYS {
        Some(Severity::Warning)
    } else {
        None
    }
}

/// `1 + min(days / 100, 1)`.
pub fn urgency(days_overdue: i64) -> f64 {
    1.0 + (days_overdue as f64 / 100.0).min(1.0)
}

impl CandidateSource for InvoiceSource {
    fn source(&self) -> DecisionSource {
        DecisionSource::Invoice
    }

    fn candidates(&self, ctx: &SourceContext<'_>) -> FincenterResult<Vec<Decision>> {
        let filter = InvoiceFilter {
            due_before: Some(ctx.today - Duration::days(WARNING_DAYS - 1)),
            ..InvoiceFilter::unpaid()
        };
        let invoices = ctx.ledger.invoices(&filter)?;
        let mut skipped = 0;
        let mut out = Vec::new();

        for inv in &invoices {
            let days = inv.days_overdue(ctx.today);
            let Some(severity) = severity_for(days) else {
                continue;
            };
            let Some(amount) = inv.amount else {
                skipped += 1;
                continue;
            };
            let impact = scoring::normalized_impact(amount, INVOICE_REFERENCE_AMOUNT);
            out.push(Decision {
                id: format!("overdue_invoice_{}", inv.invoice_id),
                source: self.source(),
                severity,
                title: format!("Overdue invoice: {}", inv.vendor),
                description: format!(
                    "Invoice from '{}' for {} EUR is {days} days overdue.",
                    inv.vendor,
                    format_amount(amount)
                ),
                recommended_action: "Contact vendor to resolve payment. \
                    Escalate to finance director if > 90 days."
                    .to_string(),
                financial_impact: amount,
                priority_score: scoring::priority_score(severity, impact, urgency(days)),
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
    fn severity_and_urgency_by_days() {
        assert_eq!(severity_for(29), None);
        assert_eq!(severity_for(30), Some(Severity::Warning));
        assert_eq!(severity_for(60), Some(Severity::Critical));
        assert!((urgency(90) - 1.9).abs() < 1e-12);
        assert_eq!(urgency(365), 2.0);
    }
}
