use chrono::Duration;

use fincenter_core::constants::{
    CONTRACT_REFERENCE_AMOUNT, INVOICE_REFERENCE_AMOUNT, WEAK_SIGNAL_RECOMMENDATION_ID,
};
use fincenter_core::errors::FincenterResult;
use fincenter_core::ledger::format_amount;
use fincenter_core::models::{Recommendation, RecommendationCategory};
use fincenter_core::traits::{ContractFilter, InvoiceFilter};

use super::{log_skipped, Draft, GenerationContext, RecommendationGenerator};
use crate::scoring::{ratio, ScoreTerms};

const CONTRACT_CONFIDENCE: f64 = 0.95;
const INVOICE_CONFIDENCE: f64 = 0.90;
/// Days overdue at which invoice urgency saturates.
const INVOICE_URGENCY_DAYS: f64 = 120.0;
const CLUSTER_URGENCY: f64 = 0.7;
const CLUSTER_CONFIDENCE: f64 = 0.70;

/// One renewal item per contract ending inside the configured window.
pub struct ContractRenewalGenerator;

impl RecommendationGenerator for ContractRenewalGenerator {
    fn name(&self) -> &'static str {
        "contract_renewal"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> FincenterResult<Vec<Recommendation>> {
        let window = ctx.config.contract_window_days;
        let filter = ContractFilter {
            ends_before: Some(ctx.today + Duration::days(window)),
        };
        let contracts = ctx.ledger.contracts(&filter)?;
        let mut skipped = 0;
        let mut out = Vec::new();

        for c in contracts {
            let days_left = c.days_until_expiry(ctx.today);
            if days_left <= 0 || days_left > window {
                continue;
            }
            let Some(annual) = c.annual_value else {
                skipped += 1;
                continue;
            };
            let urgency = if window > 0 {
                (window - days_left) as f64 / window as f64
            } else {
                0.0
            };
            out.push(
                Draft {
                    id: format!("contract_{}", c.contract_id),
                    category: RecommendationCategory::RiskMitigation,
                    title: format!("Renew contract: {}", c.vendor),
                    description: format!(
                        "Contract with '{}' (value: {} EUR/yr) expires in {days_left} days. \
                         Failure to renew risks service disruption.",
                        c.vendor,
                        format_amount(annual)
                    ),
                    terms: ScoreTerms::new(
                        ratio(annual, CONTRACT_REFERENCE_AMOUNT),
                        urgency,
                        CONTRACT_CONFIDENCE,
                    ),
                    expected_impact: annual.round(),
                    supporting_evidence: vec![
                        format!("Days until expiry: {days_left}"),
                        format!("Annual value: {} EUR", format_amount(annual)),
                    ],
                }
                .finish(ctx.now),
            );
        }
        log_skipped(self.name(), skipped);
        Ok(out)
    }
}

/// One escalation item per unpaid invoice past the configured age.
pub struct OverdueInvoiceGenerator;

impl RecommendationGenerator for OverdueInvoiceGenerator {
    fn name(&self) -> &'static str {
        "overdue_invoice"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> FincenterResult<Vec<Recommendation>> {
        let min_days = ctx.config.invoice_overdue_days;
        let filter = InvoiceFilter {
            due_before: Some(ctx.today - Duration::days(min_days - 1)),
            ..InvoiceFilter::unpaid()
        };
        let invoices = ctx.ledger.invoices(&filter)?;
        let mut skipped = 0;
        let mut out = Vec::new();

        for inv in invoices {
            let days = inv.days_overdue(ctx.today);
            if days < min_days {
                continue;
            }
            let Some(amount) = inv.amount else {
                skipped += 1;
                continue;
            };
            out.push(
                Draft {
                    id: format!("invoice_{}", inv.invoice_id),
                    category: RecommendationCategory::RiskMitigation,
                    title: format!("Resolve overdue invoice: {}", inv.vendor),
                    description: format!(
                        "Invoice of {} EUR from '{}' is {days} days overdue. \
                         Escalate to prevent vendor relationship damage.",
                        format_amount(amount),
                        inv.vendor
                    ),
                    terms: ScoreTerms::new(
                        ratio(amount, INVOICE_REFERENCE_AMOUNT),
                        days as f64 / INVOICE_URGENCY_DAYS,
                        INVOICE_CONFIDENCE,
                    ),
                    expected_impact: amount.round(),
                    supporting_evidence: vec![
                        format!("Days overdue: {days}"),
                        format!("Amount: {} EUR", format_amount(amount)),
                    ],
                }
                .finish(ctx.now),
            );
        }
        log_skipped(self.name(), skipped);
        Ok(out)
    }
}

/// A single holistic-review item while any stress cluster is unacknowledged.
pub struct StressClusterGenerator;

impl RecommendationGenerator for StressClusterGenerator {
    fn name(&self) -> &'static str {
        "stress_cluster"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> FincenterResult<Vec<Recommendation>> {
        let clusters = ctx.storage.list_clusters(true)?;
        let Some(max_score) = clusters.iter().map(|c| c.score).max() else {
            return Ok(Vec::new());
        };
        Ok(vec![Draft {
            id: WEAK_SIGNAL_RECOMMENDATION_ID.to_string(),
            category: RecommendationCategory::RiskMitigation,
            title: "Financial stress cluster requires holistic review".to_string(),
            description: format!(
                "{} correlated weak signal cluster(s) detected. \
                 Combined score indicates elevated financial risk.",
                clusters.len()
            ),
            terms: ScoreTerms::new(max_score as f64 / 10.0, CLUSTER_URGENCY, CLUSTER_CONFIDENCE),
            expected_impact: 0.0,
            supporting_evidence: vec![
                format!("Active clusters: {}", clusters.len()),
                format!("Max stress score: {max_score}"),
            ],
        }
        .finish(ctx.now)])
    }
}
