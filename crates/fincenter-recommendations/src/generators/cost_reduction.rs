use fincenter_core::constants::BUDGET_REFERENCE_AMOUNT;
use fincenter_core::errors::FincenterResult;
use fincenter_core::ledger::{format_amount, slug};
use fincenter_core::models::{PatternType, Recommendation, RecommendationCategory};
use fincenter_core::traits::PatternFilter;

use super::{latest_periods, log_skipped, Draft, GenerationContext, RecommendationGenerator};
use crate::scoring::{ratio, ScoreTerms};

const OVERRUN_CONFIDENCE: f64 = 0.85;
/// Overrun percentage at which urgency saturates.
const OVERRUN_URGENCY_SCALE: f64 = 50.0;
/// Share of the overrun a spend freeze is expected to recover.
const RECOVERABLE_SHARE: f64 = 0.5;

const OVERBILLING_IMPACT: f64 = 0.5;
const OVERBILLING_URGENCY: f64 = 0.6;

/// One item per department whose latest period overran by more than the
/// configured percentage.
pub struct BudgetOverrunGenerator;

impl RecommendationGenerator for BudgetOverrunGenerator {
    fn name(&self) -> &'static str {
        "budget_overrun"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> FincenterResult<Vec<Recommendation>> {
        let (periods, skipped) = latest_periods(&ctx.ledger.budget_periods()?);
        log_skipped(self.name(), skipped);

        Ok(periods
            .into_iter()
            .filter_map(|p| {
                let (budget, actual) = p.figures()?;
                let overrun = actual - budget;
                let pct = overrun / budget * 100.0;
                if pct <= ctx.config.overrun_pct {
                    return None;
                }
                let draft = Draft {
                    id: format!("cost_{}", slug(&p.department)),
                    category: RecommendationCategory::CostReduction,
                    title: format!("Reduce spend in {} department", p.department),
                    description: format!(
                        "Department is {pct:.1}% over budget ({} EUR). Implement spend controls \
                         and freeze discretionary purchases.",
                        format_amount(overrun)
                    ),
                    terms: ScoreTerms::new(
                        ratio(overrun, BUDGET_REFERENCE_AMOUNT),
                        pct / OVERRUN_URGENCY_SCALE,
                        OVERRUN_CONFIDENCE,
                    ),
                    expected_impact: (overrun * RECOVERABLE_SHARE).round(),
                    supporting_evidence: vec![
                        format!("Budget: {} EUR", format_amount(budget)),
                        format!("Actual: {} EUR", format_amount(actual)),
                        format!("Overrun: {pct:.1}%"),
                    ],
                };
                Some(draft.finish(ctx.now))
            })
            .collect())
    }
}

/// One renegotiation item per vendor with an actionable overbilling pattern.
pub struct OverbillingGenerator;

impl RecommendationGenerator for OverbillingGenerator {
    fn name(&self) -> &'static str {
        "vendor_overbilling"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> FincenterResult<Vec<Recommendation>> {
        let filter = PatternFilter {
            pattern_type: Some(PatternType::VendorOverbilling),
            min_confidence: Some(ctx.config.pattern_confidence_floor),
        };
        let patterns = ctx.storage.list_patterns(&filter)?;

        Ok(patterns
            .into_iter()
            .map(|p| {
                Draft {
                    id: format!("overbilling_{}", slug(&p.subject)),
                    category: RecommendationCategory::CostReduction,
                    title: format!("Renegotiate contract with {}", p.subject),
                    description: p.description.clone(),
                    terms: ScoreTerms::new(
                        OVERBILLING_IMPACT,
                        OVERBILLING_URGENCY,
                        p.confidence.value(),
                    ),
                    expected_impact: 0.0,
                    supporting_evidence: vec![p.description],
                }
                .finish(ctx.now)
            })
            .collect())
    }
}
