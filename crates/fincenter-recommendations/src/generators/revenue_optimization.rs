use fincenter_core::constants::SURPLUS_REFERENCE_AMOUNT;
use fincenter_core::errors::FincenterResult;
use fincenter_core::ledger::{format_amount, slug};
use fincenter_core::models::{Recommendation, RecommendationCategory};

use super::{latest_periods, log_skipped, Draft, GenerationContext, RecommendationGenerator};
use crate::scoring::{ratio, ScoreTerms};

const REALLOCATION_URGENCY: f64 = 0.4;
const REALLOCATION_CONFIDENCE: f64 = 0.80;
/// Share of the surplus expected to be usefully redeployed.
const REDEPLOYABLE_SHARE: f64 = 0.8;

/// One reallocation item per department whose latest period came in well
/// under budget.
pub struct ReallocationGenerator;

impl RecommendationGenerator for ReallocationGenerator {
    fn name(&self) -> &'static str {
        "reallocation"
    }

    fn generate(&self, ctx: &GenerationContext<'_>) -> FincenterResult<Vec<Recommendation>> {
        let (periods, skipped) = latest_periods(&ctx.ledger.budget_periods()?);
        log_skipped(self.name(), skipped);

        Ok(periods
            .into_iter()
            .filter_map(|p| {
                let (budget, actual) = p.figures()?;
                let surplus = budget - actual;
                let pct = surplus / budget * 100.0;
                if pct < ctx.config.underrun_pct {
                    return None;
                }
                let draft = Draft {
                    id: format!("reallocate_{}", slug(&p.department)),
                    category: RecommendationCategory::RevenueOptimization,
                    title: format!("Reallocate surplus from {}", p.department),
                    description: format!(
                        "Department '{}' is {pct:.1}% under budget ({} EUR available). \
                         Reallocate to high-growth areas.",
                        p.department,
                        format_amount(surplus)
                    ),
                    terms: ScoreTerms::new(
                        ratio(surplus, SURPLUS_REFERENCE_AMOUNT),
                        REALLOCATION_URGENCY,
                        REALLOCATION_CONFIDENCE,
                    ),
                    expected_impact: (surplus * REDEPLOYABLE_SHARE).round(),
                    supporting_evidence: vec![
                        format!("Surplus: {} EUR", format_amount(surplus)),
                        format!("Under-budget: {pct:.1}%"),
                    ],
                };
                Some(draft.finish(ctx.now))
            })
            .collect())
    }
}
