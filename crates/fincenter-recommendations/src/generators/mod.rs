//! One generator per kind of triggering fact.

pub mod cost_reduction;
pub mod revenue_optimization;
pub mod risk_mitigation;

pub use cost_reduction::{BudgetOverrunGenerator, OverbillingGenerator};
pub use revenue_optimization::ReallocationGenerator;
pub use risk_mitigation::{ContractRenewalGenerator, OverdueInvoiceGenerator, StressClusterGenerator};

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};

use fincenter_core::config::RecommendationConfig;
use fincenter_core::errors::FincenterResult;
use fincenter_core::ledger::{department_year_totals, BudgetPeriod};
use fincenter_core::models::{Confidence, Recommendation, RecommendationCategory};
use fincenter_core::traits::{IIntelligenceStorage, ILedgerStore};

use crate::scoring::ScoreTerms;

/// Read access, thresholds and the generation timestamp.
pub struct GenerationContext<'a> {
    pub ledger: &'a dyn ILedgerStore,
    pub storage: &'a dyn IIntelligenceStorage,
    pub config: &'a RecommendationConfig,
    pub today: NaiveDate,
    pub now: DateTime<Utc>,
}

pub trait RecommendationGenerator: Send + Sync {
    fn name(&self) -> &'static str;

    fn generate(&self, ctx: &GenerationContext<'_>) -> FincenterResult<Vec<Recommendation>>;
}

/// The six standard generators.
pub fn default_generators() -> Vec<Box<dyn RecommendationGenerator>> {
    vec![
        Box::new(BudgetOverrunGenerator),
        Box::new(OverbillingGenerator),
        Box::new(ContractRenewalGenerator),
        Box::new(OverdueInvoiceGenerator),
        Box::new(StressClusterGenerator),
        Box::new(ReallocationGenerator),
    ]
}

/// Fields shared by every generator's output.
pub(crate) struct Draft {
    pub id: String,
    pub category: RecommendationCategory,
    pub title: String,
    pub description: String,
    pub terms: ScoreTerms,
    pub expected_impact: f64,
    pub supporting_evidence: Vec<String>,
}

impl Draft {
    pub fn finish(self, now: DateTime<Utc>) -> Recommendation {
        Recommendation {
            id: self.id,
            category: self.category,
            title: self.title,
            description: self.description,
            priority_score: self.terms.priority(),
            expected_impact: self.expected_impact,
            confidence: Confidence::new(self.terms.confidence),
            supporting_evidence: self.supporting_evidence,
            created_at: now,
            acknowledged: false,
        }
    }
}

/// Each department's most recent year, with budget and actual summed over
/// its categories, plus the count of malformed rows skipped.
pub(crate) fn latest_periods(periods: &[BudgetPeriod]) -> (Vec<BudgetPeriod>, usize) {
    let (totals, skipped) = department_year_totals(periods);
    let mut latest: BTreeMap<String, BudgetPeriod> = BTreeMap::new();
    // Totals arrive ordered by year within a department.
    for total in totals.into_iter().filter(|t| t.figures().is_some()) {
        latest.insert(total.department.clone(), total);
    }
    (latest.into_values().collect(), skipped)
}

pub(crate) fn log_skipped(generator: &str, skipped: usize) {
    if skipped > 0 {
        tracing::debug!(generator, skipped, "skipped malformed records");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(dept: &str, year: i32, actual: Option<f64>) -> BudgetPeriod {
        categorized(dept, year, "", 100.0, actual)
    }

    fn categorized(
        dept: &str,
        year: i32,
        category: &str,
        budget: f64,
        actual: Option<f64>,
    ) -> BudgetPeriod {
        BudgetPeriod {
            department: dept.to_string(),
            year,
            category: category.to_string(),
            budget: Some(budget),
            actual,
        }
    }

    #[test]
    fn latest_period_per_department() {
        let (latest, skipped) = latest_periods(&[
            period("IT", 2023, Some(1.0)),
            period("IT", 2024, Some(2.0)),
            period("IT", 2022, Some(3.0)),
            period("HR", 2025, None),
            period("HR", 2021, Some(4.0)),
        ]);
        assert_eq!(skipped, 1);
        let years: Vec<_> = latest.iter().map(|p| (p.department.as_str(), p.year)).collect();
        assert_eq!(years, vec![("HR", 2021), ("IT", 2024)]);
    }

    #[test]
    fn latest_period_sums_categories_of_the_same_year() {
        let (latest, _) = latest_periods(&[
            categorized("IT", 2024, "opex", 100_000.0, Some(100_000.0)),
            categorized("IT", 2024, "capex", 100_000.0, Some(150_000.0)),
            categorized("IT", 2023, "opex", 100_000.0, Some(60_000.0)),
        ]);
        assert_eq!(latest.len(), 1);
        assert_eq!(latest[0].year, 2024);
        assert_eq!(latest[0].figures(), Some((200_000.0, 250_000.0)));
    }
}
