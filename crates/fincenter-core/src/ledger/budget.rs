use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One department's budget and actual spend for a period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetPeriod {
    pub department: String,
    pub year: i32,
    #[serde(default)]
    pub category: String,
    pub budget: Option<f64>,
    pub actual: Option<f64>,
}

impl BudgetPeriod {
    /// `(actual - budget) / budget * 100`, or `None` if either figure is
    /// missing or the budget is not positive.
    pub fn overrun_pct(&self) -> Option<f64> {
        let (budget, actual) = self.figures()?;
        Some((actual - budget) / budget * 100.0)
    }

    /// Absolute overrun (negative when under budget).
    pub fn overrun(&self) -> Option<f64> {
        let (budget, actual) = self.figures()?;
        Some(actual - budget)
    }

    /// `(budget, actual)` when both are present and the budget is positive.
    pub fn figures(&self) -> Option<(f64, f64)> {
        match (self.budget, self.actual) {
            (Some(budget), Some(actual)) if budget > 0.0 => Some((budget, actual)),
            _ => None,
        }
    }
}

/// Sum budget and actual across categories for each `(department, year)`.
///
/// Rows missing either figure are left out of the totals and counted in the
/// second element. A total keeps its category only when a single category
/// contributed to it. Output is ordered by department, then year.
pub fn department_year_totals(periods: &[BudgetPeriod]) -> (Vec<BudgetPeriod>, usize) {
    let mut skipped = 0;
    let mut totals: BTreeMap<(String, i32), BudgetPeriod> = BTreeMap::new();
    for p in periods {
        let (Some(budget), Some(actual)) = (p.budget, p.actual) else {
            skipped += 1;
            continue;
        };
        totals
            .entry((p.department.clone(), p.year))
            .and_modify(|t| {
                t.budget = t.budget.map(|b| b + budget);
                t.actual = t.actual.map(|a| a + actual);
                if t.category != p.category {
                    t.category.clear();
                }
            })
            .or_insert_with(|| p.clone());
    }
    (totals.into_values().collect(), skipped)
}
