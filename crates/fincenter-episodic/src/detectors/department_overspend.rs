use std::collections::BTreeMap;

use chrono::NaiveDate;

use fincenter_core::config::EpisodicConfig;
use fincenter_core::errors::FincenterResult;
use fincenter_core::ledger::BudgetPeriod;
use fincenter_core::models::{Confidence, PatternType};
use fincenter_core::traits::ILedgerStore;

use super::{log_skipped, Finding, PatternDetector};

/// Departments that repeatedly spend more than their budget.
pub struct DepartmentOverspendDetector {
    pub ratio: f64,
    pub min_periods: usize,
}

/// Placeholder department name produced by upstream ingestion.
const UNKNOWN_DEPARTMENT: &str = "UNKNOWN";

impl DepartmentOverspendDetector {
    pub fn from_config(config: &EpisodicConfig) -> Self {
        Self {
            ratio: config.overspend_ratio,
            min_periods: config.min_overspend_periods,
        }
    }

    pub fn evaluate(&self, periods: &[BudgetPeriod]) -> (Vec<Finding>, usize) {
        let mut skipped = 0;
        let mut overruns_by_dept: BTreeMap<&str, Vec<f64>> = BTreeMap::new();

        for period in periods {
            let dept = period.department.trim();
            if dept.is_empty() || dept == UNKNOWN_DEPARTMENT {
                continue;
            }
            if period.budget.is_none() || period.actual.is_none() {
                skipped += 1;
                continue;
            }
            let Some((budget, actual)) = period.figures() else {
                continue;
            };
            if actual > budget * self.ratio {
                overruns_by_dept
                    .entry(dept)
                    .or_default()
                    .push((actual - budget) / budget * 100.0);
            }
        }

        let findings = overruns_by_dept
            .into_iter()
            .filter(|(_, overruns)| overruns.len() >= self.min_periods)
            .map(|(dept, overruns)| {
                let avg = overruns.iter().sum::<f64>() / overruns.len() as f64;
                Finding {
                    subject: dept.to_string(),
                    description: format!(
                        "Department '{dept}' overspent by an average of {avg:.1}% across {} budget periods.",
                        overruns.len()
                    ),
                    confidence: Confidence::from_evidence(0.4, 0.15, overruns.len(), 0.95),
                    evidence_count: overruns.len() as u32,
                }
            })
            .collect();
        (findings, skipped)
    }
}

impl PatternDetector for DepartmentOverspendDetector {
    fn pattern_type(&self) -> PatternType {
        PatternType::DepartmentOverspend
    }

    fn detect(&self, ledger: &dyn ILedgerStore, _today: NaiveDate) -> FincenterResult<Vec<Finding>> {
        let periods = ledger.budget_periods()?;
        let (findings, skipped) = self.evaluate(&periods);
        log_skipped(self.pattern_type(), skipped);
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn period(dept: &str, year: i32, budget: f64, actual: f64) -> BudgetPeriod {
        BudgetPeriod {
            department: dept.to_string(),
            year,
            category: String::new(),
            budget: Some(budget),
            actual: Some(actual),
        }
    }

    fn detector() -> DepartmentOverspendDetector {
        DepartmentOverspendDetector::from_config(&EpisodicConfig::default())
    }

    #[test]
    fn three_of_three_overspent_periods_give_085() {
        let periods = vec![
            period("IT", 2022, 400_000.0, 430_000.0),
            period("IT", 2023, 420_000.0, 470_000.0),
            period("IT", 2024, 450_000.0, 560_000.0),
        ];
        let (findings, _) = detector().evaluate(&periods);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].subject, "IT");
        assert_eq!(findings[0].confidence.value(), 0.85);
        assert_eq!(findings[0].evidence_count, 3);
        assert!(findings[0].description.contains("across 3 budget periods"));
    }

    #[test]
    fn overspend_at_exactly_five_percent_does_not_count() {
        let periods = vec![
            period("HR", 2023, 100.0, 105.0),
            period("HR", 2024, 100.0, 120.0),
        ];
        let (findings, _) = detector().evaluate(&periods);
        assert!(findings.is_empty());
    }

    #[test]
    fn unknown_department_and_malformed_periods_are_skipped() {
        let mut missing = period("Ops", 2024, 0.0, 200.0);
        missing.budget = None;
        let periods = vec![
            period("UNKNOWN", 2023, 100.0, 200.0),
            period("UNKNOWN", 2024, 100.0, 200.0),
            missing,
            period("Ops", 2023, 100.0, 200.0),
        ];
        let (findings, skipped) = detector().evaluate(&periods);
        assert!(findings.is_empty());
        assert_eq!(skipped, 1);
    }
}
