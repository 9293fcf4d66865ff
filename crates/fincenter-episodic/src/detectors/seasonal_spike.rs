use chrono::NaiveDate;

use fincenter_core::config::EpisodicConfig;
use fincenter_core::constants::AGGREGATE_SUBJECT;
use fincenter_core::errors::FincenterResult;
use fincenter_core::ledger::BudgetPeriod;
use fincenter_core::models::{Confidence, PatternType};
use fincenter_core::traits::ILedgerStore;

use super::{log_skipped, Finding, PatternDetector};

/// Budget periods whose actual spend stands well above the ledger-wide mean.
pub struct SeasonalSpikeDetector {
    pub ratio: f64,
    pub min_periods: usize,
    pub confidence: f64,
}

impl SeasonalSpikeDetector {
    pub fn from_config(config: &EpisodicConfig) -> Self {
        Self {
            ratio: config.seasonal_ratio,
            min_periods: config.min_seasonal_periods,
            confidence: config.seasonal_confidence,
        }
    }

    pub fn evaluate(&self, periods: &[BudgetPeriod]) -> (Option<Finding>, usize) {
        let actuals: Vec<f64> = periods.iter().filter_map(|p| p.actual).collect();
        let skipped = periods.len() - actuals.len();

        let total: f64 = actuals.iter().sum();
        if actuals.is_empty() || total == 0.0 {
            return (None, skipped);
        }
        let avg = total / actuals.len() as f64;
        let spikes = actuals.iter().filter(|a| **a > avg * self.ratio).count();
        if spikes < self.min_periods {
            return (None, skipped);
        }

        let finding = Finding {
            subject: AGGREGATE_SUBJECT.to_string(),
            description: format!(
                "Detected {spikes} budget periods with spending >{:.0}% above average, suggesting seasonal expenditure spikes.",
                (self.ratio - 1.0) * 100.0
            ),
            confidence: Confidence::new(self.confidence),
            evidence_count: spikes as u32,
        };
        (Some(finding), skipped)
    }
}

impl PatternDetector for SeasonalSpikeDetector {
    fn pattern_type(&self) -> PatternType {
        PatternType::SeasonalSpike
    }

    fn detect(&self, ledger: &dyn ILedgerStore, _today: NaiveDate) -> FincenterResult<Vec<Finding>> {
        let periods = ledger.budget_periods()?;
        let (finding, skipped) = self.evaluate(&periods);
        log_skipped(self.pattern_type(), skipped);
        Ok(finding.into_iter().collect())
    }
}
