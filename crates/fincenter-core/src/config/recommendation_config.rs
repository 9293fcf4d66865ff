use serde::{Deserialize, Serialize};

use super::defaults;

/// Recommendation engine trigger thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendationConfig {
    /// Budget overrun (percent) above which a cost-reduction item is raised.
    pub overrun_pct: f64,
    /// Budget underrun (percent) at or above which a reallocation item is raised.
    pub underrun_pct: f64,
    /// Contracts expiring within this many days get a renewal item.
    pub contract_window_days: i64,
    /// Unpaid invoices at least this many days overdue get an escalation item.
    pub invoice_overdue_days: i64,
    /// Overbilling patterns below this confidence are ignored.
    pub pattern_confidence_floor: f64,
}

impl Default for RecommendationConfig {
    fn default() -> Self {
        Self {
            overrun_pct: defaults::DEFAULT_REC_OVERRUN_PCT,
            underrun_pct: defaults::DEFAULT_REC_UNDERRUN_PCT,
            contract_window_days: defaults::DEFAULT_REC_CONTRACT_WINDOW_DAYS,
            invoice_overdue_days: defaults::DEFAULT_REC_INVOICE_OVERDUE_DAYS,
            pattern_confidence_floor: defaults::DEFAULT_REC_PATTERN_FLOOR,
        }
    }
}
