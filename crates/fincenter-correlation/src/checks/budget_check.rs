use fincenter_core::errors::FincenterResult;
use fincenter_core::models::{Signal, SignalType};

use super::{log_skipped, CheckContext, WeakSignalCheck};

/// Lower and upper overrun bounds, in percent, both inclusive.
const OVERRUN_BAND: (f64, f64) = (5.0, 15.0);

/// Budget periods running 5–15% over plan.
pub struct BudgetSlightlyOverCheck;

impl WeakSignalCheck for BudgetSlightlyOverCheck {
    fn signal_type(&self) -> SignalType {
        SignalType::BudgetSlightlyOver
    }

    fn collect(&self, ctx: &CheckContext<'_>) -> FincenterResult<Vec<Signal>> {
        let periods = ctx.ledger.budget_periods()?;
        let (low, high) = OVERRUN_BAND;
        let malformed = periods
            .iter()
            .filter(|p| p.budget.is_none() || p.actual.is_none())
            .count();
        log_skipped(self.signal_type(), malformed);
        Ok(periods
            .iter()
            .filter_map(|p| p.overrun_pct().map(|pct| (p, pct)))
            .filter(|(_, pct)| (low..=high).contains(pct))
            .map(|(p, pct)| {
                ctx.signal(
                    self.signal_type(),
                    p.department.as_str(),
                    format!("{pct:.1}% over budget"),
                )
            })
            .collect())
    }
}
