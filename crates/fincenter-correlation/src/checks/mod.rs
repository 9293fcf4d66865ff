//! Weak-signal checks. Each reads its own slice of the ledger so one failed
//! read silences one check, not the whole scan.

pub mod budget_check;
pub mod contract_check;
pub mod invoice_check;
pub mod pattern_check;
pub mod vendor_check;

pub use budget_check::BudgetSlightlyOverCheck;
pub use contract_check::ContractExpiringCheck;
pub use invoice_check::InvoiceOverdueCheck;
pub use pattern_check::PatternActiveCheck;
pub use vendor_check::VendorSlightOverbillingCheck;

use chrono::NaiveDate;

use fincenter_core::config::SignalWeights;
use fincenter_core::errors::FincenterResult;
use fincenter_core::models::{Signal, SignalType};
use fincenter_core::traits::{IIntelligenceStorage, ILedgerStore};

/// Everything a check may read.
pub struct CheckContext<'a> {
    pub ledger: &'a dyn ILedgerStore,
    pub storage: &'a dyn IIntelligenceStorage,
    pub today: NaiveDate,
    pub weights: &'a SignalWeights,
}

impl CheckContext<'_> {
    pub(crate) fn signal(
        &self,
        signal_type: SignalType,
        subject: impl Into<String>,
        detail: impl Into<String>,
    ) -> Signal {
        Signal {
            signal_type,
            subject: subject.into(),
            detail: detail.into(),
            weight: self.weights.weight_for(signal_type),
        }
    }
}

pub trait WeakSignalCheck: Send + Sync {
    fn signal_type(&self) -> SignalType;

    fn collect(&self, ctx: &CheckContext<'_>) -> FincenterResult<Vec<Signal>>;
}

/// The five standard checks.
pub fn default_checks() -> Vec<Box<dyn WeakSignalCheck>> {
    vec![
        Box::new(BudgetSlightlyOverCheck),
        Box::new(InvoiceOverdueCheck),
        Box::new(ContractExpiringCheck),
        Box::new(VendorSlightOverbillingCheck),
        Box::new(PatternActiveCheck),
    ]
}

pub(crate) fn log_skipped(check: SignalType, skipped: usize) {
    if skipped > 0 {
        tracing::debug!(check = check.as_str(), skipped, "skipped malformed records");
    }
}
