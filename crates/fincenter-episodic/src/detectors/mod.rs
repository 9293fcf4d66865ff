//! Pattern detectors. Each reads only the ledger data it needs, so a failed
//! read degrades one detector instead of the whole pass.

pub mod department_overspend;
pub mod late_payment;
pub mod seasonal_spike;
pub mod vendor_overbilling;

pub use department_overspend::DepartmentOverspendDetector;
pub use late_payment::LatePaymentDetector;
pub use seasonal_spike::SeasonalSpikeDetector;
pub use vendor_overbilling::VendorOverbillingDetector;

use chrono::NaiveDate;

use fincenter_core::config::EpisodicConfig;
use fincenter_core::errors::FincenterResult;
use fincenter_core::models::{Confidence, PatternType};
use fincenter_core::traits::ILedgerStore;

/// One detected pattern, before it is stamped and persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct Finding {
    pub subject: String,
    pub description: String,
    pub confidence: Confidence,
    pub evidence_count: u32,
}

/// A single pattern rule evaluated over current ledger data.
pub trait PatternDetector: Send + Sync {
    fn pattern_type(&self) -> PatternType;

    fn detect(&self, ledger: &dyn ILedgerStore, today: NaiveDate) -> FincenterResult<Vec<Finding>>;
}

/// The standard four detectors, configured from `config`.
pub fn default_detectors(config: &EpisodicConfig) -> Vec<Box<dyn PatternDetector>> {
    vec![
        Box::new(VendorOverbillingDetector::from_config(config)),
        Box::new(DepartmentOverspendDetector::from_config(config)),
        Box::new(LatePaymentDetector::from_config(config)),
        Box::new(SeasonalSpikeDetector::from_config(config)),
    ]
}

/// Report malformed records a detector had to skip.
pub(crate) fn log_skipped(detector: PatternType, skipped: usize) {
    if skipped > 0 {
        tracing::debug!(detector = detector.as_str(), skipped, "skipped malformed records");
    }
}
