//! The five candidate sources. Each is independent of the others and may
//! run concurrently; a new source only needs to implement [`CandidateSource`].

pub mod budget_source;
pub mod cluster_source;
pub mod contract_source;
pub mod invoice_source;
pub mod pattern_source;

pub use budget_source::BudgetSource;
pub use cluster_source::ClusterSource;
pub use contract_source::ContractSource;
pub use invoice_source::InvoiceSource;
pub use pattern_source::PatternSource;

use chrono::NaiveDate;

use fincenter_core::errors::FincenterResult;
use fincenter_core::models::{Decision, DecisionSource};
use fincenter_core::traits::{IIntelligenceStorage, ILedgerStore};

/// Read access and thresholds shared by every source.
pub struct SourceContext<'a> {
    pub ledger: &'a dyn ILedgerStore,
    pub storage: &'a dyn IIntelligenceStorage,
    pub today: NaiveDate,
    pub pattern_confidence_floor: f64,
    pub stress_threshold: u32,
}

pub trait CandidateSource: Send + Sync {
    fn source(&self) -> DecisionSource;

    /// Scored candidates, in input order. Ranking and capping happen later.
    fn candidates(&self, ctx: &SourceContext<'_>) -> FincenterResult<Vec<Decision>>;
}

/// All five sources in reference order.
pub fn default_sources() -> Vec<Box<dyn CandidateSource>> {
    vec![
        Box::new(BudgetSource),
        Box::new(InvoiceSource),
        Box::new(ContractSource),
        Box::new(PatternSource),
        Box::new(ClusterSource),
    ]
}

pub(crate) fn log_skipped(source: DecisionSource, skipped: usize) {
    if skipped > 0 {
        tracing::debug!(source = source.as_str(), skipped, "skipped malformed records");
    }
}
