//! Stores that fail selected reads, for exercising degradation paths.

use fincenter_core::errors::FincenterResult;
use fincenter_core::ledger::{BudgetPeriod, Contract, Invoice};
use fincenter_core::models::{EpisodicPattern, Recommendation, StressCluster};
use fincenter_core::traits::{
    ContractFilter, IIntelligenceStorage, ILedgerStore, InvoiceFilter, PatternFilter,
    RecommendationFilter,
};

use crate::memory_store::{unavailable, InMemoryStore};

/// Which reads fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureMode {
    Everything,
    Budgets,
    Invoices,
    Contracts,
    Patterns,
    Clusters,
}

impl FailureMode {
    fn fails(self, target: FailureMode) -> bool {
        self == FailureMode::Everything || self == target
    }
}

/// Ledger whose selected reads fail; other reads delegate to an inner store.
pub struct FailingLedger {
    pub inner: InMemoryStore,
    pub mode: FailureMode,
}

impl FailingLedger {
    pub fn new(inner: InMemoryStore, mode: FailureMode) -> Self {
        Self { inner, mode }
    }

    pub fn always() -> Self {
        Self::new(InMemoryStore::new(), FailureMode::Everything)
    }
}

impl ILedgerStore for FailingLedger {
    fn budget_periods(&self) -> FincenterResult<Vec<BudgetPeriod>> {
        if self.mode.fails(FailureMode::Budgets) {
            return Err(unavailable("budgets"));
        }
        self.inner.budget_periods()
    }

    fn invoices(&self, filter: &InvoiceFilter) -> FincenterResult<Vec<Invoice>> {
        if self.mode.fails(FailureMode::Invoices) {
            return Err(unavailable("invoices"));
        }
        self.inner.invoices(filter)
    }

    fn contracts(&self, filter: &ContractFilter) -> FincenterResult<Vec<Contract>> {
        if self.mode.fails(FailureMode::Contracts) {
            return Err(unavailable("contracts"));
        }
        self.inner.contracts(filter)
    }
}

/// Intelligence store whose pattern or cluster reads fail. Writes and
/// recommendation access always delegate.
pub struct FailingIntelligenceStore {
    pub inner: InMemoryStore,
    pub mode: FailureMode,
}

impl FailingIntelligenceStore {
    pub fn new(inner: InMemoryStore, mode: FailureMode) -> Self {
        Self { inner, mode }
    }
}

impl IIntelligenceStorage for FailingIntelligenceStore {
    fn upsert_pattern(&self, pattern: &EpisodicPattern) -> FincenterResult<()> {
        self.inner.upsert_pattern(pattern)
    }

    fn get_pattern(&self, id: &str) -> FincenterResult<Option<EpisodicPattern>> {
        if self.mode.fails(FailureMode::Patterns) {
            return Err(unavailable("patterns"));
        }
        self.inner.get_pattern(id)
    }

    fn list_patterns(&self, filter: &PatternFilter) -> FincenterResult<Vec<EpisodicPattern>> {
        if self.mode.fails(FailureMode::Patterns) {
            return Err(unavailable("patterns"));
        }
        self.inner.list_patterns(filter)
    }

    fn upsert_cluster(&self, cluster: &StressCluster) -> FincenterResult<()> {
        self.inner.upsert_cluster(cluster)
    }

    fn get_cluster(&self, id: &str) -> FincenterResult<Option<StressCluster>> {
        if self.mode.fails(FailureMode::Clusters) {
            return Err(unavailable("clusters"));
        }
        self.inner.get_cluster(id)
    }

    fn list_clusters(&self, active_only: bool) -> FincenterResult<Vec<StressCluster>> {
        if self.mode.fails(FailureMode::Clusters) {
            return Err(unavailable("clusters"));
        }
        self.inner.list_clusters(active_only)
    }

    fn acknowledge_cluster(&self, id: &str) -> FincenterResult<bool> {
        self.inner.acknowledge_cluster(id)
    }

    fn upsert_recommendation(&self, rec: &Recommendation) -> FincenterResult<()> {
        self.inner.upsert_recommendation(rec)
    }

    fn get_recommendation(&self, id: &str) -> FincenterResult<Option<Recommendation>> {
        self.inner.get_recommendation(id)
    }

    fn list_recommendations(
        &self,
        filter: &RecommendationFilter,
    ) -> FincenterResult<Vec<Recommendation>> {
        self.inner.list_recommendations(filter)
    }

    fn acknowledge_recommendation(&self, id: &str) -> FincenterResult<bool> {
        self.inner.acknowledge_recommendation(id)
    }
}
