//! In-memory implementation of both store traits with the same ordering and
//! acknowledgement semantics as the SQLite engine.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use fincenter_core::errors::{FincenterError, FincenterResult};
use fincenter_core::ledger::{BudgetPeriod, Contract, Invoice, LedgerSnapshot};
use fincenter_core::models::{EpisodicPattern, Recommendation, StressCluster};
use fincenter_core::traits::{
    ContractFilter, IIntelligenceStorage, ILedgerStore, InvoiceFilter, PatternFilter,
    RecommendationFilter,
};

#[derive(Default)]
struct State {
    ledger: LedgerSnapshot,
    patterns: BTreeMap<String, EpisodicPattern>,
    clusters: BTreeMap<String, StressCluster>,
    recommendations: BTreeMap<String, Recommendation>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ledger(ledger: LedgerSnapshot) -> Self {
        let store = Self::default();
        store.lock().ledger = ledger;
        store
    }

    pub fn add_budget(&self, period: BudgetPeriod) {
        self.lock().ledger.budgets.push(period);
    }

    pub fn add_invoice(&self, invoice: Invoice) {
        self.lock().ledger.invoices.push(invoice);
    }

    pub fn add_contract(&self, contract: Contract) {
        self.lock().ledger.contracts.push(contract);
    }

    /// Replace the ledger while keeping derived records.
    pub fn replace_ledger(&self, ledger: LedgerSnapshot) {
        self.lock().ledger = ledger;
    }

    pub fn pattern_count(&self) -> usize {
        self.lock().patterns.len()
    }

    pub fn cluster_count(&self) -> usize {
        self.lock().clusters.len()
    }

    pub fn recommendation_count(&self) -> usize {
        self.lock().recommendations.len()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panic inside a test while holding the lock should not cascade.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl ILedgerStore for InMemoryStore {
    fn budget_periods(&self) -> FincenterResult<Vec<BudgetPeriod>> {
        Ok(self.lock().ledger.budgets.clone())
    }

    fn invoices(&self, filter: &InvoiceFilter) -> FincenterResult<Vec<Invoice>> {
        Ok(self
            .lock()
            .ledger
            .invoices
            .iter()
            .filter(|i| filter.matches(i))
            .cloned()
            .collect())
    }

    fn contracts(&self, filter: &ContractFilter) -> FincenterResult<Vec<Contract>> {
        Ok(self
            .lock()
            .ledger
            .contracts
            .iter()
            .filter(|c| filter.matches(c))
            .cloned()
            .collect())
    }
}

impl IIntelligenceStorage for InMemoryStore {
    fn upsert_pattern(&self, pattern: &EpisodicPattern) -> FincenterResult<()> {
        self.lock()
            .patterns
            .insert(pattern.id.clone(), pattern.clone());
        Ok(())
    }

    fn get_pattern(&self, id: &str) -> FincenterResult<Option<EpisodicPattern>> {
        Ok(self.lock().patterns.get(id).cloned())
    }

    fn list_patterns(&self, filter: &PatternFilter) -> FincenterResult<Vec<EpisodicPattern>> {
        let mut patterns: Vec<EpisodicPattern> = self
            .lock()
            .patterns
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();
        patterns.sort_by(|a, b| {
            b.confidence
                .value()
                .total_cmp(&a.confidence.value())
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(patterns)
    }

    fn upsert_cluster(&self, cluster: &StressCluster) -> FincenterResult<()> {
        let mut state = self.lock();
        let acknowledged = cluster.acknowledged
            || state
                .clusters
                .get(&cluster.id)
                .is_some_and(|existing| existing.acknowledged);
        state.clusters.insert(
            cluster.id.clone(),
            StressCluster {
                acknowledged,
                ..cluster.clone()
            },
        );
        Ok(())
    }

    fn get_cluster(&self, id: &str) -> FincenterResult<Option<StressCluster>> {
        Ok(self.lock().clusters.get(id).cloned())
    }

    fn list_clusters(&self, active_only: bool) -> FincenterResult<Vec<StressCluster>> {
        let mut clusters: Vec<StressCluster> = self
            .lock()
            .clusters
            .values()
            .filter(|c| !active_only || !c.acknowledged)
            .cloned()
            .collect();
        clusters.sort_by(|a, b| {
            b.score
                .cmp(&a.score)
                .then_with(|| b.detected_at.cmp(&a.detected_at))
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(clusters)
    }

    fn acknowledge_cluster(&self, id: &str) -> FincenterResult<bool> {
        Ok(match self.lock().clusters.get_mut(id) {
            Some(cluster) => {
                cluster.acknowledged = true;
                true
            }
            None => false,
        })
    }

    fn upsert_recommendation(&self, rec: &Recommendation) -> FincenterResult<()> {
        let mut state = self.lock();
        let (acknowledged, created_at) = match state.recommendations.get(&rec.id) {
            Some(existing) => (rec.acknowledged || existing.acknowledged, existing.created_at),
            None => (rec.acknowledged, rec.created_at),
        };
        state.recommendations.insert(
            rec.id.clone(),
            Recommendation {
                acknowledged,
                created_at,
                ..rec.clone()
            },
        );
        Ok(())
    }

    fn get_recommendation(&self, id: &str) -> FincenterResult<Option<Recommendation>> {
        Ok(self.lock().recommendations.get(id).cloned())
    }

    fn list_recommendations(
        &self,
        filter: &RecommendationFilter,
    ) -> FincenterResult<Vec<Recommendation>> {
        let mut recs: Vec<Recommendation> = self
            .lock()
            .recommendations
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();
        recs.sort_by(|a, b| {
            b.priority_score
                .total_cmp(&a.priority_score)
                .then_with(|| a.id.cmp(&b.id))
        });
        if let Some(limit) = filter.limit {
            recs.truncate(limit);
        }
        Ok(recs)
    }

    fn acknowledge_recommendation(&self, id: &str) -> FincenterResult<bool> {
        Ok(match self.lock().recommendations.get_mut(id) {
            Some(rec) => {
                rec.acknowledged = true;
                true
            }
            None => false,
        })
    }
}

/// Error used by the failing stores.
pub(crate) fn unavailable(source: &str) -> FincenterError {
    FincenterError::source_unavailable(source, "simulated outage")
}
