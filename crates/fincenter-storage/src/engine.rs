//! StorageEngine: owns the ConnectionPool, runs migrations at startup, and
//! implements ILedgerStore + IIntelligenceStorage.

use std::path::Path;

use fincenter_core::config::StorageConfig;
use fincenter_core::errors::FincenterResult;
use fincenter_core::ledger::{BudgetPeriod, Contract, Invoice, LedgerSnapshot};
use fincenter_core::models::{EpisodicPattern, Recommendation, StressCluster};
use fincenter_core::traits::{
    ContractFilter, IIntelligenceStorage, ILedgerStore, InvoiceFilter, PatternFilter,
    RecommendationFilter,
};

use crate::migrations;
use crate::pool::{ConnectionPool, ReadPool, WriteConnection};
use crate::queries::ledger_ops::{self, ImportSummary};
use crate::queries::{cluster_ops, pattern_ops, recommendation_ops};

/// The main storage engine. Owns the connection pool and provides the full
/// ledger read interface plus persistence for derived intelligence records.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When false, all reads go through the writer: in-memory readers are
    /// isolated databases that never see the writer's rows.
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> FincenterResult<Self> {
        Self::open_with_pool_size(path, StorageConfig::default().read_pool_size)
    }

    /// Open using the path and pool size from configuration.
    pub fn from_config(config: &StorageConfig) -> FincenterResult<Self> {
        Self::open_with_pool_size(Path::new(&config.db_path), config.read_pool_size)
    }

    fn open_with_pool_size(path: &Path, read_pool_size: usize) -> FincenterResult<Self> {
        // Read-only connections need the file and schema to exist first.
        let writer = WriteConnection::open(path)?;
        writer.with_conn_sync(|conn| migrations::run_migrations(conn).map(|_| ()))?;
        let readers = ReadPool::open(path, read_pool_size)?;

        tracing::info!(path = %path.display(), readers = readers.size(), "storage opened");
        Ok(Self {
            pool: ConnectionPool {
                writer,
                readers,
                db_path: Some(path.to_path_buf()),
            },
            use_read_pool: true,
        })
    }

    /// Open an in-memory storage engine (for testing and ephemeral runs).
    pub fn open_in_memory() -> FincenterResult<Self> {
        let pool = ConnectionPool::open_in_memory()?;
        pool.writer
            .with_conn_sync(|conn| migrations::run_migrations(conn).map(|_| ()))?;
        Ok(Self {
            pool,
            use_read_pool: false,
        })
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Current schema version.
    pub fn schema_version(&self) -> FincenterResult<u32> {
        self.pool.writer.with_conn_sync(migrations::current_version)
    }

    /// Execute a read-only query on the best available connection.
    fn with_reader<F, T>(&self, f: F) -> FincenterResult<T>
    where
        F: FnOnce(&rusqlite::Connection) -> FincenterResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }

    // --- Ledger ingest ---

    /// Upsert a full ledger snapshot in one transaction.
    pub fn import_ledger(&self, snapshot: &LedgerSnapshot) -> FincenterResult<ImportSummary> {
        let summary = self
            .pool
            .writer
            .with_conn_sync(|conn| ledger_ops::import_snapshot(conn, snapshot))?;
        tracing::info!(
            budgets = summary.budgets,
            invoices = summary.invoices,
            contracts = summary.contracts,
            "ledger imported"
        );
        Ok(summary)
    }

    pub fn upsert_budget_period(&self, period: &BudgetPeriod) -> FincenterResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| ledger_ops::upsert_budget_period(conn, period))
    }

    pub fn upsert_invoice(&self, invoice: &Invoice) -> FincenterResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| ledger_ops::upsert_invoice(conn, invoice))
    }

    pub fn upsert_contract(&self, contract: &Contract) -> FincenterResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| ledger_ops::upsert_contract(conn, contract))
    }
}

impl ILedgerStore for StorageEngine {
    fn budget_periods(&self) -> FincenterResult<Vec<BudgetPeriod>> {
        self.with_reader(ledger_ops::list_budget_periods)
    }

    fn invoices(&self, filter: &InvoiceFilter) -> FincenterResult<Vec<Invoice>> {
        self.with_reader(|conn| ledger_ops::list_invoices(conn, filter))
    }

    fn contracts(&self, filter: &ContractFilter) -> FincenterResult<Vec<Contract>> {
        self.with_reader(|conn| ledger_ops::list_contracts(conn, filter))
    }
}

impl IIntelligenceStorage for StorageEngine {
    fn upsert_pattern(&self, pattern: &EpisodicPattern) -> FincenterResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| pattern_ops::upsert_pattern(conn, pattern))
    }

    fn get_pattern(&self, id: &str) -> FincenterResult<Option<EpisodicPattern>> {
        self.with_reader(|conn| pattern_ops::get_pattern(conn, id))
    }

    fn list_patterns(&self, filter: &PatternFilter) -> FincenterResult<Vec<EpisodicPattern>> {
        self.with_reader(|conn| pattern_ops::list_patterns(conn, filter))
    }

    fn upsert_cluster(&self, cluster: &StressCluster) -> FincenterResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| cluster_ops::upsert_cluster(conn, cluster))
    }

    fn get_cluster(&self, id: &str) -> FincenterResult<Option<StressCluster>> {
        self.with_reader(|conn| cluster_ops::get_cluster(conn, id))
    }

    fn list_clusters(&self, active_only: bool) -> FincenterResult<Vec<StressCluster>> {
        self.with_reader(|conn| cluster_ops::list_clusters(conn, active_only))
    }

    fn acknowledge_cluster(&self, id: &str) -> FincenterResult<bool> {
        self.pool
            .writer
            .with_conn_sync(|conn| cluster_ops::acknowledge_cluster(conn, id))
    }

    fn upsert_recommendation(&self, rec: &Recommendation) -> FincenterResult<()> {
        self.pool
            .writer
            .with_conn_sync(|conn| recommendation_ops::upsert_recommendation(conn, rec))
    }

    fn get_recommendation(&self, id: &str) -> FincenterResult<Option<Recommendation>> {
        self.with_reader(|conn| recommendation_ops::get_recommendation(conn, id))
    }

    fn list_recommendations(
        &self,
        filter: &RecommendationFilter,
    ) -> FincenterResult<Vec<Recommendation>> {
        self.with_reader(|conn| recommendation_ops::list_recommendations(conn, filter))
    }

    fn acknowledge_recommendation(&self, id: &str) -> FincenterResult<bool> {
        self.pool
            .writer
            .with_conn_sync(|conn| recommendation_ops::acknowledge_recommendation(conn, id))
    }
}
