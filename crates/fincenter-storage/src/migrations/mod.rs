//! Versioned schema migrations. Each version runs once, inside its own
//! transaction, and is recorded in `schema_version`.

mod v001_ledger_tables;
mod v002_intelligence_tables;

use rusqlite::{params, Connection};

use fincenter_core::errors::{FincenterError, FincenterResult, StorageError};

use crate::to_storage_err;

type MigrationFn = fn(&Connection) -> FincenterResult<()>;

/// All migrations in application order.
const MIGRATIONS: &[(u32, MigrationFn)] = &[
    (1, v001_ledger_tables::migrate),
    (2, v002_intelligence_tables::migrate),
];

/// The schema version a fully migrated database reports.
pub const LATEST_VERSION: u32 = 2;

/// Apply every migration newer than the recorded schema version.
/// Returns the number of migrations applied.
pub fn run_migrations(conn: &Connection) -> FincenterResult<usize> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version    INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (strftime('%Y-%m-%dT%H:%M:%fZ', 'now'))
        );",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;

    let current = current_version(conn)?;
    let mut applied = 0;
    for (version, migrate) in MIGRATIONS.iter().filter(|(v, _)| *v > current) {
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| to_storage_err(format!("migration begin: {e}")))?;
        let result = migrate(&tx).and_then(|()| {
            tx.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![version],
            )
            .map_err(|e| to_storage_err(e.to_string()))
        });
        match result {
            Ok(_) => {
                tx.commit().map_err(|e| migration_failed(*version, e))?;
                applied += 1;
            }
            Err(e) => {
                let _ = tx.rollback();
                return Err(migration_failed(*version, e));
            }
        }
    }

    if applied > 0 {
        tracing::info!(from = current, to = LATEST_VERSION, applied, "schema migrated");
    }
    Ok(applied)
}

/// Highest applied migration version, or 0 for a fresh database.
pub fn current_version(conn: &Connection) -> FincenterResult<u32> {
    conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )
    .map_err(|e| to_storage_err(e.to_string()))
}

fn migration_failed(version: u32, reason: impl ToString) -> FincenterError {
    FincenterError::StorageError(StorageError::MigrationFailed {
        version,
        reason: reason.to_string(),
    })
}
