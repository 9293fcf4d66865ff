//! # fincenter-storage
//!
//! SQLite persistence: one write connection plus a round-robin read pool,
//! versioned migrations, ledger ingest/read queries, and upsert-by-id for
//! episodic patterns, stress clusters, and recommendations.

pub mod engine;
pub mod migrations;
pub mod pool;
pub mod queries;

pub use engine::StorageEngine;

use fincenter_core::errors::{FincenterError, StorageError};

/// Wrap a lower-level failure message as a storage error.
pub(crate) fn to_storage_err(message: String) -> FincenterError {
    FincenterError::StorageError(StorageError::SqliteError { message })
}

pub(crate) fn corrupt_row(table: &str, reason: impl Into<String>) -> FincenterError {
    FincenterError::StorageError(StorageError::CorruptRow {
        table: table.to_string(),
        reason: reason.into(),
    })
}

pub(crate) fn poisoned(role: &str) -> FincenterError {
    FincenterError::StorageError(StorageError::PoolPoisoned {
        role: role.to_string(),
    })
}
