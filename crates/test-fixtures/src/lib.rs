//! Shared fixtures for FINCENTER tests: ledger builders, an in-memory store
//! implementing both store traits, a failing ledger for degradation paths,
//! and JSON fixture loading.

pub mod builders;
mod failing;
mod memory_store;

pub use builders::*;
pub use failing::{FailingIntelligenceStore, FailingLedger, FailureMode};
pub use memory_store::InMemoryStore;

use std::path::PathBuf;

use serde::de::DeserializeOwned;

use fincenter_core::ledger::LedgerSnapshot;

/// Directory holding the JSON fixture files.
pub fn fixtures_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data")
}

/// Load and deserialize a JSON fixture file.
///
/// # Panics
/// Panics if the file doesn't exist or can't be deserialized.
pub fn load_fixture<T: DeserializeOwned>(relative_path: &str) -> T {
    let path = fixtures_root().join(relative_path);
    let content = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read fixture {}: {}", path.display(), e));
    serde_json::from_str(&content)
        .unwrap_or_else(|e| panic!("Failed to parse fixture {}: {}", path.display(), e))
}

/// The sample ledger used by end-to-end tests. Dates are relative to
/// [`SAMPLE_TODAY`].
pub fn sample_ledger() -> LedgerSnapshot {
    load_fixture("sample_ledger.json")
}
