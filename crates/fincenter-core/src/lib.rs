//! # fincenter-core
//!
//! Foundation crate for the FINCENTER intelligence layer.
//! Defines ledger entities, intelligence models, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod ledger;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::FincenterConfig;
pub use errors::{FincenterError, FincenterResult};
pub use ledger::{BudgetPeriod, Contract, Invoice, InvoiceStatus, LedgerSnapshot};
pub use models::{
    Confidence, Decision, DecisionSource, EpisodicPattern, PatternType, Recommendation,
    RecommendationCategory, Severity, Signal, SignalType, StressCluster,
};
