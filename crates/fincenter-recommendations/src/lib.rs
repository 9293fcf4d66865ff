//! # fincenter-recommendations
//!
//! Turns ledger facts, learned patterns and stress clusters into
//! categorised action items.
//!
//! ```text
//! priority = (impact × 0.4 + urgency × 0.4 + confidence × 0.2) × 100
//! ```
//!
//! Ids derive from the generating fact (`cost_IT`, `invoice_INV-7`, ...), so
//! regeneration updates records in place and never clears an acknowledgement.

pub mod engine;
pub mod generators;
pub mod scoring;

pub use engine::RecommendationEngine;
pub use generators::{GenerationContext, RecommendationGenerator};
pub use scoring::ScoreTerms;
