//! # fincenter-fusion
//!
//! Fuses five heterogeneous candidate sources into one ranked decision feed.
//!
//! ```text
//! priority = severity_weight × financial_impact × urgency × 10
//! ```
//!
//! Each source is sorted on its own and capped before the global re-rank,
//! so no single high-volume source can crowd the others out of the feed.

pub mod engine;
pub mod ranking;
pub mod scoring;
pub mod sources;

pub use engine::{FusionEngine, FusionReport};
pub use sources::{CandidateSource, SourceContext};
