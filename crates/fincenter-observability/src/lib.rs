//! # fincenter-observability
//!
//! Structured tracing setup with span definitions per intelligence operation,
//! run counters for each engine, and degradation tracking with recovery.

pub mod degradation;
pub mod engine;
pub mod metrics;
pub mod tracing_setup;

pub use degradation::{DegradationTracker, RecoveryStatus, TrackedDegradation};
pub use engine::ObservabilityEngine;
pub use metrics::IntelligenceMetrics;
pub use tracing_setup::init_tracing;
