//! # fincenter-correlation
//!
//! Detects multi-factor financial stress that no single metric flags alone.
//! Independent checks each emit weak [`Signal`](fincenter_core::Signal)s;
//! their weights are summed and, at or above the configured threshold, a
//! content-addressed [`StressCluster`](fincenter_core::StressCluster) is upserted.

pub mod checks;
pub mod engine;
pub mod scoring;

pub use checks::{CheckContext, WeakSignalCheck};
pub use engine::CorrelationEngine;
