//! Counters shared by every engine run.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Run counters for one intelligence operation.
#[derive(Debug, Clone, Default, Serialize)]
pub struct OperationMetrics {
    pub runs: u64,
    /// Runs where at least one source degraded.
    pub degraded_runs: u64,
    /// Items produced across all runs (patterns, decisions, ...).
    pub items_total: u64,
    /// Items produced by the most recent run.
    pub last_items: usize,
    pub last_run_at: Option<DateTime<Utc>>,
}

impl OperationMetrics {
    pub fn record_run(&mut self, items: usize, degraded: usize, at: DateTime<Utc>) {
        self.runs += 1;
        if degraded > 0 {
            self.degraded_runs += 1;
        }
        self.items_total += items as u64;
        self.last_items = items;
        self.last_run_at = Some(at);
    }

    /// Fraction of runs that completed without degradation. 1.0 before any run.
    pub fn clean_ratio(&self) -> f64 {
        if self.runs == 0 {
            return 1.0;
        }
        (self.runs - self.degraded_runs) as f64 / self.runs as f64
    }
}
