//! [`ObservabilityEngine`]: owns the metrics registry and the degradation tracker.

use fincenter_core::errors::FincenterResult;
use fincenter_core::models::DegradationEvent;

use crate::degradation::DegradationTracker;
use crate::metrics::IntelligenceMetrics;

#[derive(Debug, Default)]
pub struct ObservabilityEngine {
    pub metrics: IntelligenceMetrics,
    pub degradation: DegradationTracker,
}

impl ObservabilityEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a single degradation outside of a run.
    pub fn record_degradation(&mut self, event: DegradationEvent) {
        self.metrics.degradations_recorded += 1;
        self.degradation.record(event);
    }

    /// Record the degradation events of one run of `operation`.
    /// Returns the components that recovered with this run.
    pub fn settle_run(&mut self, operation: &str, events: Vec<DegradationEvent>) -> Vec<String> {
        self.degradation.settle(operation, events)
    }

    pub fn mark_recovered(&mut self, component: &str) -> bool {
        self.degradation.mark_recovered(component)
    }

    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Serialize current metrics and degradation state to JSON.
    pub fn metrics_snapshot(&self) -> FincenterResult<serde_json::Value> {
        let metrics = serde_json::to_value(&self.metrics)?;
        let active = self.degradation.active_components();
        Ok(serde_json::json!({
            "metrics": metrics,
            "active_degradations": active.len(),
            "degraded_components": active,
        }))
    }
}
