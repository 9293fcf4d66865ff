//! Record every degradation event with its recovery status.
//!
//! Components are named `<operation>.<source>` (for example
//! `fusion.invoice`). A refresh reports the events of one operation; any
//! component of that operation that was active before and did not degrade
//! again is considered recovered.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use fincenter_core::models::DegradationEvent;
use serde::{Deserialize, Serialize};

use crate::tracing_setup::events;

/// Recovery status of a degradation event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecoveryStatus {
    Active,
    Recovered,
}

/// A degradation event with its recovery status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackedDegradation {
    pub event: DegradationEvent,
    pub recovery_status: RecoveryStatus,
    pub recovered_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default)]
pub struct DegradationTracker {
    events: Vec<TrackedDegradation>,
}

impl DegradationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new degradation event.
    pub fn record(&mut self, event: DegradationEvent) {
        events::degradation_triggered(&event.component, &event.failure, &event.fallback_used);
        self.events.push(TrackedDegradation {
            event,
            recovery_status: RecoveryStatus::Active,
            recovered_at: None,
        });
    }

    /// Record the outcome of one run of `operation`.
    ///
    /// Every event is recorded. Active components under `operation.` that do
    /// not appear in `run_events` are marked recovered. Returns the names of
    /// the recovered components.
    pub fn settle(&mut self, operation: &str, run_events: Vec<DegradationEvent>) -> Vec<String> {
        let still_degraded: BTreeSet<String> =
            run_events.iter().map(|e| e.component.clone()).collect();
        let prefix = format!("{operation}.");

        let recovered: Vec<String> = self
            .active_components()
            .into_iter()
            .filter(|c| c.starts_with(&prefix) && !still_degraded.contains(c))
            .collect();
        for component in &recovered {
            self.mark_recovered(component);
        }

        for event in run_events {
            self.record(event);
        }
        recovered
    }

    /// Mark every active event of a component as recovered.
    /// Returns `false` if the component had nothing active.
    pub fn mark_recovered(&mut self, component: &str) -> bool {
        let Some(degraded_for) = self.degraded_duration(component) else {
            return false;
        };
        let now = Utc::now();
        for tracked in self.events.iter_mut().filter(|t| {
            t.event.component == component && t.recovery_status == RecoveryStatus::Active
        }) {
            tracked.recovery_status = RecoveryStatus::Recovered;
            tracked.recovered_at = Some(now);
        }
        events::degradation_recovered(component, degraded_for.num_seconds());
        true
    }

    pub fn events(&self) -> &[TrackedDegradation] {
        &self.events
    }

    /// Unrecovered degradations, oldest first.
    pub fn active_degradations(&self) -> Vec<&TrackedDegradation> {
        self.events
            .iter()
            .filter(|t| t.recovery_status == RecoveryStatus::Active)
            .collect()
    }

    /// Distinct components with at least one unrecovered event.
    pub fn active_components(&self) -> BTreeSet<String> {
        self.active_degradations()
            .into_iter()
            .map(|t| t.event.component.clone())
            .collect()
    }

    /// Events for a component recorded in the last `window_secs` seconds.
    pub fn count_recent(&self, component: &str, window_secs: i64) -> usize {
        let cutoff = Utc::now() - chrono::Duration::seconds(window_secs);
        self.events
            .iter()
            .filter(|t| t.event.component == component && t.event.timestamp > cutoff)
            .count()
    }

    /// How long a component has been continuously degraded, or `None`.
    pub fn degraded_duration(&self, component: &str) -> Option<chrono::Duration> {
        let earliest = self
            .events
            .iter()
            .filter(|t| {
                t.event.component == component && t.recovery_status == RecoveryStatus::Active
            })
            .map(|t| t.event.timestamp)
            .min()?;
        Some(Utc::now() - earliest)
    }
}
