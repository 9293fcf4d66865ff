//! Intelligence metrics registry.
//!
//! [`IntelligenceMetrics`] owns one [`OperationMetrics`] per engine plus the
//! counters that only make sense for a single operation.

pub mod operation_metrics;

use chrono::{DateTime, Utc};
pub use operation_metrics::OperationMetrics;

#[derive(Debug, Clone, Default, serde::Serialize)]
pub struct IntelligenceMetrics {
    pub episodic: OperationMetrics,
    pub correlation: OperationMetrics,
    pub fusion: OperationMetrics,
    pub recommendations: OperationMetrics,
    /// Correlation runs whose score reached the stress threshold.
    pub clusters_emitted: u64,
    pub highest_stress_score: u32,
    pub degradations_recorded: u64,
}

impl IntelligenceMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_pattern_run(&mut self, patterns: usize, degraded: usize, at: DateTime<Utc>) {
        self.episodic.record_run(patterns, degraded, at);
        self.degradations_recorded += degraded as u64;
    }

    /// `signals` counts as the run's items; a cluster is counted separately.
    pub fn record_correlation_run(
        &mut self,
        signals: usize,
        score: u32,
        cluster_emitted: bool,
        degraded: usize,
        at: DateTime<Utc>,
    ) {
        self.correlation.record_run(signals, degraded, at);
        if cluster_emitted {
            self.clusters_emitted += 1;
        }
        self.highest_stress_score = self.highest_stress_score.max(score);
        self.degradations_recorded += degraded as u64;
    }

    pub fn record_fusion_run(&mut self, decisions: usize, degraded: usize, at: DateTime<Utc>) {
        self.fusion.record_run(decisions, degraded, at);
        self.degradations_recorded += degraded as u64;
    }

    pub fn record_recommendation_run(
        &mut self,
        recommendations: usize,
        degraded: usize,
        at: DateTime<Utc>,
    ) {
        self.recommendations.record_run(recommendations, degraded, at);
        self.degradations_recorded += degraded as u64;
    }

    /// Reset all counters (useful for testing or periodic rotation).
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn correlation_tracks_peak_score_and_emissions() {
        let mut m = IntelligenceMetrics::new();
        let at = Utc::now();
        m.record_correlation_run(5, 6, true, 0, at);
        m.record_correlation_run(2, 2, false, 1, at);
        assert_eq!(m.correlation.runs, 2);
        assert_eq!(m.correlation.items_total, 7);
        assert_eq!(m.correlation.last_items, 2);
        assert_eq!(m.clusters_emitted, 1);
        assert_eq!(m.highest_stress_score, 6);
        assert_eq!(m.degradations_recorded, 1);
        assert!((m.correlation.clean_ratio() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn reset_clears_everything() {
        let mut m = IntelligenceMetrics::new();
        m.record_fusion_run(13, 2, Utc::now());
        m.reset();
        assert_eq!(m.fusion.runs, 0);
        assert_eq!(m.degradations_recorded, 0);
        assert!(m.fusion.last_run_at.is_none());
    }
}
