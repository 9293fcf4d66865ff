use crate::errors::FincenterResult;
use crate::models::{DegradationEvent, Signal, StressCluster};

/// Result of one correlator run.
#[derive(Debug, Clone, Default)]
pub struct CorrelationOutcome {
    /// All signals collected this run, regardless of threshold.
    pub signals: Vec<Signal>,
    pub score: u32,
    /// Present only when `score` reached the stress threshold.
    pub cluster: Option<StressCluster>,
    pub degraded: Vec<DegradationEvent>,
}

/// Correlates sub-threshold anomalies into stress clusters.
pub trait ISignalCorrelator: Send + Sync {
    fn run_detection(&self) -> FincenterResult<CorrelationOutcome>;
    fn active_clusters(&self) -> FincenterResult<Vec<StressCluster>>;
}
