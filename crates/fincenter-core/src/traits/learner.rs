use crate::errors::FincenterResult;
use crate::models::{DegradationEvent, EpisodicPattern};

/// Result of a full pattern-detection pass.
#[derive(Debug, Clone, Default)]
pub struct DetectionOutcome {
    pub patterns: Vec<EpisodicPattern>,
    /// Detectors that could not read their data and contributed nothing.
    pub degraded: Vec<DegradationEvent>,
}

/// Learns recurring behaviour from ledger history.
pub trait IPatternLearner: Send + Sync {
    /// Recompute every pattern from current data and upsert the results.
    fn run_pattern_detection(&self) -> FincenterResult<DetectionOutcome>;

    /// Stored patterns above the digest floor, highest confidence first.
    fn context_digest(&self, limit: usize) -> FincenterResult<Vec<EpisodicPattern>>;
}
