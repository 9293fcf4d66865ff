use crate::errors::FincenterResult;
use crate::models::{DegradationEvent, Recommendation};
use crate::traits::RecommendationFilter;

/// Result of a recommendation generation pass.
#[derive(Debug, Clone, Default)]
pub struct GenerationOutcome {
    /// Generated items as persisted, highest priority first.
    pub recommendations: Vec<Recommendation>,
    pub degraded: Vec<DegradationEvent>,
}

/// Turns ledger facts into acknowledgeable recommendations.
pub trait IRecommender: Send + Sync {
    fn generate(&self) -> FincenterResult<GenerationOutcome>;
    fn list(&self, filter: &RecommendationFilter) -> FincenterResult<Vec<Recommendation>>;
    /// Idempotent; returns `false` for an unknown id.
    fn acknowledge(&self, id: &str) -> FincenterResult<bool>;
}
