use crate::errors::FincenterResult;
use crate::models::{
    EpisodicPattern, PatternType, Recommendation, RecommendationCategory, StressCluster,
};

/// Narrowing for pattern listings.
#[derive(Debug, Clone, Default)]
pub struct PatternFilter {
    pub pattern_type: Option<PatternType>,
    pub min_confidence: Option<f64>,
}

impl PatternFilter {
    pub fn min_confidence(floor: f64) -> Self {
        Self {
            pattern_type: None,
            min_confidence: Some(floor),
        }
    }

    pub fn of_type(pattern_type: PatternType) -> Self {
        Self {
            pattern_type: Some(pattern_type),
            min_confidence: None,
        }
    }

    pub fn matches(&self, pattern: &EpisodicPattern) -> bool {
        self.pattern_type.map_or(true, |t| pattern.pattern_type == t)
            && self
                .min_confidence
                .map_or(true, |floor| pattern.confidence.value() >= floor)
    }
}

/// Narrowing for recommendation listings.
#[derive(Debug, Clone, Default)]
pub struct RecommendationFilter {
    pub acknowledged: Option<bool>,
    pub category: Option<RecommendationCategory>,
    pub limit: Option<usize>,
}

impl RecommendationFilter {
    pub fn matches(&self, rec: &Recommendation) -> bool {
        self.acknowledged.map_or(true, |a| rec.acknowledged == a)
            && self.category.map_or(true, |c| rec.category == c)
    }
}

/// Persistence for derived intelligence records.
///
/// Every write is an upsert keyed by the record's deterministic id.
/// Upserts refresh all fields except an existing `acknowledged = true`.
/// Listings are ordered by descending confidence / score / priority.
pub trait IIntelligenceStorage: Send + Sync {
    // --- Episodic patterns ---
    fn upsert_pattern(&self, pattern: &EpisodicPattern) -> FincenterResult<()>;
    fn get_pattern(&self, id: &str) -> FincenterResult<Option<EpisodicPattern>>;
    fn list_patterns(&self, filter: &PatternFilter) -> FincenterResult<Vec<EpisodicPattern>>;

    // --- Stress clusters ---
    fn upsert_cluster(&self, cluster: &StressCluster) -> FincenterResult<()>;
    fn get_cluster(&self, id: &str) -> FincenterResult<Option<StressCluster>>;
    fn list_clusters(&self, active_only: bool) -> FincenterResult<Vec<StressCluster>>;
    /// Returns `false` when no cluster has this id. Idempotent.
    fn acknowledge_cluster(&self, id: &str) -> FincenterResult<bool>;

    // --- Recommendations ---
    fn upsert_recommendation(&self, rec: &Recommendation) -> FincenterResult<()>;
    fn get_recommendation(&self, id: &str) -> FincenterResult<Option<Recommendation>>;
    fn list_recommendations(
        &self,
        filter: &RecommendationFilter,
    ) -> FincenterResult<Vec<Recommendation>>;
    /// Returns `false` when no recommendation has this id. Idempotent.
    fn acknowledge_recommendation(&self, id: &str) -> FincenterResult<bool>;
}
