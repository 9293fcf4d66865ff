use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Confidence;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    CostReduction,
    RiskMitigation,
    RevenueOptimization,
}

impl RecommendationCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::CostReduction => "cost_reduction",
            Self::RiskMitigation => "risk_mitigation",
            Self::RevenueOptimization => "revenue_optimization",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "cost_reduction" => Some(Self::CostReduction),
            "risk_mitigation" => Some(Self::RiskMitigation),
            "revenue_optimization" => Some(Self::RevenueOptimization),
            _ => None,
        }
    }
}

/// A human-facing, acknowledgeable action item.
///
/// `id` is derived from the generating fact, so regeneration upserts in place.
/// `acknowledged` is the only field regeneration must never reset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub id: String,
    pub category: RecommendationCategory,
    pub title: String,
    pub description: String,
    /// Weighted score in [0, 100].
    pub priority_score: f64,
    /// Currency amount the action is expected to protect or recover.
    pub expected_impact: f64,
    pub confidence: Confidence,
    pub supporting_evidence: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub acknowledged: bool,
}
