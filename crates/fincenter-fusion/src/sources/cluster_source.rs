use fincenter_core::errors::FincenterResult;
use fincenter_core::models::{Decision, DecisionSource, Severity};

use super::{CandidateSource, SourceContext};
use crate::scoring;

const CRITICAL_SCORE: u32 = 7;
const CLUSTER_URGENCY: f64 = 1.2;

/// Active stress clusters at or above the stress threshold. `score / 10`
/// stands in for financial impact.
pub struct ClusterSource;

impl CandidateSource for ClusterSource {
    fn source(&self) -> DecisionSource {
        DecisionSource::Cluster
    }

    fn candidates(&self, ctx: &SourceContext<'_>) -> FincenterResult<Vec<Decision>> {
        let clusters = ctx.storage.list_clusters(true)?;
        Ok(clusters
            .into_iter()
            .filter(|c| c.score >= ctx.stress_threshold)
            .map(|c| {
                let severity = if c.score >= CRITICAL_SCORE {
                    Severity::Critical
                } else {
                    Severity::Warning
                };
                let impact = (c.score as f64 / 10.0).min(1.0);
                Decision {
                    id: format!("stress_{}", c.id),
                    source: self.source(),
                    severity,
                    title: format!("Financial stress cluster detected (score: {})", c.score),
                    description: "Multiple correlated weak signals indicate hidden financial stress. \
                        Individual signals are below alert threshold but combined score is high."
                        .to_string(),
                    recommended_action: "Conduct holistic financial review. \
                        Cross-check all flagged entities with management."
                        .to_string(),
                    financial_impact: 0.0,
                    priority_score: scoring::priority_score(severity, impact, CLUSTER_URGENCY),
                }
            })
            .collect())
    }
}
