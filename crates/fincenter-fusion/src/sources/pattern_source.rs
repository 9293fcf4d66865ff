use fincenter_core::errors::FincenterResult;
use fincenter_core::models::{Confidence, Decision, DecisionSource, Severity};
use fincenter_core::traits::PatternFilter;

use super::{CandidateSource, SourceContext};
use crate::scoring;

/// Learned patterns at or above the confidence floor. Confidence stands in
/// for financial impact.
pub struct PatternSource;

impl CandidateSource for PatternSource {
    fn source(&self) -> DecisionSource {
        DecisionSource::Pattern
    }

    fn candidates(&self, ctx: &SourceContext<'_>) -> FincenterResult<Vec<Decision>> {
        let patterns = ctx
            .storage
            .list_patterns(&PatternFilter::min_confidence(ctx.pattern_confidence_floor))?;

        Ok(patterns
            .into_iter()
            .map(|p| {
                let confidence = p.confidence.value();
                let severity = if confidence >= Confidence::ELEVATED {
                    Severity::Warning
                } else {
                    Severity::Info
                };
                Decision {
                    id: format!("episodic_{}", p.id),
                    source: self.source(),
                    severity,
                    title: format!(
                        "Recurring pattern: {}: {}",
                        p.pattern_type.as_str(),
                        p.subject
                    ),
                    description: p.description,
                    recommended_action: "Review historical trend and take preventive action."
                        .to_string(),
                    financial_impact: 0.0,
                    priority_score: scoring::priority_score(severity, confidence, 1.0),
                }
            })
            .collect())
    }
}
