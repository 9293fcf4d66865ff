//! Narrative answers grounded in the intelligence layer's current state.
//!
//! The context handed to the generator is plain text built from the
//! episodic digest, the active stress clusters, and the top of the ranked
//! decision feed. The generator itself is opaque.

use serde::Serialize;
use tracing::warn;

use fincenter_core::models::{Decision, DegradationEvent, StressCluster};
use fincenter_core::traits::INarrativeGenerator;

/// Decisions from the top of the feed included in the context.
pub const CONTEXT_DECISION_LIMIT: usize = 5;

/// Returned when the generator fails.
pub const FALLBACK_ANSWER: &str = "I don't have enough data to answer that.";

const EMPTY_CONTEXT: &str = "No relevant context found.";

/// Wrap rendered context in the assistant's instructions.
pub fn build_system_prompt(context: &str) -> String {
    format!(
        "You are FINCENTER's financial intelligence assistant.\n\
         You answer questions about invoices, contracts, budgets, and financial analytics\n\
         based exclusively on the data provided in the context below.\n\n\
         Rules:\n\
         - Be concise and factual.\n\
         - Format numbers with thousands separators and currency where appropriate.\n\
         - If the answer is not in the context, say \"{FALLBACK_ANSWER}\"\n\
         - Never make up figures.\n\n\
         --- FINANCIAL DATA CONTEXT ---\n\
         {context}\n\
         --- END CONTEXT ---"
    )
}

#[derive(Debug, Clone, Default)]
pub struct NarrativeContext {
    /// Rendered episodic digest; empty when no pattern clears the floor.
    pub digest: String,
    pub clusters: Vec<StressCluster>,
    pub decisions: Vec<Decision>,
}

impl NarrativeContext {
    /// Names of the non-empty sections, in render order.
    pub fn sources(&self) -> Vec<&'static str> {
        let mut sources = Vec::new();
        if !self.digest.is_empty() {
            sources.push("memory");
        }
        if !self.clusters.is_empty() {
            sources.push("clusters");
        }
        if !self.decisions.is_empty() {
            sources.push("decisions");
        }
        sources
    }

    pub fn render(&self) -> String {
        let mut parts = Vec::new();
        if !self.digest.is_empty() {
            parts.push(self.digest.clone());
        }
        if !self.clusters.is_empty() {
            parts.push(render_clusters(&self.clusters));
        }
        if !self.decisions.is_empty() {
            parts.push(render_decisions(&self.decisions));
        }
        if parts.is_empty() {
            return EMPTY_CONTEXT.to_string();
        }
        parts.join("\n\n")
    }
}

fn render_clusters(clusters: &[StressCluster]) -> String {
    let mut lines = vec!["ACTIVE STRESS CLUSTERS:".to_string()];
    for cluster in clusters {
        let details: Vec<String> = cluster
            .signals
            .iter()
            .map(|s| format!("{} ({})", s.subject, s.detail))
            .collect();
        lines.push(format!(
            "  [score={}] {}: {}",
            cluster.score,
            cluster.id,
            details.join("; ")
        ));
    }
    lines.join("\n")
}

fn render_decisions(decisions: &[Decision]) -> String {
    let mut lines = vec!["TOP PRIORITY DECISIONS:".to_string()];
    for d in decisions.iter().take(CONTEXT_DECISION_LIMIT) {
        lines.push(format!(
            "  [{} | priority={:.1}] {}: {} Action: {}",
            d.severity.as_str().to_ascii_uppercase(),
            d.priority_score,
            d.title,
            d.description,
            d.recommended_action
        ));
    }
    lines.join("\n")
}

#[derive(Debug, Clone, Serialize)]
pub struct NarrativeAnswer {
    pub answer: String,
    pub context_used: String,
    pub sources: Vec<String>,
    /// Set when the generator failed and the fallback answer was used.
    #[serde(skip)]
    pub degraded: Option<DegradationEvent>,
}

/// Ask the generator a question over `context`.
pub fn compose_answer(
    generator: &dyn INarrativeGenerator,
    question: &str,
    context: &NarrativeContext,
) -> NarrativeAnswer {
    let context_used = context.render();
    let sources = context.sources().into_iter().map(String::from).collect();
    let system_prompt = build_system_prompt(&context_used);

    match generator.generate(&system_prompt, question) {
        Ok(answer) if !answer.trim().is_empty() => NarrativeAnswer {
            answer,
            context_used,
            sources,
            degraded: None,
        },
        Ok(_) => fallback(generator, context_used, sources, "generator returned empty text"),
        Err(e) => fallback(generator, context_used, sources, &e.to_string()),
    }
}

fn fallback(
    generator: &dyn INarrativeGenerator,
    context_used: String,
    sources: Vec<String>,
    failure: &str,
) -> NarrativeAnswer {
    warn!(generator = generator.name(), failure, "narrative degraded");
    NarrativeAnswer {
        answer: FALLBACK_ANSWER.to_string(),
        context_used,
        sources,
        degraded: Some(DegradationEvent::new(
            "narrative.generator",
            failure,
            "fixed not-enough-data answer",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fincenter_core::errors::FincenterResult;
    use fincenter_core::models::{DecisionSource, Severity};
    use fincenter_core::traits::NoOpNarrator;

    struct Echo;

    impl INarrativeGenerator for Echo {
        fn generate(&self, system_prompt: &str, user_prompt: &str) -> FincenterResult<String> {
            Ok(format!("{user_prompt}|{}", system_prompt.len()))
        }

        fn name(&self) -> &str {
            "echo"
        }
    }

    fn decision(id: &str, score: f64) -> Decision {
        Decision {
            id: id.to_string(),
            source: DecisionSource::Invoice,
            severity: Severity::Critical,
            title: format!("Overdue invoice {id}"),
            description: "Long overdue.".to_string(),
            recommended_action: "Escalate.".to_string(),
            financial_impact: 0.5,
            priority_score: score,
        }
    }

    #[test]
    fn empty_context_renders_placeholder() {
        let ctx = NarrativeContext::default();
        assert_eq!(ctx.render(), EMPTY_CONTEXT);
        assert!(ctx.sources().is_empty());
    }

    #[test]
    fn decisions_are_limited() {
        let ctx = NarrativeContext {
            decisions: (0..8).map(|i| decision(&format!("D{i}"), 10.0)).collect(),
            ..NarrativeContext::default()
        };
        let text = ctx.render();
        assert_eq!(text.lines().count(), 1 + CONTEXT_DECISION_LIMIT);
        assert!(text.contains("[CRITICAL | priority=10.0] Overdue invoice D0"));
        assert!(!text.contains("D5"));
    }

    #[test]
    fn generator_answer_passes_through() {
        let ctx = NarrativeContext {
            digest: "LEARNED FINANCIAL PATTERNS (Episodic Memory):".to_string(),
            ..NarrativeContext::default()
        };
        let answer = compose_answer(&Echo, "Who overbills?", &ctx);
        assert!(answer.answer.starts_with("Who overbills?|"));
        assert_eq!(answer.sources, vec!["memory".to_string()]);
        assert!(answer.degraded.is_none());
    }

    #[test]
    fn unavailable_generator_falls_back() {
        let answer = compose_answer(&NoOpNarrator, "Anything?", &NarrativeContext::default());
        assert_eq!(answer.answer, FALLBACK_ANSWER);
        let event = answer.degraded.unwrap();
        assert_eq!(event.component, "narrative.generator");
    }
}
