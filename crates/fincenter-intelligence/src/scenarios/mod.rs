//! Named stress scenarios generated from a ledger summary.
//!
//! The generator is asked for a JSON array; anything it returns that cannot
//! be parsed, including an unavailable generator, falls back to three
//! built-in scenarios. Scenarios are recomputed on demand and never stored.

mod context;
mod fallback;
mod parse;

pub use context::{BudgetSummary, ContractSummary, InvoiceSummary, LedgerSummary};
pub use fallback::fallback_scenarios;
pub use parse::{parse_scenarios, strip_fences};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use fincenter_core::models::DegradationEvent;
use fincenter_core::traits::{ILedgerStore, INarrativeGenerator};

pub const MAX_SCENARIOS: usize = 3;

const SCENARIO_SYSTEM_PROMPT: &str = "You are a senior financial risk analyst.";

const SCENARIO_SCHEMA: &str = r#"[
  {
    "name": "Scenario Name",
    "probability": 0.35,
    "description": "2-3 sentence description of the scenario",
    "budget_impact_pct": -12,
    "cashflow_impact_pct": -18,
    "key_risks": ["risk 1", "risk 2", "risk 3"],
    "recommended_actions": ["action 1", "action 2", "action 3"]
  }
]"#;

fn default_name() -> String {
    "Unnamed Scenario".to_string()
}

fn default_probability() -> f64 {
    0.33
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// `scenario_` + digest of the name; assigned after parsing.
    #[serde(default)]
    pub id: String,
    #[serde(default = "default_name")]
    pub name: String,
    #[serde(default = "default_probability")]
    pub probability: f64,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub budget_impact_pct: f64,
    #[serde(default)]
    pub cashflow_impact_pct: f64,
    #[serde(default)]
    pub key_risks: Vec<String>,
    #[serde(default)]
    pub recommended_actions: Vec<String>,
}

impl Scenario {
    #[allow(clippy::too_many_arguments)]
    pub(crate) fn named(
        name: &str,
        probability: f64,
        description: &str,
        budget_impact_pct: f64,
        cashflow_impact_pct: f64,
        key_risks: Vec<String>,
        recommended_actions: Vec<String>,
    ) -> Self {
        let mut scenario = Self {
            id: String::new(),
            name: name.to_string(),
            probability,
            description: description.to_string(),
            budget_impact_pct,
            cashflow_impact_pct,
            key_risks,
            recommended_actions,
        };
        scenario.normalize();
        scenario
    }

    /// Deterministic id for a scenario name.
    pub fn compute_id(name: &str) -> String {
        let hash = blake3::hash(name.trim().as_bytes()).to_hex();
        format!("scenario_{}", &hash[..8])
    }

    /// Assign the id and clamp probability into `[0, 1]`.
    pub(crate) fn normalize(&mut self) {
        self.id = Self::compute_id(&self.name);
        self.probability = self.probability.clamp(0.0, 1.0);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScenarioOrigin {
    Generated,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct ScenarioSet {
    pub scenarios: Vec<Scenario>,
    pub origin: ScenarioOrigin,
    /// The ledger summary sent to the generator.
    pub context: String,
    /// Set when the fallback was used.
    pub degraded: Option<DegradationEvent>,
}

fn build_prompt(context: &str) -> String {
    format!(
        "Based on the following financial data summary, generate exactly {MAX_SCENARIOS} named \
         financial scenarios.\nReturn ONLY a valid JSON array (no markdown, no explanation) with \
         this schema:\n{SCENARIO_SCHEMA}\n\n{context}\n\nGenerate {MAX_SCENARIOS} distinct \
         scenarios: one pessimistic, one base case, one optimistic.\nEnsure probabilities sum \
         to approximately 1.0.\n"
    )
}

/// Summarize the ledger, ask the generator for scenarios, and fall back to
/// the built-in set on any failure.
pub fn generate_scenarios(
    ledger: &dyn ILedgerStore,
    generator: &dyn INarrativeGenerator,
    today: NaiveDate,
) -> ScenarioSet {
    let context = LedgerSummary::collect(ledger, today).render();
    let prompt = build_prompt(&context);

    let result = generator
        .generate(SCENARIO_SYSTEM_PROMPT, &prompt)
        .and_then(|raw| parse_scenarios(&raw));

    match result {
        Ok(scenarios) => {
            info!(
                generator = generator.name(),
                scenarios = scenarios.len(),
                "scenarios generated"
            );
            ScenarioSet {
                scenarios,
                origin: ScenarioOrigin::Generated,
                context,
                degraded: None,
            }
        }
        Err(e) => {
            warn!(generator = generator.name(), error = %e, "scenario generation degraded");
            ScenarioSet {
                scenarios: fallback_scenarios(),
                origin: ScenarioOrigin::Fallback,
                context,
                degraded: Some(DegradationEvent::new(
                    "scenarios.generator",
                    e.to_string(),
                    "built-in scenarios",
                )),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_depend_only_on_name() {
        assert_eq!(
            Scenario::compute_id("Controlled Recovery"),
            Scenario::compute_id(" Controlled Recovery ")
        );
        assert_ne!(
            Scenario::compute_id("Controlled Recovery"),
            Scenario::compute_id("Supply Chain Stress")
        );
        assert_eq!(Scenario::compute_id("x").len(), "scenario_".len() + 8);
    }

    #[test]
    fn fallback_set_is_complete() {
        let set = fallback_scenarios();
        assert_eq!(set.len(), MAX_SCENARIOS);
        for s in &set {
            assert!(!s.key_risks.is_empty());
            assert!(!s.recommended_actions.is_empty());
            assert_eq!(s.id, Scenario::compute_id(&s.name));
        }
        let total: f64 = set.iter().map(|s| s.probability).sum();
        assert!((total - 1.05).abs() < 1e-9);
    }

    #[test]
    fn prompt_embeds_context_and_schema() {
        let prompt = build_prompt("=== CURRENT FINANCIAL CONTEXT ===");
        assert!(prompt.contains("\"recommended_actions\""));
        assert!(prompt.contains("=== CURRENT FINANCIAL CONTEXT ==="));
    }
}
