//! End-to-end runs of the intelligence runtime over the sample ledger.

use std::sync::{Arc, Mutex};

use fincenter_core::errors::{FincenterError, FincenterResult};
use fincenter_core::models::RecommendationCategory;
use fincenter_core::traits::{FixedClock, INarrativeGenerator, RecommendationFilter};
use fincenter_intelligence::narrative::FALLBACK_ANSWER;
use fincenter_intelligence::{
    IntelligenceRuntime, RuntimeOptions, ScenarioOrigin, StorageMode,
};
use test_fixtures::{sample_ledger, today};

/// Returns a fixed reply and remembers the prompts it was given.
struct Scripted {
    reply: FincenterResult<String>,
    prompts: Mutex<Vec<(String, String)>>,
}

impl Scripted {
    fn replying(text: &str) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(text.to_string()),
            prompts: Mutex::new(Vec::new()),
        })
    }
}

impl INarrativeGenerator for Scripted {
    fn generate(&self, system_prompt: &str, user_prompt: &str) -> FincenterResult<String> {
        self.prompts
            .lock()
            .unwrap()
            .push((system_prompt.to_string(), user_prompt.to_string()));
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(e) => Err(FincenterError::NarrativeUnavailable {
                reason: e.to_string(),
            }),
        }
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

fn options(narrator: Option<Arc<dyn INarrativeGenerator>>) -> RuntimeOptions {
    RuntimeOptions {
        storage: StorageMode::InMemory,
        clock: Some(Arc::new(FixedClock::on(today()))),
        narrator,
        ..Default::default()
    }
}

fn narrated(narrator: Arc<Scripted>) -> RuntimeOptions {
    let narrator: Arc<dyn INarrativeGenerator> = narrator;
    options(Some(narrator))
}

fn sample_runtime() -> IntelligenceRuntime {
    let runtime = IntelligenceRuntime::new(options(None)).unwrap();
    runtime.import_ledger(&sample_ledger()).unwrap();
    runtime
}

// ═══ REFRESH ═══

#[test]
fn full_refresh_over_sample_ledger() {
    let runtime = sample_runtime();
    let report = runtime.refresh().unwrap();

    assert_eq!(report.patterns.len(), 4);
    assert_eq!(report.stress_score, 7);
    let cluster = report.cluster.as_ref().expect("score above threshold");
    assert!(cluster.id.starts_with("ws_"));
    assert!(report.degraded.is_empty());

    let ids: Vec<_> = report.recommendations.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "contract_C-200",
            "invoice_GLX-003",
            "weaksignal_cluster",
            "overbilling_Acme_Cloud",
            "invoice_GLX-002",
            "cost_IT",
            "invoice_GLX-001",
            "reallocate_HR",
            "contract_C-300",
        ]
    );

    let active = runtime.active_clusters().unwrap();
    assert_eq!(active.len(), 1);
    assert_eq!(active[0].id, cluster.id);
}

#[test]
fn refresh_is_idempotent() {
    let runtime = sample_runtime();
    let first = runtime.refresh().unwrap();
    let second = runtime.refresh().unwrap();

    let key = |r: &fincenter_intelligence::RefreshReport| {
        r.patterns
            .iter()
            .map(|p| (p.id.clone(), p.confidence.value(), p.evidence_count))
            .collect::<Vec<_>>()
    };
    assert_eq!(key(&first), key(&second));
    assert_eq!(
        first.cluster.map(|c| c.id),
        second.cluster.map(|c| c.id)
    );
    assert_eq!(runtime.recommendations(&RecommendationFilter::default()).unwrap().len(), 9);
}

#[test]
fn refresh_patterns_returns_everything_detected() {
    let runtime = sample_runtime();
    let patterns = runtime.refresh_patterns().unwrap();
    assert_eq!(patterns.len(), 4);

    // The read operation applies the digest floor.
    assert_eq!(runtime.patterns(None).unwrap().len(), 3);
    assert_eq!(runtime.patterns(Some(0.0)).unwrap().len(), 4);
    assert_eq!(runtime.patterns(Some(0.9)).unwrap().len(), 1);
}

#[test]
fn empty_ledger_refresh_is_quiet() {
    let runtime = IntelligenceRuntime::new(options(None)).unwrap();
    let report = runtime.refresh().unwrap();
    assert!(report.patterns.is_empty());
    assert!(report.cluster.is_none());
    assert!(report.recommendations.is_empty());
    assert!(runtime.ranked_decisions().is_empty());
}

// ═══ FEED & ACKNOWLEDGEMENT ═══

#[test]
fn ranked_feed_follows_refresh() {
    let runtime = sample_runtime();
    runtime.refresh().unwrap();

    let feed = runtime.ranked_decisions();
    assert_eq!(feed.len(), 13);
    assert_eq!(feed[0].id, "overdue_invoice_GLX-003");
    assert!((feed[0].priority_score - 44.625).abs() < 1e-9);
}

#[test]
fn acknowledging_cluster_removes_it_from_feed() {
    let runtime = sample_runtime();
    let cluster = runtime.refresh().unwrap().cluster.unwrap();

    assert!(runtime.acknowledge_cluster(&cluster.id).unwrap());
    assert!(runtime.active_clusters().unwrap().is_empty());
    assert!(runtime
        .ranked_decisions()
        .iter()
        .all(|d| !d.id.starts_with("stress_")));
    assert!(!runtime.acknowledge_cluster("ws_missing").unwrap());
}

#[test]
fn acknowledged_recommendation_survives_refresh() {
    let runtime = sample_runtime();
    runtime.refresh().unwrap();
    assert!(runtime.acknowledge_recommendation("cost_IT").unwrap());

    let report = runtime.refresh().unwrap();
    let cost = report
        .recommendations
        .iter()
        .find(|r| r.id == "cost_IT")
        .unwrap();
    assert!(cost.acknowledged);

    let open_cost = runtime
        .recommendations(&RecommendationFilter {
            acknowledged: Some(false),
            category: Some(RecommendationCategory::CostReduction),
            limit: None,
        })
        .unwrap();
    let ids: Vec<_> = open_cost.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["overbilling_Acme_Cloud"]);
    assert!(!runtime.acknowledge_recommendation("nope").unwrap());
}

// ═══ NARRATIVE ═══

#[test]
fn narrative_context_carries_every_section() {
    let narrator = Scripted::replying("IT is the main concern.");
    let runtime = IntelligenceRuntime::new(narrated(narrator.clone())).unwrap();
    runtime.import_ledger(&sample_ledger()).unwrap();
    runtime.refresh().unwrap();

    let answer = runtime.ask("Where are we overspending?").unwrap();
    assert_eq!(answer.answer, "IT is the main concern.");
    assert_eq!(answer.sources, vec!["memory", "clusters", "decisions"]);
    assert!(answer
        .context_used
        .starts_with("LEARNED FINANCIAL PATTERNS (Episodic Memory):"));
    assert!(answer.context_used.contains("ACTIVE STRESS CLUSTERS:"));
    assert!(answer.context_used.contains("TOP PRIORITY DECISIONS:"));

    let prompts = narrator.prompts.lock().unwrap();
    let (system, user) = &prompts[0];
    assert!(system.contains("--- FINANCIAL DATA CONTEXT ---"));
    assert!(system.contains(&answer.context_used));
    assert_eq!(user, "Where are we overspending?");
}

#[test]
fn missing_generator_gives_fallback_answer() {
    let runtime = sample_runtime();
    let answer = runtime.ask("Anything?").unwrap();
    assert_eq!(answer.answer, FALLBACK_ANSWER);
    assert!(answer.degraded.is_some());

    let snapshot = runtime.metrics_snapshot().unwrap();
    assert_eq!(
        snapshot["degraded_components"],
        serde_json::json!(["narrative.generator"])
    );
}

// ═══ SCENARIOS ═══

#[test]
fn scenarios_parse_fenced_generator_output() {
    let reply = r#"```json
[
  {"name": "Liquidity Squeeze", "probability": 0.4, "budget_impact_pct": -8,
   "key_risks": ["Late vendor payments"], "recommended_actions": ["Draw credit line"]},
  {"name": "Steady State", "probability": 0.45},
  {"name": "Early Renewal Win", "probability": 0.15, "cashflow_impact_pct": 6},
  {"name": "Ignored Extra"}
]
```"#;
    let narrator = Scripted::replying(reply);
    let runtime = IntelligenceRuntime::new(narrated(narrator.clone())).unwrap();
    runtime.import_ledger(&sample_ledger()).unwrap();

    let set = runtime.scenarios();
    assert_eq!(set.origin, ScenarioOrigin::Generated);
    let names: Vec<_> = set.scenarios.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["Liquidity Squeeze", "Steady State", "Early Renewal Win"]);
    assert_eq!(set.scenarios[0].key_risks, vec!["Late vendor payments".to_string()]);
    assert!(set.scenarios.iter().all(|s| s.id.starts_with("scenario_")));

    assert!(set.context.starts_with("=== CURRENT FINANCIAL CONTEXT ==="));
    assert!(set.context.contains("BUDGETS:"));
    assert!(set.context.contains("INVOICES:"));
    assert!(set.context.contains("CONTRACTS: 2 expiring"));

    let prompts = narrator.prompts.lock().unwrap();
    assert!(prompts[0].1.contains(&set.context));
}

#[test]
fn unusable_generator_output_falls_back() {
    let runtime =
        IntelligenceRuntime::new(narrated(Scripted::replying("Sorry, I cannot help."))).unwrap();
    let set = runtime.scenarios();
    assert_eq!(set.origin, ScenarioOrigin::Fallback);
    let names: Vec<_> = set.scenarios.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(
        names,
        vec!["Supply Chain Stress", "Budget Overrun Cascade", "Controlled Recovery"]
    );
    assert_eq!(set.degraded.unwrap().component, "scenarios.generator");
    assert_eq!(set.context, "=== CURRENT FINANCIAL CONTEXT ===");
}

// ═══ CONFIG & STORAGE ═══

#[test]
fn config_threshold_flows_into_correlation() {
    let runtime = IntelligenceRuntime::new(RuntimeOptions {
        config_toml: Some("[correlation]\nstress_threshold = 8\n".to_string()),
        ..options(None)
    })
    .unwrap();
    runtime.import_ledger(&sample_ledger()).unwrap();

    let report = runtime.refresh().unwrap();
    assert_eq!(report.stress_score, 7);
    assert!(report.cluster.is_none());
    assert!(runtime.active_clusters().unwrap().is_empty());
}

#[test]
fn malformed_config_is_rejected() {
    let result = IntelligenceRuntime::new(RuntimeOptions {
        config_toml: Some("[fusion]\nper_source_cap = \"five\"\n".to_string()),
        ..options(None)
    });
    assert!(matches!(result, Err(FincenterError::ConfigError(_))));
}

#[test]
fn file_backed_state_survives_restart() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fincenter.db");
    let file_options = || RuntimeOptions {
        storage: StorageMode::File(path.clone()),
        ..options(None)
    };

    {
        let runtime = IntelligenceRuntime::new(file_options()).unwrap();
        runtime.import_ledger(&sample_ledger()).unwrap();
        runtime.refresh().unwrap();
        runtime.acknowledge_recommendation("invoice_GLX-003").unwrap();
    }

    let reopened = IntelligenceRuntime::new(file_options()).unwrap();
    assert_eq!(reopened.patterns(None).unwrap().len(), 3);
    assert_eq!(reopened.active_clusters().unwrap().len(), 1);
    let acked = reopened
        .recommendations(&RecommendationFilter {
            acknowledged: Some(true),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(acked.len(), 1);
    assert_eq!(acked[0].id, "invoice_GLX-003");
}

// ═══ METRICS ═══

#[test]
fn metrics_count_each_stage() {
    let runtime = sample_runtime();
    runtime.refresh().unwrap();
    runtime.ranked_decisions();

    let snapshot = runtime.metrics_snapshot().unwrap();
    let metrics = &snapshot["metrics"];
    assert_eq!(metrics["episodic"]["runs"], 1);
    assert_eq!(metrics["episodic"]["last_items"], 4);
    assert_eq!(metrics["correlation"]["runs"], 1);
    assert_eq!(metrics["clusters_emitted"], 1);
    assert_eq!(metrics["highest_stress_score"], 7);
    assert_eq!(metrics["recommendations"]["last_items"], 9);
    assert_eq!(metrics["fusion"]["last_items"], 13);
    assert_eq!(snapshot["active_degradations"], 0);
}
