//! Recommendation generation, dedup and acknowledgement persistence.

use std::sync::Arc;

use chrono::{Duration, Utc};
use fincenter_core::config::RecommendationConfig;
use fincenter_core::ledger::LedgerSnapshot;
use fincenter_core::models::{
    Confidence, EpisodicPattern, PatternType, RecommendationCategory, Signal, SignalType,
    StressCluster,
};
use fincenter_core::traits::{FixedClock, IIntelligenceStorage, IRecommender, RecommendationFilter};
use fincenter_recommendations::RecommendationEngine;
use fincenter_storage::StorageEngine;
use test_fixtures::{
    budget, budget_line, contract, overdue_invoice, sample_ledger, today,
    FailingIntelligenceStore, FailureMode, InMemoryStore,
};

fn engine_over(store: &Arc<InMemoryStore>) -> RecommendationEngine {
    RecommendationEngine::new(store.clone(), store.clone(), RecommendationConfig::default())
        .with_clock(Arc::new(FixedClock::on(today())))
}

fn acme_pattern() -> EpisodicPattern {
    EpisodicPattern::new(
        PatternType::VendorOverbilling,
        "Acme Cloud",
        "Vendor 'Acme Cloud' average invoice exceeds contract.",
        Confidence::new(0.95),
        9,
        Utc::now(),
    )
}

fn cluster_with_score(score: u32) -> StressCluster {
    let signals = (0..score)
        .map(|i| Signal {
            signal_type: SignalType::InvoiceModeratelyOverdue,
            subject: format!("Vendor{i}"),
            detail: "20 days overdue".to_string(),
            weight: 1,
        })
        .collect();
    StressCluster::from_signals(signals, Utc::now())
}

fn it_overrun() -> LedgerSnapshot {
    LedgerSnapshot {
        budgets: vec![
            budget("IT", 2023, 100_000.0, 100_000.0),
            budget("IT", 2024, 450_000.0, 560_000.0),
        ],
        ..Default::default()
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// DEDUP & ACKNOWLEDGEMENT
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn regeneration_upserts_instead_of_duplicating() {
    let store = Arc::new(InMemoryStore::with_ledger(it_overrun()));
    let engine = engine_over(&store);

    let first = engine.generate().unwrap();
    let second = engine.generate().unwrap();

    assert_eq!(first.recommendations.len(), 1);
    assert_eq!(second.recommendations.len(), 1);
    assert_eq!(store.recommendation_count(), 1);
    assert_eq!(second.recommendations[0].id, "cost_IT");
    assert_eq!(second.recommendations[0].priority_score, 45.4);
}

#[test]
fn acknowledgement_survives_regeneration() {
    let store = Arc::new(InMemoryStore::with_ledger(it_overrun()));
    let engine = engine_over(&store);
    engine.generate().unwrap();

    assert!(engine.acknowledge("cost_IT").unwrap());
    let regenerated = engine.generate().unwrap();

    assert!(regenerated.recommendations[0].acknowledged);
    assert!(store.get_recommendation("cost_IT").unwrap().unwrap().acknowledged);
}

#[test]
fn acknowledge_is_idempotent_and_unknown_ids_are_not_errors() {
    let store = Arc::new(InMemoryStore::with_ledger(it_overrun()));
    let engine = engine_over(&store);
    engine.generate().unwrap();

    assert!(engine.acknowledge("cost_IT").unwrap());
    assert!(engine.acknowledge("cost_IT").unwrap());
    assert!(!engine.acknowledge("cost_Nowhere").unwrap());
}

#[test]
fn creation_time_is_kept_across_regeneration() {
    let store = Arc::new(InMemoryStore::with_ledger(it_overrun()));
    let first_day = today();
    let later = today() + Duration::days(3);

    let early = RecommendationEngine::new(store.clone(), store.clone(), RecommendationConfig::default())
        .with_clock(Arc::new(FixedClock::on(first_day)));
    let created = early.generate().unwrap().recommendations[0].created_at;

    let late = RecommendationEngine::new(store.clone(), store.clone(), RecommendationConfig::default())
        .with_clock(Arc::new(FixedClock::on(later)));
    let regenerated = late.generate().unwrap();

    assert_eq!(regenerated.recommendations[0].created_at, created);
}

// ═══════════════════════════════════════════════════════════════════════════
// TRIGGER BOUNDARIES
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn trigger_boundaries() {
    let store = Arc::new(InMemoryStore::with_ledger(LedgerSnapshot {
        budgets: vec![
            budget("AtTen", 2024, 100.0, 110.0),
            budget("AtFifteenUnder", 2024, 100.0, 85.0),
            budget("JustUnder", 2024, 100.0, 86.0),
        ],
        invoices: vec![
            overdue_invoice("D30", "V", 1_000.0, 30),
            overdue_invoice("D29", "V", 1_000.0, 29),
        ],
        contracts: vec![
            contract("E0", "V", 10_000.0, 0),
            contract("E90", "V", 10_000.0, 90),
            contract("E91", "V", 10_000.0, 91),
        ],
    }));
    let outcome = engine_over(&store).generate().unwrap();

    let mut ids: Vec<_> = outcome.recommendations.iter().map(|r| r.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, vec!["contract_E90", "invoice_D30", "reallocate_AtFifteenUnder"]);
}

#[test]
fn categories_of_one_year_are_judged_together() {
    // 25% over in total: capex alone is 50% over, opex is on plan.
    let lines = vec![
        budget_line("IT", 2024, "opex", 100_000.0, 100_000.0),
        budget_line("IT", 2024, "capex", 100_000.0, 150_000.0),
    ];
    let mut reversed = lines.clone();
    reversed.reverse();

    for budgets in [lines, reversed] {
        let store = Arc::new(InMemoryStore::with_ledger(LedgerSnapshot {
            budgets,
            ..Default::default()
        }));
        let outcome = engine_over(&store).generate().unwrap();
        let ids: Vec<_> = outcome.recommendations.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["cost_IT"]);
        assert!(outcome.recommendations[0]
            .supporting_evidence
            .contains(&"Overrun: 25.0%".to_string()));
    }
}

#[test]
fn categories_offsetting_an_underrun_suppress_reallocation() {
    let store = Arc::new(InMemoryStore::with_ledger(LedgerSnapshot {
        budgets: vec![
            budget_line("HR", 2024, "opex", 100_000.0, 60_000.0),
            budget_line("HR", 2024, "capex", 100_000.0, 130_000.0),
        ],
        ..Default::default()
    }));
    let outcome = engine_over(&store).generate().unwrap();
    assert!(outcome.recommendations.is_empty());
}

#[test]
fn stress_cluster_item_is_a_singleton() {
    let store = Arc::new(InMemoryStore::new());
    store.upsert_cluster(&cluster_with_score(5)).unwrap();
    store.upsert_cluster(&cluster_with_score(7)).unwrap();

    let outcome = engine_over(&store).generate().unwrap();
    assert_eq!(outcome.recommendations.len(), 1);
    let rec = &outcome.recommendations[0];
    assert_eq!(rec.id, "weaksignal_cluster");
    assert_eq!(rec.priority_score, 70.0);
    assert_eq!(rec.confidence.value(), 0.70);
    assert_eq!(rec.supporting_evidence, vec!["Active clusters: 2", "Max stress score: 7"]);
}

#[test]
fn low_confidence_overbilling_patterns_are_ignored() {
    let store = Arc::new(InMemoryStore::new());
    let mut weak = acme_pattern();
    weak.confidence = Confidence::new(0.55);
    store.upsert_pattern(&weak).unwrap();
    store
        .upsert_pattern(&EpisodicPattern::new(
            PatternType::DepartmentOverspend,
            "IT",
            "IT overspends.",
            Confidence::new(0.85),
            3,
            Utc::now(),
        ))
        .unwrap();

    assert!(engine_over(&store).generate().unwrap().recommendations.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// SAMPLE LEDGER
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn sample_ledger_recommendations() {
    let storage = Arc::new(StorageEngine::open_in_memory().unwrap());
    storage.import_ledger(&sample_ledger()).unwrap();
    storage.upsert_pattern(&acme_pattern()).unwrap();
    storage.upsert_cluster(&cluster_with_score(7)).unwrap();

    let engine = RecommendationEngine::new(storage.clone(), storage.clone(), RecommendationConfig::default())
        .with_clock(Arc::new(FixedClock::on(today())));
    let outcome = engine.generate().unwrap();
    assert!(outcome.degraded.is_empty());

    let got: Vec<_> = outcome
        .recommendations
        .iter()
        .map(|r| (r.id.as_str(), r.priority_score))
        .collect();
    assert_eq!(
        got,
        vec![
            ("contract_C-200", 79.0),
            ("invoice_GLX-003", 77.0),
            ("weaksignal_cluster", 70.0),
            ("overbilling_Acme_Cloud", 63.0),
            ("invoice_GLX-002", 46.8),
            ("cost_IT", 45.4),
            ("invoice_GLX-001", 40.2),
            ("reallocate_HR", 40.0),
            ("contract_C-300", 33.3),
        ]
    );

    let cost = &outcome.recommendations[5];
    assert_eq!(cost.category, RecommendationCategory::CostReduction);
    assert_eq!(cost.expected_impact, 55_000.0);
    assert_eq!(
        cost.supporting_evidence,
        vec!["Budget: 450,000 EUR", "Actual: 560,000 EUR", "Overrun: 24.4%"]
    );
}

#[test]
fn list_filters_by_category_and_acknowledgement() {
    let store = Arc::new(InMemoryStore::with_ledger(sample_ledger()));
    let engine = engine_over(&store);
    engine.generate().unwrap();
    engine.acknowledge("invoice_GLX-003").unwrap();

    let risk = engine
        .list(&RecommendationFilter {
            category: Some(RecommendationCategory::RiskMitigation),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(risk.len(), 5);

    let open_risk = engine
        .list(&RecommendationFilter {
            category: Some(RecommendationCategory::RiskMitigation),
            acknowledged: Some(false),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(open_risk.len(), 4);
    assert!(open_risk.iter().all(|r| r.id != "invoice_GLX-003"));

    let top = engine
        .list(&RecommendationFilter {
            limit: Some(2),
            ..Default::default()
        })
        .unwrap();
    assert_eq!(top.len(), 2);
    assert!(top[0].priority_score >= top[1].priority_score);
}

// ═══════════════════════════════════════════════════════════════════════════
// DEGRADATION
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn failed_pattern_read_degrades_only_overbilling() {
    let ledger = Arc::new(InMemoryStore::with_ledger(it_overrun()));
    let storage = Arc::new(FailingIntelligenceStore::new(InMemoryStore::new(), FailureMode::Patterns));
    let engine = RecommendationEngine::new(ledger, storage, RecommendationConfig::default())
        .with_clock(Arc::new(FixedClock::on(today())));

    let outcome = engine.generate().unwrap();
    assert_eq!(outcome.recommendations.len(), 1);
    assert_eq!(outcome.degraded.len(), 1);
    assert_eq!(outcome.degraded[0].component, "recommendations.vendor_overbilling");
}
