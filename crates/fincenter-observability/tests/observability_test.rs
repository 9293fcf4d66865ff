//! Observability engine: run settlement, recovery, and metrics snapshots.

use chrono::Utc;
use fincenter_core::config::ObservabilityConfig;
use fincenter_core::models::DegradationEvent;
use fincenter_observability::tracing_setup::{init_tracing, spans::names};
use fincenter_observability::{ObservabilityEngine, RecoveryStatus};

fn degraded(component: &str) -> DegradationEvent {
    DegradationEvent::new(component, "source unavailable", "no candidates")
}

// ═══ DEGRADATION ═══

#[test]
fn degraded_source_recovers_on_clean_rerun() {
    let mut obs = ObservabilityEngine::new();

    let recovered = obs.settle_run("fusion", vec![degraded("fusion.invoice")]);
    assert!(recovered.is_empty());
    assert_eq!(obs.degradation.active_degradations().len(), 1);

    let recovered = obs.settle_run("fusion", Vec::new());
    assert_eq!(recovered, vec!["fusion.invoice".to_string()]);
    assert!(obs.degradation.active_degradations().is_empty());
    assert_eq!(
        obs.degradation.events()[0].recovery_status,
        RecoveryStatus::Recovered
    );
}

#[test]
fn repeated_degradation_stays_active() {
    let mut obs = ObservabilityEngine::new();
    obs.settle_run("episodic", vec![degraded("episodic.late_payment")]);
    obs.settle_run("episodic", vec![degraded("episodic.late_payment")]);

    assert_eq!(obs.degradation.active_degradations().len(), 2);
    assert_eq!(obs.degradation.count_recent("episodic.late_payment", 3600), 2);
    assert!(obs
        .degradation
        .degraded_duration("episodic.late_payment")
        .is_some());
}

#[test]
fn manual_recovery() {
    let mut obs = ObservabilityEngine::new();
    obs.record_degradation(degraded("narrative"));
    assert!(obs.mark_recovered("narrative"));
    assert!(!obs.mark_recovered("narrative"));
}

// ═══ SNAPSHOT ═══

#[test]
fn snapshot_lists_active_components() {
    let mut obs = ObservabilityEngine::new();
    obs.metrics.record_pattern_run(4, 0, Utc::now());
    obs.metrics.record_fusion_run(11, 2, Utc::now());
    obs.settle_run(
        "fusion",
        vec![degraded("fusion.invoice"), degraded("fusion.contract")],
    );

    let snapshot = obs.metrics_snapshot().unwrap();
    assert_eq!(snapshot["active_degradations"], 2);
    assert_eq!(
        snapshot["degraded_components"],
        serde_json::json!(["fusion.contract", "fusion.invoice"])
    );
    assert_eq!(snapshot["metrics"]["episodic"]["last_items"], 4);
    assert_eq!(snapshot["metrics"]["fusion"]["degraded_runs"], 1);
    assert_eq!(snapshot["metrics"]["degradations_recorded"], 2);
}

#[test]
fn reset_metrics_keeps_degradations() {
    let mut obs = ObservabilityEngine::new();
    obs.record_degradation(degraded("narrative"));
    obs.reset_metrics();
    assert_eq!(obs.metrics.degradations_recorded, 0);
    assert_eq!(obs.degradation.active_degradations().len(), 1);
}

// ═══ TRACING ═══

#[test]
fn second_init_reports_existing_subscriber() {
    let config = ObservabilityConfig::default();
    let _ = init_tracing(&config);
    assert!(!init_tracing(&config).unwrap());
}

#[test]
fn span_macros_use_named_targets() {
    let span = fincenter_observability::fusion_span!(5, 20);
    let _guard = span.enter();
    assert_eq!(names::FUSION, "fincenter.fusion");
    assert_eq!(names::EPISODIC, "fincenter.episodic");
}
