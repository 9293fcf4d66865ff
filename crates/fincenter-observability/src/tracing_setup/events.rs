//! Structured log events for intelligence operations.

/// Log a degradation trigger.
pub fn degradation_triggered(component: &str, failure: &str, fallback: &str) {
    tracing::warn!(
        event = "degradation_triggered",
        component = %component,
        failure = %failure,
        fallback = %fallback,
        "degradation triggered"
    );
}

/// Log a component returning to normal operation.
pub fn degradation_recovered(component: &str, degraded_secs: i64) {
    tracing::info!(
        event = "degradation_recovered",
        component = %component,
        degraded_secs = degraded_secs,
        "degradation recovered"
    );
}

/// Log completion of a full intelligence refresh.
pub fn refresh_completed(patterns: usize, cluster_emitted: bool, recommendations: usize) {
    tracing::info!(
        event = "refresh_completed",
        patterns = patterns,
        cluster_emitted = cluster_emitted,
        recommendations = recommendations,
        "intelligence refresh completed"
    );
}

/// Log an acknowledgement from the presentation layer.
pub fn acknowledged(kind: &str, id: &str, found: bool) {
    tracing::info!(
        event = "acknowledged",
        kind = %kind,
        id = %id,
        found = found,
        "acknowledgement processed"
    );
}
