//! Span definitions per intelligence operation.
//!
//! Engines stay free of this crate; the runtime enters these spans around
//! each engine call so every event an engine emits is attributed to its run.

/// Create a pattern-detection span.
#[macro_export]
macro_rules! episodic_span {
    ($detectors:expr) => {
        tracing::info_span!("fincenter.episodic", detectors = $detectors)
    };
}

/// Create a weak-signal correlation span.
#[macro_export]
macro_rules! correlation_span {
    ($threshold:expr) => {
        tracing::info_span!("fincenter.correlation", threshold = $threshold)
    };
}

/// Create a decision fusion span.
#[macro_export]
macro_rules! fusion_span {
    ($cap:expr, $limit:expr) => {
        tracing::info_span!("fincenter.fusion", per_source_cap = $cap, global_limit = $limit)
    };
}

/// Create a recommendation generation span.
#[macro_export]
macro_rules! recommendation_span {
    ($generators:expr) => {
        tracing::info_span!("fincenter.recommendations", generators = $generators)
    };
}

/// Create a narrative composition span.
#[macro_export]
macro_rules! narrative_span {
    ($generator:expr) => {
        tracing::info_span!("fincenter.narrative", generator = %$generator)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const EPISODIC: &str = "fincenter.episodic";
    pub const CORRELATION: &str = "fincenter.correlation";
    pub const FUSION: &str = "fincenter.fusion";
    pub const RECOMMENDATIONS: &str = "fincenter.recommendations";
    pub const NARRATIVE: &str = "fincenter.narrative";
}
