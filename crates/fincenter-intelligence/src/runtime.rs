//! IntelligenceRuntime: owns storage, the four engines, and observability.
//!
//! Storage serves as both the ledger and the intelligence store. Engines
//! are stateless between calls, so the runtime can be shared across threads;
//! only the observability engine needs a lock.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, PoisonError};

use tracing::info;

use fincenter_core::config::FincenterConfig;
use fincenter_core::errors::{FincenterError, FincenterResult};
use fincenter_core::ledger::LedgerSnapshot;
use fincenter_core::models::{
    Decision, DegradationEvent, EpisodicPattern, Recommendation, StressCluster,
};
use fincenter_core::traits::{
    IClock, IIntelligenceStorage, ILedgerStore, INarrativeGenerator, IPatternLearner,
    IRecommender, ISignalCorrelator, NoOpNarrator, PatternFilter, RecommendationFilter,
    SystemClock,
};
use fincenter_correlation::CorrelationEngine;
use fincenter_episodic::{render_digest, EpisodicEngine};
use fincenter_fusion::{FusionEngine, FusionReport};
use fincenter_observability::tracing_setup::{events, init_tracing};
use fincenter_observability::{
    correlation_span, episodic_span, fusion_span, narrative_span, recommendation_span,
    ObservabilityEngine,
};
use fincenter_recommendations::RecommendationEngine;
use fincenter_storage::queries::ledger_ops::ImportSummary;
use fincenter_storage::StorageEngine;

use crate::narrative::{self, NarrativeAnswer, NarrativeContext};
use crate::scenarios::{self, ScenarioSet};

/// Where the runtime keeps its database.
#[derive(Debug, Clone, Default)]
pub enum StorageMode {
    /// `storage.db_path` from the configuration.
    #[default]
    Configured,
    /// An explicit file, overriding the configured path.
    File(PathBuf),
    /// Ephemeral in-memory database.
    InMemory,
}

/// Options for building the runtime.
#[derive(Default)]
pub struct RuntimeOptions {
    pub storage: StorageMode,
    /// TOML configuration. If None, uses defaults.
    pub config_toml: Option<String>,
    /// Install the global tracing subscriber from the observability section.
    pub init_tracing: bool,
    /// Clock for day arithmetic. Defaults to the system clock.
    pub clock: Option<Arc<dyn IClock>>,
    /// Text generator for answers and scenarios. Defaults to [`NoOpNarrator`].
    pub narrator: Option<Arc<dyn INarrativeGenerator>>,
}

/// Outcome of a full refresh.
#[derive(Debug, Clone, Default)]
pub struct RefreshReport {
    pub patterns: Vec<EpisodicPattern>,
    pub stress_score: u32,
    pub cluster: Option<StressCluster>,
    pub recommendations: Vec<Recommendation>,
    pub degraded: Vec<DegradationEvent>,
    /// Components that degraded on an earlier run and ran cleanly this time.
    pub recovered: Vec<String>,
}

pub struct IntelligenceRuntime {
    pub storage: Arc<StorageEngine>,
    pub episodic: EpisodicEngine,
    pub correlation: CorrelationEngine,
    pub fusion: FusionEngine,
    pub recommendations: RecommendationEngine,
    pub observability: Mutex<ObservabilityEngine>,
    pub config: FincenterConfig,
    clock: Arc<dyn IClock>,
    narrator: Arc<dyn INarrativeGenerator>,
}

impl IntelligenceRuntime {
    pub fn new(opts: RuntimeOptions) -> FincenterResult<Self> {
        let config = match &opts.config_toml {
            Some(toml_str) => FincenterConfig::from_toml(toml_str)
                .map_err(|e| FincenterError::ConfigError(e.to_string()))?,
            None => FincenterConfig::default(),
        };

        if opts.init_tracing && !init_tracing(&config.observability)? {
            tracing::debug!("tracing subscriber already installed");
        }

        let storage = Arc::new(match &opts.storage {
            StorageMode::Configured => StorageEngine::from_config(&config.storage)?,
            StorageMode::File(path) => {
                let mut storage_config = config.storage.clone();
                storage_config.db_path = path.display().to_string();
                StorageEngine::from_config(&storage_config)?
            }
            StorageMode::InMemory => StorageEngine::open_in_memory()?,
        });
        let ledger: Arc<dyn ILedgerStore> = storage.clone();
        let store: Arc<dyn IIntelligenceStorage> = storage.clone();

        let clock = opts.clock.unwrap_or_else(|| Arc::new(SystemClock));
        let narrator = opts.narrator.unwrap_or_else(|| Arc::new(NoOpNarrator));

        let episodic = EpisodicEngine::new(ledger.clone(), store.clone(), config.episodic.clone())
            .with_clock(clock.clone());
        let correlation = CorrelationEngine::new(ledger.clone(), store.clone(), &config.correlation)
            .with_clock(clock.clone());
        let fusion = FusionEngine::new(
            ledger.clone(),
            store.clone(),
            config.fusion.clone(),
            config.correlation.stress_threshold,
        )
        .with_clock(clock.clone());
        let recommendations =
            RecommendationEngine::new(ledger, store, config.recommendations.clone())
                .with_clock(clock.clone());

        info!(
            narrator = narrator.name(),
            stress_threshold = config.correlation.stress_threshold,
            "intelligence runtime ready"
        );

        Ok(Self {
            storage,
            episodic,
            correlation,
            fusion,
            recommendations,
            observability: Mutex::new(ObservabilityEngine::new()),
            config,
            clock,
            narrator,
        })
    }

    /// Run `f` against the observability engine. A poisoned lock still holds
    /// valid counters, so it is recovered rather than propagated.
    fn observe<R>(&self, f: impl FnOnce(&mut ObservabilityEngine) -> R) -> R {
        let mut guard = self
            .observability
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    /// Bulk-load ledger records.
    pub fn import_ledger(&self, snapshot: &LedgerSnapshot) -> FincenterResult<ImportSummary> {
        self.storage.import_ledger(snapshot)
    }

    // ═══ READS ═══

    pub fn active_clusters(&self) -> FincenterResult<Vec<StressCluster>> {
        self.correlation.active_clusters()
    }

    /// The fused decision feed. Source failures are recorded, never returned.
    pub fn ranked_decisions(&self) -> Vec<Decision> {
        self.decision_report().decisions
    }

    pub fn decision_report(&self) -> FusionReport {
        let span = fusion_span!(self.config.fusion.per_source_cap, self.config.fusion.global_limit);
        let _guard = span.enter();

        let report = self.fusion.rank_with_report();
        let at = self.clock.now();
        self.observe(|obs| {
            obs.metrics
                .record_fusion_run(report.decisions.len(), report.degraded.len(), at);
            obs.settle_run("fusion", report.degraded.clone());
        });
        report
    }

    /// Stored patterns at or above `min_confidence`, highest first. Defaults
    /// to the digest floor.
    pub fn patterns(&self, min_confidence: Option<f64>) -> FincenterResult<Vec<EpisodicPattern>> {
        let floor = min_confidence.unwrap_or(self.config.episodic.digest_confidence_floor);
        self.storage.list_patterns(&PatternFilter::min_confidence(floor))
    }

    pub fn recommendations(
        &self,
        filter: &RecommendationFilter,
    ) -> FincenterResult<Vec<Recommendation>> {
        self.recommendations.list(filter)
    }

    // ═══ WRITES ═══

    pub fn acknowledge_cluster(&self, id: &str) -> FincenterResult<bool> {
        let found = self.storage.acknowledge_cluster(id)?;
        events::acknowledged("cluster", id, found);
        Ok(found)
    }

    pub fn acknowledge_recommendation(&self, id: &str) -> FincenterResult<bool> {
        let found = self.recommendations.acknowledge(id)?;
        events::acknowledged("recommendation", id, found);
        Ok(found)
    }

    // ═══ TRIGGERS ═══

    /// Re-run pattern detection and return the refreshed patterns.
    pub fn refresh_patterns(&self) -> FincenterResult<Vec<EpisodicPattern>> {
        let (patterns, degraded, _) = self.detect_patterns()?;
        if !degraded.is_empty() {
            tracing::debug!(degraded = degraded.len(), "pattern refresh partially degraded");
        }
        Ok(patterns)
    }

    fn detect_patterns(
        &self,
    ) -> FincenterResult<(Vec<EpisodicPattern>, Vec<DegradationEvent>, Vec<String>)> {
        let span = episodic_span!(self.episodic.detector_count());
        let _guard = span.enter();

        let outcome = self.episodic.run_pattern_detection()?;
        let at = self.clock.now();
        let recovered = self.observe(|obs| {
            obs.metrics
                .record_pattern_run(outcome.patterns.len(), outcome.degraded.len(), at);
            obs.settle_run("episodic", outcome.degraded.clone())
        });
        Ok((outcome.patterns, outcome.degraded, recovered))
    }

    /// Patterns, then correlation, then recommendations. Each stage reads
    /// what the previous one persisted.
    pub fn refresh(&self) -> FincenterResult<RefreshReport> {
        let mut report = RefreshReport::default();

        let (patterns, degraded, recovered) = self.detect_patterns()?;
        report.patterns = patterns;
        report.degraded.extend(degraded);
        report.recovered.extend(recovered);

        {
            let span = correlation_span!(self.correlation.threshold());
            let _guard = span.enter();
            let outcome = self.correlation.run_detection()?;
            let at = self.clock.now();
            let recovered = self.observe(|obs| {
                obs.metrics.record_correlation_run(
                    outcome.signals.len(),
                    outcome.score,
                    outcome.cluster.is_some(),
                    outcome.degraded.len(),
                    at,
                );
                obs.settle_run("correlation", outcome.degraded.clone())
            });
            report.stress_score = outcome.score;
            report.cluster = outcome.cluster;
            report.degraded.extend(outcome.degraded);
            report.recovered.extend(recovered);
        }

        {
            let span = recommendation_span!(self.recommendations.generator_count());
            let _guard = span.enter();
            let outcome = self.recommendations.generate()?;
            let at = self.clock.now();
            let recovered = self.observe(|obs| {
                obs.metrics.record_recommendation_run(
                    outcome.recommendations.len(),
                    outcome.degraded.len(),
                    at,
                );
                obs.settle_run("recommendations", outcome.degraded.clone())
            });
            report.recommendations = outcome.recommendations;
            report.degraded.extend(outcome.degraded);
            report.recovered.extend(recovered);
        }

        events::refresh_completed(
            report.patterns.len(),
            report.cluster.is_some(),
            report.recommendations.len(),
        );
        Ok(report)
    }

    // ═══ NARRATIVE ═══

    /// Current digest, clusters, and top decisions as narrative context.
    pub fn narrative_context(&self) -> FincenterResult<NarrativeContext> {
        let digest = self.episodic.context_digest(self.config.episodic.digest_limit)?;
        Ok(NarrativeContext {
            digest: render_digest(&digest),
            clusters: self.active_clusters()?,
            decisions: self.ranked_decisions(),
        })
    }

    /// Answer a question over the current intelligence state.
    pub fn ask(&self, question: &str) -> FincenterResult<NarrativeAnswer> {
        let span = narrative_span!(self.narrator.name());
        let _guard = span.enter();

        let context = self.narrative_context()?;
        let answer = narrative::compose_answer(self.narrator.as_ref(), question, &context);
        self.observe(|obs| match &answer.degraded {
            Some(event) => obs.record_degradation(event.clone()),
            None => {
                obs.mark_recovered("narrative.generator");
            }
        });
        Ok(answer)
    }

    /// Generate named stress scenarios from the current ledger.
    pub fn scenarios(&self) -> ScenarioSet {
        let span = narrative_span!(self.narrator.name());
        let _guard = span.enter();

        let set = scenarios::generate_scenarios(
            self.storage.as_ref(),
            self.narrator.as_ref(),
            self.clock.today(),
        );
        self.observe(|obs| match &set.degraded {
            Some(event) => obs.record_degradation(event.clone()),
            None => {
                obs.mark_recovered("scenarios.generator");
            }
        });
        set
    }

    /// Metrics and degradation state as JSON.
    pub fn metrics_snapshot(&self) -> FincenterResult<serde_json::Value> {
        self.observe(|obs| obs.metrics_snapshot())
    }
}
