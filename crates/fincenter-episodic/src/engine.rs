//! EpisodicEngine: implements IPatternLearner, runs every detector and
//! persists the results.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{info, warn};

use fincenter_core::config::EpisodicConfig;
use fincenter_core::errors::FincenterResult;
use fincenter_core::models::{DegradationEvent, EpisodicPattern};
use fincenter_core::traits::{
    DetectionOutcome, IClock, IIntelligenceStorage, ILedgerStore, IPatternLearner, PatternFilter,
    SystemClock,
};

use crate::detectors::{self, PatternDetector};
use crate::digest;

const COMPONENT: &str = "episodic";

pub struct EpisodicEngine {
    ledger: Arc<dyn ILedgerStore>,
    storage: Arc<dyn IIntelligenceStorage>,
    clock: Arc<dyn IClock>,
    config: EpisodicConfig,
    detectors: Vec<Box<dyn PatternDetector>>,
}

impl EpisodicEngine {
    pub fn new(
        ledger: Arc<dyn ILedgerStore>,
        storage: Arc<dyn IIntelligenceStorage>,
        config: EpisodicConfig,
    ) -> Self {
        let detectors = detectors::default_detectors(&config);
        Self {
            ledger,
            storage,
            clock: Arc::new(SystemClock),
            config,
            detectors,
        }
    }

    /// Replace the clock used for day arithmetic and timestamps.
    pub fn with_clock(mut self, clock: Arc<dyn IClock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn detector_count(&self) -> usize {
        self.detectors.len()
    }

    /// Stored patterns above the configured floor, rendered as text.
    /// `limit` defaults to the configured digest size.
    pub fn context_text(&self, limit: Option<usize>) -> FincenterResult<String> {
        let patterns = self.context_digest(limit.unwrap_or(self.config.digest_limit))?;
        Ok(digest::render_digest(&patterns))
    }

    fn detect_all(&self) -> FincenterResult<DetectionOutcome> {
        let today = self.clock.today();
        let now = self.clock.now();
        let ledger = self.ledger.as_ref();

        let results: Vec<_> = self
            .detectors
            .par_iter()
            .map(|d| (d.pattern_type(), d.detect(ledger, today)))
            .collect();

        let mut outcome = DetectionOutcome::default();
        for (pattern_type, result) in results {
            match result {
                Ok(findings) => {
                    outcome
                        .patterns
                        .extend(findings.into_iter().map(|f| {
                            EpisodicPattern::new(
                                pattern_type,
                                f.subject,
                                f.description,
                                f.confidence,
                                f.evidence_count,
                                now,
                            )
                        }));
                }
                Err(e) => {
                    warn!(detector = pattern_type.as_str(), error = %e, "detector degraded");
                    outcome.degraded.push(DegradationEvent::new(
                        format!("{COMPONENT}.{}", pattern_type.as_str()),
                        e.to_string(),
                        "no patterns from this detector",
                    ));
                }
            }
        }

        for pattern in &outcome.patterns {
            self.storage.upsert_pattern(pattern)?;
        }

        outcome.patterns.sort_by(|a, b| {
            b.confidence
                .value()
                .total_cmp(&a.confidence.value())
                .then_with(|| a.id.cmp(&b.id))
        });

        info!(
            patterns = outcome.patterns.len(),
            degraded = outcome.degraded.len(),
            "pattern detection complete"
        );
        Ok(outcome)
    }
}

impl IPatternLearner for EpisodicEngine {
    fn run_pattern_detection(&self) -> FincenterResult<DetectionOutcome> {
        self.detect_all()
    }

    fn context_digest(&self, limit: usize) -> FincenterResult<Vec<EpisodicPattern>> {
        let mut patterns = self
            .storage
            .list_patterns(&PatternFilter::min_confidence(self.config.digest_confidence_floor))?;
        patterns.truncate(limit);
        Ok(patterns)
    }
}
