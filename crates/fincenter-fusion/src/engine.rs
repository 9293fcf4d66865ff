//! FusionEngine: runs every source in parallel, then caps and ranks.

use std::collections::BTreeMap;
use std::sync::Arc;

use rayon::prelude::*;
use tracing::{info, warn};

use fincenter_core::config::FusionConfig;
use fincenter_core::errors::FincenterResult;
use fincenter_core::models::{Decision, DecisionSource, DegradationEvent};
use fincenter_core::traits::{IClock, IIntelligenceStorage, ILedgerStore, SystemClock};

use crate::ranking;
use crate::sources::{self, CandidateSource, SourceContext};

/// A ranked feed plus what happened along the way.
#[derive(Debug, Clone, Default)]
pub struct FusionReport {
    pub decisions: Vec<Decision>,
    /// Candidates each source produced before capping.
    pub candidates_per_source: BTreeMap<DecisionSource, usize>,
    pub degraded: Vec<DegradationEvent>,
}

pub struct FusionEngine {
    ledger: Arc<dyn ILedgerStore>,
    storage: Arc<dyn IIntelligenceStorage>,
    clock: Arc<dyn IClock>,
    config: FusionConfig,
    stress_threshold: u32,
    sources: Vec<Box<dyn CandidateSource>>,
}

impl FusionEngine {
    pub fn new(
        ledger: Arc<dyn ILedgerStore>,
        storage: Arc<dyn IIntelligenceStorage>,
        config: FusionConfig,
        stress_threshold: u32,
    ) -> Self {
        Self {
            ledger,
            storage,
            clock: Arc::new(SystemClock),
            config,
            stress_threshold,
            sources: sources::default_sources(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn IClock>) -> Self {
        self.clock = clock;
        self
    }

    /// The ranked decision feed. Never fails on a source read; failed
    /// sources simply contribute nothing.
    pub fn rank(&self) -> Vec<Decision> {
        self.rank_with_report().decisions
    }

    pub fn rank_with_report(&self) -> FusionReport {
        let ctx = SourceContext {
            ledger: self.ledger.as_ref(),
            storage: self.storage.as_ref(),
            today: self.clock.today(),
            pattern_confidence_floor: self.config.pattern_confidence_floor,
            stress_threshold: self.stress_threshold,
        };

        let results: Vec<(DecisionSource, FincenterResult<Vec<Decision>>)> = self
            .sources
            .par_iter()
            .map(|s| (s.source(), s.candidates(&ctx)))
            .collect();

        let mut report = FusionReport::default();
        let mut per_source = Vec::with_capacity(results.len());
        for (source, result) in results {
            match result {
                Ok(candidates) => {
                    report.candidates_per_source.insert(source, candidates.len());
                    per_source.push(candidates);
                }
                Err(e) => {
                    warn!(source = source.as_str(), error = %e, "decision source degraded");
                    report.candidates_per_source.insert(source, 0);
                    report.degraded.push(DegradationEvent::new(
                        format!("fusion.{}", source.as_str()),
                        e.to_string(),
                        "source contributes no candidates",
                    ));
                }
            }
        }

        report.decisions =
            ranking::fuse(per_source, self.config.per_source_cap, self.config.global_limit);
        info!(
            decisions = report.decisions.len(),
            degraded = report.degraded.len(),
            "decision feed ranked"
        );
        report
    }
}
