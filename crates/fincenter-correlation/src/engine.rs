//! CorrelationEngine: implements ISignalCorrelator.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{info, warn};

use fincenter_core::config::{CorrelationConfig, SignalWeights};
use fincenter_core::errors::FincenterResult;
use fincenter_core::models::{DegradationEvent, StressCluster};
use fincenter_core::traits::{
    CorrelationOutcome, IClock, IIntelligenceStorage, ILedgerStore, ISignalCorrelator, SystemClock,
};

use crate::checks::{self, CheckContext, WeakSignalCheck};
use crate::scoring;

pub struct CorrelationEngine {
    ledger: Arc<dyn ILedgerStore>,
    storage: Arc<dyn IIntelligenceStorage>,
    clock: Arc<dyn IClock>,
    threshold: u32,
    weights: SignalWeights,
    checks: Vec<Box<dyn WeakSignalCheck>>,
}

impl CorrelationEngine {
    pub fn new(
        ledger: Arc<dyn ILedgerStore>,
        storage: Arc<dyn IIntelligenceStorage>,
        config: &CorrelationConfig,
    ) -> Self {
        Self {
            ledger,
            storage,
            clock: Arc::new(SystemClock),
            threshold: config.stress_threshold,
            weights: config.weights.clone(),
            checks: checks::default_checks(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn IClock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    fn correlate(&self) -> FincenterResult<CorrelationOutcome> {
        let ctx = CheckContext {
            ledger: self.ledger.as_ref(),
            storage: self.storage.as_ref(),
            today: self.clock.today(),
            weights: &self.weights,
        };

        let results: Vec<_> = self
            .checks
            .par_iter()
            .map(|check| (check.signal_type(), check.collect(&ctx)))
            .collect();

        let mut outcome = CorrelationOutcome::default();
        for (signal_type, result) in results {
            match result {
                Ok(signals) => outcome.signals.extend(signals),
                Err(e) => {
                    warn!(check = signal_type.as_str(), error = %e, "weak-signal check degraded");
                    outcome.degraded.push(DegradationEvent::new(
                        format!("correlation.{}", signal_type.as_str()),
                        e.to_string(),
                        "no signals from this check",
                    ));
                }
            }
        }

        outcome.score = scoring::total_score(&outcome.signals);
        outcome.cluster =
            scoring::cluster_if_stressed(&outcome.signals, self.threshold, self.clock.now());

        if let Some(cluster) = &outcome.cluster {
            self.storage.upsert_cluster(cluster)?;
            info!(
                cluster_id = %cluster.id,
                score = cluster.score,
                signals = cluster.signals.len(),
                "stress cluster raised"
            );
        } else {
            info!(
                score = outcome.score,
                threshold = self.threshold,
                "weak signals below stress threshold"
            );
        }
        Ok(outcome)
    }
}

impl ISignalCorrelator for CorrelationEngine {
    fn run_detection(&self) -> FincenterResult<CorrelationOutcome> {
        self.correlate()
    }

    fn active_clusters(&self) -> FincenterResult<Vec<StressCluster>> {
        self.storage.list_clusters(true)
    }
}
