//! RecommendationEngine: implements IRecommender.

use std::sync::Arc;

use rayon::prelude::*;
use tracing::{info, warn};

use fincenter_core::config::RecommendationConfig;
use fincenter_core::errors::FincenterResult;
use fincenter_core::models::{DegradationEvent, Recommendation};
use fincenter_core::traits::{
    GenerationOutcome, IClock, IIntelligenceStorage, ILedgerStore, IRecommender,
    RecommendationFilter, SystemClock,
};

use crate::generators::{self, GenerationContext, RecommendationGenerator};

pub struct RecommendationEngine {
    ledger: Arc<dyn ILedgerStore>,
    storage: Arc<dyn IIntelligenceStorage>,
    clock: Arc<dyn IClock>,
    config: RecommendationConfig,
    generators: Vec<Box<dyn RecommendationGenerator>>,
}

impl RecommendationEngine {
    pub fn new(
        ledger: Arc<dyn ILedgerStore>,
        storage: Arc<dyn IIntelligenceStorage>,
        config: RecommendationConfig,
    ) -> Self {
        Self {
            ledger,
            storage,
            clock: Arc::new(SystemClock),
            config,
            generators: generators::default_generators(),
        }
    }

    pub fn with_clock(mut self, clock: Arc<dyn IClock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn generator_count(&self) -> usize {
        self.generators.len()
    }

    fn run_generators(&self) -> FincenterResult<GenerationOutcome> {
        let ctx = GenerationContext {
            ledger: self.ledger.as_ref(),
            storage: self.storage.as_ref(),
            config: &self.config,
            today: self.clock.today(),
            now: self.clock.now(),
        };

        let results: Vec<_> = self
            .generators
            .par_iter()
            .map(|g| (g.name(), g.generate(&ctx)))
            .collect();

        let mut outcome = GenerationOutcome::default();
        let mut generated: Vec<Recommendation> = Vec::new();
        for (name, result) in results {
            match result {
                Ok(recs) => generated.extend(recs),
                Err(e) => {
                    warn!(generator = name, error = %e, "recommendation generator degraded");
                    outcome.degraded.push(DegradationEvent::new(
                        format!("recommendations.{name}"),
                        e.to_string(),
                        "no recommendations from this generator",
                    ));
                }
            }
        }

        // Read back so callers see preserved acknowledgement and creation time.
        for rec in &generated {
            self.storage.upsert_recommendation(rec)?;
        }
        for rec in generated {
            let stored = self.storage.get_recommendation(&rec.id)?;
            outcome.recommendations.push(stored.unwrap_or(rec));
        }
        outcome.recommendations.sort_by(|a, b| {
            b.priority_score
                .total_cmp(&a.priority_score)
                .then_with(|| a.id.cmp(&b.id))
        });

        info!(
            recommendations = outcome.recommendations.len(),
            degraded = outcome.degraded.len(),
            "recommendations generated"
        );
        Ok(outcome)
    }
}

impl IRecommender for RecommendationEngine {
    fn generate(&self) -> FincenterResult<GenerationOutcome> {
        self.run_generators()
    }

    fn list(&self, filter: &RecommendationFilter) -> FincenterResult<Vec<Recommendation>> {
        self.storage.list_recommendations(filter)
    }

    fn acknowledge(&self, id: &str) -> FincenterResult<bool> {
        let found = self.storage.acknowledge_recommendation(id)?;
        if !found {
            warn!(id, "acknowledge: unknown recommendation");
        }
        Ok(found)
    }
}
