mod clock;
mod correlator;
mod intelligence_storage;
mod ledger_store;
mod learner;
mod narrative;
mod recommender;

pub use clock::{FixedClock, IClock, SystemClock};
pub use correlator::{CorrelationOutcome, ISignalCorrelator};
pub use intelligence_storage::{IIntelligenceStorage, PatternFilter, RecommendationFilter};
pub use ledger_store::{ContractFilter, ILedgerStore, InvoiceFilter};
pub use learner::{DetectionOutcome, IPatternLearner};
pub use narrative::{INarrativeGenerator, NoOpNarrator};
pub use recommender::{GenerationOutcome, IRecommender};
