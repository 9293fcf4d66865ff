mod confidence;
mod decision;
mod degradation_event;
mod episodic_pattern;
mod recommendation;
mod stress_cluster;

pub use confidence::Confidence;
pub use decision::{Decision, DecisionSource, Severity};
pub use degradation_event::DegradationEvent;
pub use episodic_pattern::{EpisodicPattern, PatternType};
pub use recommendation::{Recommendation, RecommendationCategory};
pub use stress_cluster::{Signal, SignalType, StressCluster};
