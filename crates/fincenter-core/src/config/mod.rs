mod correlation_config;
pub mod defaults;
mod episodic_config;
mod fusion_config;
mod observability_config;
mod recommendation_config;
mod storage_config;

pub use correlation_config::{CorrelationConfig, SignalWeights};
pub use episodic_config::EpisodicConfig;
pub use fusion_config::FusionConfig;
pub use observability_config::ObservabilityConfig;
pub use recommendation_config::RecommendationConfig;
pub use storage_config::StorageConfig;

use serde::{Deserialize, Serialize};

/// Top-level configuration aggregating every subsystem.
/// Each section falls back to its defaults when omitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FincenterConfig {
    pub storage: StorageConfig,
    pub episodic: EpisodicConfig,
    pub correlation: CorrelationConfig,
    pub fusion: FusionConfig,
    pub recommendations: RecommendationConfig,
    pub observability: ObservabilityConfig,
}

impl FincenterConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(toml_str)
    }
}
