use serde::{Deserialize, Serialize};

use super::defaults;

/// Decision fusion configuration: the `(cap, global_limit)` fairness pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FusionConfig {
    /// Maximum candidates any one source contributes.
    pub per_source_cap: usize,
    /// Maximum length of the returned feed.
    pub global_limit: usize,
    /// Patterns below this confidence do not become decisions.
    pub pattern_confidence_floor: f64,
}

impl Default for FusionConfig {
    fn default() -> Self {
        Self {
            per_source_cap: defaults::DEFAULT_PER_SOURCE_CAP,
            global_limit: defaults::DEFAULT_GLOBAL_LIMIT,
            pattern_confidence_floor: defaults::DEFAULT_FUSION_PATTERN_FLOOR,
        }
    }
}
