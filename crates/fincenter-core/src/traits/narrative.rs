use crate::errors::{FincenterError, FincenterResult};

/// Opaque text generator used to phrase answers and scenarios.
pub trait INarrativeGenerator: Send + Sync {
    fn generate(&self, system_prompt: &str, user_prompt: &str) -> FincenterResult<String>;
    fn name(&self) -> &str;
}

/// Generator for deployments without a language model. Always unavailable,
/// which makes callers take their fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpNarrator;

impl INarrativeGenerator for NoOpNarrator {
    fn generate(&self, _system_prompt: &str, _user_prompt: &str) -> FincenterResult<String> {
        Err(FincenterError::NarrativeUnavailable {
            reason: "no generator configured".to_string(),
        })
    }

    fn name(&self) -> &str {
        "noop"
    }
}
