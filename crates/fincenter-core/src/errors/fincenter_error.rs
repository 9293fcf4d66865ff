use super::StorageError;

/// Result alias used across the workspace.
pub type FincenterResult<T> = Result<T, FincenterError>;

/// Top-level error for the intelligence layer.
///
/// Engines convert per-source read failures into degradation events instead of
/// returning these; callers only see storage write and configuration failures.
#[derive(Debug, thiserror::Error)]
pub enum FincenterError {
    #[error("{kind} not found: {id}")]
    RecordNotFound { kind: String, id: String },

    #[error("storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    ConfigError(String),

    #[error("source '{source_name}' unavailable: {reason}")]
    SourceUnavailable { source_name: String, reason: String },

    #[error("narrative generator unavailable: {reason}")]
    NarrativeUnavailable { reason: String },
}

impl FincenterError {
    /// Shorthand for a source read failure.
    pub fn source_unavailable(source_name: impl Into<String>, reason: impl ToString) -> Self {
        Self::SourceUnavailable {
            source_name: source_name.into(),
            reason: reason.to_string(),
        }
    }
}
