use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A component fell back to a reduced result instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DegradationEvent {
    pub component: String,
    pub failure: String,
    pub fallback_used: String,
    pub timestamp: DateTime<Utc>,
}

impl DegradationEvent {
    pub fn new(
        component: impl Into<String>,
        failure: impl Into<String>,
        fallback_used: impl Into<String>,
    ) -> Self {
        Self {
            component: component.into(),
            failure: failure.into(),
            fallback_used: fallback_used.into(),
            timestamp: Utc::now(),
        }
    }
}
