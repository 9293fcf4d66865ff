use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::Confidence;
use crate::ledger::slug;

/// The four learned behaviour kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternType {
    VendorOverbilling,
    DepartmentOverspend,
    LatePaymentPattern,
    SeasonalSpike,
}

impl PatternType {
    pub const ALL: [PatternType; 4] = [
        Self::VendorOverbilling,
        Self::DepartmentOverspend,
        Self::LatePaymentPattern,
        Self::SeasonalSpike,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::VendorOverbilling => "vendor_overbilling",
            Self::DepartmentOverspend => "department_overspend",
            Self::LatePaymentPattern => "late_payment_pattern",
            Self::SeasonalSpike => "seasonal_spike",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == s)
    }
}

/// A learned, confidence-scored recurring behaviour.
///
/// Identity is `type + subject`, so a subject's pattern evolves in place as
/// evidence accrues rather than accumulating versions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EpisodicPattern {
    pub id: String,
    pub pattern_type: PatternType,
    pub subject: String,
    pub description: String,
    pub confidence: Confidence,
    pub evidence_count: u32,
    pub last_updated: DateTime<Utc>,
}

impl EpisodicPattern {
    /// Deterministic id for a `(type, subject)` pair.
    pub fn pattern_id(pattern_type: PatternType, subject: &str) -> String {
        format!("{}_{}", pattern_type.as_str(), slug(subject))
    }

    pub fn new(
        pattern_type: PatternType,
        subject: impl Into<String>,
        description: impl Into<String>,
        confidence: Confidence,
        evidence_count: u32,
        last_updated: DateTime<Utc>,
    ) -> Self {
        let subject = subject.into();
        Self {
            id: Self::pattern_id(pattern_type, &subject),
            pattern_type,
            subject,
            description: description.into(),
            confidence,
            evidence_count,
            last_updated,
        }
    }
}
