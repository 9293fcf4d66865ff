use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kinds of sub-threshold anomaly the correlator looks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignalType {
    /// 5–15% over budget.
    BudgetSlightlyOver,
    /// Unpaid, 15–30 days overdue.
    InvoiceModeratelyOverdue,
    /// 61–90 days until expiry.
    ContractExpiringMedium,
    /// Mean invoice above, but within 10% of, the monthly contract value.
    VendorSlightOverbilling,
    /// At least one learned pattern exists.
    EpisodicPatternActive,
}

impl SignalType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BudgetSlightlyOver => "budget_slightly_over",
            Self::InvoiceModeratelyOverdue => "invoice_moderately_overdue",
            Self::ContractExpiringMedium => "contract_expiring_medium",
            Self::VendorSlightOverbilling => "vendor_slight_overbilling",
            Self::EpisodicPatternActive => "episodic_pattern_active",
        }
    }
}

/// One weak signal. Built fresh on every correlator run and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signal {
    pub signal_type: SignalType,
    pub subject: String,
    pub detail: String,
    pub weight: u32,
}

impl Signal {
    /// The `"type:subject"` key used for cluster identity.
    pub fn key(&self) -> String {
        format!("{}:{}", self.signal_type.as_str(), self.subject)
    }
}

/// A persisted set of weak signals whose combined weight crossed the stress threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StressCluster {
    pub id: String,
    pub score: u32,
    pub signals: Vec<Signal>,
    pub detected_at: DateTime<Utc>,
    pub acknowledged: bool,
}

impl StressCluster {
    /// Content-hash identity: blake3 over the sorted `"type:subject"` keys.
    /// Independent of the order in which signals were collected.
    pub fn compute_id(signals: &[Signal]) -> String {
        let mut keys: Vec<String> = signals.iter().map(Signal::key).collect();
        keys.sort();
        let hash = blake3::hash(keys.join("\n").as_bytes());
        format!("ws_{}", &hash.to_hex()[..16])
    }

    /// Build a cluster from collected signals, storing them in canonical order.
    pub fn from_signals(mut signals: Vec<Signal>, detected_at: DateTime<Utc>) -> Self {
        signals.sort_by(|a, b| {
            a.key()
                .cmp(&b.key())
                .then_with(|| a.detail.cmp(&b.detail))
                .then_with(|| a.weight.cmp(&b.weight))
        });
        Self {
            id: Self::compute_id(&signals),
            score: signals.iter().map(|s| s.weight).fold(0, u32::saturating_add),
            signals,
            detected_at,
            acknowledged: false,
        }
    }
}
