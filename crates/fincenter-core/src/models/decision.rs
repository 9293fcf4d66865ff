use serde::{Deserialize, Serialize};

/// Severity of a ranked decision. Ordered so that `Critical` sorts first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    Info,
}

impl Severity {
    /// Multiplier used by the fusion priority formula.
    pub fn weight(self) -> f64 {
        match self {
            Self::Critical => 3.0,
            Self::Warning => 2.0,
            Self::Info => 1.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

/// The five signal domains feeding the decision feed, in reference order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionSource {
    Budget,
    Invoice,
    Contract,
    Pattern,
    Cluster,
}

impl DecisionSource {
    pub const ALL: [DecisionSource; 5] = [
        Self::Budget,
        Self::Invoice,
        Self::Contract,
        Self::Pattern,
        Self::Cluster,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::Invoice => "invoice",
            Self::Contract => "contract",
            Self::Pattern => "pattern",
            Self::Cluster => "cluster",
        }
    }
}

/// A ranked, actionable risk item. Computed per request; never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub id: String,
    pub source: DecisionSource,
    pub severity: Severity,
    pub title: String,
    pub description: String,
    pub recommended_action: String,
    /// Currency amount at stake (0 for pattern and cluster items).
    pub financial_impact: f64,
    pub priority_score: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_orders_critical_first() {
        let mut s = vec![Severity::Info, Severity::Critical, Severity::Warning];
        s.sort();
        assert_eq!(s, vec![Severity::Critical, Severity::Warning, Severity::Info]);
        assert_eq!(Severity::Critical.weight(), 3.0);
    }
}
