use serde::{Deserialize, Serialize};

use super::defaults;
use crate::models::SignalType;

/// Weight contributed by each weak-signal type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalWeights {
    pub budget_slightly_over: u32,
    pub invoice_moderately_overdue: u32,
    pub contract_expiring_medium: u32,
    pub vendor_slight_overbilling: u32,
    pub episodic_pattern_active: u32,
}

impl SignalWeights {
    /// Look up the weight for a signal type.
    pub fn weight_for(&self, signal_type: SignalType) -> u32 {
        match signal_type {
            SignalType::BudgetSlightlyOver => self.budget_slightly_over,
            SignalType::InvoiceModeratelyOverdue => self.invoice_moderately_overdue,
            SignalType::ContractExpiringMedium => self.contract_expiring_medium,
            SignalType::VendorSlightOverbilling => self.vendor_slight_overbilling,
            SignalType::EpisodicPatternActive => self.episodic_pattern_active,
        }
    }
}

impl Default for SignalWeights {
    fn default() -> Self {
        Self {
            budget_slightly_over: defaults::DEFAULT_WEIGHT_BUDGET_SLIGHTLY_OVER,
            invoice_moderately_overdue: defaults::DEFAULT_WEIGHT_INVOICE_MODERATELY_OVERDUE,
            contract_expiring_medium: defaults::DEFAULT_WEIGHT_CONTRACT_EXPIRING_MEDIUM,
            vendor_slight_overbilling: defaults::DEFAULT_WEIGHT_VENDOR_SLIGHT_OVERBILLING,
            episodic_pattern_active: defaults::DEFAULT_WEIGHT_EPISODIC_PATTERN_ACTIVE,
        }
    }
}

/// Weak signal correlator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelationConfig {
    /// Combined weight at which a stress cluster is raised.
    pub stress_threshold: u32,
    pub weights: SignalWeights,
}

impl Default for CorrelationConfig {
    fn default() -> Self {
        Self {
            stress_threshold: defaults::DEFAULT_STRESS_THRESHOLD,
            weights: SignalWeights::default(),
        }
    }
}
