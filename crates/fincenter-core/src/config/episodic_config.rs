use serde::{Deserialize, Serialize};

use super::defaults;

/// Episodic pattern learner configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EpisodicConfig {
    /// Average invoice must exceed the monthly contract value by this factor.
    pub overbilling_ratio: f64,
    /// Vendors with fewer positive invoices are not evaluated for overbilling.
    pub min_vendor_invoices: usize,
    /// A period counts as overspent when actual exceeds budget by this factor.
    pub overspend_ratio: f64,
    /// Overspent periods required before a department pattern is raised.
    pub min_overspend_periods: usize,
    /// Mean days overdue a vendor must exceed for a late-payment pattern.
    pub late_payment_avg_days: f64,
    /// Unpaid overdue invoices required before a late-payment pattern is raised.
    pub min_late_invoices: usize,
    /// A period counts as a spike when actual exceeds the mean by this factor.
    pub seasonal_ratio: f64,
    /// Spike periods required before a seasonal pattern is raised.
    pub min_seasonal_periods: usize,
    /// Fixed confidence assigned to seasonal spikes.
    pub seasonal_confidence: f64,
    /// Patterns below this confidence are excluded from the context digest.
    pub digest_confidence_floor: f64,
    /// Default number of patterns rendered into narrative context.
    pub digest_limit: usize,
}

impl Default for EpisodicConfig {
    fn default() -> Self {
        Self {
            overbilling_ratio: defaults::DEFAULT_OVERBILLING_RATIO,
            min_vendor_invoices: defaults::DEFAULT_MIN_VENDOR_INVOICES,
            overspend_ratio: defaults::DEFAULT_OVERSPEND_RATIO,
            min_overspend_periods: defaults::DEFAULT_MIN_OVERSPEND_PERIODS,
            late_payment_avg_days: defaults::DEFAULT_LATE_PAYMENT_AVG_DAYS,
            min_late_invoices: defaults::DEFAULT_MIN_LATE_INVOICES,
            seasonal_ratio: defaults::DEFAULT_SEASONAL_RATIO,
            min_seasonal_periods: defaults::DEFAULT_MIN_SEASONAL_PERIODS,
            seasonal_confidence: defaults::DEFAULT_SEASONAL_CONFIDENCE,
            digest_confidence_floor: defaults::DEFAULT_DIGEST_CONFIDENCE_FLOOR,
            digest_limit: defaults::DEFAULT_DIGEST_LIMIT,
        }
    }
}
