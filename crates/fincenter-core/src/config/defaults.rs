//! Default values for every configuration field.

// Storage
pub const DEFAULT_DB_PATH: &str = "fincenter.db";
pub const DEFAULT_READ_POOL_SIZE: usize = 4;

// Episodic pattern learner
pub const DEFAULT_OVERBILLING_RATIO: f64 = 1.10;
pub const DEFAULT_MIN_VENDOR_INVOICES: usize = 2;
pub const DEFAULT_OVERSPEND_RATIO: f64 = 1.05;
pub const DEFAULT_MIN_OVERSPEND_PERIODS: usize = 2;
pub const DEFAULT_LATE_PAYMENT_AVG_DAYS: f64 = 30.0;
pub const DEFAULT_MIN_LATE_INVOICES: usize = 2;
pub const DEFAULT_SEASONAL_RATIO: f64 = 1.20;
pub const DEFAULT_MIN_SEASONAL_PERIODS: usize = 3;
pub const DEFAULT_SEASONAL_CONFIDENCE: f64 = 0.65;
pub const DEFAULT_DIGEST_CONFIDENCE_FLOOR: f64 = crate::constants::DIGEST_CONFIDENCE_FLOOR;
pub const DEFAULT_DIGEST_LIMIT: usize = 8;

// Weak signal correlator
pub const DEFAULT_STRESS_THRESHOLD: u32 = crate::constants::DEFAULT_STRESS_THRESHOLD;
pub const DEFAULT_WEIGHT_BUDGET_SLIGHTLY_OVER: u32 = 1;
pub const DEFAULT_WEIGHT_INVOICE_MODERATELY_OVERDUE: u32 = 1;
pub const DEFAULT_WEIGHT_CONTRACT_EXPIRING_MEDIUM: u32 = 1;
pub const DEFAULT_WEIGHT_VENDOR_SLIGHT_OVERBILLING: u32 = 1;
pub const DEFAULT_WEIGHT_EPISODIC_PATTERN_ACTIVE: u32 = 2;

// Decision fusion
pub const DEFAULT_PER_SOURCE_CAP: usize = crate::constants::DEFAULT_PER_SOURCE_CAP;
pub const DEFAULT_GLOBAL_LIMIT: usize = crate::constants::DEFAULT_GLOBAL_LIMIT;
pub const DEFAULT_FUSION_PATTERN_FLOOR: f64 = crate::constants::DIGEST_CONFIDENCE_FLOOR;

// Recommendations
pub const DEFAULT_REC_OVERRUN_PCT: f64 = 10.0;
pub const DEFAULT_REC_UNDERRUN_PCT: f64 = 15.0;
pub const DEFAULT_REC_CONTRACT_WINDOW_DAYS: i64 = crate::constants::CONTRACT_EXPIRY_WINDOW_DAYS;
pub const DEFAULT_REC_INVOICE_OVERDUE_DAYS: i64 = 30;
pub const DEFAULT_REC_PATTERN_FLOOR: f64 = crate::constants::DIGEST_CONFIDENCE_FLOOR;

// Observability
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const DEFAULT_JSON_LOGS: bool = false;
