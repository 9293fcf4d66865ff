/// FINCENTER version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Combined weak-signal weight at which a stress cluster is raised.
pub const DEFAULT_STRESS_THRESHOLD: u32 = 4;

/// Maximum candidates a single decision source may contribute to the fused feed.
pub const DEFAULT_PER_SOURCE_CAP: usize = 5;

/// Maximum length of the fused decision feed.
pub const DEFAULT_GLOBAL_LIMIT: usize = 20;

/// Patterns below this confidence are kept out of digests and decision feeds.
pub const DIGEST_CONFIDENCE_FLOOR: f64 = 0.6;

/// Days-overdue values are clamped to one year.
pub const MAX_DAYS_OVERDUE: i64 = 365;

/// Sentinel used for contracts without an end date.
pub const NO_EXPIRY_DAYS: i64 = 999;

/// Reference amounts used to normalise financial impact into [0, 1].
pub const BUDGET_REFERENCE_AMOUNT: f64 = 500_000.0;
pub const INVOICE_REFERENCE_AMOUNT: f64 = 100_000.0;
pub const CONTRACT_REFERENCE_AMOUNT: f64 = 500_000.0;
pub const SURPLUS_REFERENCE_AMOUNT: f64 = 300_000.0;

/// Horizon, in days, within which a contract counts as expiring.
pub const CONTRACT_EXPIRY_WINDOW_DAYS: i64 = 90;

/// Subject used for patterns and signals that span every department.
pub const AGGREGATE_SUBJECT: &str = "All Departments";

/// Subject used for system-wide weak signals.
pub const SYSTEM_SUBJECT: &str = "System";

/// Fixed id of the singleton stress-cluster recommendation.
pub const WEAK_SIGNAL_RECOMMENDATION_ID: &str = "weaksignal_cluster";
