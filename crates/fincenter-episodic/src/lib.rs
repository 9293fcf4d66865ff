//! # fincenter-episodic
//!
//! Learns recurring financial behaviour from ledger history.
//!
//! ## 4 Detectors
//!
//! | Pattern | Subject | Confidence |
//! |---------|---------|------------|
//! | vendor_overbilling | vendor | `min(0.95, 0.5 + invoices × 0.05)` |
//! | department_overspend | department | `min(0.95, 0.4 + periods × 0.15)` |
//! | late_payment_pattern | vendor | `min(0.90, 0.4 + invoices × 0.05)` |
//! | seasonal_spike | All Departments | fixed 0.65 |
//!
//! Detectors are independent and run in parallel. Every run recomputes
//! evidence from scratch and upserts by `type + subject` id.

pub mod detectors;
pub mod digest;
pub mod engine;

pub use detectors::{Finding, PatternDetector};
pub use digest::render_digest;
pub use engine::EpisodicEngine;
