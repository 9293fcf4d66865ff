use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::NO_EXPIRY_DAYS;

/// A vendor contract.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Contract {
    pub contract_id: String,
    pub vendor: String,
    pub annual_value: Option<f64>,
    pub end_date: Option<NaiveDate>,
}

impl Contract {
    /// Days from `today` until the contract ends. Negative once expired,
    /// `999` when the contract has no end date.
    pub fn days_until_expiry(&self, today: NaiveDate) -> i64 {
        match self.end_date {
            Some(end) => (end - today).num_days(),
            None => NO_EXPIRY_DAYS,
        }
    }

    pub fn monthly_value(&self) -> Option<f64> {
        self.annual_value.map(|v| v / 12.0)
    }
}
