use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::constants::MAX_DAYS_OVERDUE;

/// Payment status of an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum InvoiceStatus {
    Paid,
    Unpaid,
}

impl InvoiceStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Paid => "PAID",
            Self::Unpaid => "UNPAID",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "PAID" => Some(Self::Paid),
            "UNPAID" => Some(Self::Unpaid),
            _ => None,
        }
    }
}

/// A vendor invoice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub invoice_id: String,
    pub vendor: String,
    pub amount: Option<f64>,
    pub status: InvoiceStatus,
    pub due_date: Option<NaiveDate>,
}

impl Invoice {
    pub fn is_unpaid(&self) -> bool {
        self.status == InvoiceStatus::Unpaid
    }

    /// Days past due as of `today`, clamped to `[0, 365]`.
    /// Paid invoices and invoices without a due date are never overdue.
    pub fn days_overdue(&self, today: NaiveDate) -> i64 {
        if !self.is_unpaid() {
            return 0;
        }
        match self.due_date {
            Some(due) => (today - due).num_days().clamp(0, MAX_DAYS_OVERDUE),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invoice(status: InvoiceStatus, due: Option<NaiveDate>) -> Invoice {
        Invoice {
            invoice_id: "INV-1".into(),
            vendor: "Acme".into(),
            amount: Some(1_000.0),
            status,
            due_date: due,
        }
    }

    #[test]
    fn days_overdue_counts_from_due_date() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let due = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(invoice(InvoiceStatus::Unpaid, Some(due)).days_overdue(today), 29);
    }

    #[test]
    fn days_overdue_clamped_and_zero_for_paid() {
        let today = NaiveDate::from_ymd_opt(2024, 6, 30).unwrap();
        let old = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
        let future = NaiveDate::from_ymd_opt(2024, 12, 1).unwrap();
        assert_eq!(invoice(InvoiceStatus::Unpaid, Some(old)).days_overdue(today), 365);
        assert_eq!(invoice(InvoiceStatus::Unpaid, Some(future)).days_overdue(today), 0);
        assert_eq!(invoice(InvoiceStatus::Paid, Some(old)).days_overdue(today), 0);
        assert_eq!(invoice(InvoiceStatus::Unpaid, None).days_overdue(today), 0);
    }

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!(InvoiceStatus::parse("unpaid"), Some(InvoiceStatus::Unpaid));
        assert_eq!(InvoiceStatus::parse("PAID"), Some(InvoiceStatus::Paid));
        assert_eq!(InvoiceStatus::parse("void"), None);
    }
}
