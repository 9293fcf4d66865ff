//! Raw financial entities read from the ledger store.
//!
//! Numeric fields are optional because upstream ingestion does not guarantee
//! them; consumers treat a missing value as a malformed record and skip it.

mod budget;
mod contract;
mod invoice;

pub use budget::{department_year_totals, BudgetPeriod};
pub use contract::Contract;
pub use invoice::{Invoice, InvoiceStatus};

use serde::{Deserialize, Serialize};

/// A full ledger bundle, used for bulk import and fixtures.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSnapshot {
    pub budgets: Vec<BudgetPeriod>,
    pub invoices: Vec<Invoice>,
    pub contracts: Vec<Contract>,
}

impl LedgerSnapshot {
    pub fn is_empty(&self) -> bool {
        self.budgets.is_empty() && self.invoices.is_empty() && self.contracts.is_empty()
    }
}

/// Replace whitespace so subjects can be embedded in deterministic ids.
pub fn slug(subject: &str) -> String {
    subject.split_whitespace().collect::<Vec<_>>().join("_")
}

/// Render a currency amount rounded to whole units with thousands
/// separators, e.g. `12847.4` becomes `"12,847"`.
pub fn format_amount(amount: f64) -> String {
    let rounded = amount.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if rounded < 0.0 {
        out.insert(0, '-');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_amount_groups_thousands() {
        assert_eq!(format_amount(12_847.4), "12,847");
        assert_eq!(format_amount(1_234_567.0), "1,234,567");
        assert_eq!(format_amount(999.0), "999");
        assert_eq!(format_amount(-45_000.0), "-45,000");
        assert_eq!(format_amount(0.2), "0");
    }

    #[test]
    fn slug_joins_whitespace_runs() {
        assert_eq!(slug("Acme  Cloud Services"), "Acme_Cloud_Services");
        assert_eq!(slug("IT"), "IT");
    }
}
