use chrono::NaiveDate;

use crate::errors::FincenterResult;
use crate::ledger::{BudgetPeriod, Contract, Invoice, InvoiceStatus};

/// Optional narrowing for invoice reads.
#[derive(Debug, Clone, Default)]
pub struct InvoiceFilter {
    pub status: Option<InvoiceStatus>,
    /// Only invoices due strictly before this date.
    pub due_before: Option<NaiveDate>,
}

impl InvoiceFilter {
    pub fn unpaid() -> Self {
        Self {
            status: Some(InvoiceStatus::Unpaid),
            due_before: None,
        }
    }

    pub fn matches(&self, invoice: &Invoice) -> bool {
        if let Some(status) = self.status {
            if invoice.status != status {
                return false;
            }
        }
        if let Some(cutoff) = self.due_before {
            match invoice.due_date {
                Some(due) if due < cutoff => {}
                _ => return false,
            }
        }
        true
    }
}

/// Optional narrowing for contract reads.
#[derive(Debug, Clone, Default)]
pub struct ContractFilter {
    /// Only contracts with an end date on or before this date.
    pub ends_before: Option<NaiveDate>,
}

impl ContractFilter {
    pub fn matches(&self, contract: &Contract) -> bool {
        match self.ends_before {
            Some(cutoff) => contract.end_date.is_some_and(|end| end <= cutoff),
            None => true,
        }
    }
}

/// Read-only access to the raw financial ledger.
pub trait ILedgerStore: Send + Sync {
    fn budget_periods(&self) -> FincenterResult<Vec<BudgetPeriod>>;
    fn invoices(&self, filter: &InvoiceFilter) -> FincenterResult<Vec<Invoice>>;
    fn contracts(&self, filter: &ContractFilter) -> FincenterResult<Vec<Contract>>;
}
