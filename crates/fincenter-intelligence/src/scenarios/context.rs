//! Ledger summary handed to the scenario generator.

use chrono::NaiveDate;
use tracing::debug;

use fincenter_core::constants::CONTRACT_EXPIRY_WINDOW_DAYS;
use fincenter_core::ledger::format_amount;
use fincenter_core::traits::{ContractFilter, ILedgerStore, InvoiceFilter};

const CONTEXT_HEADER: &str = "=== CURRENT FINANCIAL CONTEXT ===";

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BudgetSummary {
    pub periods: usize,
    pub over_budget: usize,
    pub total_overrun: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InvoiceSummary {
    pub overdue: usize,
    pub outstanding: f64,
    pub oldest_days: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ContractSummary {
    pub expiring: usize,
    pub value_at_risk: f64,
}

/// Headline figures per ledger area. An area whose read failed, or that has
/// nothing to report, is `None` and left out of the rendered text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LedgerSummary {
    pub budgets: Option<BudgetSummary>,
    pub invoices: Option<InvoiceSummary>,
    pub contracts: Option<ContractSummary>,
}

impl LedgerSummary {
    pub fn collect(ledger: &dyn ILedgerStore, today: NaiveDate) -> Self {
        Self {
            budgets: summarize_budgets(ledger),
            invoices: summarize_invoices(ledger, today),
            contracts: summarize_contracts(ledger, today),
        }
    }

    pub fn render(&self) -> String {
        let mut lines = vec![CONTEXT_HEADER.to_string()];
        if let Some(b) = &self.budgets {
            lines.push(format!(
                "BUDGETS: {} budget periods tracked, {} over budget, total overrun: {} EUR",
                b.periods,
                b.over_budget,
                format_amount(b.total_overrun)
            ));
        }
        if let Some(i) = &self.invoices {
            lines.push(format!(
                "INVOICES: {} overdue invoices, total outstanding: {} EUR, oldest: {} days",
                i.overdue,
                format_amount(i.outstanding),
                i.oldest_days
            ));
        }
        if let Some(c) = &self.contracts {
            lines.push(format!(
                "CONTRACTS: {} expiring in <{} days, total annual value at risk: {} EUR",
                c.expiring,
                CONTRACT_EXPIRY_WINDOW_DAYS,
                format_amount(c.value_at_risk)
            ));
        }
        lines.join("\n")
    }
}

fn summarize_budgets(ledger: &dyn ILedgerStore) -> Option<BudgetSummary> {
    let periods = match ledger.budget_periods() {
        Ok(p) if !p.is_empty() => p,
        Ok(_) => return None,
        Err(e) => {
            debug!(error = %e, "budget summary skipped");
            return None;
        }
    };
    let mut summary = BudgetSummary {
        periods: periods.len(),
        ..BudgetSummary::default()
    };
    for overrun in periods.iter().filter_map(|p| p.overrun()).filter(|o| *o > 0.0) {
        summary.over_budget += 1;
        summary.total_overrun += overrun;
    }
    Some(summary)
}

fn summarize_invoices(ledger: &dyn ILedgerStore, today: NaiveDate) -> Option<InvoiceSummary> {
    let invoices = match ledger.invoices(&InvoiceFilter::unpaid()) {
        Ok(i) => i,
        Err(e) => {
            debug!(error = %e, "invoice summary skipped");
            return None;
        }
    };
    let mut summary = InvoiceSummary::default();
    for invoice in &invoices {
        let days = invoice.days_overdue(today);
        if days <= 0 {
            continue;
        }
        summary.overdue += 1;
        summary.outstanding += invoice.amount.unwrap_or(0.0);
        summary.oldest_days = summary.oldest_days.max(days);
    }
    (summary.overdue > 0).then_some(summary)
}

fn summarize_contracts(ledger: &dyn ILedgerStore, today: NaiveDate) -> Option<ContractSummary> {
    let filter = ContractFilter {
        ends_before: Some(today + chrono::Duration::days(CONTRACT_EXPIRY_WINDOW_DAYS)),
    };
    let contracts = match ledger.contracts(&filter) {
        Ok(c) => c,
        Err(e) => {
            debug!(error = %e, "contract summary skipped");
            return None;
        }
    };
    let mut summary = ContractSummary::default();
    for contract in &contracts {
        let days = contract.days_until_expiry(today);
        if days <= 0 || days > CONTRACT_EXPIRY_WINDOW_DAYS {
            continue;
        }
        summary.expiring += 1;
        summary.value_at_risk += contract.annual_value.unwrap_or(0.0);
    }
    (summary.expiring > 0).then_some(summary)
}
