//! Terse constructors for ledger entities.

use chrono::{Duration, NaiveDate};

use fincenter_core::ledger::{BudgetPeriod, Contract, Invoice, InvoiceStatus};

/// The reference "today" for [`crate::sample_ledger`] and most scenario tests.
pub const SAMPLE_TODAY: (i32, u32, u32) = (2025, 6, 30);

/// [`SAMPLE_TODAY`] as a date.
pub fn today() -> NaiveDate {
    let (y, m, d) = SAMPLE_TODAY;
    NaiveDate::from_ymd_opt(y, m, d).expect("valid sample date")
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
}

pub fn budget(department: &str, year: i32, budget: f64, actual: f64) -> BudgetPeriod {
    budget_line(department, year, "", budget, actual)
}

/// A budget row for one spending category of a department's year.
pub fn budget_line(
    department: &str,
    year: i32,
    category: &str,
    budget: f64,
    actual: f64,
) -> BudgetPeriod {
    BudgetPeriod {
        department: department.to_string(),
        year,
        category: category.to_string(),
        budget: Some(budget),
        actual: Some(actual),
    }
}

/// An unpaid invoice that is `days_overdue` days past due as of [`today`].
pub fn overdue_invoice(id: &str, vendor: &str, amount: f64, days_overdue: i64) -> Invoice {
    Invoice {
        invoice_id: id.to_string(),
        vendor: vendor.to_string(),
        amount: Some(amount),
        status: InvoiceStatus::Unpaid,
        due_date: Some(today() - Duration::days(days_overdue)),
    }
}

/// A paid invoice with no due date.
pub fn paid_invoice(id: &str, vendor: &str, amount: f64) -> Invoice {
    Invoice {
        invoice_id: id.to_string(),
        vendor: vendor.to_string(),
        amount: Some(amount),
        status: InvoiceStatus::Paid,
        due_date: None,
    }
}

/// A contract ending `days_left` days after [`today`].
pub fn contract(id: &str, vendor: &str, annual_value: f64, days_left: i64) -> Contract {
    Contract {
        contract_id: id.to_string(),
        vendor: vendor.to_string(),
        annual_value: Some(annual_value),
        end_date: Some(today() + Duration::days(days_left)),
    }
}

/// A contract with no end date.
pub fn open_contract(id: &str, vendor: &str, annual_value: f64) -> Contract {
    Contract {
        contract_id: id.to_string(),
        vendor: vendor.to_string(),
        annual_value: Some(annual_value),
        end_date: None,
    }
}
