//! Ingest and read operations for budget_periods, invoices, and contracts.

use rusqlite::{params, params_from_iter, Connection};

use fincenter_core::errors::FincenterResult;
use fincenter_core::ledger::{BudgetPeriod, Contract, Invoice, InvoiceStatus, LedgerSnapshot};
use fincenter_core::traits::{ContractFilter, InvoiceFilter};

use super::{format_date, parse_date};
use crate::{corrupt_row, to_storage_err};

/// Counts of rows written by a bulk import.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ImportSummary {
    pub budgets: usize,
    pub invoices: usize,
    pub contracts: usize,
}

impl ImportSummary {
    pub fn total(&self) -> usize {
        self.budgets + self.invoices + self.contracts
    }
}

/// Upsert a budget period keyed by department + year + category.
pub fn upsert_budget_period(conn: &Connection, period: &BudgetPeriod) -> FincenterResult<()> {
    conn.execute(
        "INSERT INTO budget_periods (department, year, category, budget, actual)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(department, year, category) DO UPDATE SET
            budget = excluded.budget,
            actual = excluded.actual",
        params![
            period.department,
            period.year,
            period.category,
            period.budget,
            period.actual
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn upsert_invoice(conn: &Connection, invoice: &Invoice) -> FincenterResult<()> {
    conn.execute(
        "INSERT INTO invoices (invoice_id, vendor, amount, status, due_date)
         VALUES (?1, ?2, ?3, ?4, ?5)
         ON CONFLICT(invoice_id) DO UPDATE SET
            vendor = excluded.vendor,
            amount = excluded.amount,
            status = excluded.status,
            due_date = excluded.due_date",
        params![
            invoice.invoice_id,
            invoice.vendor,
            invoice.amount,
            invoice.status.as_str(),
            invoice.due_date.map(format_date),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

pub fn upsert_contract(conn: &Connection, contract: &Contract) -> FincenterResult<()> {
    conn.execute(
        "INSERT INTO contracts (contract_id, vendor, annual_value, end_date)
         VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(contract_id) DO UPDATE SET
            vendor = excluded.vendor,
            annual_value = excluded.annual_value,
            end_date = excluded.end_date",
        params![
            contract.contract_id,
            contract.vendor,
            contract.annual_value,
            contract.end_date.map(format_date),
        ],
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}

/// Upsert a whole snapshot atomically.
pub fn import_snapshot(conn: &Connection, snapshot: &LedgerSnapshot) -> FincenterResult<ImportSummary> {
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(format!("import_snapshot begin: {e}")))?;

    match import_snapshot_inner(&tx, snapshot) {
        Ok(summary) => {
            tx.commit()
                .map_err(|e| to_storage_err(format!("import_snapshot commit: {e}")))?;
            Ok(summary)
        }
        Err(e) => {
            let _ = tx.rollback();
            Err(e)
        }
    }
}

fn import_snapshot_inner(conn: &Connection, snapshot: &LedgerSnapshot) -> FincenterResult<ImportSummary> {
    for period in &snapshot.budgets {
        upsert_budget_period(conn, period)?;
    }
    for invoice in &snapshot.invoices {
        upsert_invoice(conn, invoice)?;
    }
    for contract in &snapshot.contracts {
        upsert_contract(conn, contract)?;
    }
    Ok(ImportSummary {
        budgets: snapshot.budgets.len(),
        invoices: snapshot.invoices.len(),
        contracts: snapshot.contracts.len(),
    })
}

/// All budget periods ordered by department, then year.
pub fn list_budget_periods(conn: &Connection) -> FincenterResult<Vec<BudgetPeriod>> {
    let mut stmt = conn
        .prepare(
            "SELECT department, year, category, budget, actual
             FROM budget_periods
             ORDER BY department ASC, year ASC, category ASC",
        )
        .map_err(|e| to_storage_err(e.to_string()))?;

    let rows = stmt
        .query_map([], |row| {
            Ok(BudgetPeriod {
                department: row.get(0)?,
                year: row.get(1)?,
                category: row.get(2)?,
                budget: row.get(3)?,
                actual: row.get(4)?,
            })
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    rows.collect::<Result<Vec<_>, _>>()
        .map_err(|e| to_storage_err(e.to_string()))
}

/// Invoices narrowed by the filter, ordered by id.
pub fn list_invoices(conn: &Connection, filter: &InvoiceFilter) -> FincenterResult<Vec<Invoice>> {
    let mut sql = String::from(
        "SELECT invoice_id, vendor, amount, status, due_date FROM invoices WHERE 1 = 1",
    );
    let mut args: Vec<String> = Vec::new();
    if let Some(status) = filter.status {
        args.push(status.as_str().to_string());
        sql.push_str(&format!(" AND status = ?{}", args.len()));
    }
    if let Some(cutoff) = filter.due_before {
        args.push(format_date(cutoff));
        sql.push_str(&format!(
            " AND due_date IS NOT NULL AND due_date < ?{}",
            args.len()
        ));
    }
    sql.push_str(" ORDER BY invoice_id ASC");

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(args.iter()), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<f64>>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, Option<String>>(4)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut invoices = Vec::new();
    for row in rows {
        let (invoice_id, vendor, amount, status, due_date) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        let status = InvoiceStatus::parse(&status)
            .ok_or_else(|| corrupt_row("invoices", format!("status '{status}'")))?;
        invoices.push(Invoice {
            invoice_id,
            vendor,
            amount,
            status,
            due_date: due_date
                .as_deref()
                .map(|d| parse_date("invoices", d))
                .transpose()?,
        });
    }
    Ok(invoices)
}

/// Contracts narrowed by the filter, ordered by id.
pub fn list_contracts(conn: &Connection, filter: &ContractFilter) -> FincenterResult<Vec<Contract>> {
    let mut sql =
        String::from("SELECT contract_id, vendor, annual_value, end_date FROM contracts");
    let mut args: Vec<String> = Vec::new();
    if let Some(cutoff) = filter.ends_before {
        args.push(format_date(cutoff));
        sql.push_str(" WHERE end_date IS NOT NULL AND end_date <= ?1");
    }
    sql.push_str(" ORDER BY contract_id ASC");

    let mut stmt = conn
        .prepare(&sql)
        .map_err(|e| to_storage_err(e.to_string()))?;
    let rows = stmt
        .query_map(params_from_iter(args.iter()), |row| {
            Ok((
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, Option<f64>>(2)?,
                row.get::<_, Option<String>>(3)?,
            ))
        })
        .map_err(|e| to_storage_err(e.to_string()))?;

    let mut contracts = Vec::new();
    for row in rows {
        let (contract_id, vendor, annual_value, end_date) =
            row.map_err(|e| to_storage_err(e.to_string()))?;
        contracts.push(Contract {
            contract_id,
            vendor,
            annual_value,
            end_date: end_date
                .as_deref()
                .map(|d| parse_date("contracts", d))
                .transpose()?,
        });
    }
    Ok(contracts)
}
