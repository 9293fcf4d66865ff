//! v001: budget_periods, invoices, contracts.

use rusqlite::Connection;

use fincenter_core::errors::FincenterResult;

use crate::to_storage_err;

pub fn migrate(conn: &Connection) -> FincenterResult<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS budget_periods (
            department TEXT NOT NULL,
            year       INTEGER NOT NULL,
            category   TEXT NOT NULL DEFAULT '',
            budget     REAL,
            actual     REAL,
            PRIMARY KEY (department, year, category)
        );

        CREATE TABLE IF NOT EXISTS invoices (
            invoice_id TEXT PRIMARY KEY,
            vendor     TEXT NOT NULL,
            amount     REAL,
            status     TEXT NOT NULL,
            due_date   TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_invoices_vendor ON invoices(vendor);
        CREATE INDEX IF NOT EXISTS idx_invoices_status ON invoices(status);

        CREATE TABLE IF NOT EXISTS contracts (
            contract_id  TEXT PRIMARY KEY,
            vendor       TEXT NOT NULL,
            annual_value REAL,
            end_date     TEXT
        );

        CREATE INDEX IF NOT EXISTS idx_contracts_vendor ON contracts(vendor);
        CREATE INDEX IF NOT EXISTS idx_contracts_end_date ON contracts(end_date);
        ",
    )
    .map_err(|e| to_storage_err(e.to_string()))?;
    Ok(())
}
