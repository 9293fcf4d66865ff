//! Ledger ingest and filtered reads through the ILedgerStore interface.

use fincenter_core::ledger::{InvoiceStatus, LedgerSnapshot};
use fincenter_core::traits::{ContractFilter, ILedgerStore, InvoiceFilter};
use fincenter_storage::StorageEngine;
use test_fixtures::{budget, contract, date, open_contract, overdue_invoice, paid_invoice, sample_ledger};

#[test]
fn import_sample_ledger_round_trips() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let snapshot = sample_ledger();
    let summary = engine.import_ledger(&snapshot).unwrap();

    assert_eq!(summary.budgets, snapshot.budgets.len());
    assert_eq!(summary.total(), snapshot.budgets.len() + snapshot.invoices.len() + snapshot.contracts.len());

    assert_eq!(engine.budget_periods().unwrap().len(), snapshot.budgets.len());
    assert_eq!(
        engine.invoices(&InvoiceFilter::default()).unwrap().len(),
        snapshot.invoices.len()
    );
    assert_eq!(
        engine.contracts(&ContractFilter::default()).unwrap().len(),
        snapshot.contracts.len()
    );
}

#[test]
fn reimport_upserts_instead_of_duplicating() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut snapshot = LedgerSnapshot {
        budgets: vec![budget("IT", 2024, 100.0, 110.0)],
        invoices: vec![overdue_invoice("INV-1", "Acme", 500.0, 10)],
        contracts: vec![contract("C-1", "Acme", 1_200.0, 30)],
    };
    engine.import_ledger(&snapshot).unwrap();

    snapshot.budgets[0].actual = Some(130.0);
    snapshot.invoices[0].status = InvoiceStatus::Paid;
    engine.import_ledger(&snapshot).unwrap();

    let budgets = engine.budget_periods().unwrap();
    assert_eq!(budgets.len(), 1);
    assert_eq!(budgets[0].actual, Some(130.0));

    let invoices = engine.invoices(&InvoiceFilter::default()).unwrap();
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0].status, InvoiceStatus::Paid);
}

#[test]
fn missing_numeric_fields_survive_storage_as_none() {
    let engine = StorageEngine::open_in_memory().unwrap();
    let mut inv = overdue_invoice("INV-1", "Acme", 0.0, 5);
    inv.amount = None;
    let mut period = budget("Ops", 2024, 1.0, 1.0);
    period.budget = None;
    engine.upsert_invoice(&inv).unwrap();
    engine.upsert_budget_period(&period).unwrap();

    assert_eq!(engine.invoices(&InvoiceFilter::default()).unwrap()[0].amount, None);
    assert_eq!(engine.budget_periods().unwrap()[0].budget, None);
}

#[test]
fn invoice_filter_by_status_and_due_date() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.upsert_invoice(&overdue_invoice("A", "V", 1.0, 40)).unwrap();
    engine.upsert_invoice(&overdue_invoice("B", "V", 1.0, 5)).unwrap();
    engine.upsert_invoice(&paid_invoice("C", "V", 1.0)).unwrap();

    let unpaid = engine.invoices(&InvoiceFilter::unpaid()).unwrap();
    assert_eq!(unpaid.len(), 2);

    let old = engine
        .invoices(&InvoiceFilter {
            status: Some(InvoiceStatus::Unpaid),
            due_before: Some(date(2025, 6, 1)),
        })
        .unwrap();
    assert_eq!(old.len(), 1);
    assert_eq!(old[0].invoice_id, "A");
}

#[test]
fn contract_filter_excludes_open_ended_and_later_contracts() {
    let engine = StorageEngine::open_in_memory().unwrap();
    engine.upsert_contract(&contract("SOON", "V", 1.0, 20)).unwrap();
    engine.upsert_contract(&contract("LATER", "V", 1.0, 400)).unwrap();
    engine.upsert_contract(&open_contract("OPEN", "V", 1.0)).unwrap();

    let expiring = engine
        .contracts(&ContractFilter {
            ends_before: Some(date(2025, 9, 28)),
        })
        .unwrap();
    let ids: Vec<_> = expiring.iter().map(|c| c.contract_id.as_str()).collect();
    assert_eq!(ids, vec!["SOON"]);
}
