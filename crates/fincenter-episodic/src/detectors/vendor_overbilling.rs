use std::collections::BTreeMap;

use chrono::NaiveDate;

use fincenter_core::config::EpisodicConfig;
use fincenter_core::errors::FincenterResult;
use fincenter_core::ledger::{format_amount, Contract, Invoice};
use fincenter_core::models::{Confidence, PatternType};
use fincenter_core::traits::{ContractFilter, ILedgerStore, InvoiceFilter};

use super::{log_skipped, Finding, PatternDetector};

/// Vendors whose average invoice exceeds their monthly contract value.
///
/// All of a vendor's contracts contribute to its monthly value; only
/// positive invoice amounts count as evidence.
pub struct VendorOverbillingDetector {
    pub ratio: f64,
    pub min_invoices: usize,
}

impl VendorOverbillingDetector {
    pub fn from_config(config: &EpisodicConfig) -> Self {
        Self {
            ratio: config.overbilling_ratio,
            min_invoices: config.min_vendor_invoices,
        }
    }

    /// Returns the findings and the number of malformed records skipped.
    pub fn evaluate(&self, invoices: &[Invoice], contracts: &[Contract]) -> (Vec<Finding>, usize) {
        let mut skipped = 0;

        let mut monthly_by_vendor: BTreeMap<&str, f64> = BTreeMap::new();
        for contract in contracts {
            match contract.monthly_value() {
                Some(monthly) => {
                    *monthly_by_vendor.entry(contract.vendor.as_str()).or_default() += monthly
                }
                None => skipped += 1,
            }
        }

        let mut amounts_by_vendor: BTreeMap<&str, Vec<f64>> = BTreeMap::new();
        for invoice in invoices {
            match invoice.amount {
                Some(amount) if amount > 0.0 => amounts_by_vendor
                    .entry(invoice.vendor.as_str())
                    .or_default()
                    .push(amount),
                Some(_) => {}
                None => skipped += 1,
            }
        }

        let mut findings = Vec::new();
        for (vendor, amounts) in amounts_by_vendor {
            if amounts.len() < self.min_invoices {
                continue;
            }
            let monthly = monthly_by_vendor.get(vendor).copied().unwrap_or(0.0);
            if monthly <= 0.0 {
                continue;
            }
            let avg_invoice = amounts.iter().sum::<f64>() / amounts.len() as f64;
            if avg_invoice <= monthly * self.ratio {
                continue;
            }
            let excess_pct = (avg_invoice / monthly - 1.0) * 100.0;
            findings.push(Finding {
                subject: vendor.to_string(),
                description: format!(
                    "Vendor '{vendor}' average invoice ({} EUR) exceeds monthly contract value ({} EUR) by {excess_pct:.1}%.",
                    format_amount(avg_invoice),
                    format_amount(monthly),
                ),
                confidence: Confidence::from_evidence(0.5, 0.05, amounts.len(), 0.95),
                evidence_count: amounts.len() as u32,
            });
        }
        (findings, skipped)
    }
}

impl PatternDetector for VendorOverbillingDetector {
    fn pattern_type(&self) -> PatternType {
        PatternType::VendorOverbilling
    }

    fn detect(&self, ledger: &dyn ILedgerStore, _today: NaiveDate) -> FincenterResult<Vec<Finding>> {
        let invoices = ledger.invoices(&InvoiceFilter::default())?;
        let contracts = ledger.contracts(&ContractFilter::default())?;
        let (findings, skipped) = self.evaluate(&invoices, &contracts);
        log_skipped(self.pattern_type(), skipped);
        Ok(findings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fincenter_core::ledger::InvoiceStatus;

    fn detector() -> VendorOverbillingDetector {
        VendorOverbillingDetector::from_config(&EpisodicConfig::default())
    }

    fn invoice(vendor: &str, amount: Option<f64>) -> Invoice {
        Invoice {
            invoice_id: format!("{vendor}-{amount:?}"),
            vendor: vendor.to_string(),
            amount,
            status: InvoiceStatus::Paid,
            due_date: None,
        }
    }

    fn contract(vendor: &str, annual: Option<f64>) -> Contract {
        Contract {
            contract_id: format!("C-{vendor}"),
            vendor: vendor.to_string(),
            annual_value: annual,
            end_date: None,
        }
    }

    #[test]
    fn nine_invoices_above_contract_reach_confidence_cap() {
        let amounts = [12100.0, 12400.0, 12600.0, 12847.0, 12900.0, 13000.0, 13100.0, 13200.0, 13476.0];
        let invoices: Vec<_> = amounts.iter().map(|a| invoice("X", Some(*a))).collect();
        let (findings, skipped) = detector().evaluate(&invoices, &[contract("X", Some(110_400.0))]);

        assert_eq!(skipped, 0);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].subject, "X");
        assert_eq!(findings[0].confidence.value(), 0.95);
        assert_eq!(findings[0].evidence_count, 9);
        assert!(findings[0].description.contains("12,847 EUR"));
        assert!(findings[0].description.contains("9,200 EUR"));
    }

    #[test]
    fn within_tolerance_or_without_contract_is_ignored() {
        let invoices = vec![invoice("X", Some(10_000.0)), invoice("X", Some(10_000.0))];
        // 10,000 vs 9,200 × 1.10 = 10,120
        let (findings, _) = detector().evaluate(&invoices, &[contract("X", Some(110_400.0))]);
        assert!(findings.is_empty());

        let (findings, _) = detector().evaluate(&invoices, &[]);
        assert!(findings.is_empty());
    }

    #[test]
    fn single_invoice_is_not_enough_evidence() {
        let invoices = vec![invoice("X", Some(50_000.0))];
        let (findings, _) = detector().evaluate(&invoices, &[contract("X", Some(12_000.0))]);
        assert!(findings.is_empty());
    }

    #[test]
    fn multiple_contracts_sum_and_malformed_records_are_counted() {
        let invoices = vec![
            invoice("X", Some(3_000.0)),
            invoice("X", Some(3_000.0)),
            invoice("X", None),
        ];
        let contracts = vec![
            contract("X", Some(12_000.0)),
            contract("X", Some(12_000.0)),
            contract("X", None),
        ];
        // Monthly = 2,000; avg 3,000 > 2,200
        let (findings, skipped) = detector().evaluate(&invoices, &contracts);
        assert_eq!(skipped, 2);
        assert_eq!(findings.len(), 1);
        assert_eq!(findings[0].confidence.value(), 0.6);
    }
}
