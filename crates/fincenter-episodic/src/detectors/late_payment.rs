use std::collections::BTreeMap;

use chrono::NaiveDate;

use fincenter_core::config::EpisodicConfig;
use fincenter_core::errors::FincenterResult;
use fincenter_core::ledger::Invoice;
use fincenter_core::models::{Confidence, PatternType};
use fincenter_core::traits::{ILedgerStore, InvoiceFilter};

use super::{Finding, PatternDetector};

/// Vendors with chronically overdue unpaid invoices.
pub struct LatePaymentDetector {
    pub avg_days: f64,
    pub min_invoices: usize,
}

impl LatePaymentDetector {
    pub fn from_config(config: &EpisodicConfig) -> Self {
        Self {
            avg_days: config.late_payment_avg_days,
            min_invoices: config.min_late_invoices,
        }
    }

    pub fn evaluate(&self, invoices: &[Invoice], today: NaiveDate) -> Vec<Finding> {
        let mut days_by_vendor: BTreeMap<&str, Vec<i64>> = BTreeMap::new();
        for invoice in invoices.iter().filter(|i| i.is_unpaid()) {
            let days = invoice.days_overdue(today);
            if days > 0 {
                days_by_vendor
                    .entry(invoice.vendor.as_str())
                    .or_default()
                    .push(days);
            }
        }

        days_by_vendor
            .into_iter()
            .filter(|(_, days)| days.len() >= self.min_invoices)
            .filter_map(|(vendor, days)| {
                let avg = days.iter().sum::<i64>() as f64 / days.len() as f64;
                (avg > self.avg_days).then(|| Finding {
                    subject: vendor.to_string(),
                    description: format!(
                        "Vendor '{vendor}' invoices are on average {avg:.0} days overdue across {} unpaid invoices.",
                        days.len()
                    ),
                    confidence: Confidence::from_evidence(0.4, 0.05, days.len(), 0.90),
                    evidence_count: days.len() as u32,
                })
            })
            .collect()
    }
}

impl PatternDetector for LatePaymentDetector {
    fn pattern_type(&self) -> PatternType {
        PatternType::LatePaymentPattern
    }

    fn detect(&self, ledger: &dyn ILedgerStore, today: NaiveDate) -> FincenterResult<Vec<Finding>> {
        let invoices = ledger.invoices(&InvoiceFilter::unpaid())?;
        Ok(self.evaluate(&invoices, today))
    }
}
