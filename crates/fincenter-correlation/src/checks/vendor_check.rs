use std::collections::BTreeMap;

use fincenter_core::errors::FincenterResult;
use fincenter_core::models::{Signal, SignalType};
use fincenter_core::traits::{ContractFilter, InvoiceFilter};

use super::{log_skipped, CheckContext, WeakSignalCheck};

/// Tolerance above the monthly contract value still counted as "slight".
const SLIGHT_RATIO: f64 = 1.10;

/// Vendors whose mean invoice sits above the monthly contract value, but
/// by no more than 10%.
pub struct VendorSlightOverbillingCheck;

impl WeakSignalCheck for VendorSlightOverbillingCheck {
    fn signal_type(&self) -> SignalType {
        SignalType::VendorSlightOverbilling
    }

    fn collect(&self, ctx: &CheckContext<'_>) -> FincenterResult<Vec<Signal>> {
        let contracts = ctx.ledger.contracts(&ContractFilter::default())?;
        let invoices = ctx.ledger.invoices(&InvoiceFilter::default())?;
        let mut skipped = 0usize;

        let mut monthly: BTreeMap<&str, f64> = BTreeMap::new();
        for c in &contracts {
            match c.monthly_value() {
                Some(v) => *monthly.entry(c.vendor.as_str()).or_default() += v,
                None => skipped += 1,
            }
        }

        let mut amounts: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
        for inv in &invoices {
            match inv.amount {
                Some(a) if a > 0.0 => {
                    let entry = amounts.entry(inv.vendor.as_str()).or_default();
                    entry.0 += a;
                    entry.1 += 1;
                }
                Some(_) => {}
                None => skipped += 1,
            }
        }
        log_skipped(self.signal_type(), skipped);

        Ok(amounts
            .into_iter()
            .filter_map(|(vendor, (sum, count))| {
                let contract_monthly = *monthly.get(vendor)?;
                if contract_monthly <= 0.0 {
                    return None;
                }
                let avg = sum / count as f64;
                let within_band = avg > contract_monthly && avg <= contract_monthly * SLIGHT_RATIO;
                within_band.then(|| {
                    ctx.signal(
                        self.signal_type(),
                        vendor,
                        format!(
                            "average invoice {:.1}% above monthly contract value",
                            (avg / contract_monthly - 1.0) * 100.0
                        ),
                    )
                })
            })
            .collect())
    }
}
