use fincenter_core::errors::FincenterResult;
use fincenter_core::models::{Signal, SignalType};
use fincenter_core::traits::InvoiceFilter;

use super::{CheckContext, WeakSignalCheck};

/// Unpaid invoices 15–30 days past due.
pub struct InvoiceOverdueCheck;

impl WeakSignalCheck for InvoiceOverdueCheck {
    fn signal_type(&self) -> SignalType {
        SignalType::InvoiceModeratelyOverdue
    }

    fn collect(&self, ctx: &CheckContext<'_>) -> FincenterResult<Vec<Signal>> {
        let invoices = ctx.ledger.invoices(&InvoiceFilter::unpaid())?;
        Ok(invoices
            .iter()
            .filter_map(|inv| {
                let days = inv.days_overdue(ctx.today);
                (15..=30).contains(&days).then(|| {
                    ctx.signal(
                        self.signal_type(),
                        inv.vendor.as_str(),
                        format!("{days} days overdue"),
                    )
                })
            })
            .collect())
    }
}
