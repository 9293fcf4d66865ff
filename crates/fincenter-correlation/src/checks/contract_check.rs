use fincenter_core::errors::FincenterResult;
use fincenter_core::models::{Signal, SignalType};
use fincenter_core::traits::ContractFilter;

use super::{CheckContext, WeakSignalCheck};

/// Contracts ending in 61–90 days.
pub struct ContractExpiringCheck;

impl WeakSignalCheck for ContractExpiringCheck {
    fn signal_type(&self) -> SignalType {
        SignalType::ContractExpiringMedium
    }

    fn collect(&self, ctx: &CheckContext<'_>) -> FincenterResult<Vec<Signal>> {
        let contracts = ctx.ledger.contracts(&ContractFilter::default())?;
        Ok(contracts
            .iter()
            .filter_map(|c| {
                let days_left = c.days_until_expiry(ctx.today);
                (61..=90).contains(&days_left).then(|| {
                    ctx.signal(
                        self.signal_type(),
                        c.vendor.as_str(),
                        format!("{days_left} days until expiry"),
                    )
                })
            })
            .collect())
    }
}
