use fincenter_core::constants::SYSTEM_SUBJECT;
use fincenter_core::errors::FincenterResult;
use fincenter_core::models::{Signal, SignalType};
use fincenter_core::traits::PatternFilter;

use super::{CheckContext, WeakSignalCheck};

/// A single system-wide signal whenever any learned pattern exists.
pub struct PatternActiveCheck;

impl WeakSignalCheck for PatternActiveCheck {
    fn signal_type(&self) -> SignalType {
        SignalType::EpisodicPatternActive
    }

    fn collect(&self, ctx: &CheckContext<'_>) -> FincenterResult<Vec<Signal>> {
        let patterns = ctx.storage.list_patterns(&PatternFilter::default())?;
        if patterns.is_empty() {
            return Ok(Vec::new());
        }
        Ok(vec![ctx.signal(
            self.signal_type(),
            SYSTEM_SUBJECT,
            format!("{} learned patterns active", patterns.len()),
        )])
    }
}
