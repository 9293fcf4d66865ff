use chrono::Duration;

use fincenter_core::constants::{CONTRACT_EXPIRY_WINDOW_DAYS, CONTRACT_REFERENCE_AMOUNT};
use fincenter_core::errors::FincenterResult;
use fincenter_core::ledger::format_amount;
use fincenter_core::models::{Decision, DecisionSource, Severity};
use fincenter_core::traits::ContractFilter;

use super::{log_skipped, CandidateSource, SourceContext};
use crate::scoring;

/// Contracts ending within the next 90 days.
pub struct ContractSource;

fn severity_for(days_left: i64) -> Severity {
    match days_left {
        i64::MIN..=30 => Severity::Critical,
        31..=60 => Severity::Warning,
        _ => Severity::Info,
    }
}

/// `1 + min((90 - days) / 100, 1)`.
pub fn urgency(days_left: i64) -> f64 {
    1.0 + ((CONTRACT_EXPIRY_WINDOW_DAYS - days_left) as f64 / 100.0).min(1.0)
}

impl CandidateSource for ContractSource {
    fn source(&self) -> DecisionSource {
        DecisionSource::Contract
    }

    fn candidates(&self, ctx: &SourceContext<'_>) -> FincenterResult<Vec<Decision>> {
        let filter = ContractFilter {
            ends_before: Some(ctx.today + Duration::days(CONTRACT_EXPIRY_WINDOW_DAYS)),
        };
        let contracts = ctx.ledger.contracts(&filter)?;
        let mut skipped = 0;
        let mut out = Vec::new();

        for c in &contracts {
            let days_left = c.days_until_expiry(ctx.today);
            if !(0..=CONTRACT_EXPIRY_WINDOW_DAYS).contains(&days_left) {
                continue;
            }
            let Some(annual) = c.annual_value else {
                skipped += 1;
                continue;
            };
            let severity = severity_for(days_left);
            let impact = scoring::normalized_impact(annual, CONTRACT_REFERENCE_AMOUNT);
            out.push(Decision {
                id: format!("expiring_contract_{}", c.contract_id),
                source: self.source(),
                severity,
                title: format!("Contract expiring: {}", c.vendor),
                description: format!(
                    "Contract with '{}' (value: {} EUR/yr) expires in {days_left} days.",
                    c.vendor,
                    format_amount(annual)
                ),
                recommended_action: "Initiate renewal negotiations immediately. \
                    Benchmark against market rates before signing."
                    .to_string(),
                financial_impact: annual,
                priority_score: scoring::priority_score(severity, impact, urgency(days_left)),
            });
        }
        log_skipped(self.source(), skipped);
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_bands() {
        assert_eq!(severity_for(0), Severity::Critical);
        assert_eq!(severity_for(30), Severity::Critical);
        assert_eq!(severity_for(31), Severity::Warning);
        assert_eq!(severity_for(60), Severity::Warning);
        assert_eq!(severity_for(61), Severity::Info);
    }

    #[test]
    fn urgency_grows_as_expiry_nears() {
        assert_eq!(urgency(90), 1.0);
        assert!((urgency(40) - 1.5).abs() < 1e-12);
        assert!((urgency(0) - 1.9).abs() < 1e-12);
    }
}
