//! Parsing of generator output into scenarios.

use fincenter_core::errors::{FincenterError, FincenterResult};

use super::{Scenario, MAX_SCENARIOS};

/// Remove a surrounding markdown code fence (optionally tagged `json`).
pub fn strip_fences(raw: &str) -> &str {
    let trimmed = raw.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = rest.split("```").next().unwrap_or(rest);
    body.strip_prefix("json").unwrap_or(body).trim()
}

/// Parse a JSON array of scenarios, keeping at most [`MAX_SCENARIOS`].
pub fn parse_scenarios(raw: &str) -> FincenterResult<Vec<Scenario>> {
    let mut scenarios: Vec<Scenario> = serde_json::from_str(strip_fences(raw))?;
    if scenarios.is_empty() {
        return Err(FincenterError::NarrativeUnavailable {
            reason: "generator returned an empty scenario list".to_string(),
        });
    }
    scenarios.truncate(MAX_SCENARIOS);
    for scenario in &mut scenarios {
        scenario.normalize();
    }
    Ok(scenarios)
}
