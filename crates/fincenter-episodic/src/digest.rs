//! Plain-text rendering of learned patterns for narrative context.

use fincenter_core::models::EpisodicPattern;

const DIGEST_HEADER: &str = "LEARNED FINANCIAL PATTERNS (Episodic Memory):";

/// Render patterns as one header line plus one line per pattern.
/// Returns an empty string when there is nothing to report.
pub fn render_digest(patterns: &[EpisodicPattern]) -> String {
    if patterns.is_empty() {
        return String::new();
    }
    let mut lines = Vec::with_capacity(patterns.len() + 1);
    lines.push(DIGEST_HEADER.to_string());
    for p in patterns {
        lines.push(format!(
            "  [{} | confidence={:.0}%] {}",
            p.pattern_type.as_str().to_ascii_uppercase(),
            p.confidence.value() * 100.0,
            p.description
        ));
    }
    lines.join("\n")
}
