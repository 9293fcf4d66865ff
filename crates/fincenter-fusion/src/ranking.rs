//! Per-source capping and the global re-rank.

use std::cmp::Ordering;

use fincenter_core::models::Decision;

/// Highest priority first; ties go to the more severe item, then to the
/// earlier source. Callers rely on a stable sort for input-order ties.
pub fn compare(a: &Decision, b: &Decision) -> Ordering {
    b.priority_score
        .total_cmp(&a.priority_score)
        .then_with(|| a.severity.cmp(&b.severity))
        .then_with(|| a.source.cmp(&b.source))
}

/// Sort one source's candidates and keep at most `cap`.
pub fn cap_source(mut candidates: Vec<Decision>, cap: usize) -> Vec<Decision> {
    candidates.sort_by(|a, b| b.priority_score.total_cmp(&a.priority_score));
    candidates.truncate(cap);
    candidates
}

/// Cap every source, merge, re-rank globally, keep the top `global_limit`.
/// `per_source` is expected in reference source order.
pub fn fuse(per_source: Vec<Vec<Decision>>, cap: usize, global_limit: usize) -> Vec<Decision> {
    let mut merged: Vec<Decision> = per_source
        .into_iter()
        .flat_map(|candidates| cap_source(candidates, cap))
        .collect();
    merged.sort_by(compare);
    merged.truncate(global_limit);
    merged
}
