//! Weighted scoring and the threshold decision.

use chrono::{DateTime, Utc};

use fincenter_core::models::{Signal, StressCluster};

/// Sum of signal weights, saturating at `u32::MAX`. An empty set scores zero.
pub fn total_score(signals: &[Signal]) -> u32 {
    signals.iter().map(|s| s.weight).fold(0, u32::saturating_add)
}

/// A cluster for `signals` if their score reaches `threshold`.
pub fn cluster_if_stressed(
    signals: &[Signal],
    threshold: u32,
    detected_at: DateTime<Utc>,
) -> Option<StressCluster> {
    if signals.is_empty() || total_score(signals) < threshold {
        return None;
    }
    Some(StressCluster::from_signals(signals.to_vec(), detected_at))
}

#[cfg(test)]
mod tests {
    use super::*;
    use fincenter_core::models::SignalType;

    fn signal(subject: &str, weight: u32) -> Signal {
        Signal {
            signal_type: SignalType::BudgetSlightlyOver,
            subject: subject.to_string(),
            detail: String::new(),
            weight,
        }
    }

    #[test]
    fn empty_set_scores_zero_and_never_clusters() {
        assert_eq!(total_score(&[]), 0);
        assert!(cluster_if_stressed(&[], 0, Utc::now()).is_none());
    }

    #[test]
    fn threshold_is_inclusive() {
        let three = vec![signal("A", 1), signal("B", 2)];
        assert!(cluster_if_stressed(&three, 4, Utc::now()).is_none());

        let four = vec![signal("A", 1), signal("B", 2), signal("C", 1)];
        let cluster = cluster_if_stressed(&four, 4, Utc::now()).unwrap();
        assert_eq!(cluster.score, 4);
        assert!(!cluster.acknowledged);
    }

    #[test]
    fn oversized_weights_saturate() {
        let heavy = vec![signal("A", u32::MAX), signal("B", 7)];
        assert_eq!(total_score(&heavy), u32::MAX);
        let cluster = cluster_if_stressed(&heavy, u32::MAX, Utc::now()).unwrap();
        assert_eq!(cluster.score, u32::MAX);
    }
}
