//! Score Aggregator
//!
//! ONLY aggregation logic - no types, no rules.
//! Input: SignalContributions
//! Output: clamped score + unique flags

use std::collections::BTreeSet;

use super::types::SignalContribution;
use crate::constants::{MAX_SCORE, MIN_SCORE};

/// Sum of all contributions plus the deduplicated labels
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregate {
    pub score: f64,
    pub flags: BTreeSet<String>,
}

/// Clamp any raw score into [0, 100]. NaN collapses to 0.
pub fn clamp_score(raw: f64) -> f64 {
    if raw.is_nan() {
        return MIN_SCORE;
    }
    raw.clamp(MIN_SCORE, MAX_SCORE)
}

/// Every contribution counts toward the score, even when its label repeats;
/// only the flag set is deduplicated.
pub fn aggregate<'a, I>(contributions: I) -> Aggregate
where
    I: IntoIterator<Item = &'a SignalContribution>,
{
    let mut raw = 0.0f64;
    let mut flags = BTreeSet::new();

    for c in contributions {
        raw += c.weight;
        flags.insert(c.label.clone());
    }

    Aggregate {
        score: clamp_score(raw),
        flags,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sums_and_clamps() {
        let signals = vec![
            SignalContribution::new("a", 40.0),
            SignalContribution::new("b", 40.0),
            SignalContribution::new("c", 40.0),
        ];
        let agg = aggregate(&signals);
        assert_eq!(agg.score, 100.0);
        assert_eq!(agg.flags.len(), 3);
    }

    #[test]
    fn test_repeated_label_counts_twice_but_flags_once() {
        let signals = vec![
            SignalContribution::new("Suspicious URL content: x", 25.0),
            SignalContribution::new("Suspicious URL content: x", 25.0),
        ];
        let agg = aggregate(&signals);
        assert_eq!(agg.score, 50.0);
        assert_eq!(agg.flags.len(), 1);
    }

    #[test]
    fn test_empty_is_zero() {
        let agg = aggregate(&Vec::new());
        assert_eq!(agg.score, 0.0);
        assert!(agg.flags.is_empty());
    }

    #[test]
    fn test_clamp_score_edges() {
        assert_eq!(clamp_score(-5.0), 0.0);
        assert_eq!(clamp_score(150.0), 100.0);
        assert_eq!(clamp_score(f64::NAN), 0.0);
        assert_eq!(clamp_score(42.5), 42.5);
    }

    #[test]
    fn test_negative_weight_is_floored() {
        let c = SignalContribution::new("neg", -10.0);
        assert_eq!(c.weight, 0.0);
    }
}
