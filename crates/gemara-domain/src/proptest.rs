//! Property-based tests for the domain crate.
//!
//! These tests use proptest to verify invariants around:
//! - Severity aggregation order independence
//! - Failed short-circuit and execution counts
//! - Confidence aggregation against a reference computation

use crate::confidence::{
    ConfidenceAggregator, HIGH_CONFIDENCE_THRESHOLD, MEDIUM_CONFIDENCE_THRESHOLD,
    ThresholdAggregator,
};
use crate::resolve::aggregate_verdict;
use crate::test_support::{assessment, scripted_steps};
use gemara_types::{ConfidenceLevel, Verdict};
use proptest::prelude::*;

// ============================================================================
// Strategies for generating arbitrary values
// ============================================================================

fn arb_verdict() -> impl Strategy<Value = Verdict> {
    prop::sample::select(Verdict::ALL.to_vec())
}

/// Verdicts a step may report. Steps never report `Not Run`.
fn arb_step_verdict() -> impl Strategy<Value = Verdict> {
    prop::sample::select(vec![
        Verdict::Passed,
        Verdict::Failed,
        Verdict::NeedsReview,
        Verdict::Unknown,
        Verdict::NotApplicable,
    ])
}

fn arb_confidence() -> impl Strategy<Value = ConfidenceLevel> {
    prop::sample::select(ConfidenceLevel::ALL.to_vec())
}

fn arb_counted_confidence() -> impl Strategy<Value = ConfidenceLevel> {
    prop::sample::select(vec![
        ConfidenceLevel::Low,
        ConfidenceLevel::Medium,
        ConfidenceLevel::High,
    ])
}

fn arb_script() -> impl Strategy<Value = Vec<(Verdict, ConfidenceLevel)>> {
    prop::collection::vec((arb_step_verdict(), arb_confidence()), 1..12)
}

fn fold_verdicts(verdicts: &[Verdict]) -> Verdict {
    verdicts
        .iter()
        .fold(Verdict::NotRun, |acc, v| aggregate_verdict(acc, *v))
}

/// Integer-only restatement of the threshold rule.
fn reference_threshold(levels: &[ConfidenceLevel]) -> ConfidenceLevel {
    let high = levels.iter().filter(|l| **l == ConfidenceLevel::High).count();
    let medium = levels.iter().filter(|l| **l == ConfidenceLevel::Medium).count();
    let total = levels.len();
    if high * 4 >= total * 3 {
        ConfidenceLevel::High
    } else if (high + medium) * 2 >= total {
        ConfidenceLevel::Medium
    } else {
        ConfidenceLevel::Low
    }
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn aggregate_is_most_severe_regardless_of_order(
        verdicts in prop::collection::vec(arb_verdict(), 1..16),
    ) {
        let forward = fold_verdicts(&verdicts);
        let mut reversed = verdicts.clone();
        reversed.reverse();
        let max_rank = verdicts.iter().map(|v| v.severity_rank()).max().unwrap_or(0);

        prop_assert_eq!(forward.severity_rank(), max_rank);
        prop_assert_eq!(fold_verdicts(&reversed).severity_rank(), max_rank);
    }

    #[test]
    fn aggregate_never_decreases(current in arb_verdict(), observed in arb_verdict()) {
        let next = aggregate_verdict(current, observed);
        prop_assert!(next.severity_rank() >= current.severity_rank());
        prop_assert!(next.severity_rank() >= observed.severity_rank());
    }

    #[test]
    fn run_stops_at_first_failure(script in arb_script()) {
        let mut log = assessment("prop", scripted_steps(&script));
        let verdict = log.run(&());

        let executed = match script.iter().position(|(v, _)| *v == Verdict::Failed) {
            Some(idx) => idx + 1,
            None => script.len(),
        };
        prop_assert_eq!(log.steps_executed(), executed as u64);
        prop_assert!(log.steps_executed() <= log.steps().len() as u64);

        let observed: Vec<Verdict> = script[..executed].iter().map(|(v, _)| *v).collect();
        prop_assert_eq!(verdict, fold_verdicts(&observed));
        prop_assert_eq!(log.result(), verdict);
        prop_assert_eq!(log.message(), format!("step {executed}"));
        prop_assert_eq!(log.end().is_some(), verdict != Verdict::Failed);
    }

    #[test]
    fn repeated_runs_are_identical(script in arb_script()) {
        let mut log = assessment("prop", scripted_steps(&script));
        let first = (log.run(&()), log.confidence_level(), log.steps_executed());
        let second = (log.run(&()), log.confidence_level(), log.steps_executed());
        prop_assert_eq!(first, second);
    }

    #[test]
    fn undetermined_is_sticky(
        before in prop::collection::vec(arb_confidence(), 0..8),
        after in prop::collection::vec(arb_confidence(), 0..8),
    ) {
        let mut agg = ThresholdAggregator::new();
        for level in &before {
            agg.update(*level);
        }
        prop_assert_eq!(agg.update(ConfidenceLevel::Undetermined), ConfidenceLevel::Undetermined);
        for level in &after {
            prop_assert_eq!(agg.update(*level), ConfidenceLevel::Undetermined);
        }
    }

    #[test]
    fn threshold_matches_reference(
        levels in prop::collection::vec(arb_counted_confidence(), 1..32),
    ) {
        let mut agg = ThresholdAggregator::new();
        let mut last = ConfidenceLevel::NotSet;
        for level in &levels {
            last = agg.update(*level);
        }
        prop_assert_eq!(last, reference_threshold(&levels));
    }

    #[test]
    fn not_set_never_changes_the_aggregate(
        levels in prop::collection::vec(arb_counted_confidence(), 1..16),
    ) {
        let mut agg = ThresholdAggregator::new();
        let mut last = ConfidenceLevel::NotSet;
        for level in &levels {
            last = agg.update(*level);
        }
        prop_assert_eq!(agg.update(ConfidenceLevel::NotSet), last);
    }
}

#[test]
fn thresholds_are_fixed() {
    assert!((HIGH_CONFIDENCE_THRESHOLD - 0.75).abs() < f64::EPSILON);
    assert!((MEDIUM_CONFIDENCE_THRESHOLD - 0.50).abs() < f64::EPSILON);
}
