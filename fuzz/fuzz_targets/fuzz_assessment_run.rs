//! Fuzz target for assessment execution.
//!
//! Goal: For any sequence of step outcomes, a run must respect the engine's
//! invariants: it halts on the first `Failed`, never executes more steps than
//! it has, reports the most severe verdict it observed, and keeps
//! `Undetermined` once seen.
//!
//! Run with:
//! ```bash
//! cargo +nightly fuzz run fuzz_assessment_run
//! ```

#![no_main]

use arbitrary::Arbitrary;
use gemara_domain::{AssessmentLog, AssessmentStep, StepOutcome, aggregate_verdict};
use gemara_types::{ConfidenceLevel, Verdict};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Script {
    last_step_policy: bool,
    steps: Vec<(u8, u8)>,
}

fn verdict(b: u8) -> Verdict {
    Verdict::ALL[usize::from(b) % Verdict::ALL.len()]
}

fn confidence(b: u8) -> ConfidenceLevel {
    ConfidenceLevel::ALL[usize::from(b) % ConfidenceLevel::ALL.len()]
}

fuzz_target!(|script: Script| {
    if script.steps.is_empty() || script.steps.len() > 64 {
        return;
    }

    let outcomes: Vec<(Verdict, ConfidenceLevel)> = script
        .steps
        .iter()
        .map(|(v, c)| (verdict(*v), confidence(*c)))
        .collect();

    let steps = outcomes
        .iter()
        .map(|&(v, c)| AssessmentStep::new("scripted", move |_: &()| StepOutcome::new(v, "", c)))
        .collect();
    let mut log = AssessmentLog::new("FUZZ-01", "fuzzed", vec!["fuzz".to_string()], steps)
        .expect("complete assessment");

    let cfg = gemara_domain::EffectiveConfig {
        confidence: if script.last_step_policy {
            gemara_domain::ConfidencePolicy::LastStep
        } else {
            gemara_domain::ConfidencePolicy::Threshold
        },
        ..Default::default()
    };
    let result = log.run_with_policy(&(), &cfg).expect("MostSevere is supported");

    let executed = outcomes
        .iter()
        .position(|(v, _)| *v == Verdict::Failed)
        .map_or(outcomes.len(), |i| i + 1);
    assert_eq!(log.steps_executed(), executed as u64);

    let observed = &outcomes[..executed];
    let expected = observed
        .iter()
        .fold(Verdict::NotRun, |acc, (v, _)| aggregate_verdict(acc, *v));
    assert_eq!(result, expected);

    if observed.iter().any(|(_, c)| *c == ConfidenceLevel::Undetermined) {
        assert_eq!(log.confidence_level(), ConfidenceLevel::Undetermined);
    }
});
