use crate::assessment::AssessmentLog;
use crate::step::{AssessmentStep, StepOutcome};
use gemara_types::{ConfidenceLevel, Verdict};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A step that always reports `result`/`confidence`, with its name as message.
pub fn step(name: &str, result: Verdict, confidence: ConfidenceLevel) -> AssessmentStep<()> {
    let message = name.to_string();
    AssessmentStep::new(name, move |_: &()| {
        StepOutcome::new(result, message.clone(), confidence)
    })
}

/// Like [`step`], but bumps `calls` whenever it runs.
pub fn counting_step(
    name: &str,
    result: Verdict,
    confidence: ConfidenceLevel,
    calls: Arc<AtomicUsize>,
) -> AssessmentStep<()> {
    let message = name.to_string();
    AssessmentStep::new(name, move |_: &()| {
        calls.fetch_add(1, Ordering::SeqCst);
        StepOutcome::new(result, message.clone(), confidence)
    })
}

/// Steps named and messaged `step 1`, `step 2`, ...
pub fn scripted_steps(script: &[(Verdict, ConfidenceLevel)]) -> Vec<AssessmentStep<()>> {
    script
        .iter()
        .enumerate()
        .map(|(i, (result, confidence))| step(&format!("step {}", i + 1), *result, *confidence))
        .collect()
}

pub fn assessment(requirement_id: &str, steps: Vec<AssessmentStep<()>>) -> AssessmentLog<()> {
    AssessmentLog::new(
        requirement_id,
        "test requirement",
        vec!["Maturity Level 1".to_string()],
        steps,
    )
    .expect("valid test assessment")
}
