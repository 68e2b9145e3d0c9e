//! Pure assessment evaluation (no IO).
//!
//! Input: requirements with their resolved, caller-supplied steps.
//! Output: a verdict plus a confidence estimate per requirement and per control.

#![forbid(unsafe_code)]

pub mod assessment;
pub mod confidence;
pub mod control;
pub mod error;
pub mod policy;
pub mod resolve;
pub mod step;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use assessment::AssessmentLog;
pub use confidence::{
    ConfidenceAggregator, HIGH_CONFIDENCE_THRESHOLD, LastStepAggregator,
    MEDIUM_CONFIDENCE_THRESHOLD, ThresholdAggregator,
};
pub use control::ControlEvaluation;
pub use error::{InvalidAssessment, PrecheckError, UnsupportedStrategy};
pub use policy::{ConfidencePolicy, EffectiveConfig};
pub use resolve::{MostSevere, Resolver, aggregate_verdict, resolver_for};
pub use step::{AssessmentStep, StepOutcome};
