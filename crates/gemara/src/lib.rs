//! Public facade for the gemara assessment engine.
//!
//! Build an [`AssessmentLog`] per requirement from ordered [`AssessmentStep`]s,
//! group logs under a [`ControlEvaluation`], run them against a target, and read
//! the outcome back as records for exporters.
//!
//! ```
//! use gemara::{AssessmentLog, AssessmentStep, ConfidenceLevel, StepOutcome, Verdict};
//!
//! fn has_readme(files: &[&str]) -> StepOutcome {
//!     if files.contains(&"README.md") {
//!         StepOutcome::passed("README.md present", ConfidenceLevel::High)
//!     } else {
//!         StepOutcome::failed("README.md missing", ConfidenceLevel::High)
//!     }
//! }
//!
//! let mut log = AssessmentLog::new(
//!     "OSPS-DO-01",
//!     "project has a README",
//!     vec!["Maturity Level 1".to_string()],
//!     vec![AssessmentStep::from_fn(has_readme)],
//! )
//! .expect("complete assessment");
//!
//! assert_eq!(log.run(&["README.md", "LICENSE"][..]), Verdict::Passed);
//! assert_eq!(log.confidence_level(), ConfidenceLevel::High);
//! ```

#![forbid(unsafe_code)]

pub use gemara_domain::{
    AssessmentLog, AssessmentStep, ConfidenceAggregator, ConfidencePolicy, ControlEvaluation,
    EffectiveConfig, HIGH_CONFIDENCE_THRESHOLD, InvalidAssessment, LastStepAggregator,
    MEDIUM_CONFIDENCE_THRESHOLD, MostSevere, PrecheckError, Resolver, StepOutcome,
    ThresholdAggregator, UnsupportedStrategy, aggregate_verdict, resolver_for,
};
pub use gemara_types::{
    AssessmentRecord, Author, ConfidenceLevel, ControlEvaluationRecord, EvaluationLog, Metadata,
    ParseEnumError, ResolutionStrategy, Verdict, ids,
};
