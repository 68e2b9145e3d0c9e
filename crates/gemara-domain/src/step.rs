use gemara_types::{ConfidenceLevel, Verdict};
use std::fmt;
use std::sync::Arc;

/// What a single step reports back: verdict, message, confidence.
///
/// A step that cannot reach an answer returns `Unknown`/`Undetermined`
/// instead of signaling failure some other way.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepOutcome {
    pub result: Verdict,
    pub message: String,
    pub confidence: ConfidenceLevel,
}

impl StepOutcome {
    pub fn new(result: Verdict, message: impl Into<String>, confidence: ConfidenceLevel) -> Self {
        Self {
            result,
            message: message.into(),
            confidence,
        }
    }

    pub fn passed(message: impl Into<String>, confidence: ConfidenceLevel) -> Self {
        Self::new(Verdict::Passed, message, confidence)
    }

    pub fn failed(message: impl Into<String>, confidence: ConfidenceLevel) -> Self {
        Self::new(Verdict::Failed, message, confidence)
    }

    pub fn needs_review(message: impl Into<String>, confidence: ConfidenceLevel) -> Self {
        Self::new(Verdict::NeedsReview, message, confidence)
    }

    /// The step could not decide.
    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(Verdict::Unknown, message, ConfidenceLevel::Undetermined)
    }
}

impl<M: Into<String>> From<(Verdict, M, ConfidenceLevel)> for StepOutcome {
    fn from((result, message, confidence): (Verdict, M, ConfidenceLevel)) -> Self {
        Self::new(result, message, confidence)
    }
}

/// One opaque check against a target artifact, paired with a stable name.
///
/// The name is what exporters use for traceability, so it must not change
/// between runs.
pub struct AssessmentStep<T: ?Sized> {
    name: String,
    check: Arc<dyn Fn(&T) -> StepOutcome + Send + Sync>,
}

impl<T: ?Sized> AssessmentStep<T> {
    /// A step with an explicitly assigned name.
    pub fn new<F>(name: impl Into<String>, check: F) -> Self
    where
        F: Fn(&T) -> StepOutcome + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            check: Arc::new(check),
        }
    }

    /// A step named after the path of the function that implements it,
    /// e.g. `my_crate::checks::branch_protection`.
    pub fn from_fn<F>(check: F) -> Self
    where
        F: Fn(&T) -> StepOutcome + Send + Sync + 'static,
    {
        Self::new(std::any::type_name::<F>(), check)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn run(&self, target: &T) -> StepOutcome {
        (self.check)(target)
    }
}

impl<T: ?Sized> Clone for AssessmentStep<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            check: Arc::clone(&self.check),
        }
    }
}

impl<T: ?Sized> fmt::Debug for AssessmentStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AssessmentStep")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized> fmt::Display for AssessmentStep<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
