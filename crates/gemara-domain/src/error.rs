use crate::assessment::AssessmentLog;
use gemara_types::ResolutionStrategy;
use std::fmt;

/// An assessment is missing one of its required fields.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error(
    "expected all AssessmentLog fields to have a value, but got: requirement_id=len({requirement_id_len}), description=len({description_len}), applicability=len({applicability_len}), steps=len({steps_len})"
)]
pub struct PrecheckError {
    pub requirement_id_len: usize,
    pub description_len: usize,
    pub applicability_len: usize,
    pub steps_len: usize,
}

/// A named resolution strategy with no defined aggregation behavior.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[error("resolution strategy {0} is not supported by the built-in resolvers")]
pub struct UnsupportedStrategy(pub ResolutionStrategy);

/// Returned when constructing an [`AssessmentLog`] that fails its precheck.
///
/// The log itself is kept, already marked `Unknown`/`Undetermined` with a
/// descriptive message, and can be recovered with [`InvalidAssessment::into_log`].
pub struct InvalidAssessment<T: ?Sized> {
    error: PrecheckError,
    log: AssessmentLog<T>,
}

impl<T: ?Sized> InvalidAssessment<T> {
    pub(crate) fn new(error: PrecheckError, log: AssessmentLog<T>) -> Self {
        Self { error, log }
    }

    pub fn error(&self) -> &PrecheckError {
        &self.error
    }

    pub fn log(&self) -> &AssessmentLog<T> {
        &self.log
    }

    pub fn into_log(self) -> AssessmentLog<T> {
        self.log
    }
}

impl<T: ?Sized> fmt::Debug for InvalidAssessment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InvalidAssessment")
            .field("error", &self.error)
            .field("requirement_id", &self.log.requirement_id())
            .finish_non_exhaustive()
    }
}

impl<T: ?Sized> fmt::Display for InvalidAssessment<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid assessment: {}", self.error)
    }
}

impl<T: ?Sized> std::error::Error for InvalidAssessment<T> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}
