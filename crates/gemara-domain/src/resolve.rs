use crate::error::UnsupportedStrategy;
use gemara_types::{ResolutionStrategy, Verdict};

/// Fold a newly observed verdict into the running aggregate.
///
/// Returns whichever is more severe; on a tie the existing aggregate is kept.
/// The result over a sequence is therefore the most severe verdict observed,
/// independent of order.
pub fn aggregate_verdict(current: Verdict, observed: Verdict) -> Verdict {
    if observed.is_more_severe_than(current) {
        observed
    } else {
        current
    }
}

/// Conflict-resolution policy consumed by a run.
///
/// Implement this to plug in a policy other than [`MostSevere`].
pub trait Resolver {
    fn resolve(&self, current: Verdict, observed: Verdict) -> Verdict;
}

impl<R: Resolver + ?Sized> Resolver for Box<R> {
    fn resolve(&self, current: Verdict, observed: Verdict) -> Verdict {
        (**self).resolve(current, observed)
    }
}

/// `ResolutionStrategy::MostSevere`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MostSevere;

impl Resolver for MostSevere {
    fn resolve(&self, current: Verdict, observed: Verdict) -> Verdict {
        aggregate_verdict(current, observed)
    }
}

/// Built-in resolver for a named strategy.
pub fn resolver_for(
    strategy: ResolutionStrategy,
) -> Result<Box<dyn Resolver + Send + Sync>, UnsupportedStrategy> {
    match strategy {
        ResolutionStrategy::MostSevere => Ok(Box::new(MostSevere)),
        ResolutionStrategy::ManualOverride | ResolutionStrategy::AuthoritativeConfirmation => {
            Err(UnsupportedStrategy(strategy))
        }
    }
}
