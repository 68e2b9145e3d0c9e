use crate::confidence::{ConfidenceAggregator, LastStepAggregator, ThresholdAggregator};
use crate::error::UnsupportedStrategy;
use crate::resolve::{Resolver, resolver_for};
use gemara_types::ResolutionStrategy;

/// Which confidence aggregation a run uses.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfidencePolicy {
    /// Percentage thresholds over every step's confidence.
    #[default]
    Threshold,
    /// The latest step's confidence, with `Undetermined` sticky.
    LastStep,
}

impl ConfidencePolicy {
    /// A fresh aggregator for one run.
    pub fn aggregator(self) -> Box<dyn ConfidenceAggregator + Send> {
        match self {
            ConfidencePolicy::Threshold => Box::new(ThresholdAggregator::new()),
            ConfidencePolicy::LastStep => Box::new(LastStepAggregator::new()),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ConfidencePolicy::Threshold => "threshold",
            ConfidencePolicy::LastStep => "last-step",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EffectiveConfig {
    pub profile: String,
    pub confidence: ConfidencePolicy,
    pub strategy: ResolutionStrategy,
}

impl Default for EffectiveConfig {
    fn default() -> Self {
        Self {
            profile: "strict".to_string(),
            confidence: ConfidencePolicy::Threshold,
            strategy: ResolutionStrategy::MostSevere,
        }
    }
}

impl EffectiveConfig {
    pub fn resolver(&self) -> Result<Box<dyn Resolver + Send + Sync>, UnsupportedStrategy> {
        resolver_for(self.strategy)
    }
}
