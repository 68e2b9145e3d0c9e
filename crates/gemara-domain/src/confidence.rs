//! Confidence aggregation across the steps of one run.
//!
//! Confidence is a population statistic over every step executed so far, not
//! the value reported by the latest step. `Undetermined` is sticky: once seen,
//! nothing ingested afterwards can raise the aggregate again.

use gemara_types::ConfidenceLevel;

/// Share of `High` observations required for an aggregate of `High`.
pub const HIGH_CONFIDENCE_THRESHOLD: f64 = 0.75;

/// Share of `Medium`-or-`High` observations required for an aggregate of `Medium`.
pub const MEDIUM_CONFIDENCE_THRESHOLD: f64 = 0.50;

/// Accumulates per-step confidence levels for a single run.
///
/// A fresh aggregator is built for every run; implementations are never shared
/// across runs.
pub trait ConfidenceAggregator {
    /// Ingest one step's confidence and return the aggregate over everything
    /// ingested so far.
    fn update(&mut self, level: ConfidenceLevel) -> ConfidenceLevel;
}

impl<A: ConfidenceAggregator + ?Sized> ConfidenceAggregator for Box<A> {
    fn update(&mut self, level: ConfidenceLevel) -> ConfidenceLevel {
        (**self).update(level)
    }
}

/// Threshold aggregation over the distribution of `Low`/`Medium`/`High`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ThresholdAggregator {
    low: u32,
    medium: u32,
    high: u32,
    saw_undetermined: bool,
}

impl ThresholdAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of counted observations. `NotSet` and `Undetermined` are not counted.
    pub fn total(&self) -> u32 {
        self.low + self.medium + self.high
    }

    fn compute(&self) -> Option<ConfidenceLevel> {
        if self.saw_undetermined {
            return Some(ConfidenceLevel::Undetermined);
        }

        let total = self.total();
        if total == 0 {
            return None;
        }

        let total = f64::from(total);
        let high_pct = f64::from(self.high) / total;
        let medium_or_high_pct = f64::from(self.medium + self.high) / total;

        let level = if high_pct >= HIGH_CONFIDENCE_THRESHOLD {
            ConfidenceLevel::High
        } else if medium_or_high_pct >= MEDIUM_CONFIDENCE_THRESHOLD {
            ConfidenceLevel::Medium
        } else {
            ConfidenceLevel::Low
        };
        Some(level)
    }
}

impl ConfidenceAggregator for ThresholdAggregator {
    fn update(&mut self, level: ConfidenceLevel) -> ConfidenceLevel {
        match level {
            ConfidenceLevel::NotSet => {}
            ConfidenceLevel::Undetermined => self.saw_undetermined = true,
            ConfidenceLevel::Low => self.low += 1,
            ConfidenceLevel::Medium => self.medium += 1,
            ConfidenceLevel::High => self.high += 1,
        }

        // Nothing counted yet: echo the level back unchanged.
        self.compute().unwrap_or(level)
    }
}

/// The most recently reported level wins, except that `Undetermined` stays sticky.
///
/// Lets step authors steer confidence themselves as context builds up across
/// steps. Selected explicitly through `ConfidencePolicy::LastStep`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LastStepAggregator {
    last: ConfidenceLevel,
    saw_undetermined: bool,
}

impl LastStepAggregator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ConfidenceAggregator for LastStepAggregator {
    fn update(&mut self, level: ConfidenceLevel) -> ConfidenceLevel {
        match level {
            ConfidenceLevel::NotSet => {}
            ConfidenceLevel::Undetermined => self.saw_undetermined = true,
            other => self.last = other,
        }

        if self.saw_undetermined {
            ConfidenceLevel::Undetermined
        } else {
            self.last
        }
    }
}
