//! Execution of one requirement's ordered steps.

use crate::confidence::{ConfidenceAggregator, ThresholdAggregator};
use crate::error::{InvalidAssessment, PrecheckError, UnsupportedStrategy};
use crate::policy::EffectiveConfig;
use crate::resolve::{MostSevere, Resolver};
use crate::step::AssessmentStep;
use gemara_types::{AssessmentRecord, ConfidenceLevel, Verdict};
use time::OffsetDateTime;

/// Mutable execution record for one requirement, and the driver of its steps.
///
/// A single log is not safe for concurrent runs; build one log per concurrent
/// evaluation of the same requirement.
pub struct AssessmentLog<T: ?Sized> {
    requirement_id: String,
    description: String,
    applicability: Vec<String>,
    steps: Vec<AssessmentStep<T>>,
    message: String,
    result: Verdict,
    confidence_level: ConfidenceLevel,
    steps_executed: u64,
    start: Option<OffsetDateTime>,
    end: Option<OffsetDateTime>,
}

impl<T: ?Sized> AssessmentLog<T> {
    /// Build a log and validate its required fields.
    ///
    /// On failure the returned error still carries the log, already marked
    /// `Unknown`/`Undetermined` with a descriptive message.
    pub fn new(
        requirement_id: impl Into<String>,
        description: impl Into<String>,
        applicability: Vec<String>,
        steps: Vec<AssessmentStep<T>>,
    ) -> Result<Self, InvalidAssessment<T>> {
        let mut log = Self {
            requirement_id: requirement_id.into(),
            description: description.into(),
            applicability,
            steps,
            message: String::new(),
            result: Verdict::NotRun,
            confidence_level: ConfidenceLevel::NotSet,
            steps_executed: 0,
            start: None,
            end: None,
        };
        match log.precheck() {
            Ok(()) => Ok(log),
            Err(error) => Err(InvalidAssessment::new(error, log)),
        }
    }

    /// Queue another step. Validation is deferred to the next precheck.
    pub fn add_step(&mut self, step: AssessmentStep<T>) {
        self.steps.push(step);
    }

    /// Verify that every required field has a value.
    ///
    /// On failure the log records `Unknown`, `Undetermined` and the error
    /// message, so it stays self-describing even if the error is dropped.
    pub fn precheck(&mut self) -> Result<(), PrecheckError> {
        if self.requirement_id.is_empty()
            || self.description.is_empty()
            || self.applicability.is_empty()
            || self.steps.is_empty()
        {
            let error = PrecheckError {
                requirement_id_len: self.requirement_id.len(),
                description_len: self.description.len(),
                applicability_len: self.applicability.len(),
                steps_len: self.steps.len(),
            };
            self.result = Verdict::Unknown;
            self.message = error.to_string();
            self.confidence_level = ConfidenceLevel::Undetermined;
            return Err(error);
        }
        Ok(())
    }

    /// Run every step with the most-severe resolver and threshold confidence.
    pub fn run(&mut self, target: &T) -> Verdict {
        self.run_with(target, &MostSevere, ThresholdAggregator::new)
    }

    /// Run every step with the resolver and confidence policy from `cfg`.
    pub fn run_with_policy(
        &mut self,
        target: &T,
        cfg: &EffectiveConfig,
    ) -> Result<Verdict, UnsupportedStrategy> {
        let resolver = cfg.resolver()?;
        Ok(self.run_with(target, &resolver, || cfg.confidence.aggregator()))
    }

    /// Run every step in order, halting as soon as the aggregate is `Failed`.
    ///
    /// Confidence is tracked by an aggregator built from `new_aggregator` at the
    /// start of this run.
    pub fn run_with<R, A, F>(&mut self, target: &T, resolver: &R, new_aggregator: F) -> Verdict
    where
        R: Resolver + ?Sized,
        A: ConfidenceAggregator,
        F: FnOnce() -> A,
    {
        self.result = Verdict::NotRun;
        self.message.clear();
        self.confidence_level = ConfidenceLevel::NotSet;
        self.steps_executed = 0;
        self.start = Some(OffsetDateTime::now_utc());
        self.end = None;

        if let Err(error) = self.precheck() {
            tracing::warn!(
                requirement_id = %self.requirement_id,
                %error,
                "assessment precheck failed; no steps executed"
            );
            return self.result;
        }

        let mut aggregator = new_aggregator();
        for idx in 0..self.steps.len() {
            if self.run_step(idx, target, resolver, &mut aggregator) == Verdict::Failed {
                tracing::debug!(
                    requirement_id = %self.requirement_id,
                    steps_executed = self.steps_executed,
                    steps_total = self.steps.len(),
                    "assessment failed; skipping remaining steps"
                );
                return Verdict::Failed;
            }
        }

        self.end = Some(OffsetDateTime::now_utc());
        self.result
    }

    fn run_step<R, A>(&mut self, idx: usize, target: &T, resolver: &R, aggregator: &mut A) -> Verdict
    where
        R: Resolver + ?Sized,
        A: ConfidenceAggregator,
    {
        self.steps_executed += 1;
        let outcome = self.steps[idx].run(target);

        self.result = resolver.resolve(self.result, outcome.result);
        // Later steps carry more context, even when they leave the verdict alone.
        self.message = outcome.message;
        self.confidence_level = aggregator.update(outcome.confidence);

        tracing::debug!(
            requirement_id = %self.requirement_id,
            step = self.steps[idx].name(),
            step_result = %outcome.result,
            step_confidence = %outcome.confidence,
            result = %self.result,
            confidence = %self.confidence_level,
            "assessment step executed"
        );

        self.result
    }

    /// Record that the requirement does not apply to the target.
    ///
    /// The engine never produces `NotApplicable` itself. Any earlier run is
    /// discarded, and a control evaluation skips the log while it stays marked.
    pub fn mark_not_applicable(&mut self, reason: impl Into<String>) {
        self.result = Verdict::NotApplicable;
        self.message = reason.into();
        self.confidence_level = ConfidenceLevel::NotSet;
        self.steps_executed = 0;
        self.start = None;
        self.end = None;
    }

    pub fn requirement_id(&self) -> &str {
        &self.requirement_id
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn applicability(&self) -> &[String] {
        &self.applicability
    }

    pub fn steps(&self) -> &[AssessmentStep<T>] {
        &self.steps
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn result(&self) -> Verdict {
        self.result
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        self.confidence_level
    }

    pub fn steps_executed(&self) -> u64 {
        self.steps_executed
    }

    pub fn start(&self) -> Option<OffsetDateTime> {
        self.start
    }

    /// Set only when every step ran; a `Failed` short-circuit leaves it empty.
    pub fn end(&self) -> Option<OffsetDateTime> {
        self.end
    }

    /// Snapshot for exporters.
    pub fn to_record(&self) -> AssessmentRecord {
        AssessmentRecord {
            requirement_id: self.requirement_id.clone(),
            description: self.description.clone(),
            applicability: self.applicability.clone(),
            result: self.result,
            confidence_level: self.confidence_level,
            message: self.message.clone(),
            steps: self.steps.iter().map(|s| s.name().to_string()).collect(),
            steps_executed: self.steps_executed,
            start: self.start,
            end: self.end,
        }
    }
}

impl<T: ?Sized> Clone for AssessmentLog<T> {
    fn clone(&self) -> Self {
        Self {
            requirement_id: self.requirement_id.clone(),
            description: self.description.clone(),
            applicability: self.applicability.clone(),
            steps: self.steps.clone(),
            message: self.message.clone(),
            result: self.result,
            confidence_level: self.confidence_level,
            steps_executed: self.steps_executed,
            start: self.start,
            end: self.end,
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for AssessmentLog<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AssessmentLog")
            .field("requirement_id", &self.requirement_id)
            .field("description", &self.description)
            .field("applicability", &self.applicability)
            .field("steps", &self.steps)
            .field("message", &self.message)
            .field("result", &self.result)
            .field("confidence_level", &self.confidence_level)
            .field("steps_executed", &self.steps_executed)
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}
