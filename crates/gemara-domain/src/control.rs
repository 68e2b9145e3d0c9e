//! Groups the assessment logs of one control and folds their outcomes.

use crate::assessment::AssessmentLog;
use crate::confidence::{ConfidenceAggregator, ThresholdAggregator};
use crate::error::UnsupportedStrategy;
use crate::policy::EffectiveConfig;
use crate::resolve::{MostSevere, Resolver};
use gemara_types::{ConfidenceLevel, ControlEvaluationRecord, Verdict};

/// All requirement assessments for one control.
///
/// Every log runs on `evaluate`; a failing requirement never stops its
/// siblings. Logs marked not applicable are skipped but still folded. The control verdict is folded with the same resolver the logs
/// use, and the control confidence is folded from each log's final
/// confidence.
pub struct ControlEvaluation<T: ?Sized> {
    control_id: String,
    name: String,
    logs: Vec<AssessmentLog<T>>,
    result: Verdict,
    confidence_level: ConfidenceLevel,
    message: String,
}

impl<T: ?Sized> ControlEvaluation<T> {
    pub fn new(control_id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            control_id: control_id.into(),
            name: name.into(),
            logs: Vec::new(),
            result: Verdict::NotRun,
            confidence_level: ConfidenceLevel::NotSet,
            message: String::new(),
        }
    }

    pub fn add_assessment(&mut self, log: AssessmentLog<T>) {
        self.logs.push(log);
    }

    pub fn with_assessment(mut self, log: AssessmentLog<T>) -> Self {
        self.add_assessment(log);
        self
    }

    pub fn evaluate(&mut self, target: &T) -> Verdict {
        self.evaluate_with(target, &MostSevere, ThresholdAggregator::new)
    }

    pub fn evaluate_with_policy(
        &mut self,
        target: &T,
        cfg: &EffectiveConfig,
    ) -> Result<Verdict, UnsupportedStrategy> {
        let resolver = cfg.resolver()?;
        Ok(self.evaluate_with(target, &resolver, || cfg.confidence.aggregator()))
    }

    /// Run every log with `resolver` and a fresh aggregator from `new_aggregator`.
    pub fn evaluate_with<R, A, F>(&mut self, target: &T, resolver: &R, new_aggregator: F) -> Verdict
    where
        R: Resolver + ?Sized,
        A: ConfidenceAggregator,
        F: Fn() -> A,
    {
        self.result = Verdict::NotRun;
        self.confidence_level = ConfidenceLevel::NotSet;
        self.message.clear();

        let mut control_confidence = new_aggregator();
        for log in &mut self.logs {
            let verdict = if log.result() == Verdict::NotApplicable {
                log.result()
            } else {
                log.run_with(target, resolver, &new_aggregator)
            };

            let folded = resolver.resolve(self.result, verdict);
            if folded != self.result {
                self.message = log.message().to_string();
            }
            self.result = folded;
            self.confidence_level = control_confidence.update(log.confidence_level());
        }

        tracing::debug!(
            control_id = %self.control_id,
            assessments = self.logs.len(),
            result = %self.result,
            confidence = %self.confidence_level,
            "control evaluated"
        );

        self.result
    }

    pub fn control_id(&self) -> &str {
        &self.control_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn assessments(&self) -> &[AssessmentLog<T>] {
        &self.logs
    }

    pub fn result(&self) -> Verdict {
        self.result
    }

    pub fn confidence_level(&self) -> ConfidenceLevel {
        self.confidence_level
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn to_record(&self) -> ControlEvaluationRecord {
        ControlEvaluationRecord {
            control_id: self.control_id.clone(),
            name: self.name.clone(),
            result: self.result,
            confidence_level: self.confidence_level,
            message: self.message.clone(),
            assessment_logs: self.logs.iter().map(AssessmentLog::to_record).collect(),
        }
    }
}

impl<T: ?Sized> Clone for ControlEvaluation<T> {
    fn clone(&self) -> Self {
        Self {
            control_id: self.control_id.clone(),
            name: self.name.clone(),
            logs: self.logs.clone(),
            result: self.result,
            confidence_level: self.confidence_level,
            message: self.message.clone(),
        }
    }
}

impl<T: ?Sized> std::fmt::Debug for ControlEvaluation<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ControlEvaluation")
            .field("control_id", &self.control_id)
            .field("name", &self.name)
            .field("logs", &self.logs)
            .field("result", &self.result)
            .field("confidence_level", &self.confidence_level)
            .field("message", &self.message)
            .finish()
    }
}
