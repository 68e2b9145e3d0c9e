use crate::{ConfidenceLevel, Verdict};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Finished state of one requirement's assessment, as read by exporters.
///
/// `result` may legitimately be `Not Run` (never executed) or `Unknown`
/// (malformed assessment); neither carries further detail.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AssessmentRecord {
    pub requirement_id: String,
    pub description: String,
    pub applicability: Vec<String>,
    pub result: Verdict,
    pub confidence_level: ConfidenceLevel,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// Stable step names in execution order. The last one doubles as the
    /// logical location of the assessment.
    #[serde(default)]
    pub steps: Vec<String>,
    pub steps_executed: u64,
    #[schemars(with = "Option<String>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(with = "time::serde::rfc3339::option")]
    pub start: Option<OffsetDateTime>,
    #[schemars(with = "Option<String>")]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[serde(with = "time::serde::rfc3339::option")]
    pub end: Option<OffsetDateTime>,
}

impl AssessmentRecord {
    /// Name of the last configured step, falling back to the requirement id.
    pub fn logical_location(&self) -> &str {
        self.steps
            .last()
            .map(String::as_str)
            .unwrap_or(self.requirement_id.as_str())
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ControlEvaluationRecord {
    pub control_id: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    pub result: Verdict,
    pub confidence_level: ConfidenceLevel,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    pub assessment_logs: Vec<AssessmentRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Author {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub author: Author,
}

/// Envelope over every control evaluated in one run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct EvaluationLog {
    /// Versioned schema identifier for the envelope shape.
    pub schema: String,
    pub metadata: Metadata,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    #[schemars(with = "String")]
    #[serde(with = "time::serde::rfc3339")]
    pub finished_at: OffsetDateTime,
    /// Most severe verdict across `evaluations`.
    pub result: Verdict,
    pub evaluations: Vec<ControlEvaluationRecord>,
}
