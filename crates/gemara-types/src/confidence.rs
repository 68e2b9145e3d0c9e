use crate::ParseEnumError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How trustworthy a verdict is. Independent of how severe it is.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum ConfidenceLevel {
    /// Initial state. Never reported as a step confidence.
    #[default]
    #[serde(rename = "Not Set")]
    NotSet,
    /// Could not be determined. Sticky once observed during aggregation.
    #[serde(rename = "Undetermined")]
    Undetermined,
    #[serde(rename = "Low")]
    Low,
    #[serde(rename = "Medium")]
    Medium,
    #[serde(rename = "High")]
    High,
}

impl ConfidenceLevel {
    pub const ALL: [ConfidenceLevel; 5] = [
        ConfidenceLevel::NotSet,
        ConfidenceLevel::Undetermined,
        ConfidenceLevel::Low,
        ConfidenceLevel::Medium,
        ConfidenceLevel::High,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ConfidenceLevel::NotSet => "Not Set",
            ConfidenceLevel::Undetermined => "Undetermined",
            ConfidenceLevel::Low => "Low",
            ConfidenceLevel::Medium => "Medium",
            ConfidenceLevel::High => "High",
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfidenceLevel {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfidenceLevel::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| {
                ParseEnumError::new(
                    "ConfidenceLevel",
                    s,
                    ConfidenceLevel::ALL.map(ConfidenceLevel::as_str),
                )
            })
    }
}
