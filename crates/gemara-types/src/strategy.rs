use crate::ParseEnumError;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Named policy for resolving conflicting verdicts into one.
///
/// Only `MostSevere` has defined aggregation behavior; the other names are
/// reserved so documents carrying them still decode.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum ResolutionStrategy {
    /// Failed > Unknown > NeedsReview > Passed.
    #[default]
    MostSevere,
    /// Manual reviewers take precedence over automated evaluators.
    ManualOverride,
    /// Non-authoritative findings need confirmation from an authoritative evaluator.
    AuthoritativeConfirmation,
}

impl ResolutionStrategy {
    pub const ALL: [ResolutionStrategy; 3] = [
        ResolutionStrategy::MostSevere,
        ResolutionStrategy::ManualOverride,
        ResolutionStrategy::AuthoritativeConfirmation,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            ResolutionStrategy::MostSevere => "MostSevere",
            ResolutionStrategy::ManualOverride => "ManualOverride",
            ResolutionStrategy::AuthoritativeConfirmation => "AuthoritativeConfirmation",
        }
    }
}

impl fmt::Display for ResolutionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResolutionStrategy {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResolutionStrategy::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| {
                ParseEnumError::new(
                    "ResolutionStrategy",
                    s,
                    ResolutionStrategy::ALL.map(ResolutionStrategy::as_str),
                )
            })
    }
}
