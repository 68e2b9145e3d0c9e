use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Outcome of assessing one requirement (or one step of it).
///
/// Serialized as its canonical string name in both JSON and YAML. Decoding an
/// unrecognized string is an error; there is no fallback variant.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum Verdict {
    #[default]
    #[serde(rename = "Not Run")]
    NotRun,
    #[serde(rename = "Passed")]
    Passed,
    #[serde(rename = "Failed")]
    Failed,
    #[serde(rename = "Needs Review")]
    NeedsReview,
    #[serde(rename = "Unknown")]
    Unknown,
    #[serde(rename = "Not Applicable")]
    NotApplicable,
}

impl Verdict {
    pub const ALL: [Verdict; 6] = [
        Verdict::NotRun,
        Verdict::Passed,
        Verdict::Failed,
        Verdict::NeedsReview,
        Verdict::Unknown,
        Verdict::NotApplicable,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Verdict::NotRun => "Not Run",
            Verdict::Passed => "Passed",
            Verdict::Failed => "Failed",
            Verdict::NeedsReview => "Needs Review",
            Verdict::Unknown => "Unknown",
            Verdict::NotApplicable => "Not Applicable",
        }
    }

    /// Position in the severity order `Failed > Unknown > NeedsReview > Passed > NotApplicable/NotRun`.
    ///
    /// `NotRun` and `NotApplicable` share the lowest rank.
    pub const fn severity_rank(self) -> u8 {
        match self {
            Verdict::NotRun | Verdict::NotApplicable => 0,
            Verdict::Passed => 1,
            Verdict::NeedsReview => 2,
            Verdict::Unknown => 3,
            Verdict::Failed => 4,
        }
    }

    pub const fn is_more_severe_than(self, other: Verdict) -> bool {
        self.severity_rank() > other.severity_rank()
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Verdict {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Verdict::ALL
            .into_iter()
            .find(|v| v.as_str() == s)
            .ok_or_else(|| ParseEnumError::new("Verdict", s, Verdict::ALL.map(Verdict::as_str)))
    }
}

/// Rejected string for one of the closed gemara vocabularies.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind}: {input:?} (valid values: {})", .valid.join(", "))]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub input: String,
    pub valid: Vec<&'static str>,
}

impl ParseEnumError {
    pub(crate) fn new<const N: usize>(
        kind: &'static str,
        input: &str,
        valid: [&'static str; N],
    ) -> Self {
        Self {
            kind,
            input: input.to_string(),
            valid: valid.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn serde_names_match_string_table() {
        for v in Verdict::ALL {
            let json = serde_json::to_string(&v).expect("serialize");
            assert_eq!(json, format!("\"{}\"", v.as_str()));
            let yaml = serde_yaml::to_string(&v).expect("serialize yaml");
            let back: Verdict = serde_yaml::from_str(&yaml).expect("parse yaml");
            assert_eq!(back, v);
        }
    }

    #[test]
    fn unknown_strings_are_rejected() {
        assert!(serde_json::from_str::<Verdict>("\"Skipped\"").is_err());
        assert!(serde_json::from_str::<Verdict>("\"passed\"").is_err());
        assert!(serde_json::from_str::<Verdict>("1").is_err());
        assert!(serde_yaml::from_str::<Verdict>("NotRun").is_err());

        let err = "Maybe".parse::<Verdict>().unwrap_err();
        assert_eq!(err.kind, "Verdict");
        assert!(err.to_string().contains("Needs Review"));
    }

    #[test]
    fn default_is_not_run() {
        assert_eq!(Verdict::default(), Verdict::NotRun);
    }

    #[test]
    fn severity_order_is_total_over_distinct_ranks() {
        use Verdict::*;
        let ordered = [Passed, NeedsReview, Unknown, Failed];
        for pair in ordered.windows(2) {
            assert!(pair[1].is_more_severe_than(pair[0]));
        }
        assert!(Passed.is_more_severe_than(NotRun));
        assert!(Passed.is_more_severe_than(NotApplicable));
        assert!(!NotRun.is_more_severe_than(NotApplicable));
        assert!(!NotApplicable.is_more_severe_than(NotRun));
    }

    proptest! {
        #[test]
        fn display_parse_round_trip(idx in 0usize..Verdict::ALL.len()) {
            let v = Verdict::ALL[idx];
            prop_assert_eq!(v.to_string().parse::<Verdict>(), Ok(v));
        }

        #[test]
        fn arbitrary_strings_parse_only_when_canonical(s in ".{0,16}") {
            let canonical = Verdict::ALL.iter().any(|v| v.as_str() == s);
            prop_assert_eq!(s.parse::<Verdict>().is_ok(), canonical);
        }
    }
}
