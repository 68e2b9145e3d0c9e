use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// `gemara.toml` schema v1.
///
/// This is a *user-facing* config model: it is intentionally permissive so forward-compat is easy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GemaraConfigV1 {
    /// Optional schema string for tooling (`gemara.config.v1`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Preset profile: `strict` (default) or `legacy`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,

    /// Confidence aggregation: `threshold` or `last-step`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<String>,

    /// Verdict resolution strategy, e.g. `MostSevere`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strategy: Option<String>,
}
