//! The `evaluate` use case: run every control against a target and produce an evaluation log.

use anyhow::Context;
use gemara_domain::{ControlEvaluation, Resolver};
use gemara_settings::{Overrides, ResolvedConfig};
use gemara_types::ids::{DEFAULT_AUTHOR, SCHEMA_EVALUATION_LOG_V1};
use gemara_types::{Author, EvaluationLog, Metadata, Verdict};
use time::OffsetDateTime;

/// Input for the evaluate use case.
pub struct EvaluationInput<'a, T: ?Sized> {
    /// Artifact every step inspects.
    pub target: &'a T,
    /// Controls to evaluate, in output order.
    pub controls: Vec<ControlEvaluation<T>>,
    /// Config file contents (empty string if not found).
    pub config_text: &'a str,
    /// Caller overrides, applied after the config file.
    pub overrides: Overrides,
    /// Identifier recorded in the log metadata; may be empty.
    pub evaluation_id: &'a str,
}

/// Output from the evaluate use case.
#[derive(Clone, Debug)]
pub struct EvaluationOutput {
    /// The generated log.
    pub log: EvaluationLog,
    /// The resolved configuration used.
    pub resolved_config: ResolvedConfig,
}

/// Run the evaluate use case: parse config, resolve policy, evaluate every control, build the log.
pub fn run_evaluation<T: ?Sized>(input: EvaluationInput<'_, T>) -> anyhow::Result<EvaluationOutput> {
    let started_at = OffsetDateTime::now_utc();

    // Parse config (empty is allowed, defaults apply).
    let cfg = if input.config_text.trim().is_empty() {
        gemara_settings::GemaraConfigV1::default()
    } else {
        gemara_settings::parse_config_toml(input.config_text).context("parse config")?
    };

    let resolved =
        gemara_settings::resolve_config(cfg, input.overrides).context("resolve config")?;
    let effective = &resolved.effective;
    let resolver = effective.resolver().context("select resolver")?;

    tracing::info!(
        profile = %effective.profile,
        confidence = effective.confidence.as_str(),
        strategy = %effective.strategy,
        controls = input.controls.len(),
        "starting evaluation"
    );

    let mut result = Verdict::NotRun;
    let mut evaluations = Vec::with_capacity(input.controls.len());
    for mut control in input.controls {
        let verdict =
            control.evaluate_with(input.target, &resolver, || effective.confidence.aggregator());
        result = resolver.resolve(result, verdict);
        evaluations.push(control.to_record());
    }

    let finished_at = OffsetDateTime::now_utc();
    tracing::info!(
        %result,
        evaluations = evaluations.len(),
        "evaluation finished"
    );

    let log = EvaluationLog {
        schema: SCHEMA_EVALUATION_LOG_V1.to_string(),
        metadata: Metadata {
            id: input.evaluation_id.to_string(),
            author: Author {
                name: DEFAULT_AUTHOR.to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
                uri: None,
            },
        },
        started_at,
        finished_at,
        result,
        evaluations,
    };

    Ok(EvaluationOutput {
        log,
        resolved_config: resolved,
    })
}
