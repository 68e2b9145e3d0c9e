use crate::{model::GemaraConfigV1, presets};
use anyhow::Context;
use gemara_domain::policy::{ConfidencePolicy, EffectiveConfig};
use gemara_domain::resolve::resolver_for;
use gemara_types::ResolutionStrategy;
use gemara_types::ids::SCHEMA_CONFIG_V1;

#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub confidence: Option<String>,
    pub strategy: Option<String>,
}

#[derive(Clone, Debug)]
pub struct ResolvedConfig {
    pub effective: EffectiveConfig,
}

pub fn resolve_config(cfg: GemaraConfigV1, overrides: Overrides) -> anyhow::Result<ResolvedConfig> {
    if let Some(schema) = cfg.schema.as_deref()
        && schema != SCHEMA_CONFIG_V1
    {
        anyhow::bail!("unsupported config schema: {schema} (expected {SCHEMA_CONFIG_V1})");
    }

    let profile = overrides
        .profile
        .clone()
        .or(cfg.profile.clone())
        .unwrap_or_else(|| "strict".to_string());

    let mut effective = presets::preset(&profile);

    // Confidence policy
    if let Some(confidence_s) = overrides.confidence.clone().or(cfg.confidence.clone()) {
        effective.confidence = parse_confidence(&confidence_s)?;
    }

    // Resolution strategy
    if let Some(strategy_s) = overrides.strategy.clone().or(cfg.strategy.clone()) {
        effective.strategy = parse_strategy(&strategy_s)
            .with_context(|| format!("invalid strategy for profile {}", effective.profile))?;
    }

    Ok(ResolvedConfig { effective })
}

fn parse_confidence(v: &str) -> anyhow::Result<ConfidencePolicy> {
    match v {
        "threshold" => Ok(ConfidencePolicy::Threshold),
        "last-step" | "last_step" => Ok(ConfidencePolicy::LastStep),
        other => anyhow::bail!("unknown confidence policy: {other} (expected threshold|last-step)"),
    }
}

fn parse_strategy(v: &str) -> anyhow::Result<ResolutionStrategy> {
    let strategy: ResolutionStrategy = v.parse()?;
    resolver_for(strategy)?;
    Ok(strategy)
}
