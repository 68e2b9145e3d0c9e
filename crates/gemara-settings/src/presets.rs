use gemara_domain::policy::{ConfidencePolicy, EffectiveConfig};
use gemara_types::ResolutionStrategy;

/// Preset profiles are opinionated defaults.
///
/// Keep these small and readable. Anything complex should go into repo config.
pub fn preset(profile: &str) -> EffectiveConfig {
    match profile {
        "legacy" => legacy_profile(),
        // default
        _ => strict_profile(),
    }
}

fn strict_profile() -> EffectiveConfig {
    EffectiveConfig {
        profile: "strict".to_string(),
        confidence: ConfidencePolicy::Threshold,
        strategy: ResolutionStrategy::MostSevere,
    }
}

fn legacy_profile() -> EffectiveConfig {
    // Confidence follows whatever the last step reported.
    EffectiveConfig {
        profile: "legacy".to_string(),
        confidence: ConfidencePolicy::LastStep,
        strategy: ResolutionStrategy::MostSevere,
    }
}
