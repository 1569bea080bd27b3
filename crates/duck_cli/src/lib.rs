//! Scenario loading and command bodies for the `duck` binary.

use std::path::Path;

use anyhow::{bail, Context, Result};
use duck_core::api::{analyze_request, propose_request, CaptureRequest, SCHEMA_VERSION};
use duck_core::EngineConfig;
use tracing::info;

/// Read a scenario file (the JSON API request format).
pub fn load_scenario(path: &Path) -> Result<CaptureRequest> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read scenario {}", path.display()))?;
    let request: CaptureRequest = serde_json::from_str(&text)
        .with_context(|| format!("invalid scenario {}", path.display()))?;
    if request.schema_version != SCHEMA_VERSION {
        bail!("unsupported schema version {} in {}", request.schema_version, path.display());
    }
    info!(path = %path.display(), creature = %request.creature.id, "scenario loaded");
    Ok(request)
}

/// Resolve the configuration for a run: an explicit profile wins, then the
/// scenario's embedded config, then the environment.
pub fn resolve_config(request: &CaptureRequest, profile: Option<&str>) -> EngineConfig {
    match (profile, &request.config) {
        (Some(name), _) => EngineConfig::from_profile(name),
        (None, Some(config)) => config.clone(),
        (None, None) => EngineConfig::from_env_or_default(),
    }
}

pub fn run_analyze(path: &Path, profile: Option<&str>) -> Result<String> {
    let mut request = load_scenario(path)?;
    request.config = Some(resolve_config(&request, profile));
    let analysis = analyze_request(&request)?;
    Ok(serde_json::to_string_pretty(&analysis)?)
}

/// `seed` overrides the scenario's own seed.
pub fn run_propose(path: &Path, seed: Option<u64>, profile: Option<&str>) -> Result<String> {
    let mut request = load_scenario(path)?;
    request.config = Some(resolve_config(&request, profile));
    if let Some(seed) = seed {
        request.seed = seed;
    }
    let strategy = propose_request(&request)?;
    Ok(serde_json::to_string_pretty(&strategy)?)
}

pub fn run_config(profile: Option<&str>) -> Result<String> {
    let config = match profile {
        Some(name) => EngineConfig::from_profile(name),
        None => EngineConfig::from_env_or_default(),
    };
    config.validate()?;
    Ok(config.to_yaml_string()?)
}
