//! JSON in, JSON out.
//!
//! A thin layer for callers that would rather not link the engine types.
//! Errors come back as display strings; the typed variants live in
//! [`crate::error`].

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::analysis::{CaptureAnalysis, CaptureAnalyzer};
use crate::config::EngineConfig;
use crate::error::{Result, ValidationError};
use crate::models::{Creature, Drone};
use crate::operation::{CaptureHistory, CaptureOperation};
use crate::tactics::{CaptureStrategy, StrategyGenerator};

pub const SCHEMA_VERSION: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureRequest {
    pub schema_version: u8,
    /// Seeds the generator's RNG; ignored by analysis.
    #[serde(default)]
    pub seed: u64,
    pub creature: Creature,
    /// Required for proposals.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub drone: Option<Drone>,
    /// Past operations; entries for other creatures are ignored.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<CaptureOperation>,
    /// Replaces the default configuration when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<EngineConfig>,
}

impl CaptureRequest {
    fn effective_config(&self) -> Result<EngineConfig> {
        let config = self.config.clone().unwrap_or_default();
        config.validate()?;
        Ok(config)
    }
}

fn parse_request(request_json: &str) -> std::result::Result<CaptureRequest, String> {
    let request: CaptureRequest =
        serde_json::from_str(request_json).map_err(|e| format!("Invalid JSON request: {}", e))?;
    if request.schema_version != SCHEMA_VERSION {
        return Err(format!("Unsupported schema version: {}", request.schema_version));
    }
    Ok(request)
}

pub fn analyze_request(request: &CaptureRequest) -> Result<CaptureAnalysis> {
    let config = request.effective_config()?;
    CaptureAnalyzer::from_config(&config).analyze_checked(&request.creature)
}

/// Fails with a validation error when the request carries no drone.
pub fn propose_request(request: &CaptureRequest) -> Result<CaptureStrategy> {
    let config = request.effective_config()?;
    let drone = request.drone.as_ref().ok_or_else(|| ValidationError::Field {
        field: "drone".to_string(),
        code: "required".to_string(),
    })?;
    let history = CaptureHistory::new(request.creature.id, request.history.iter().cloned());
    let mut rng = ChaCha8Rng::seed_from_u64(request.seed);
    StrategyGenerator::from_config(&config).propose(&request.creature, &history, drone, &mut rng)
}

/// Score the request's creature and return the `CaptureAnalysis` as JSON.
pub fn analyze_creature_json(request_json: &str) -> std::result::Result<String, String> {
    let request = parse_request(request_json)?;
    let analysis = analyze_request(&request).map_err(|e| e.to_string())?;
    serde_json::to_string(&analysis).map_err(|e| format!("Failed to serialize analysis: {}", e))
}

/// Propose a strategy for the request's creature and drone, returned as JSON.
pub fn propose_strategy_json(request_json: &str) -> std::result::Result<String, String> {
    let request = parse_request(request_json)?;
    let strategy = propose_request(&request).map_err(|e| e.to_string())?;
    serde_json::to_string(&strategy).map_err(|e| format!("Failed to serialize strategy: {}", e))
}
