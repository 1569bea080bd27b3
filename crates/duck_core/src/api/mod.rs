pub mod json_api;

pub use json_api::{
    analyze_creature_json, analyze_request, propose_request, propose_strategy_json,
    CaptureRequest, SCHEMA_VERSION,
};
