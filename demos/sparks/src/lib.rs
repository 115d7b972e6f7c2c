use ember_engine::EmitterConfig;
use wasm_bindgen::prelude::*;

const SPARKS_JSON: &str = include_str!("sparks.json");

/// Spark burst config. A malformed bundle is reported to the host by `sim_init`.
fn config() -> Result<EmitterConfig, serde_json::Error> {
    EmitterConfig::from_json(SPARKS_JSON)
}

ember_web::export_simulation!(config(), "sparks");
