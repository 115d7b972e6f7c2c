use ember_engine::EmitterConfig;
use wasm_bindgen::prelude::*;

const EMBERS_JSON: &str = include_str!("embers.json");

/// A single burst of embers; the host draws them from the disc buffer.
fn config() -> Result<EmitterConfig, serde_json::Error> {
    EmitterConfig::from_json(EMBERS_JSON)
}

ember_web::export_simulation!(config(), "embers", buffer);
