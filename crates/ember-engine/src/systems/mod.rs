pub mod emission;
pub mod engine;
