pub mod api;
pub mod core;
pub mod components;
pub mod systems;
pub mod renderer;

// Re-export key types at crate root for convenience
pub use api::config::EmitterConfig;
pub use api::error::{Attribute, EmissionError, GeneratorError};
pub use crate::core::random::{uniform_real, uniform_sample, RandomSource, Rng};
pub use crate::core::vector::Vector;
pub use components::color::Color;
pub use components::particle::{Particle, RenderStyle};
pub use systems::emission::{generators, EmissionStrategy, Generator};
pub use systems::engine::{ParticleEngine, PopulationMode};
pub use renderer::disc::{DiscBuffer, DiscInstance};
pub use renderer::surface::DrawSurface;
