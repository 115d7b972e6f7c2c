use serde::{Deserialize, Serialize};

use crate::api::error::EmissionError;
use crate::components::color::Color;
use crate::components::particle::RenderStyle;
use crate::core::random::Rng;
use crate::core::vector::Vector;
use crate::systems::emission::{generators, EmissionStrategy};
use crate::systems::engine::{ParticleEngine, PopulationMode};

/// Data-driven description of a sampled emitter and its population.
/// Loaded from JSON; every field falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmitterConfig {
    /// RNG seed for the engine's random source.
    pub seed: u64,
    /// Population size (target when replenishing, one-shot count otherwise).
    pub particles: usize,
    /// Refill the population every tick (false = spawn once).
    pub replenish: bool,
    /// Spawn point.
    pub base_location: Vector,
    /// Half-extent of a box around `base_location` to spawn in. `None` spawns exactly at the base.
    pub spread: Option<Vector>,
    /// Min/max initial speed; direction is uniform.
    pub speed_range: (f32, f32),
    /// Constant acceleration applied to every particle.
    pub acceleration: Vector,
    /// Colors to sample from.
    pub palette: Vec<Color>,
    /// Min/max per-tick lifespan decrement.
    pub decay_range: (f32, f32),
    /// Fade particles out as they age.
    pub fade: bool,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            particles: 200,
            replenish: true,
            base_location: Vector::new(400.0, 300.0),
            spread: None,
            speed_range: (0.5, 3.0),
            acceleration: Vector::new(0.0, 0.05),
            palette: Color::ALL.to_vec(),
            decay_range: (1.0, 4.0),
            fade: true,
        }
    }
}

impl EmitterConfig {
    /// Parse a config from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    pub fn mode(&self) -> PopulationMode {
        if self.replenish {
            PopulationMode::Replenish { target: self.particles }
        } else {
            PopulationMode::OneShot { count: self.particles }
        }
    }

    /// Build the emission strategy this config describes. Bad ranges or an
    /// empty palette surface at the first emission.
    pub fn strategy(&self) -> EmissionStrategy {
        let mut strategy = EmissionStrategy::new(self.base_location)
            .with_velocity_emitter(generators::radial(self.speed_range.0, self.speed_range.1))
            .with_acceleration_emitter(generators::constant(self.acceleration))
            .with_color_emitter(generators::sample_from(self.palette.clone()))
            .with_decay_rate_emitter(generators::uniform_range(self.decay_range.0, self.decay_range.1))
            .with_style(if self.fade { RenderStyle::Fade } else { RenderStyle::Solid });

        if let Some(spread) = self.spread {
            let base = self.base_location;
            strategy.set_location_emitter(generators::uniform_box(
                Vector::new(base.x - spread.x, base.y - spread.y),
                Vector::new(base.x + spread.x, base.y + spread.y),
            ));
        }
        strategy
    }

    /// Build and fill an engine from this config.
    pub fn build_engine(&self) -> Result<ParticleEngine<Rng>, EmissionError> {
        ParticleEngine::new(self.mode(), self.strategy(), Rng::new(self.seed))
    }
}
