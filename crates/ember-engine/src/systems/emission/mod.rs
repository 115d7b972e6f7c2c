//! Emission strategies: how newly spawned particles are parameterized.
//!
//! A strategy holds one generator per particle attribute. Generators are
//! plain functions of a spawn sequence number and an injected random source.
//! Slots start empty; a missing mandatory slot surfaces as
//! [`EmissionError::UnconfiguredGenerator`] at [`EmissionStrategy::validate`]
//! or at the first [`EmissionStrategy::emit_particle`], whichever comes first.

pub mod generators;

use std::fmt;

use crate::api::error::{Attribute, EmissionError, GeneratorError};
use crate::components::color::Color;
use crate::components::particle::{Particle, RenderStyle};
use crate::core::random::RandomSource;
use crate::core::vector::Vector;

/// A boxed generator for one attribute slot.
pub type Generator<T> = Box<dyn Fn(u64, &mut dyn RandomSource) -> Result<T, GeneratorError>>;

/// Bundle of per-attribute generators that produces fully configured particles.
pub struct EmissionStrategy {
    base_location: Vector,
    style: RenderStyle,
    location: Option<Generator<Vector>>,
    velocity: Option<Generator<Vector>>,
    acceleration: Option<Generator<Vector>>,
    color: Option<Generator<Color>>,
    decay_rate: Option<Generator<f32>>,
}

fn sample<T>(
    slot: &Option<Generator<T>>,
    attribute: Attribute,
    seq: u64,
    rng: &mut dyn RandomSource,
) -> Result<T, EmissionError> {
    let generator = slot
        .as_ref()
        .ok_or(EmissionError::UnconfiguredGenerator(attribute))?;
    generator(seq, rng).map_err(|source| EmissionError::Generator { attribute, source })
}

/// Lifespan may only shrink: reject negative and non-finite decay rates.
fn check_decay_rate(decay_rate: f32) -> Result<f32, EmissionError> {
    if decay_rate.is_finite() && decay_rate >= 0.0 {
        Ok(decay_rate)
    } else {
        Err(EmissionError::Generator {
            attribute: Attribute::DecayRate,
            source: GeneratorError::InvalidValue(format!("decay rate {}", decay_rate)),
        })
    }
}

impl EmissionStrategy {
    /// Empty strategy spawning at `base_location` until a location generator is set.
    pub fn new(base_location: Vector) -> Self {
        Self {
            base_location,
            style: RenderStyle::default(),
            location: None,
            velocity: None,
            acceleration: None,
            color: None,
            decay_rate: None,
        }
    }

    /// The one-shot fountain: spawn at `base_location`, drift upward with a
    /// small downward pull, fixed decay, white and unfaded.
    pub fn simple(base_location: Vector) -> Self {
        Self::new(base_location)
            .with_velocity_emitter(generators::uniform_box(
                Vector::new(-1.0, -2.0),
                Vector::new(1.0, 0.0),
            ))
            .with_acceleration_emitter(generators::constant(Vector::new(0.0, 0.05)))
            .with_color_emitter(generators::constant(Color::White))
            .with_decay_rate_emitter(generators::constant(Particle::DEFAULT_DECAY_RATE))
            .with_style(RenderStyle::Solid)
    }

    pub fn base_location(&self) -> Vector {
        self.base_location
    }

    pub fn style(&self) -> RenderStyle {
        self.style
    }

    // -- Setters (no validation until emission) --

    pub fn set_location_emitter<F>(&mut self, f: F)
    where
        F: Fn(u64, &mut dyn RandomSource) -> Result<Vector, GeneratorError> + 'static,
    {
        self.location = Some(Box::new(f));
    }

    pub fn set_velocity_emitter<F>(&mut self, f: F)
    where
        F: Fn(u64, &mut dyn RandomSource) -> Result<Vector, GeneratorError> + 'static,
    {
        self.velocity = Some(Box::new(f));
    }

    pub fn set_acceleration_emitter<F>(&mut self, f: F)
    where
        F: Fn(u64, &mut dyn RandomSource) -> Result<Vector, GeneratorError> + 'static,
    {
        self.acceleration = Some(Box::new(f));
    }

    pub fn set_color_emitter<F>(&mut self, f: F)
    where
        F: Fn(u64, &mut dyn RandomSource) -> Result<Color, GeneratorError> + 'static,
    {
        self.color = Some(Box::new(f));
    }

    pub fn set_decay_rate_emitter<F>(&mut self, f: F)
    where
        F: Fn(u64, &mut dyn RandomSource) -> Result<f32, GeneratorError> + 'static,
    {
        self.decay_rate = Some(Box::new(f));
    }

    // -- Builder pattern --

    pub fn with_location_emitter<F>(mut self, f: F) -> Self
    where
        F: Fn(u64, &mut dyn RandomSource) -> Result<Vector, GeneratorError> + 'static,
    {
        self.set_location_emitter(f);
        self
    }

    pub fn with_velocity_emitter<F>(mut self, f: F) -> Self
    where
        F: Fn(u64, &mut dyn RandomSource) -> Result<Vector, GeneratorError> + 'static,
    {
        self.set_velocity_emitter(f);
        self
    }

    pub fn with_acceleration_emitter<F>(mut self, f: F) -> Self
    where
        F: Fn(u64, &mut dyn RandomSource) -> Result<Vector, GeneratorError> + 'static,
    {
        self.set_acceleration_emitter(f);
        self
    }

    pub fn with_color_emitter<F>(mut self, f: F) -> Self
    where
        F: Fn(u64, &mut dyn RandomSource) -> Result<Color, GeneratorError> + 'static,
    {
        self.set_color_emitter(f);
        self
    }

    pub fn with_decay_rate_emitter<F>(mut self, f: F) -> Self
    where
        F: Fn(u64, &mut dyn RandomSource) -> Result<f32, GeneratorError> + 'static,
    {
        self.set_decay_rate_emitter(f);
        self
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    fn mandatory_slots(&self) -> [(Attribute, bool); 4] {
        [
            (Attribute::Velocity, self.velocity.is_some()),
            (Attribute::Acceleration, self.acceleration.is_some()),
            (Attribute::Color, self.color.is_some()),
            (Attribute::DecayRate, self.decay_rate.is_some()),
        ]
    }

    /// Mandatory slots that are still empty, in attribute order.
    /// The location slot is never reported: it falls back to the base location.
    pub fn missing(&self) -> Vec<Attribute> {
        self.mandatory_slots()
            .into_iter()
            .filter(|(_, set)| !set)
            .map(|(attribute, _)| attribute)
            .collect()
    }

    /// Fail on the first unconfigured mandatory slot.
    pub fn validate(&self) -> Result<(), EmissionError> {
        match self.mandatory_slots().into_iter().find(|(_, set)| !set) {
            Some((attribute, _)) => Err(EmissionError::UnconfiguredGenerator(attribute)),
            None => Ok(()),
        }
    }

    /// Sample every slot with `seq` and build a particle at full lifespan.
    pub fn emit_particle(
        &self,
        seq: u64,
        rng: &mut dyn RandomSource,
    ) -> Result<Particle, EmissionError> {
        self.validate()?;

        let location = match &self.location {
            Some(_) => sample(&self.location, Attribute::Location, seq, rng)?,
            None => self.base_location,
        };
        let velocity = sample(&self.velocity, Attribute::Velocity, seq, rng)?;
        let acceleration = sample(&self.acceleration, Attribute::Acceleration, seq, rng)?;
        let color = sample(&self.color, Attribute::Color, seq, rng)?;
        let decay_rate = check_decay_rate(sample(&self.decay_rate, Attribute::DecayRate, seq, rng)?)?;

        Ok(Particle::new(location, velocity, acceleration, decay_rate, color).with_style(self.style))
    }
}

impl fmt::Debug for EmissionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EmissionStrategy")
            .field("base_location", &self.base_location)
            .field("style", &self.style)
            .field("location", &self.location.is_some())
            .field("velocity", &self.velocity.is_some())
            .field("acceleration", &self.acceleration.is_some())
            .field("color", &self.color.is_some())
            .field("decay_rate", &self.decay_rate.is_some())
            .finish()
    }
}
