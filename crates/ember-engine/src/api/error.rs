use std::fmt;

use thiserror::Error;

/// A per-particle attribute produced by one generator slot of an emission strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attribute {
    Location,
    Velocity,
    Acceleration,
    Color,
    DecayRate,
}

impl Attribute {
    pub fn name(self) -> &'static str {
        match self {
            Self::Location => "location",
            Self::Velocity => "velocity",
            Self::Acceleration => "acceleration",
            Self::Color => "color",
            Self::DecayRate => "decay rate",
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Failure inside a single generator call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneratorError {
    /// Nothing to sample from.
    #[error("no candidates to sample from")]
    EmptyCandidates,

    /// Range bounds the generator cannot sample.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// A sampled value the particle cannot accept.
    #[error("invalid value: {0}")]
    InvalidValue(String),
}

/// Failures raised while spawning particles. All of them are fatal to the
/// tick (or construction) that triggered the spawn.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmissionError {
    /// A mandatory generator slot was never set.
    #[error("no {0} generator configured")]
    UnconfiguredGenerator(Attribute),

    /// A configured generator failed.
    #[error("{attribute} generator failed: {source}")]
    Generator {
        attribute: Attribute,
        #[source]
        source: GeneratorError,
    },
}

impl EmissionError {
    /// Attribute whose slot produced this error.
    pub fn attribute(&self) -> Attribute {
        match self {
            Self::UnconfiguredGenerator(attribute) => *attribute,
            Self::Generator { attribute, .. } => *attribute,
        }
    }
}
