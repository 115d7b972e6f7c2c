//! Stock generator functions for emission strategy slots.
//!
//! Each returns a closure of `(seq, rng)`. None of them read `seq`, so spawn
//! parameters are independent samples regardless of spawn order.

use glam::Vec2;

use crate::api::error::GeneratorError;
use crate::core::random::{uniform_real, uniform_sample, RandomSource};
use crate::core::vector::Vector;

fn check_range(min: f32, max: f32) -> Result<(), GeneratorError> {
    if !min.is_finite() || !max.is_finite() {
        Err(GeneratorError::InvalidRange(format!("non-finite bound in [{}, {})", min, max)))
    } else if min > max {
        Err(GeneratorError::InvalidRange(format!("{} > {}", min, max)))
    } else {
        Ok(())
    }
}

/// Always the same value.
pub fn constant<T: Clone + 'static>(
    value: T,
) -> impl Fn(u64, &mut dyn RandomSource) -> Result<T, GeneratorError> {
    move |_seq: u64, _rng: &mut dyn RandomSource| Ok(value.clone())
}

/// Uniform real in [min, max).
pub fn uniform_range(
    min: f32,
    max: f32,
) -> impl Fn(u64, &mut dyn RandomSource) -> Result<f32, GeneratorError> {
    move |_seq: u64, rng: &mut dyn RandomSource| {
        check_range(min, max)?;
        Ok(uniform_real(rng, min, max))
    }
}

/// Uniform point in the axis-aligned box spanned by `min` and `max`.
pub fn uniform_box(
    min: Vector,
    max: Vector,
) -> impl Fn(u64, &mut dyn RandomSource) -> Result<Vector, GeneratorError> {
    move |_seq: u64, rng: &mut dyn RandomSource| {
        check_range(min.x, max.x)?;
        check_range(min.y, max.y)?;
        let x = uniform_real(rng, min.x, max.x);
        let y = uniform_real(rng, min.y, max.y);
        Ok(Vector::new(x, y))
    }
}

/// Random direction with a magnitude in [speed_min, speed_max).
pub fn radial(
    speed_min: f32,
    speed_max: f32,
) -> impl Fn(u64, &mut dyn RandomSource) -> Result<Vector, GeneratorError> {
    move |_seq: u64, rng: &mut dyn RandomSource| {
        check_range(speed_min, speed_max)?;
        let angle = uniform_real(rng, 0.0, std::f32::consts::TAU);
        let speed = uniform_real(rng, speed_min, speed_max);
        Ok((Vec2::from_angle(angle) * speed).into())
    }
}

/// Uniform pick from a fixed candidate set. Fails on every call if the set is empty.
pub fn sample_from<T: Clone + 'static>(
    candidates: Vec<T>,
) -> impl Fn(u64, &mut dyn RandomSource) -> Result<T, GeneratorError> {
    move |_seq: u64, rng: &mut dyn RandomSource| {
        uniform_sample(rng, &candidates)
            .cloned()
            .ok_or(GeneratorError::EmptyCandidates)
    }
}
