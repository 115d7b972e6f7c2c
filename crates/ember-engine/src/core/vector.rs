use std::ops::Add;

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Immutable 2D point or displacement.
///
/// Every operation returns a new value; nothing mutates in place.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector {
    pub x: f32,
    pub y: f32,
}

impl Vector {
    /// The additive identity (0, 0).
    pub const ZERO: Vector = Vector { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Vector { x, y }
    }

    /// The additive identity, same as [`Vector::ZERO`].
    pub const fn empty() -> Self {
        Self::ZERO
    }

    /// Component-wise sum.
    #[inline]
    pub fn add(self, other: Vector) -> Vector {
        Vector::new(self.x + other.x, self.y + other.y)
    }

    pub fn to_vec2(self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

impl Add for Vector {
    type Output = Vector;

    fn add(self, other: Vector) -> Vector {
        Vector::add(self, other)
    }
}

impl From<Vec2> for Vector {
    fn from(v: Vec2) -> Self {
        Vector::new(v.x, v.y)
    }
}

impl From<Vector> for Vec2 {
    fn from(v: Vector) -> Self {
        v.to_vec2()
    }
}

impl From<[f32; 2]> for Vector {
    fn from(v: [f32; 2]) -> Self {
        Vector::new(v[0], v[1])
    }
}
