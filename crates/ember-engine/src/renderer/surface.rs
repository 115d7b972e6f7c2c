//! Drawing-surface contract.
//!
//! The engine never touches a canvas directly. Hosts hand a `DrawSurface`
//! to `ParticleEngine::render`, which only ever asks for filled discs.
//! Implementations exist for Canvas2D (`ember-web`) and for a flat
//! instance buffer ([`DiscBuffer`](super::disc::DiscBuffer)).

use crate::components::color::Color;
use crate::core::vector::Vector;

/// Capability consumed by particle rendering.
pub trait DrawSurface {
    /// Draw a filled disc of `radius` at `center`, tinted `color`, with `opacity` in [0, 1].
    fn draw_disc(&mut self, center: Vector, radius: f32, color: Color, opacity: f32);

    /// Clear the frame before drawing. Called by drivers, never by the engine.
    fn clear(&mut self) {}
}
