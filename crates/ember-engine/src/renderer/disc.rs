use bytemuck::{Pod, Zeroable};

use super::surface::DrawSurface;
use crate::components::color::Color;
use crate::core::vector::Vector;

/// Per-disc render data for hosts that read wasm memory directly.
/// Must match the host protocol: 5 floats = 20 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct DiscInstance {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    /// Palette index of the particle color.
    pub color: f32,
    /// Opacity (0.0 = invisible, 1.0 = opaque).
    pub alpha: f32,
}

impl DiscInstance {
    pub const FLOATS: usize = 5;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    /// Color recovered from the palette slot.
    pub fn color(&self) -> Option<Color> {
        Color::ALL.get(self.color as usize).copied()
    }
}

/// A surface that records every disc into a flat instance list.
pub struct DiscBuffer {
    pub discs: Vec<DiscInstance>,
}

impl DiscBuffer {
    pub fn new() -> Self {
        Self::with_capacity(512)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            discs: Vec::with_capacity(capacity),
        }
    }

    pub fn disc_count(&self) -> u32 {
        self.discs.len() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.discs.is_empty()
    }

    /// Flat view: `FLOATS` consecutive values per disc.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(self.discs.as_slice())
    }

    /// Raw pointer to disc data for SharedArrayBuffer reads.
    pub fn discs_ptr(&self) -> *const f32 {
        self.as_floats().as_ptr()
    }
}

impl Default for DiscBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl DrawSurface for DiscBuffer {
    fn draw_disc(&mut self, center: Vector, radius: f32, color: Color, opacity: f32) {
        self.discs.push(DiscInstance {
            x: center.x,
            y: center.y,
            radius,
            color: color.index() as f32,
            alpha: opacity,
        });
    }

    fn clear(&mut self) {
        self.discs.clear();
    }
}
