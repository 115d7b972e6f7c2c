//! A single simulated particle: kinematic state plus a finite lifespan.

use super::color::Color;
use crate::core::vector::Vector;
use crate::renderer::surface::DrawSurface;

/// How a live particle is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderStyle {
    /// Opacity follows the remaining fraction of life.
    #[default]
    Fade,
    /// Always fully opaque.
    Solid,
}

/// A point particle aged once per tick until its lifespan drops below zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub location: Vector,
    pub velocity: Vector,
    pub acceleration: Vector,
    pub decay_rate: f32,
    pub lifespan: f32,
    pub color: Color,
    pub style: RenderStyle,
}

impl Particle {
    /// Lifespan every particle starts with.
    pub const STARTING_AGE: f32 = 256.0;
    /// Decay rate used when a strategy doesn't sample one.
    pub const DEFAULT_DECAY_RATE: f32 = 2.0;
    pub const RADIUS: f32 = 3.0;

    pub fn new(
        location: Vector,
        velocity: Vector,
        acceleration: Vector,
        decay_rate: f32,
        color: Color,
    ) -> Self {
        Particle {
            location,
            velocity,
            acceleration,
            decay_rate,
            lifespan: Self::STARTING_AGE,
            color,
            style: RenderStyle::default(),
        }
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    /// Dead once the lifespan has crossed below zero. A lifespan of exactly
    /// zero is still alive for one more tick.
    #[inline]
    pub fn is_dead(&self) -> bool {
        self.lifespan < 0.0
    }

    /// Advance one tick: explicit Euler step, then decay. Dead particles are frozen.
    pub fn update(&mut self) {
        if self.is_dead() {
            return;
        }
        self.velocity = self.velocity.add(self.acceleration);
        self.location = self.location.add(self.velocity);
        self.lifespan -= self.decay_rate;
    }

    /// Opacity the particle renders with.
    pub fn opacity(&self) -> f32 {
        match self.style {
            RenderStyle::Fade => (self.lifespan / Self::STARTING_AGE).clamp(0.0, 1.0),
            RenderStyle::Solid => 1.0,
        }
    }

    /// Issue a single disc draw call. Nothing is drawn for a dead particle.
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        if self.is_dead() {
            return;
        }
        surface.draw_disc(self.location, Self::RADIUS, self.color, self.opacity());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::disc::DiscBuffer;

    fn particle(velocity: Vector, acceleration: Vector, decay_rate: f32) -> Particle {
        Particle::new(Vector::ZERO, velocity, acceleration, decay_rate, Color::Red)
    }

    #[test]
    fn update_integrates_velocity_then_location() {
        let mut p = particle(Vector::new(1.0, 0.0), Vector::new(0.0, 1.0), 1.0);
        p.update();
        assert_eq!(p.velocity, Vector::new(1.0, 1.0));
        assert_eq!(p.location, Vector::new(1.0, 1.0));
        assert_eq!(p.lifespan, Particle::STARTING_AGE - 1.0);
    }

    #[test]
    fn n_updates_accumulate_linearly() {
        let v0 = Vector::new(0.5, -1.0);
        let a = Vector::new(0.25, 0.5);
        let mut p = particle(v0, a, 2.0);
        let n = 40;
        for _ in 0..n {
            p.update();
        }
        assert_eq!(p.velocity, Vector::new(0.5 + 0.25 * n as f32, -1.0 + 0.5 * n as f32));
        assert_eq!(p.lifespan, Particle::STARTING_AGE - 2.0 * n as f32);
    }

    #[test]
    fn dies_after_129th_update_at_decay_two() {
        let mut p = particle(Vector::ZERO, Vector::ZERO, 2.0);
        for _ in 0..128 {
            p.update();
        }
        assert_eq!(p.lifespan, 0.0);
        assert!(!p.is_dead(), "lifespan 0 is still alive");
        p.update();
        assert!(p.is_dead());
    }

    #[test]
    fn dead_particle_is_frozen() {
        let mut p = particle(Vector::new(1.0, 1.0), Vector::new(1.0, 0.0), 100.0);
        for _ in 0..3 {
            p.update();
        }
        assert!(p.is_dead());
        let snapshot = p.clone();
        for _ in 0..10 {
            p.update();
        }
        assert_eq!(p, snapshot);
    }

    #[test]
    fn render_fades_with_remaining_life() {
        let mut p = particle(Vector::ZERO, Vector::ZERO, 64.0);
        p.update();
        let mut buf = DiscBuffer::new();
        p.render(&mut buf);
        assert_eq!(buf.disc_count(), 1);
        let disc = buf.discs[0];
        assert_eq!(disc.radius, Particle::RADIUS);
        assert_eq!(disc.alpha, 0.75);
    }

    #[test]
    fn solid_style_ignores_age() {
        let mut p = particle(Vector::ZERO, Vector::ZERO, 64.0).with_style(RenderStyle::Solid);
        p.update();
        assert_eq!(p.opacity(), 1.0);
    }

    #[test]
    fn dead_particle_draws_nothing() {
        let mut p = particle(Vector::ZERO, Vector::ZERO, 300.0);
        p.update();
        assert!(p.is_dead());
        let mut buf = DiscBuffer::new();
        p.render(&mut buf);
        p.render(&mut buf);
        assert!(buf.is_empty());
    }
}
