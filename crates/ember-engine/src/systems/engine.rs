//! Particle engine: owns the live population and advances it once per tick.

use std::rc::Rc;

use crate::api::error::EmissionError;
use crate::components::particle::Particle;
use crate::core::random::{RandomSource, Rng};
use crate::renderer::surface::DrawSurface;
use crate::systems::emission::EmissionStrategy;

/// How the population is maintained across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulationMode {
    /// Refill to `target` every tick after culling.
    Replenish { target: usize },
    /// Spawn `count` once at construction; the population only shrinks.
    OneShot { count: usize },
}

impl PopulationMode {
    /// Size of the initial fill.
    pub fn initial(self) -> usize {
        match self {
            Self::Replenish { target } => target,
            Self::OneShot { count } => count,
        }
    }
}

/// Live particle collection plus the strategy that refills it.
///
/// Single-threaded: the strategy is shared through `Rc`, so the engine is
/// neither `Send` nor `Sync`.
pub struct ParticleEngine<R: RandomSource = Rng> {
    strategy: Rc<EmissionStrategy>,
    mode: PopulationMode,
    particles: Vec<Particle>,
    rng: R,
    /// Sequence number handed to the next emitted particle.
    next_seq: u64,
    ticks: u64,
}

impl<R: RandomSource> ParticleEngine<R> {
    /// Build an engine and perform the initial fill.
    pub fn new(
        mode: PopulationMode,
        strategy: impl Into<Rc<EmissionStrategy>>,
        rng: R,
    ) -> Result<Self, EmissionError> {
        let mut engine = ParticleEngine {
            strategy: strategy.into(),
            mode,
            particles: Vec::with_capacity(mode.initial()),
            rng,
            next_seq: 0,
            ticks: 0,
        };
        let initial = engine.spawn(mode.initial())?;
        engine.particles = initial;
        log::debug!("particle engine: {:?}, {} particles spawned", mode, engine.particles.len());
        Ok(engine)
    }

    /// Engine that keeps `target` particles alive.
    pub fn replenishing(
        target: usize,
        strategy: impl Into<Rc<EmissionStrategy>>,
        rng: R,
    ) -> Result<Self, EmissionError> {
        Self::new(PopulationMode::Replenish { target }, strategy, rng)
    }

    /// Engine that spawns `count` particles once and lets them die out.
    pub fn one_shot(
        count: usize,
        strategy: impl Into<Rc<EmissionStrategy>>,
        rng: R,
    ) -> Result<Self, EmissionError> {
        Self::new(PopulationMode::OneShot { count }, strategy, rng)
    }

    fn spawn(&mut self, count: usize) -> Result<Vec<Particle>, EmissionError> {
        let mut fresh = Vec::with_capacity(count);
        for _ in 0..count {
            let particle = self.strategy.emit_particle(self.next_seq, &mut self.rng)?;
            self.next_seq += 1;
            fresh.push(particle);
        }
        Ok(fresh)
    }

    /// Advance one tick: cull the dead, replenish, then age every particle once.
    ///
    /// An emission failure aborts the tick. Culling has already happened at
    /// that point, but no particle is spawned or aged.
    pub fn update(&mut self) -> Result<(), EmissionError> {
        let before = self.particles.len();
        self.particles.retain(|p| !p.is_dead());
        let culled = before - self.particles.len();

        let mut spawned = 0;
        if let PopulationMode::Replenish { target } = self.mode {
            let deficit = target.saturating_sub(self.particles.len());
            if deficit > 0 {
                let fresh = self.spawn(deficit)?;
                spawned = fresh.len();
                self.particles.extend(fresh);
            }
        }

        for p in &mut self.particles {
            p.update();
        }
        self.ticks += 1;

        log::trace!(
            "tick {}: culled {}, spawned {}, live {}",
            self.ticks,
            culled,
            spawned,
            self.particles.len()
        );
        Ok(())
    }

    /// Draw every particle. Dead particles awaiting culling draw nothing.
    pub fn render<S: DrawSurface + ?Sized>(&self, surface: &mut S) {
        for p in &self.particles {
            p.render(surface);
        }
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Particles still alive (the collection may hold dead ones until the next tick).
    pub fn live_count(&self) -> usize {
        self.particles.iter().filter(|p| !p.is_dead()).count()
    }

    pub fn mode(&self) -> PopulationMode {
        self.mode
    }

    pub fn strategy(&self) -> &EmissionStrategy {
        &self.strategy
    }

    /// Number of completed `update` calls.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Total particles emitted so far, including the initial fill.
    pub fn spawned(&self) -> u64 {
        self.next_seq
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::api::error::{Attribute, GeneratorError};
    use crate::components::color::Color;
    use crate::core::vector::Vector;
    use crate::renderer::disc::DiscBuffer;
    use crate::systems::emission::generators::{constant, radial, sample_from, uniform_range};

    fn fixed(acceleration: Vector, decay_rate: f32) -> EmissionStrategy {
        EmissionStrategy::new(Vector::ZERO)
            .with_location_emitter(constant(Vector::ZERO))
            .with_velocity_emitter(constant(Vector::ZERO))
            .with_acceleration_emitter(constant(acceleration))
            .with_color_emitter(constant(Color::Red))
            .with_decay_rate_emitter(constant(decay_rate))
    }

    fn sampled() -> EmissionStrategy {
        EmissionStrategy::new(Vector::new(400.0, 300.0))
            .with_velocity_emitter(radial(0.5, 3.0))
            .with_acceleration_emitter(constant(Vector::new(0.0, 0.05)))
            .with_color_emitter(sample_from(Color::ALL.to_vec()))
            .with_decay_rate_emitter(uniform_range(1.0, 8.0))
    }

    /// Replays a fixed cycle of unit samples and counts every draw.
    struct Scripted {
        values: Vec<f32>,
        draws: Rc<Cell<usize>>,
    }

    impl Scripted {
        fn new(values: Vec<f32>) -> (Self, Rc<Cell<usize>>) {
            let draws = Rc::new(Cell::new(0));
            (Self { values, draws: Rc::clone(&draws) }, draws)
        }

        fn next_value(&mut self) -> f32 {
            let n = self.draws.get();
            self.draws.set(n + 1);
            self.values[n % self.values.len()]
        }
    }

    impl RandomSource for Scripted {
        fn next_u64(&mut self) -> u64 {
            (self.next_value() as f64 * u64::MAX as f64) as u64
        }

        fn next_f32(&mut self) -> f32 {
            self.next_value()
        }

        fn next_index(&mut self, len: usize) -> usize {
            (self.next_value() * len as f32) as usize
        }
    }

    #[test]
    fn scripted_source_drives_spawns() {
        // Per particle: radial angle, radial speed, palette index, decay rate.
        let (rng, draws) = Scripted::new(vec![0.0, 0.5, 0.25, 0.5]);
        let mut engine = ParticleEngine::replenishing(2, sampled(), rng).unwrap();
        assert_eq!(draws.get(), 8);
        for p in engine.particles() {
            assert_eq!(p.location, Vector::new(400.0, 300.0));
            assert_eq!(p.velocity, Vector::new(1.75, 0.0));
            assert_eq!(p.acceleration, Vector::new(0.0, 0.05));
            assert_eq!(p.color, Color::ALL[3]);
            assert_eq!(p.decay_rate, 4.5);
        }

        // Aging, culling and drawing never touch the random source.
        let mut buf = DiscBuffer::new();
        for _ in 0..57 {
            engine.update().unwrap();
            engine.render(&mut buf);
        }
        assert_eq!(draws.get(), 8);
        assert_eq!(engine.live_count(), 0, "256 - 57 * 4.5 < 0");

        engine.update().unwrap();
        assert_eq!(draws.get(), 16);
        assert_eq!(engine.spawned(), 4);
        assert!(engine.particles().iter().all(|p| p.lifespan == 251.5));
    }

    #[test]
    fn replenishing_end_to_end() {
        let mut engine =
            ParticleEngine::replenishing(3, fixed(Vector::new(1.0, 0.0), 1.0), Rng::new(42)).unwrap();
        assert_eq!(engine.len(), 3);

        engine.update().unwrap();
        for p in engine.particles() {
            assert_eq!(p.velocity, Vector::new(1.0, 0.0));
            assert_eq!(p.location, Vector::new(1.0, 0.0));
            assert_eq!(p.lifespan, 255.0);
        }

        for _ in 1..256 {
            engine.update().unwrap();
        }
        assert!(engine.particles().iter().all(|p| p.lifespan == 0.0 && !p.is_dead()));

        engine.update().unwrap();
        assert_eq!(engine.len(), 3);
        assert!(engine.particles().iter().all(|p| p.is_dead()));
        assert_eq!(engine.spawned(), 3);

        engine.update().unwrap();
        assert_eq!(engine.len(), 3);
        assert_eq!(engine.spawned(), 6);
        for p in engine.particles() {
            assert_eq!(p.lifespan, 255.0);
            assert_eq!(p.location, Vector::new(1.0, 0.0));
        }
    }

    #[test]
    fn one_shot_end_to_end() {
        let strategy = EmissionStrategy::simple(Vector::new(50.0, 50.0))
            .with_acceleration_emitter(constant(Vector::ZERO));
        let mut engine = ParticleEngine::one_shot(1, strategy, Rng::new(7)).unwrap();

        for k in 1..=129u32 {
            engine.update().unwrap();
            let p = &engine.particles()[0];
            assert_eq!(p.lifespan, Particle::STARTING_AGE - k as f32 * Particle::DEFAULT_DECAY_RATE);
            assert_eq!(p.is_dead(), k > 128, "tick {}", k);
        }

        engine.update().unwrap();
        assert!(engine.is_empty());
        engine.update().unwrap();
        assert!(engine.is_empty());
        assert_eq!(engine.spawned(), 1);
    }

    #[test]
    fn replenishing_holds_target_every_tick() {
        let mut engine = ParticleEngine::replenishing(50, sampled(), Rng::new(1)).unwrap();
        for _ in 0..600 {
            engine.update().unwrap();
            assert_eq!(engine.len(), 50);
        }
        assert!(engine.spawned() > 50, "dead particles should have been replaced");
    }

    #[test]
    fn one_shot_population_never_grows() {
        let mut engine = ParticleEngine::one_shot(40, sampled(), Rng::new(2)).unwrap();
        let mut last = engine.len();
        assert_eq!(last, 40);
        for _ in 0..400 {
            engine.update().unwrap();
            assert!(engine.len() <= last);
            last = engine.len();
        }
        assert!(engine.is_empty());
    }

    #[test]
    fn sequence_numbers_increase_across_refills() {
        let strategy = fixed(Vector::ZERO, 200.0)
            .with_location_emitter(|seq, _rng| Ok(Vector::new(seq as f32, 0.0)));
        let mut engine = ParticleEngine::replenishing(4, strategy, Rng::new(3)).unwrap();
        let initial: Vec<f32> = engine.particles().iter().map(|p| p.location.x).collect();
        assert_eq!(initial, vec![0.0, 1.0, 2.0, 3.0]);

        // 256 -> 56 -> -144 (dead) -> culled and refilled.
        for _ in 0..3 {
            engine.update().unwrap();
        }
        let refilled: Vec<f32> = engine.particles().iter().map(|p| p.location.x).collect();
        assert_eq!(refilled, vec![4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn spawn_order_does_not_bias_samples() {
        let engine = ParticleEngine::replenishing(2000, sampled(), Rng::new(9)).unwrap();
        let (early, late) = engine.particles().split_at(1000);
        let mean = |ps: &[Particle]| ps.iter().map(|p| p.decay_rate).sum::<f32>() / ps.len() as f32;
        let diff = (mean(early) - mean(late)).abs();
        assert!(diff < 0.4, "early/late decay means differ by {}", diff);

        let reds = |ps: &[Particle]| ps.iter().filter(|p| p.color == Color::Red).count() as i64;
        assert!((reds(early) - reds(late)).abs() < 60);
    }

    #[test]
    fn unconfigured_strategy_fails_construction() {
        let strategy = EmissionStrategy::new(Vector::ZERO)
            .with_velocity_emitter(constant(Vector::ZERO))
            .with_color_emitter(constant(Color::Blue))
            .with_decay_rate_emitter(constant(1.0_f32));
        let err = ParticleEngine::replenishing(3, strategy, Rng::new(1)).err();
        assert_eq!(err, Some(EmissionError::UnconfiguredGenerator(Attribute::Acceleration)));
    }

    #[test]
    fn empty_one_shot_with_bad_strategy_still_builds() {
        let strategy = EmissionStrategy::new(Vector::ZERO);
        let engine = ParticleEngine::one_shot(0, strategy, Rng::new(1)).unwrap();
        assert!(engine.is_empty());
    }

    #[test]
    fn failed_refill_aborts_tick() {
        // Only the initial fill succeeds; every later emission fails.
        let strategy = fixed(Vector::ZERO, 300.0).with_color_emitter(|seq, _rng| {
            if seq < 2 {
                Ok(Color::Green)
            } else {
                Err(GeneratorError::EmptyCandidates)
            }
        });
        let mut engine = ParticleEngine::replenishing(2, strategy, Rng::new(1)).unwrap();
        engine.update().unwrap();
        assert!(engine.particles().iter().all(|p| p.is_dead()));

        let err = engine.update().unwrap_err();
        assert_eq!(err.attribute(), Attribute::Color);
        assert!(engine.is_empty(), "culling ran, nothing was spawned");
        assert_eq!(engine.ticks(), 1);
    }

    #[test]
    fn render_draws_only_live_particles() {
        let mut engine =
            ParticleEngine::replenishing(5, fixed(Vector::ZERO, 128.0), Rng::new(1)).unwrap();
        let mut buf = DiscBuffer::new();
        engine.render(&mut buf);
        assert_eq!(buf.disc_count(), 5);
        assert!(buf.discs.iter().all(|d| d.alpha == 1.0));

        // 256 -> 128 -> 0 -> -128: dead but not yet culled.
        for _ in 0..3 {
            engine.update().unwrap();
        }
        buf.clear();
        engine.render(&mut buf);
        assert!(buf.is_empty());
        assert_eq!(engine.live_count(), 0);
    }

    #[test]
    fn strategy_can_be_shared() {
        let strategy = Rc::new(fixed(Vector::ZERO, 1.0));
        let a = ParticleEngine::replenishing(2, Rc::clone(&strategy), Rng::new(1)).unwrap();
        let b = ParticleEngine::one_shot(3, Rc::clone(&strategy), Rng::new(2)).unwrap();
        assert_eq!(a.len() + b.len(), 5);
        assert_eq!(Rc::strong_count(&strategy), 3);
    }
}
