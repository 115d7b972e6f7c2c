use ember_engine::{DrawSurface, EmissionError, EmitterConfig, ParticleEngine};

/// Frame driver: one `tick` per animation frame runs update, clear, render.
///
/// Each concrete simulation (e.g., `sparks`) keeps a `thread_local!`
/// SimulationRunner and exports free functions via `#[wasm_bindgen]`,
/// because wasm-bindgen cannot export generic structs directly.
pub struct SimulationRunner<S: DrawSurface> {
    engine: ParticleEngine,
    surface: S,
    frames: u64,
    /// First emission failure. Once set, the runner refuses to tick.
    halted: Option<EmissionError>,
}

impl<S: DrawSurface> SimulationRunner<S> {
    pub fn new(engine: ParticleEngine, surface: S) -> Self {
        Self {
            engine,
            surface,
            frames: 0,
            halted: None,
        }
    }

    /// Build the engine described by `config` and attach it to `surface`.
    pub fn from_config(config: &EmitterConfig, surface: S) -> Result<Self, EmissionError> {
        let engine = config.build_engine()?;
        Ok(Self::new(engine, surface))
    }

    /// Run one frame: advance the simulation, then redraw it.
    ///
    /// An emission failure is fatal: it is logged, returned, and returned
    /// again for every later tick without touching the engine.
    pub fn tick(&mut self) -> Result<(), EmissionError> {
        if let Some(err) = &self.halted {
            return Err(err.clone());
        }

        if let Err(err) = self.engine.update() {
            log::error!("simulation halted after {} frames: {}", self.frames, err);
            self.halted = Some(err.clone());
            return Err(err);
        }

        self.redraw();
        self.frames += 1;
        Ok(())
    }

    /// Clear and draw the current state without advancing it.
    pub fn redraw(&mut self) {
        self.surface.clear();
        self.engine.render(&mut self.surface);
    }

    pub fn engine(&self) -> &ParticleEngine {
        &self.engine
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn particle_count(&self) -> u32 {
        self.engine.len() as u32
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn is_halted(&self) -> bool {
        self.halted.is_some()
    }
}
