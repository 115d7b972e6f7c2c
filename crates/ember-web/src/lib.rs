pub mod canvas;
pub mod runner;

pub use canvas::Canvas2dSurface;
pub use runner::SimulationRunner;
pub use ember_engine;

use std::fmt::Display;

use wasm_bindgen::JsValue;

/// Convert a config or engine error into a JS `Error` so it surfaces as an exception.
pub fn to_js_error(err: impl Display) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// Generate all `#[wasm_bindgen]` exports for a simulation.
///
/// # Usage
///
/// ```ignore
/// use wasm_bindgen::prelude::*;
///
/// fn config() -> Result<ember_engine::EmitterConfig, serde_json::Error> { /* ... */ }
///
/// // Draws straight onto a <canvas>; JS calls sim_init("canvas-id") then sim_tick() per frame.
/// ember_web::export_simulation!(config(), "my-sim");
///
/// // Or record discs into a flat buffer the host reads via get_discs_ptr().
/// ember_web::export_simulation!(config(), "my-sim", buffer);
/// ```
///
/// # Arguments
///
/// - `$config`: An expression producing `Result<ember_engine::EmitterConfig, E>`
///   for any `E: Display`, evaluated in `sim_init` after logging is installed.
///   An `Err` is thrown to JS as-is.
/// - `$sim_name`: A string literal used in the initialization log message
#[macro_export]
macro_rules! export_simulation {
    (@common $surface:ty) => {
        use std::cell::RefCell;

        thread_local! {
            static RUNNER: RefCell<Option<$crate::SimulationRunner<$surface>>> = RefCell::new(None);
        }

        fn install_runner(runner: $crate::SimulationRunner<$surface>) {
            RUNNER.with(|cell| {
                *cell.borrow_mut() = Some(runner);
            });
        }

        fn with_runner<R>(
            f: impl FnOnce(&mut $crate::SimulationRunner<$surface>) -> R,
        ) -> Result<R, JsValue> {
            RUNNER.with(|cell| {
                let mut borrow = cell.borrow_mut();
                let runner = borrow
                    .as_mut()
                    .ok_or_else(|| JsValue::from_str("Simulation not initialized. Call sim_init() first."))?;
                Ok(f(runner))
            })
        }

        #[wasm_bindgen]
        pub fn sim_tick() -> Result<(), JsValue> {
            with_runner(|r| r.tick().map_err($crate::to_js_error))?
        }

        #[wasm_bindgen]
        pub fn sim_redraw() -> Result<(), JsValue> {
            with_runner(|r| r.redraw())
        }

        // ---- Data accessors ----

        #[wasm_bindgen]
        pub fn get_particle_count() -> Result<u32, JsValue> {
            with_runner(|r| r.particle_count())
        }

        #[wasm_bindgen]
        pub fn get_frame_count() -> Result<f64, JsValue> {
            with_runner(|r| r.frames() as f64)
        }
    };

    ($config:expr, $sim_name:literal) => {
        $crate::export_simulation!(@common $crate::Canvas2dSurface);

        #[wasm_bindgen]
        pub fn sim_init(canvas_id: &str) -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let config: $crate::ember_engine::EmitterConfig = $config.map_err($crate::to_js_error)?;
            let surface = $crate::Canvas2dSurface::from_canvas_id(canvas_id)?;
            let runner = $crate::SimulationRunner::from_config(&config, surface)
                .map_err($crate::to_js_error)?;
            install_runner(runner);

            log::info!("{}: initialized with {} particles", $sim_name, config.particles);
            Ok(())
        }
    };

    // Variant rendering into a flat disc buffer
    ($config:expr, $sim_name:literal, buffer) => {
        $crate::export_simulation!(@common $crate::ember_engine::DiscBuffer);

        #[wasm_bindgen]
        pub fn sim_init() -> Result<(), JsValue> {
            console_error_panic_hook::set_once();
            let _ = console_log::init_with_level(log::Level::Info);

            let config: $crate::ember_engine::EmitterConfig = $config.map_err($crate::to_js_error)?;
            let surface = $crate::ember_engine::DiscBuffer::with_capacity(config.particles);
            let runner = $crate::SimulationRunner::from_config(&config, surface)
                .map_err($crate::to_js_error)?;
            install_runner(runner);

            log::info!("{}: initialized with {} particles", $sim_name, config.particles);
            Ok(())
        }

        // ---- Disc buffer accessors ----

        #[wasm_bindgen]
        pub fn get_discs_ptr() -> Result<*const f32, JsValue> {
            with_runner(|r| r.surface().discs_ptr())
        }

        #[wasm_bindgen]
        pub fn get_disc_count() -> Result<u32, JsValue> {
            with_runner(|r| r.surface().disc_count())
        }

        #[wasm_bindgen]
        pub fn get_disc_floats() -> u32 {
            $crate::ember_engine::DiscInstance::FLOATS as u32
        }
    };
}
