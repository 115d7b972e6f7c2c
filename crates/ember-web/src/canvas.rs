//! Canvas2D drawing surface.

use std::f64::consts::TAU;

use ember_engine::{Color, DrawSurface, Vector};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

/// Draws particles as filled arcs on a 2D canvas context.
pub struct Canvas2dSurface {
    ctx: CanvasRenderingContext2d,
    width: f64,
    height: f64,
    /// Fill for `clear`; `None` clears to transparent.
    background: Option<String>,
}

impl Canvas2dSurface {
    pub fn new(canvas: &HtmlCanvasElement) -> Result<Self, JsValue> {
        let ctx = canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("canvas has no 2d context"))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| JsValue::from_str("2d context has an unexpected type"))?;
        Ok(Self {
            ctx,
            width: canvas.width() as f64,
            height: canvas.height() as f64,
            background: None,
        })
    }

    /// Look up a `<canvas>` element by id.
    pub fn from_canvas_id(id: &str) -> Result<Self, JsValue> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let canvas = document
            .get_element_by_id(id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{}'", id)))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("element '{}' is not a canvas", id)))?;
        Self::new(&canvas)
    }

    pub fn with_background(mut self, css: impl Into<String>) -> Self {
        self.background = Some(css.into());
        self
    }
}

impl DrawSurface for Canvas2dSurface {
    fn draw_disc(&mut self, center: Vector, radius: f32, color: Color, opacity: f32) {
        self.ctx.set_global_alpha(opacity as f64);
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.begin_path();
        if let Err(err) = self.ctx.arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU) {
            log::warn!("arc failed: {:?}", err);
            return;
        }
        self.ctx.fill();
    }

    fn clear(&mut self) {
        self.ctx.set_global_alpha(1.0);
        match &self.background {
            Some(css) => {
                self.ctx.set_fill_style_str(css);
                self.ctx.fill_rect(0.0, 0.0, self.width, self.height);
            }
            None => self.ctx.clear_rect(0.0, 0.0, self.width, self.height),
        }
    }
}
