//! Canvas 2D surface implementation
//!
//! Wraps a `CanvasRenderingContext2d`. Draw errors are swallowed: the
//! backdrop is cosmetic and must never surface a fault to the host UI.

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use super::{GradientStop, Surface};

/// A host canvas's 2D context as a [`Surface`].
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl CanvasSurface {
    /// Acquire the 2D context from a canvas.
    ///
    /// Returns `None` when the context is unavailable (surface not ready or
    /// context creation failed) - the caller skips the backdrop entirely.
    pub fn from_canvas(canvas: &HtmlCanvasElement) -> Option<Self> {
        let ctx = canvas
            .get_context("2d")
            .ok()??
            .dyn_into::<CanvasRenderingContext2d>()
            .ok()?;
        Some(Self { ctx })
    }
}

impl Surface for CanvasSurface {
    fn begin_frame(&mut self, viewport: Vec2, opacity: f32) {
        self.ctx
            .clear_rect(0.0, 0.0, viewport.x as f64, viewport.y as f64);
        self.ctx.set_global_alpha(opacity as f64);
    }

    fn fill_radial(&mut self, center: Vec2, radius: f32, stops: &[GradientStop; 3]) {
        let (x, y, r) = (center.x as f64, center.y as f64, radius as f64);

        // Fails only on non-finite geometry; skip the blob in that case
        let Ok(gradient) = self.ctx.create_radial_gradient(x, y, 0.0, x, y, r) else {
            return;
        };
        for stop in stops {
            let _ = gradient.add_color_stop(stop.offset, &stop.color.css());
        }

        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.ctx.begin_path();
        let _ = self.ctx.arc(x, y, r, 0.0, std::f64::consts::TAU);
        self.ctx.fill();
    }
}
