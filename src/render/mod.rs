//! Rendering: gradient math and the drawing-surface seam
//!
//! The host hands us a 2D drawing surface; everything we need from it is
//! clear-and-set-opacity plus radial-gradient circle fills, so that contract
//! is a trait. Gradient derivation stays testable off-browser; the wasm
//! canvas implementation lives in [`canvas`].

#[cfg(target_arch = "wasm32")]
pub mod canvas;

use glam::Vec2;

use crate::consts::BLOB_ALPHA;
use crate::sim::SimState;

/// HSLA color in CSS terms (hue degrees, percent saturation/lightness).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsla {
    pub h: f32,
    pub s: f32,
    pub l: f32,
    pub a: f32,
}

impl Hsla {
    /// CSS color string as canvas gradient stops expect it.
    pub fn css(&self) -> String {
        format!("hsla({}, {}%, {}%, {})", self.h, self.s, self.l, self.a)
    }
}

/// One radial gradient stop; offset 0 is the orb center, 1 the rim.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: Hsla,
}

/// The drawing surface the host provides.
pub trait Surface {
    /// Clear the surface and apply the theme-derived whole-frame opacity.
    fn begin_frame(&mut self, viewport: Vec2, opacity: f32);

    /// Fill a circle of `radius` at `center` with a radial gradient.
    fn fill_radial(&mut self, center: Vec2, radius: f32, stops: &[GradientStop; 3]);
}

/// Gradient for one orb: translucent core, half-faded middle, clear rim.
pub fn orb_gradient(hue: f32) -> [GradientStop; 3] {
    [
        GradientStop {
            offset: 0.0,
            color: Hsla {
                h: hue,
                s: 70.0,
                l: 60.0,
                a: BLOB_ALPHA,
            },
        },
        GradientStop {
            offset: 0.5,
            color: Hsla {
                h: hue,
                s: 70.0,
                l: 50.0,
                a: BLOB_ALPHA * 0.5,
            },
        },
        GradientStop {
            offset: 1.0,
            color: Hsla {
                h: hue,
                s: 70.0,
                l: 40.0,
                a: 0.0,
            },
        },
    ]
}

/// Paint one frame: clear, then every orb in store order.
///
/// Blending is associative under alpha compositing, so store order doubles
/// as draw order and no z-sorting happens.
pub fn render<S: Surface>(state: &SimState, opacity: f32, surface: &mut S) {
    surface.begin_frame(state.viewport, opacity);
    for orb in &state.orbs {
        surface.fill_radial(orb.pos, orb.radius, &orb_gradient(orb.hue));
    }
}
