//! Simulation state: the orb store, pointer tracker, and viewport size.
//!
//! The whole simulation is one plain struct owned by the lifecycle
//! controller and passed by `&mut` into [`tick`](super::tick::tick) and the
//! renderer. Orbs are created once and only ever mutated in place.

use glam::Vec2;
use rand::Rng;

use crate::consts::*;

/// A single drifting gradient blob.
///
/// `radius` and `hue` are fixed at creation; position and velocity are
/// updated every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orb {
    /// Position in surface-pixel space; may transiently leave the viewport
    pub pos: Vec2,
    /// Velocity in pixels per tick
    pub vel: Vec2,
    /// Visual size and wrap margin, in [100, 300)
    pub radius: f32,
    /// Color hue in [300, 360) - pink to purple
    pub hue: f32,
}

impl Orb {
    /// Sample a fresh orb somewhere inside the viewport.
    ///
    /// A degenerate viewport (zero or negative dimension) parks the orb at
    /// the origin instead of sampling an invalid range.
    pub fn random(viewport: Vec2, rng: &mut impl Rng) -> Self {
        let pos = if viewport.x > 0.0 && viewport.y > 0.0 {
            Vec2::new(
                rng.random_range(0.0..viewport.x),
                rng.random_range(0.0..viewport.y),
            )
        } else {
            Vec2::ZERO
        };

        Self {
            pos,
            vel: Vec2::new(
                rng.random_range(-DRIFT_SPEED..DRIFT_SPEED),
                rng.random_range(-DRIFT_SPEED..DRIFT_SPEED),
            ),
            radius: rng.random_range(MIN_RADIUS..MAX_RADIUS),
            hue: rng.random_range(HUE_MIN..HUE_MAX),
        }
    }
}

/// Complete simulation state.
#[derive(Debug, Clone)]
pub struct SimState {
    /// Orb store; count is fixed at initialization
    pub orbs: Vec<Orb>,
    /// Last observed pointer position (origin before the first event)
    pub pointer: Vec2,
    /// Drawing-surface dimensions used as wrap bounds
    pub viewport: Vec2,
}

impl SimState {
    /// Initialize `count` orbs uniformly within the viewport.
    pub fn new(count: usize, viewport: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            orbs: (0..count).map(|_| Orb::random(viewport, rng)).collect(),
            pointer: Vec2::ZERO,
            viewport,
        }
    }

    /// Record a pointer position. Last write wins; no history is kept.
    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer = Vec2::new(x, y);
    }

    /// Update wrap bounds after a viewport resize.
    ///
    /// Orbs keep their position, velocity, radius, and hue; only the bounds
    /// the next tick wraps against change.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
    }
}
