//! Deterministic simulation module
//!
//! All motion logic lives here. This module must be pure and deterministic:
//! - One unit timestep per tick
//! - Seeded RNG only, injected at initialization
//! - Stable iteration order (orb store order)
//! - No rendering or platform dependencies

pub mod state;
pub mod tick;

pub use state::{Orb, SimState};
pub use tick::tick;
