//! One simulation tick
//!
//! Advances every orb by a unit timestep: thresholded pointer attraction,
//! integration, damping, toroidal wrap. Orbs are mutually independent, so
//! store order is only about keeping iteration stable for the renderer.

use super::state::SimState;
use crate::consts::*;

/// Advance all orbs by one tick.
pub fn tick(state: &mut SimState) {
    let pointer = state.pointer;
    let viewport = state.viewport;

    for orb in &mut state.orbs {
        // Gentle pull toward the pointer, fading out past ATTRACT_RADIUS.
        // No repulsion and no normalization: the force scales with
        // displacement, so it weakens as the orb closes in.
        let delta = pointer - orb.pos;
        if delta.length() < ATTRACT_RADIUS {
            orb.vel += delta * ATTRACT_GAIN;
        }

        orb.pos += orb.vel;

        // Damping after movement; attraction is what re-injects energy
        orb.vel *= DAMPING;

        orb.pos.x = wrap(orb.pos.x, viewport.x, orb.radius);
        orb.pos.y = wrap(orb.pos.y, viewport.y, orb.radius);
    }
}

/// Toroidal wrap: leaving one edge by more than the orb's radius re-enters
/// just past the opposite edge.
#[inline]
fn wrap(coord: f32, extent: f32, margin: f32) -> f32 {
    if coord < -margin {
        extent + margin
    } else if coord > extent + margin {
        -margin
    } else {
        coord
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Orb;
    use glam::Vec2;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn orb_at(x: f32, y: f32) -> Orb {
        Orb {
            pos: Vec2::new(x, y),
            vel: Vec2::ZERO,
            radius: 150.0,
            hue: 320.0,
        }
    }

    fn state_with(orbs: Vec<Orb>, pointer: Vec2, viewport: Vec2) -> SimState {
        SimState {
            orbs,
            pointer,
            viewport,
        }
    }

    #[test]
    fn test_attraction_within_radius_points_at_pointer() {
        // 200px away on both axes combined: distance < 300
        let mut state = state_with(
            vec![orb_at(300.0, 300.0)],
            Vec2::new(400.0, 200.0),
            Vec2::new(800.0, 600.0),
        );
        tick(&mut state);

        let vel = state.orbs[0].vel;
        assert!(vel.x > 0.0, "pull should match displacement sign (+x)");
        assert!(vel.y < 0.0, "pull should match displacement sign (-y)");
    }

    #[test]
    fn test_no_attraction_beyond_radius() {
        let mut state = state_with(
            vec![orb_at(0.0, 0.0)],
            Vec2::new(400.0, 300.0), // distance 500
            Vec2::new(800.0, 600.0),
        );
        tick(&mut state);
        assert_eq!(state.orbs[0].vel, Vec2::ZERO);
    }

    #[test]
    fn test_tick_velocity_exact() {
        // 800x600, pointer at the center, one tick: every orb's velocity
        // becomes (v + delta * gain) * damping when within the attraction
        // radius, v * damping otherwise.
        let mut rng = Pcg32::seed_from_u64(1234);
        let viewport = Vec2::new(800.0, 600.0);
        let pointer = Vec2::new(400.0, 300.0);
        let mut state = SimState::new(5, viewport, &mut rng);
        state.pointer = pointer;

        let before = state.orbs.clone();
        tick(&mut state);

        for (orb, prev) in state.orbs.iter().zip(&before) {
            let delta = pointer - prev.pos;
            let expected = if delta.length() < ATTRACT_RADIUS {
                (prev.vel + delta * ATTRACT_GAIN) * DAMPING
            } else {
                prev.vel * DAMPING
            };
            assert_eq!(orb.vel, expected);
        }
    }

    #[test]
    fn test_damping_settles_drift() {
        // Pointer far away: |v| must shrink every tick, monotonically.
        let mut state = state_with(
            vec![Orb {
                vel: Vec2::new(0.2, -0.15),
                ..orb_at(100.0, 100.0)
            }],
            Vec2::new(10_000.0, 10_000.0),
            Vec2::new(800.0, 600.0),
        );

        let mut speed = state.orbs[0].vel.length();
        for _ in 0..200 {
            tick(&mut state);
            let next = state.orbs[0].vel.length();
            assert!(next < speed);
            speed = next;
        }
    }

    #[test]
    fn test_wrap_left_edge() {
        // x = -350, radius 100, width 800, no velocity, pointer far away
        // => x wraps to 900 (= width + radius).
        let mut state = state_with(
            vec![Orb {
                radius: 100.0,
                ..orb_at(-350.0, 100.0)
            }],
            Vec2::new(10_000.0, 10_000.0),
            Vec2::new(800.0, 600.0),
        );
        tick(&mut state);

        assert_eq!(state.orbs[0].pos.x, 900.0);
        assert_eq!(state.orbs[0].pos.y, 100.0);
    }

    #[test]
    fn test_wrap_right_edge() {
        let mut state = state_with(
            vec![Orb {
                radius: 100.0,
                ..orb_at(950.0, 100.0)
            }],
            Vec2::new(10_000.0, 10_000.0),
            Vec2::new(800.0, 600.0),
        );
        tick(&mut state);
        assert_eq!(state.orbs[0].pos.x, -100.0);
    }

    #[test]
    fn test_count_invariant_across_steps_and_resizes() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut state = SimState::new(5, Vec2::new(800.0, 600.0), &mut rng);

        for i in 0..500 {
            tick(&mut state);
            if i % 100 == 0 {
                state.resize(400.0 + i as f32, 300.0);
            }
            assert_eq!(state.orbs.len(), 5);
        }
    }

    proptest! {
        #[test]
        fn prop_wrap_invariant_after_step(
            x in -2000.0f32..2000.0,
            y in -2000.0f32..2000.0,
            vx in -50.0f32..50.0,
            vy in -50.0f32..50.0,
            radius in 100.0f32..300.0,
            px in 0.0f32..800.0,
            py in 0.0f32..600.0,
        ) {
            let viewport = Vec2::new(800.0, 600.0);
            let mut state = state_with(
                vec![Orb { pos: Vec2::new(x, y), vel: Vec2::new(vx, vy), radius, hue: 330.0 }],
                Vec2::new(px, py),
                viewport,
            );
            tick(&mut state);

            let orb = &state.orbs[0];
            prop_assert!(orb.pos.x >= -orb.radius && orb.pos.x <= viewport.x + orb.radius);
            prop_assert!(orb.pos.y >= -orb.radius && orb.pos.y <= viewport.y + orb.radius);
        }

        #[test]
        fn prop_damping_monotone_without_attraction(
            vx in -10.0f32..10.0,
            vy in -10.0f32..10.0,
        ) {
            // Pointer pinned far outside the attraction radius
            let mut state = state_with(
                vec![Orb { vel: Vec2::new(vx, vy), ..orb_at(100.0, 100.0) }],
                Vec2::new(50_000.0, 50_000.0),
                Vec2::new(800.0, 600.0),
            );
            let before = state.orbs[0].vel.length();
            tick(&mut state);
            let after = state.orbs[0].vel.length();

            if before == 0.0 {
                prop_assert_eq!(after, 0.0);
            } else {
                prop_assert!(after < before);
            }
        }
    }
}
