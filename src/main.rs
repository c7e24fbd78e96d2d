//! Orb Drift entry point
//!
//! Wires the backdrop to the host page on wasm; runs a headless drift
//! check on native so the binary is still useful off-web.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_backdrop {
    use std::cell::RefCell;
    use wasm_bindgen::JsCast;
    use web_sys::HtmlCanvasElement;

    use orb_drift::BackdropSettings;
    use orb_drift::backdrop::Backdrop;

    thread_local! {
        // Page-lifetime handle; dropping it would tear the backdrop down
        static ACTIVE: RefCell<Option<Backdrop>> = const { RefCell::new(None) };
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Orb Drift starting...");

        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };

        let Some(element) = document.get_element_by_id("backdrop") else {
            log::warn!("No #backdrop element; backdrop disabled");
            return;
        };
        let Ok(canvas) = element.dyn_into::<HtmlCanvasElement>() else {
            log::warn!("#backdrop is not a canvas; backdrop disabled");
            return;
        };

        let settings = canvas
            .get_attribute("data-settings")
            .map(|json| BackdropSettings::from_json(&json))
            .unwrap_or_default();

        let seed = js_sys::Date::now() as u64;
        match Backdrop::attach(canvas, settings, seed) {
            Ok(backdrop) => ACTIVE.with(|slot| *slot.borrow_mut() = Some(backdrop)),
            // Cosmetic layer: never block the host UI over a missing context
            Err(e) => log::warn!("Backdrop disabled: {e}"),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_backdrop::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Orb Drift (native) starting...");

    println!("\nRunning headless drift check...");
    headless_drift_check();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn headless_drift_check() {
    use glam::Vec2;
    use orb_drift::consts::ORB_COUNT;
    use orb_drift::sim::{self, SimState};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    let mut rng = Pcg32::seed_from_u64(42);
    let mut state = SimState::new(ORB_COUNT, Vec2::new(800.0, 600.0), &mut rng);
    state.set_pointer(400.0, 300.0);

    for _ in 0..600 {
        sim::tick(&mut state);
    }

    for (i, orb) in state.orbs.iter().enumerate() {
        assert!(orb.pos.x >= -orb.radius && orb.pos.x <= 800.0 + orb.radius);
        assert!(orb.pos.y >= -orb.radius && orb.pos.y <= 600.0 + orb.radius);
        log::info!(
            "orb {i}: pos=({:.1}, {:.1}) vel=({:.3}, {:.3})",
            orb.pos.x,
            orb.pos.y,
            orb.vel.x,
            orb.vel.y
        );
    }
    println!("✓ 600 ticks, all orbs inside wrap bounds");
}
