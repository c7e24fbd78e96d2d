//! Browser lifecycle controller
//!
//! Owns the canvas sizing, the simulation state, the event subscriptions,
//! and the animation-frame loop. Everything acquired at attach is released
//! on teardown: listeners are held (never leaked via `Closure::forget`) and
//! the frame loop runs behind a [`FrameGate`], so no callback fires after
//! the backdrop is dropped - even when teardown lands mid-frame.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, HtmlCanvasElement, MouseEvent, Window};

use crate::frame::FrameGate;
use crate::render::canvas::CanvasSurface;
use crate::render::render;
use crate::settings::{BackdropSettings, Theme};
use crate::sim::{self, SimState};

/// Why the backdrop could not attach.
///
/// The layer is cosmetic: callers are expected to log and carry on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttachError {
    /// No browser window to attach to
    NoWindow,
    /// The canvas did not produce a 2D drawing context
    ContextUnavailable,
}

impl fmt::Display for AttachError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttachError::NoWindow => write!(f, "no window to attach the backdrop to"),
            AttachError::ContextUnavailable => write!(f, "canvas 2d context unavailable"),
        }
    }
}

impl std::error::Error for AttachError {}

/// State shared between the frame loop and the event handlers.
struct Shared {
    sim: SimState,
    surface: CanvasSurface,
    settings: BackdropSettings,
    canvas: HtmlCanvasElement,
    raf_id: Option<i32>,
    frames: u64,
}

impl Shared {
    /// One tick plus one painted frame.
    fn step(&mut self, theme: Theme) {
        sim::tick(&mut self.sim);
        render(&self.sim, self.settings.opacity_for(theme), &mut self.surface);
        self.frames += 1;
    }

    /// Size the canvas to the window and update the wrap bounds. Orbs are
    /// left alone, so a resize never causes a visual discontinuity.
    fn fit_to_window(&mut self, window: &Window) {
        let (w, h) = window_size(window);
        self.canvas.set_width(w as u32);
        self.canvas.set_height(h as u32);
        self.sim.resize(w, h);
    }
}

/// An attached DOM listener, removed on drop of the owning [`Backdrop`].
struct Listener {
    target: EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(target: &EventTarget, kind: &'static str, closure: Closure<dyn FnMut(Event)>) -> Self {
        let _ = target.add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref());
        Self {
            target: target.clone(),
            kind,
            closure,
        }
    }

    fn detach(&self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

type FrameClosure = Closure<dyn FnMut(f64)>;

/// Handle to a running backdrop. Dropping it tears everything down.
pub struct Backdrop {
    shared: Rc<RefCell<Shared>>,
    gate: FrameGate,
    listeners: Vec<Listener>,
    frame: Rc<RefCell<Option<FrameClosure>>>,
}

impl Backdrop {
    /// Attach the backdrop to a canvas and start the frame loop.
    ///
    /// The canvas is made click-through so pointer events reach the UI
    /// layered above it. When the environment prefers reduced motion (and
    /// the settings respect that), a single static frame is painted and no
    /// loop is started.
    pub fn attach(
        canvas: HtmlCanvasElement,
        settings: BackdropSettings,
        seed: u64,
    ) -> Result<Self, AttachError> {
        let window = web_sys::window().ok_or(AttachError::NoWindow)?;
        let surface = CanvasSurface::from_canvas(&canvas).ok_or(AttachError::ContextUnavailable)?;

        let _ = canvas.style().set_property("pointer-events", "none");

        let (w, h) = window_size(&window);
        canvas.set_width(w as u32);
        canvas.set_height(h as u32);

        let mut rng = Pcg32::seed_from_u64(seed);
        let sim = SimState::new(settings.orb_count, Vec2::new(w, h), &mut rng);
        let static_frame = settings.respect_reduced_motion && prefers_reduced_motion(&window);

        let shared = Rc::new(RefCell::new(Shared {
            sim,
            surface,
            settings,
            canvas,
            raf_id: None,
            frames: 0,
        }));
        let gate = FrameGate::new();
        let frame: Rc<RefCell<Option<FrameClosure>>> = Rc::new(RefCell::new(None));

        if static_frame {
            shared.borrow_mut().step(current_theme());
            gate.close();
            log::info!("Backdrop static (reduced motion)");
            return Ok(Self {
                shared,
                gate,
                listeners: Vec::new(),
                frame,
            });
        }

        let mut listeners = Vec::with_capacity(2);

        // Resize: adjust surface and wrap bounds only, never the orbs
        {
            let shared = shared.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: Event| {
                if let Some(window) = web_sys::window() {
                    shared.borrow_mut().fit_to_window(&window);
                }
            });
            listeners.push(Listener::attach(&window, "resize", closure));
        }

        // Pointer: last write wins, consumed by the next tick
        {
            let shared = shared.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: Event| {
                let event: MouseEvent = event.unchecked_into();
                shared
                    .borrow_mut()
                    .sim
                    .set_pointer(event.client_x() as f32, event.client_y() as f32);
            });
            listeners.push(Listener::attach(&window, "mousemove", closure));
        }

        // Self-rescheduling frame loop, gated so teardown stops it cold
        {
            let gate = gate.clone();
            let shared = shared.clone();
            let frame_cell = frame.clone();
            *frame.borrow_mut() = Some(Closure::new(move |_time: f64| {
                if !gate.is_open() {
                    return;
                }
                let theme = current_theme();
                shared.borrow_mut().step(theme);

                if let Some(window) = web_sys::window() {
                    if let Some(cb) = frame_cell.borrow().as_ref() {
                        let id = window
                            .request_animation_frame(cb.as_ref().unchecked_ref())
                            .ok();
                        shared.borrow_mut().raf_id = id;
                    }
                }
            }));
        }

        if let Some(cb) = frame.borrow().as_ref() {
            let id = window
                .request_animation_frame(cb.as_ref().unchecked_ref())
                .ok();
            shared.borrow_mut().raf_id = id;
        }

        log::info!(
            "Backdrop running: {} orbs, seed {}",
            shared.borrow().sim.orbs.len(),
            seed
        );

        Ok(Self {
            shared,
            gate,
            listeners,
            frame,
        })
    }

    /// Frames painted so far.
    pub fn frames(&self) -> u64 {
        self.shared.borrow().frames
    }

    /// Stop the loop and release every subscription.
    ///
    /// Dropping the handle does the same; this just makes it explicit.
    pub fn teardown(self) {}

    fn shutdown(&mut self) {
        self.gate.close();

        if let Some(id) = self.shared.borrow_mut().raf_id.take() {
            if let Some(window) = web_sys::window() {
                let _ = window.cancel_animation_frame(id);
            }
        }

        for listener in self.listeners.drain(..) {
            listener.detach();
        }

        // Break the frame closure's self-reference so it can be freed
        self.frame.borrow_mut().take();

        log::info!("Backdrop torn down after {} frames", self.frames());
    }
}

impl Drop for Backdrop {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Theme from the host document's `data-theme` attribute.
fn current_theme() -> Theme {
    let attr = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.document_element())
        .and_then(|el| el.get_attribute("data-theme"));
    Theme::from_attr(attr.as_deref())
}

fn prefers_reduced_motion(window: &Window) -> bool {
    window
        .match_media("(prefers-reduced-motion: reduce)")
        .ok()
        .flatten()
        .is_some_and(|mq| mq.matches())
}

fn window_size(window: &Window) -> (f32, f32) {
    let w = window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    let h = window
        .inner_height()
        .ok()
        .and_then(|v| v.as_f64())
        .unwrap_or(0.0);
    (w as f32, h as f32)
}
