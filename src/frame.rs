//! Cancellable frame-loop bookkeeping
//!
//! The browser only offers a one-shot frame callback, so a repeating loop
//! has to reschedule itself - and must stop doing so the instant the owner
//! tears down, even if teardown lands mid-frame. [`FrameGate`] is the flag
//! both sides share: the loop consults it before every step, the owning
//! handle closes it exactly once.

use std::cell::Cell;
use std::rc::Rc;

/// Shared open/closed flag between a frame loop and its owner.
///
/// Clones observe the same gate. Closing is idempotent and permanent.
#[derive(Debug, Clone)]
pub struct FrameGate {
    open: Rc<Cell<bool>>,
}

impl FrameGate {
    pub fn new() -> Self {
        Self {
            open: Rc::new(Cell::new(true)),
        }
    }

    /// True while the loop may run another frame.
    pub fn is_open(&self) -> bool {
        self.open.get()
    }

    /// Shut the gate; every clone sees the loop as stopped from here on.
    pub fn close(&self) {
        self.open.set(false);
    }
}

impl Default for FrameGate {
    fn default() -> Self {
        Self::new()
    }
}
