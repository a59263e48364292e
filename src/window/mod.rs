//! Note windows
//!
//! One [`NoteWindowController`] per open note. The controller owns the
//! window's display mode (normal or collapsed "mini" bar), its geometry and a
//! save debouncer, and edits its bound note through the shared
//! [`NoteLibrary`](crate::notes::NoteLibrary).

mod controller;
mod events;
mod state;

use std::fmt;
use std::time::Duration;

use crate::config::{Config, RestoreGesture, TopmostPolicy};
use crate::geometry::{Rect, Size};

pub use controller::NoteWindowController;
pub use events::{
    EventOutcome, MinimizeDisposition, PointerOutcome, PointerRegion, WindowEvent,
};
pub use state::{DisplayMode, Transition, WindowMode, WindowViewState};

/// Handle for an open note window, unique for the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(u64);

impl WindowId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Per-window behaviour derived from [`Config`].
#[derive(Debug, Clone, PartialEq)]
pub struct WindowSettings {
    pub save_debounce: Duration,
    /// Fixed footprint while collapsed
    pub mini_size: Size,
    /// Geometry for notes that were never placed
    pub default_bounds: Rect,
    pub restore_gesture: RestoreGesture,
    pub topmost_policy: TopmostPolicy,
    /// Caption shown for blank titles
    pub fallback_title: String,
}

impl Default for WindowSettings {
    fn default() -> Self {
        Config::default().window_settings()
    }
}

impl WindowSettings {
    /// Caption for `title`, falling back when it is blank.
    pub fn display_title<'a>(&'a self, title: &'a str) -> &'a str {
        if title.trim().is_empty() {
            &self.fallback_title
        } else {
            title
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
