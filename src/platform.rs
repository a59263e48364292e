//! Platform seams
//!
//! The window controllers never talk to a UI toolkit directly. A host wires a
//! native window in through [`NoteSurface`] and the screen through
//! [`WorkAreaSource`]. [`HeadlessSurface`] and [`FixedWorkArea`] are complete
//! in-process implementations used by tests and by hosts without a display.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::geometry::Rect;

/// Operations the controller performs on its native window.
///
/// All calls happen on the UI thread.
pub trait NoteSurface {
    /// OS-level window caption.
    fn set_caption(&mut self, caption: &str);
    /// Populate the editable title field.
    fn set_title_text(&mut self, text: &str);
    /// Populate the body text region.
    fn set_body_text(&mut self, text: &str);
    fn set_bounds(&mut self, bounds: Rect);
    fn set_body_visible(&mut self, visible: bool);
    fn set_resizable(&mut self, resizable: bool);
    fn set_topmost(&mut self, topmost: bool);
    /// Editable field in normal mode, label-like in mini mode.
    fn set_title_editable(&mut self, editable: bool);
    /// Swap the in-window Mini / Restore buttons.
    fn set_mini_controls(&mut self, mini: bool);
    /// Hand the current pointer press to the OS window-move loop.
    fn begin_drag(&mut self);
    fn focus(&mut self);
    fn close(&mut self);
}

/// Usable screen rectangle (excludes taskbars, docks and menu bars).
pub trait WorkAreaSource {
    /// `None` when the platform cannot tell; clamping is then skipped.
    fn work_area(&self) -> Option<Rect>;
}

/// Fallback display used when no platform query is available.
pub const FALLBACK_WORK_AREA: Rect = Rect {
    left: 0.0,
    top: 0.0,
    width: 1920.0,
    height: 1080.0,
};

/// Work area that only changes when told to.
#[derive(Debug, Clone, Default)]
pub struct FixedWorkArea {
    area: Arc<Mutex<Option<Rect>>>,
}

impl FixedWorkArea {
    pub fn new(area: Option<Rect>) -> Self {
        Self {
            area: Arc::new(Mutex::new(area)),
        }
    }

    pub fn primary_fallback() -> Self {
        Self::new(Some(FALLBACK_WORK_AREA))
    }

    /// Simulate a monitor change.
    pub fn set(&self, area: Option<Rect>) {
        *self.area.lock() = area;
    }
}

impl WorkAreaSource for FixedWorkArea {
    fn work_area(&self) -> Option<Rect> {
        *self.area.lock()
    }
}

/// Everything a [`HeadlessSurface`] has been told.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceState {
    pub caption: String,
    pub title_text: String,
    pub body_text: String,
    pub bounds: Option<Rect>,
    pub body_visible: bool,
    pub resizable: bool,
    pub topmost: bool,
    pub title_editable: bool,
    pub mini_controls: bool,
    pub drags: u32,
    pub focus_requests: u32,
    pub closed: bool,
}

impl Default for SurfaceState {
    fn default() -> Self {
        Self {
            caption: String::new(),
            title_text: String::new(),
            body_text: String::new(),
            bounds: None,
            body_visible: true,
            resizable: true,
            topmost: false,
            title_editable: true,
            mini_controls: false,
            drags: 0,
            focus_requests: 0,
            closed: false,
        }
    }
}

/// Surface that records state instead of drawing.
///
/// Keep a [`HeadlessSurface::probe`] to inspect it after handing the surface
/// to a controller.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    state: Arc<Mutex<SurfaceState>>,
}

impl HeadlessSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn probe(&self) -> SurfaceProbe {
        SurfaceProbe {
            state: self.state.clone(),
        }
    }
}

/// Read-only view onto a [`HeadlessSurface`].
#[derive(Debug, Clone)]
pub struct SurfaceProbe {
    state: Arc<Mutex<SurfaceState>>,
}

impl SurfaceProbe {
    pub fn snapshot(&self) -> SurfaceState {
        self.state.lock().clone()
    }
}

impl NoteSurface for HeadlessSurface {
    fn set_caption(&mut self, caption: &str) {
        self.state.lock().caption = caption.to_string();
    }

    fn set_title_text(&mut self, text: &str) {
        self.state.lock().title_text = text.to_string();
    }

    fn set_body_text(&mut self, text: &str) {
        self.state.lock().body_text = text.to_string();
    }

    fn set_bounds(&mut self, bounds: Rect) {
        self.state.lock().bounds = Some(bounds);
    }

    fn set_body_visible(&mut self, visible: bool) {
        self.state.lock().body_visible = visible;
    }

    fn set_resizable(&mut self, resizable: bool) {
        self.state.lock().resizable = resizable;
    }

    fn set_topmost(&mut self, topmost: bool) {
        self.state.lock().topmost = topmost;
    }

    fn set_title_editable(&mut self, editable: bool) {
        self.state.lock().title_editable = editable;
    }

    fn set_mini_controls(&mut self, mini: bool) {
        self.state.lock().mini_controls = mini;
    }

    fn begin_drag(&mut self) {
        self.state.lock().drags += 1;
    }

    fn focus(&mut self) {
        self.state.lock().focus_requests += 1;
    }

    fn close(&mut self) {
        self.state.lock().closed = true;
    }
}
