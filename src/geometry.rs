//! Window geometry and screen clamping
//!
//! Coordinates use a top-left origin with y increasing downward, the same
//! canonical space the persisted note geometry is stored in.
//!
//! [`clamp`] keeps a window reachable after the user drags it or after it
//! collapses into a mini bar. It is pure and idempotent:
//! `clamp(clamp(r, w), w) == clamp(r, w)`.

use serde::{Deserialize, Serialize};

/// Width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Axis-aligned rectangle in screen coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    pub fn with_size(self, size: Size) -> Self {
        Self {
            width: size.width,
            height: size.height,
            ..self
        }
    }

    pub fn with_origin(self, left: f64, top: f64) -> Self {
        Self { left, top, ..self }
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains(&self, other: &Rect) -> bool {
        other.left >= self.left
            && other.top >= self.top
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// A work area is only worth clamping against when it is finite and has area.
    pub fn is_usable(&self) -> bool {
        [self.left, self.top, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
            && self.width > 0.0
            && self.height > 0.0
    }
}

/// Clamp `rect` so its edges stay inside `work_area`.
///
/// Horizontal and vertical adjustments are independent. When the window is
/// larger than the work area on an axis, the right/bottom rule runs second and
/// wins, so the far edge is pinned and the near edge may hang off-screen.
pub fn clamp(rect: Rect, work_area: Rect) -> Rect {
    let mut out = rect;

    if out.left < work_area.left {
        out.left = work_area.left;
    }
    if out.left + out.width > work_area.right() {
        out.left = work_area.right() - out.width;
    }

    if out.top < work_area.top {
        out.top = work_area.top;
    }
    if out.top + out.height > work_area.bottom() {
        out.top = work_area.bottom() - out.height;
    }

    out
}
