//! Display mode state machine

use crate::geometry::Size;

/// Mode a caller asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Normal,
    Mini,
}

/// Current mode. The size to restore to only exists while collapsed and is
/// captured once, on the way in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum WindowMode {
    Normal,
    Mini { restore_size: Size },
}

impl WindowMode {
    pub fn kind(&self) -> DisplayMode {
        match self {
            WindowMode::Normal => DisplayMode::Normal,
            WindowMode::Mini { .. } => DisplayMode::Mini,
        }
    }

    pub fn is_mini(&self) -> bool {
        matches!(self, WindowMode::Mini { .. })
    }
}

/// Result of a mode request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    Changed,
    /// Already in the requested mode; nothing was touched
    Unchanged,
}

/// Window chrome that follows from the mode.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowViewState {
    pub mode: WindowMode,
    pub resizable: bool,
    pub topmost: bool,
    pub title_editable: bool,
    pub body_visible: bool,
}

impl WindowViewState {
    pub fn normal(topmost: bool) -> Self {
        Self {
            mode: WindowMode::Normal,
            resizable: true,
            topmost,
            title_editable: true,
            body_visible: true,
        }
    }

    pub fn mini(restore_size: Size) -> Self {
        Self {
            mode: WindowMode::Mini { restore_size },
            resizable: false,
            topmost: true,
            title_editable: false,
            body_visible: false,
        }
    }
}
