//! Input delivered to a note window

/// Where a pointer press landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerRegion {
    /// The title field / bar
    Title,
    /// The body text editor
    Body,
    /// Any chrome that is not a text input
    Background,
}

/// What the host should do with a pointer press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerOutcome {
    /// Let the text field handle it (caret, selection)
    TextInput,
    /// A window move was started
    Drag,
    /// The press restored a mini window
    Restore,
}

/// Everything a platform layer reports for one note window.
#[derive(Debug, Clone, PartialEq)]
pub enum WindowEvent {
    TitleEdited(String),
    BodyEdited(String),
    Moved { left: f64, top: f64 },
    Resized { width: f64, height: f64 },
    /// The OS minimize affordance. Never performs a real minimize.
    NativeMinimize,
    MiniClicked,
    RestoreClicked,
    PointerDown { region: PointerRegion, click_count: u32 },
    AlwaysOnTopToggled(bool),
    CloseRequested,
}

/// What the host does with the native minimize it just intercepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MinimizeDisposition {
    /// Cancel the OS minimize; the note collapses to its mini bar instead
    Suppressed,
}

/// How a controller handled an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    Applied,
    /// Dropped: loading guard, unchanged value, or a closed window
    Ignored,
    Pointer(PointerOutcome),
    Minimize(MinimizeDisposition),
    Closed,
}
