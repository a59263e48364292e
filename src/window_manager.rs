//! Window Manager
//!
//! Registry of open note windows. The manager owns every
//! [`NoteWindowController`], hands out [`WindowId`]s, routes platform events to
//! the right controller and drives their save debouncers.
//!
//! ```text
//!  platform event ──▶ dispatch(id, event) ──▶ controller ──▶ NoteLibrary (memory)
//!                                                 │
//!  UI loop ─────────▶ tick() ─────────────▶ debouncer due? ──▶ NoteLibrary::commit
//! ```
//!
//! The manager is not thread-safe on purpose: it lives on the UI thread and
//! other threads reach it through [`crate::event_loop::UiHandle`].

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info};

use crate::debounce::{Clock, SystemClock};
use crate::error::{Result, ResultExt, StickyNotesError};
use crate::notes::{NoteId, NoteLibrary};
use crate::platform::{NoteSurface, WorkAreaSource};
use crate::window::{
    EventOutcome, NoteWindowController, Transition, WindowEvent, WindowId, WindowSettings,
};

pub struct WindowManager {
    library: NoteLibrary,
    work_area: Arc<dyn WorkAreaSource>,
    clock: Arc<dyn Clock>,
    settings: WindowSettings,
    windows: BTreeMap<WindowId, NoteWindowController>,
    next_id: u64,
}

impl std::fmt::Debug for WindowManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowManager")
            .field("windows", &self.windows.keys().collect::<Vec<_>>())
            .field("next_id", &self.next_id)
            .finish()
    }
}

impl WindowManager {
    pub fn new(
        library: NoteLibrary,
        work_area: Arc<dyn WorkAreaSource>,
        settings: WindowSettings,
    ) -> Self {
        Self::with_clock(library, work_area, settings, Arc::new(SystemClock))
    }

    pub fn with_clock(
        library: NoteLibrary,
        work_area: Arc<dyn WorkAreaSource>,
        settings: WindowSettings,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            library,
            work_area,
            clock,
            settings,
            windows: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn library(&self) -> &NoteLibrary {
        &self.library
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn window(&self, id: WindowId) -> Option<&NoteWindowController> {
        self.windows.get(&id)
    }

    pub fn window_for_note(&self, note_id: NoteId) -> Option<WindowId> {
        self.windows
            .values()
            .find(|w| w.note_id() == note_id)
            .map(|w| w.id())
    }

    /// Open a window for `note_id`. If the note already has one, that window
    /// is focused and returned and the new `surface` is closed unused.
    pub fn create_note_window(
        &mut self,
        note_id: NoteId,
        mut surface: Box<dyn NoteSurface>,
    ) -> Result<WindowId> {
        if let Some(existing) = self.window_for_note(note_id) {
            debug!(window_id = %existing, note_id = %note_id, "Note already open, focusing");
            surface.close();
            if let Some(window) = self.windows.get_mut(&existing) {
                window.focus();
            }
            return Ok(existing);
        }

        let id = WindowId::new(self.next_id);
        self.next_id += 1;

        let controller = NoteWindowController::open(
            id,
            note_id,
            self.library.clone(),
            surface,
            self.work_area.clone(),
            self.clock.clone(),
            self.settings.clone(),
        )?;
        self.windows.insert(id, controller);
        info!(window_id = %id, note_id = %note_id, open_windows = self.windows.len(), "Window registered");
        Ok(id)
    }

    /// Route an event. `CloseRequested` closes and unregisters the window.
    pub fn dispatch(&mut self, id: WindowId, event: WindowEvent) -> Result<EventOutcome> {
        if event == WindowEvent::CloseRequested {
            self.close(id)?;
            return Ok(EventOutcome::Closed);
        }
        let window = self
            .windows
            .get_mut(&id)
            .ok_or(StickyNotesError::UnknownWindow(id))?;
        Ok(window.handle_event(event))
    }

    /// Collapse a window immediately, bypassing any gesture.
    pub fn force_mini_mode(&mut self, id: WindowId) -> Result<Transition> {
        let window = self
            .windows
            .get_mut(&id)
            .ok_or(StickyNotesError::UnknownWindow(id))?;
        Ok(window.force_mini_mode())
    }

    /// Flush and close one window.
    pub fn close(&mut self, id: WindowId) -> Result<()> {
        let window = self
            .windows
            .remove(&id)
            .ok_or(StickyNotesError::UnknownWindow(id))?;
        window.close()
    }

    /// Flush and close every window. Failures are logged; every window is
    /// closed regardless.
    pub fn close_all(&mut self) {
        let windows = std::mem::take(&mut self.windows);
        let count = windows.len();
        for (_, window) in windows {
            window.close().log_err();
        }
        info!(count, "Closed all note windows");
    }

    /// Fire due debounced saves. Returns how many ran.
    pub fn tick(&mut self) -> usize {
        self.windows
            .values_mut()
            .map(|w| w.tick())
            .filter(|fired| *fired)
            .count()
    }

    /// Earliest pending save across all windows.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.windows.values().filter_map(|w| w.next_deadline()).min()
    }
}
