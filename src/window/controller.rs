//! Note Window Controller
//!
//! Owns one window's mode, geometry and debounced saving.
//!
//! ## Modes
//! - **Normal**: resizable, editable title, body visible.
//! - **Mini**: fixed small footprint, body hidden, title read-only, topmost.
//!
//! All mode changes go through [`NoteWindowController::transition_to`]; asking
//! for the current mode is a no-op. The OS minimize button is rebound to the
//! Mini transition, so a note is never minimized to the taskbar.
//!
//! ## Saving
//! Every edit updates the shared note in memory and kicks the debouncer. The
//! host calls [`tick`](NoteWindowController::tick) from its UI loop; closing
//! flushes synchronously.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use super::events::{
    EventOutcome, MinimizeDisposition, PointerOutcome, PointerRegion, WindowEvent,
};
use super::state::{DisplayMode, Transition, WindowMode, WindowViewState};
use super::{WindowId, WindowSettings};
use crate::config::TopmostPolicy;
use crate::debounce::{Clock, SaveDebouncer};
use crate::error::{Result, ResultExt, StickyNotesError};
use crate::geometry::{self, Rect, Size};
use crate::notes::{Note, NoteId, NoteLibrary};
use crate::platform::{NoteSurface, WorkAreaSource};

pub struct NoteWindowController {
    id: WindowId,
    note_id: NoteId,
    library: NoteLibrary,
    surface: Box<dyn NoteSurface>,
    work_area: Arc<dyn WorkAreaSource>,
    settings: WindowSettings,
    view: WindowViewState,
    bounds: Rect,
    debouncer: SaveDebouncer,
    /// Set while fields are populated from the note; edits are dropped
    loading: bool,
}

impl std::fmt::Debug for NoteWindowController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteWindowController")
            .field("id", &self.id)
            .field("note_id", &self.note_id)
            .field("view", &self.view)
            .field("bounds", &self.bounds)
            .field("debouncer", &self.debouncer)
            .finish()
    }
}

impl NoteWindowController {
    /// Bind a window to `note_id` and populate it from the note.
    ///
    /// Populating the fields never schedules a save.
    pub fn open(
        id: WindowId,
        note_id: NoteId,
        library: NoteLibrary,
        surface: Box<dyn NoteSurface>,
        work_area: Arc<dyn WorkAreaSource>,
        clock: Arc<dyn Clock>,
        settings: WindowSettings,
    ) -> Result<Self> {
        let note = library
            .get(note_id)
            .ok_or(StickyNotesError::UnknownNote(note_id))?;

        let commit_library = library.clone();
        let debouncer = SaveDebouncer::new(
            settings.save_debounce,
            clock,
            Box::new(move || commit_library.commit()),
        );

        let mut controller = Self {
            id,
            note_id,
            library,
            surface,
            work_area,
            bounds: note.window_rect_or(settings.default_bounds),
            view: WindowViewState::normal(note.always_on_top),
            settings,
            debouncer,
            loading: false,
        };
        controller.populate(&note);

        info!(
            window_id = %id,
            note_id = %note_id,
            left = controller.bounds.left,
            top = controller.bounds.top,
            width = controller.bounds.width,
            height = controller.bounds.height,
            "Note window opened"
        );
        Ok(controller)
    }

    fn populate(&mut self, note: &Note) {
        self.loading = true;

        self.surface.set_title_text(&note.title);
        self.surface.set_body_text(&note.body);
        // A monitor may have gone away since the note was last placed
        self.bounds = self.clamp_to_screen(self.bounds);
        self.surface.set_bounds(self.bounds);
        self.apply_view();
        let caption = self.settings.display_title(&note.title).to_string();
        self.surface.set_caption(&caption);

        self.loading = false;
    }

    pub fn id(&self) -> WindowId {
        self.id
    }

    pub fn note_id(&self) -> NoteId {
        self.note_id
    }

    pub fn mode(&self) -> WindowMode {
        self.view.mode
    }

    pub fn is_mini(&self) -> bool {
        self.view.mode.is_mini()
    }

    pub fn view(&self) -> WindowViewState {
        self.view
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Caption currently shown for the note.
    pub fn display_title(&self) -> String {
        let title = self
            .library
            .get(self.note_id)
            .map(|n| n.title)
            .unwrap_or_default();
        self.settings.display_title(&title).to_string()
    }

    pub fn has_pending_save(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.debouncer.next_deadline()
    }

    /// Successful saves this window has triggered.
    pub fn save_count(&self) -> u64 {
        self.debouncer.commit_count()
    }

    /// Fire the debounced save if it is due. Returns true when it ran.
    pub fn tick(&mut self) -> bool {
        self.debouncer.poll()
    }

    /// Route one platform event. Closing is handled by the owner, which
    /// consumes the controller through [`close`](Self::close).
    pub fn handle_event(&mut self, event: WindowEvent) -> EventOutcome {
        match event {
            WindowEvent::TitleEdited(text) => applied(self.on_title_edited(&text)),
            WindowEvent::BodyEdited(text) => applied(self.on_body_edited(&text)),
            WindowEvent::Moved { left, top } => applied(self.on_moved(left, top)),
            WindowEvent::Resized { width, height } => applied(self.on_resized(width, height)),
            WindowEvent::NativeMinimize => EventOutcome::Minimize(self.on_native_minimize()),
            WindowEvent::MiniClicked => applied(self.enter_mini() == Transition::Changed),
            WindowEvent::RestoreClicked => applied(self.restore() == Transition::Changed),
            WindowEvent::PointerDown {
                region,
                click_count,
            } => EventOutcome::Pointer(self.on_pointer_down(region, click_count)),
            WindowEvent::AlwaysOnTopToggled(on) => applied(self.set_always_on_top(on)),
            WindowEvent::CloseRequested => EventOutcome::Ignored,
        }
    }

    // --- edits ---

    /// Title field changed. Returns false when nothing changed.
    pub fn on_title_edited(&mut self, text: &str) -> bool {
        if self.loading {
            return false;
        }
        let changed = self.edit_note(|note| {
            if note.title == text {
                return false;
            }
            note.set_title(text);
            true
        });
        if changed {
            let caption = self.settings.display_title(text).to_string();
            self.surface.set_caption(&caption);
            self.debouncer.kick();
        }
        changed
    }

    /// Body text changed. Returns false when nothing changed.
    pub fn on_body_edited(&mut self, text: &str) -> bool {
        if self.loading {
            return false;
        }
        let changed = self.edit_note(|note| {
            if note.body == text {
                return false;
            }
            note.set_body(text);
            true
        });
        if changed {
            self.debouncer.kick();
        }
        changed
    }

    /// Mirror the note's own always-on-top preference.
    ///
    /// While collapsed the window stays topmost regardless.
    pub fn set_always_on_top(&mut self, on: bool) -> bool {
        let changed = self.edit_note(|note| {
            let changed = note.always_on_top != on;
            note.always_on_top = on;
            changed
        });
        if !self.is_mini() && self.view.topmost != on {
            self.view.topmost = on;
            self.surface.set_topmost(on);
        }
        if changed {
            self.debouncer.kick();
        }
        changed
    }

    // --- geometry ---

    /// Window moved by the user or the OS.
    pub fn on_moved(&mut self, left: f64, top: f64) -> bool {
        let proposed = self.bounds.with_origin(left, top);
        self.apply_geometry(proposed)
    }

    /// Window resized. A collapsed window keeps its fixed footprint.
    pub fn on_resized(&mut self, width: f64, height: f64) -> bool {
        let size = if self.is_mini() {
            self.settings.mini_size
        } else {
            Size::new(width, height)
        };
        let proposed = self.bounds.with_size(size);
        if self.is_mini() && (width, height) != (size.width, size.height) {
            self.surface.set_bounds(proposed);
        }
        self.apply_geometry(proposed)
    }

    fn apply_geometry(&mut self, proposed: Rect) -> bool {
        let clamped = self.clamp_to_screen(proposed);
        if clamped != proposed {
            debug!(
                window_id = %self.id,
                from_left = proposed.left,
                from_top = proposed.top,
                to_left = clamped.left,
                to_top = clamped.top,
                "Clamped note window to work area"
            );
            self.surface.set_bounds(clamped);
        }
        self.bounds = clamped;
        self.record_geometry()
    }

    /// Clamp against the work area as it is right now. Skipped when the
    /// platform reports nothing usable.
    fn clamp_to_screen(&self, rect: Rect) -> Rect {
        match self.work_area.work_area() {
            Some(area) if area.is_usable() => geometry::clamp(rect, area),
            other => {
                debug!(window_id = %self.id, work_area = ?other, "No usable work area, skipping clamp");
                rect
            }
        }
    }

    /// Copy the current geometry into the note and kick a save if it changed.
    ///
    /// A collapsed window only records its position so a restart opens the
    /// note at full size.
    fn record_geometry(&mut self) -> bool {
        let bounds = self.bounds;
        let mode = self.view.mode;
        let changed = self.edit_note(|note| {
            let before = (
                note.window_left,
                note.window_top,
                note.window_width,
                note.window_height,
            );
            match mode {
                WindowMode::Normal => note.set_window_rect(bounds),
                WindowMode::Mini { restore_size } => {
                    note.set_window_rect(bounds.with_size(restore_size))
                }
            }
            before
                != (
                    note.window_left,
                    note.window_top,
                    note.window_width,
                    note.window_height,
                )
        });
        if changed {
            self.debouncer.kick();
        }
        changed
    }

    // --- mode machine ---

    /// The single entry point for mode changes.
    pub fn transition_to(&mut self, target: DisplayMode) -> Transition {
        if self.view.mode.kind() == target {
            return Transition::Unchanged;
        }
        match self.view.mode {
            WindowMode::Normal => self.collapse(),
            WindowMode::Mini { restore_size } => self.expand(restore_size),
        }
        Transition::Changed
    }

    pub fn enter_mini(&mut self) -> Transition {
        self.transition_to(DisplayMode::Mini)
    }

    pub fn restore(&mut self) -> Transition {
        self.transition_to(DisplayMode::Normal)
    }

    /// Collapse without any user gesture, e.g. right after a silent launch.
    pub fn force_mini_mode(&mut self) -> Transition {
        self.transition_to(DisplayMode::Mini)
    }

    /// The OS minimize button was pressed. The native minimize is always
    /// suppressed, even when the window is already collapsed; the window
    /// collapses to its mini bar instead.
    pub fn on_native_minimize(&mut self) -> MinimizeDisposition {
        let transition = self.transition_to(DisplayMode::Mini);
        debug!(window_id = %self.id, ?transition, "Intercepted native minimize");
        MinimizeDisposition::Suppressed
    }

    fn collapse(&mut self) {
        let restore_size = self.bounds.size();
        self.view = WindowViewState::mini(restore_size);
        self.bounds = self.clamp_to_screen(self.bounds.with_size(self.settings.mini_size));
        self.apply_view();
        self.surface.set_bounds(self.bounds);
        self.record_geometry();

        info!(
            window_id = %self.id,
            note_id = %self.note_id,
            restore_width = restore_size.width,
            restore_height = restore_size.height,
            "Note window collapsed to mini"
        );
    }

    fn expand(&mut self, restore_size: Size) {
        let topmost = match self.settings.topmost_policy {
            TopmostPolicy::Persistent => true,
            TopmostPolicy::Transient => self
                .library
                .get(self.note_id)
                .map(|n| n.always_on_top)
                .unwrap_or(false),
        };
        self.view = WindowViewState::normal(topmost);
        self.bounds = self.clamp_to_screen(self.bounds.with_size(restore_size));
        self.apply_view();
        self.surface.set_bounds(self.bounds);
        self.record_geometry();

        info!(
            window_id = %self.id,
            note_id = %self.note_id,
            width = self.bounds.width,
            height = self.bounds.height,
            topmost,
            "Note window restored"
        );
    }

    fn apply_view(&mut self) {
        let view = self.view;
        self.surface.set_body_visible(view.body_visible);
        self.surface.set_resizable(view.resizable);
        self.surface.set_topmost(view.topmost);
        self.surface.set_title_editable(view.title_editable);
        self.surface.set_mini_controls(view.mode.is_mini());
    }

    // --- pointer ---

    /// Decide what a press does. Text regions never start a move; in mini
    /// mode the configured restore gesture on the title restores the window.
    pub fn on_pointer_down(&mut self, region: PointerRegion, click_count: u32) -> PointerOutcome {
        match (region, self.view.mode) {
            (PointerRegion::Body, _) | (PointerRegion::Title, WindowMode::Normal) => {
                PointerOutcome::TextInput
            }
            (PointerRegion::Title, WindowMode::Mini { .. })
                if self.settings.restore_gesture.matches(click_count) =>
            {
                self.restore();
                PointerOutcome::Restore
            }
            (PointerRegion::Title, WindowMode::Mini { .. }) | (PointerRegion::Background, _) => {
                self.surface.begin_drag();
                PointerOutcome::Drag
            }
        }
    }

    // --- lifecycle ---

    pub fn focus(&mut self) {
        self.surface.focus();
    }

    /// Flush synchronously and close the native window. Consumes the
    /// controller so no timer can outlive it.
    pub fn close(mut self) -> Result<()> {
        let result = self.debouncer.flush_now();
        self.surface.close();
        match &result {
            Ok(()) => info!(window_id = %self.id, note_id = %self.note_id, "Note window closed"),
            Err(e) => warn!(
                window_id = %self.id,
                note_id = %self.note_id,
                error = %e,
                "Final save on close failed"
            ),
        }
        result
    }

    /// Run `f` against the bound note. A note deleted behind the window's
    /// back is logged and treated as unchanged.
    fn edit_note(&self, f: impl FnOnce(&mut Note) -> bool) -> bool {
        self.library
            .update(self.note_id, f)
            .warn_on_err()
            .unwrap_or(false)
    }
}

impl Drop for NoteWindowController {
    fn drop(&mut self) {
        // Dropped without close(): still don't lose the last edit
        if self.debouncer.is_pending() {
            self.debouncer.flush_now().log_err();
        }
    }
}

fn applied(changed: bool) -> EventOutcome {
    if changed {
        EventOutcome::Applied
    } else {
        EventOutcome::Ignored
    }
}
