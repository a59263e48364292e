use super::*;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{RestoreGesture, TopmostPolicy};
use crate::debounce::ManualClock;
use crate::geometry::{Rect, Size};
use crate::notes::{MemoryNoteStore, Note, NoteLibrary};
use crate::platform::{FixedWorkArea, HeadlessSurface, SurfaceProbe};

const SCREEN: Rect = Rect {
    left: 0.0,
    top: 0.0,
    width: 1920.0,
    height: 1040.0,
};

struct Harness {
    controller: NoteWindowController,
    probe: SurfaceProbe,
    store: Arc<MemoryNoteStore>,
    library: NoteLibrary,
    clock: Arc<ManualClock>,
    work_area: FixedWorkArea,
}

impl Harness {
    fn note(&self) -> Note {
        self.library.get(self.controller.note_id()).unwrap()
    }

    fn settle(&mut self) -> bool {
        self.clock.advance(Duration::from_millis(700));
        self.controller.tick()
    }
}

fn open_with(note: Note, settings: WindowSettings) -> Harness {
    let store = Arc::new(MemoryNoteStore::new());
    let library = NoteLibrary::load(store.clone());
    let note = library.insert(note).unwrap();
    let clock = Arc::new(ManualClock::new());
    let work_area = FixedWorkArea::new(Some(SCREEN));
    let surface = HeadlessSurface::new();
    let probe = surface.probe();

    let controller = NoteWindowController::open(
        WindowId::new(1),
        note.id,
        library.clone(),
        Box::new(surface),
        Arc::new(work_area.clone()),
        clock.clone(),
        settings,
    )
    .unwrap();

    Harness {
        controller,
        probe,
        store,
        library,
        clock,
        work_area,
    }
}

fn open(note: Note) -> Harness {
    open_with(note, WindowSettings::default())
}

fn placed_note(rect: Rect) -> Note {
    let mut note = Note::with_title("Groceries");
    note.set_window_rect(rect);
    note
}

// --- construction ---

#[test]
fn test_blank_title_shows_fallback_caption() {
    let h = open(Note::new());
    assert_eq!(h.probe.snapshot().caption, "Note");
    assert_eq!(h.controller.display_title(), "Note");
    assert_eq!(h.note().title, "");
}

#[test]
fn test_open_applies_persisted_geometry_and_fields() {
    let mut note = placed_note(Rect::new(300.0, 200.0, 400.0, 300.0));
    note.body = "milk".into();
    note.always_on_top = true;
    let h = open(note);

    let state = h.probe.snapshot();
    assert_eq!(state.bounds, Some(Rect::new(300.0, 200.0, 400.0, 300.0)));
    assert_eq!(state.title_text, "Groceries");
    assert_eq!(state.body_text, "milk");
    assert_eq!(state.caption, "Groceries");
    assert!(state.topmost);
    assert_eq!(h.controller.mode(), WindowMode::Normal);
    assert!(!h.controller.is_loading());
}

#[test]
fn test_open_uses_defaults_for_missing_geometry() {
    let mut note = Note::new();
    note.window_left = Some(640.0);
    let h = open(note);
    let defaults = WindowSettings::default().default_bounds;
    assert_eq!(
        h.controller.bounds(),
        Rect::new(640.0, defaults.top, defaults.width, defaults.height)
    );
}

#[test]
fn test_open_does_not_schedule_a_save() {
    let mut h = open(placed_note(Rect::new(5000.0, 100.0, 400.0, 300.0)));
    assert!(!h.controller.has_pending_save());
    // Fields echoing back their own contents are not edits
    assert!(!h.controller.on_title_edited("Groceries"));
    assert!(!h.controller.on_body_edited(""));
    assert!(!h.controller.has_pending_save());
    assert!(!h.settle());
}

#[test]
fn test_open_clamps_offscreen_note_without_recording() {
    let h = open(placed_note(Rect::new(5000.0, 100.0, 400.0, 300.0)));
    assert_eq!(h.controller.bounds().left, 1920.0 - 400.0);
    assert_eq!(h.note().window_left, Some(5000.0));
}

// --- edits ---

#[test]
fn test_title_edit_updates_note_caption_and_timestamp() {
    let mut h = open(Note::new());
    let before = h.note().updated_at;

    assert!(h.controller.on_title_edited("Call mom"));
    let note = h.note();
    assert_eq!(note.title, "Call mom");
    assert!(note.updated_at >= before);
    assert_eq!(h.probe.snapshot().caption, "Call mom");
    assert!(h.controller.has_pending_save());

    h.controller.on_title_edited("   ");
    assert_eq!(h.probe.snapshot().caption, "Note");
    assert_eq!(h.note().title, "   ");
}

#[test]
fn test_burst_of_edits_commits_once_with_final_text() {
    let mut h = open(Note::new());
    let writes = h.store.write_count();

    for text in ["s", "sh", "sho", "shop"] {
        h.controller.on_body_edited(text);
        h.clock.advance(Duration::from_millis(200));
        assert!(!h.controller.tick());
    }
    assert_eq!(h.store.write_count(), writes);

    assert!(h.settle());
    assert_eq!(h.store.write_count(), writes + 1);
    assert_eq!(h.store.last_write().unwrap()[0].body, "shop");
    assert_eq!(h.controller.save_count(), 1);
    assert!(!h.settle());
}

#[test]
fn test_always_on_top_toggle() {
    let mut h = open(Note::new());
    assert!(h.controller.set_always_on_top(true));
    assert!(h.note().always_on_top);
    assert!(h.probe.snapshot().topmost);
    assert!(!h.controller.set_always_on_top(true));

    h.controller.enter_mini();
    h.controller.set_always_on_top(false);
    assert!(h.probe.snapshot().topmost, "mini bar stays on top");
    assert!(!h.note().always_on_top);
}

#[test]
fn test_edit_after_note_deleted_is_ignored() {
    let mut h = open(Note::new());
    h.library.delete(h.controller.note_id()).unwrap();
    assert!(!h.controller.on_body_edited("orphan"));
    assert!(!h.controller.has_pending_save());
}

// --- geometry ---

#[test]
fn test_drag_past_right_edge_is_clamped() {
    let mut h = open(placed_note(Rect::new(100.0, 100.0, 400.0, 300.0)));
    assert!(h.controller.on_moved(1700.0, 100.0));

    assert_eq!(h.controller.bounds().left, 1920.0 - 400.0);
    assert_eq!(h.probe.snapshot().bounds.unwrap().left, 1520.0);
    assert_eq!(h.note().window_left, Some(1520.0));
    assert!(h.controller.has_pending_save());
}

#[test]
fn test_move_within_screen_is_recorded_unchanged() {
    let mut h = open(placed_note(Rect::new(100.0, 100.0, 400.0, 300.0)));
    h.controller.on_moved(250.0, 320.0);
    assert_eq!(h.note().window_rect(), Some(Rect::new(250.0, 320.0, 400.0, 300.0)));
}

#[test]
fn test_work_area_is_queried_on_every_move() {
    let mut h = open(placed_note(Rect::new(100.0, 100.0, 400.0, 300.0)));
    h.work_area.set(Some(Rect::new(0.0, 0.0, 1280.0, 1024.0)));
    h.controller.on_moved(1000.0, 100.0);
    assert_eq!(h.controller.bounds().left, 1280.0 - 400.0);
}

#[test]
fn test_missing_work_area_skips_clamp() {
    let mut h = open(placed_note(Rect::new(100.0, 100.0, 400.0, 300.0)));
    h.work_area.set(None);
    h.controller.on_moved(-900.0, 5000.0);
    assert_eq!(h.controller.bounds().left, -900.0);
    assert_eq!(h.note().window_top, Some(5000.0));

    h.work_area.set(Some(Rect::new(0.0, 0.0, 0.0, 0.0)));
    h.controller.on_moved(-800.0, 5000.0);
    assert_eq!(h.controller.bounds().left, -800.0);
}

#[test]
fn test_resize_records_size() {
    let mut h = open(placed_note(Rect::new(100.0, 100.0, 400.0, 300.0)));
    assert!(h.controller.on_resized(500.0, 350.0));
    assert_eq!(h.note().window_size(), Some(Size::new(500.0, 350.0)));
    assert!(!h.controller.on_resized(500.0, 350.0));
}

// --- mode machine ---

#[test]
fn test_minimize_and_restore_round_trip() {
    let mut h = open(placed_note(Rect::new(100.0, 100.0, 400.0, 300.0)));

    assert_eq!(h.controller.enter_mini(), Transition::Changed);
    let state = h.probe.snapshot();
    assert_eq!(h.controller.bounds(), Rect::new(100.0, 100.0, 220.0, 50.0));
    assert_eq!(state.bounds, Some(Rect::new(100.0, 100.0, 220.0, 50.0)));
    assert!(!state.resizable);
    assert!(state.topmost);
    assert!(!state.body_visible);
    assert!(!state.title_editable);
    assert!(state.mini_controls);
    assert_eq!(
        h.controller.mode(),
        WindowMode::Mini {
            restore_size: Size::new(400.0, 300.0)
        }
    );

    assert_eq!(h.controller.restore(), Transition::Changed);
    let state = h.probe.snapshot();
    assert_eq!(state.bounds, Some(Rect::new(100.0, 100.0, 400.0, 300.0)));
    assert!(state.resizable);
    assert!(state.body_visible);
    assert!(state.title_editable);
    assert!(!state.mini_controls);
    assert_eq!(h.controller.mode(), WindowMode::Normal);
}

#[test]
fn test_minimize_twice_is_identical_to_once() {
    let mut h = open(placed_note(Rect::new(100.0, 100.0, 400.0, 300.0)));
    h.controller.enter_mini();
    let view = h.controller.view();
    let bounds = h.controller.bounds();
    let surface = h.probe.snapshot();
    let note = h.note();

    assert_eq!(h.controller.enter_mini(), Transition::Unchanged);
    assert_eq!(h.controller.view(), view);
    assert_eq!(h.controller.bounds(), bounds);
    assert_eq!(h.probe.snapshot(), surface);
    assert_eq!(h.note(), note);
}

#[test]
fn test_restore_in_normal_mode_is_noop() {
    let mut h = open(Note::new());
    let surface = h.probe.snapshot();
    assert_eq!(h.controller.restore(), Transition::Unchanged);
    assert_eq!(h.probe.snapshot(), surface);
}

#[test]
fn test_native_minimize_becomes_mini_mode() {
    let mut h = open(Note::new());
    assert_eq!(
        h.controller.handle_event(WindowEvent::NativeMinimize),
        EventOutcome::Minimize(MinimizeDisposition::Suppressed)
    );
    assert!(h.controller.is_mini());
}

#[test]
fn test_native_minimize_is_suppressed_in_both_modes() {
    let mut h = open(placed_note(Rect::new(100.0, 100.0, 400.0, 300.0)));
    assert_eq!(h.controller.on_native_minimize(), MinimizeDisposition::Suppressed);
    let collapsed = h.probe.snapshot();

    // Already collapsed: still suppressed, nothing else touched
    assert_eq!(h.controller.on_native_minimize(), MinimizeDisposition::Suppressed);
    assert_eq!(
        h.controller.handle_event(WindowEvent::NativeMinimize),
        EventOutcome::Minimize(MinimizeDisposition::Suppressed)
    );
    assert_eq!(h.probe.snapshot(), collapsed);
    assert_eq!(h.controller.mode(), WindowMode::Mini { restore_size: Size::new(400.0, 300.0) });
}

#[test]
fn test_unusable_saved_size_opens_and_restores_at_default_size() {
    let mut note = Note::with_title("Corrupt");
    note.window_left = Some(100.0);
    note.window_top = Some(100.0);
    note.window_width = Some(0.0);
    note.window_height = Some(-40.0);
    let mut h = open(note);

    let expected = Rect::new(100.0, 100.0, 300.0, 250.0);
    assert_eq!(h.controller.bounds(), expected);
    assert_eq!(h.probe.snapshot().bounds, Some(expected));

    h.controller.enter_mini();
    h.controller.restore();
    assert_eq!(h.controller.bounds(), expected);
    assert_eq!(h.probe.snapshot().bounds, Some(expected));
    assert_eq!(h.note().window_size(), Some(Size::new(300.0, 250.0)));
}

#[test]
fn test_restore_size_is_not_recomputed_while_mini() {
    let mut h = open(placed_note(Rect::new(100.0, 100.0, 400.0, 300.0)));
    h.controller.enter_mini();
    h.controller.on_resized(900.0, 700.0);
    assert_eq!(h.controller.bounds().size(), Size::new(220.0, 50.0));
    h.controller.restore();
    assert_eq!(h.controller.bounds().size(), Size::new(400.0, 300.0));
}

#[test]
fn test_moving_mini_bar_keeps_normal_size_in_note() {
    let mut h = open(placed_note(Rect::new(100.0, 100.0, 400.0, 300.0)));
    h.controller.enter_mini();
    h.controller.on_moved(1800.0, 20.0);

    assert_eq!(h.controller.bounds().left, 1920.0 - 220.0);
    assert_eq!(
        h.note().window_rect(),
        Some(Rect::new(1700.0, 20.0, 400.0, 300.0))
    );

    // Restoring at the right edge pulls the full window back on screen
    h.controller.restore();
    assert_eq!(h.controller.bounds(), Rect::new(1520.0, 20.0, 400.0, 300.0));
}

#[test]
fn test_persistent_topmost_survives_restore() {
    let mut h = open(Note::new());
    h.controller.enter_mini();
    h.controller.restore();
    assert!(h.controller.view().topmost);
    assert!(h.probe.snapshot().topmost);
}

#[test]
fn test_transient_topmost_returns_to_note_flag() {
    let settings = WindowSettings {
        topmost_policy: TopmostPolicy::Transient,
        ..WindowSettings::default()
    };
    let mut h = open_with(Note::new(), settings);
    h.controller.enter_mini();
    assert!(h.probe.snapshot().topmost);
    h.controller.restore();
    assert!(!h.probe.snapshot().topmost);
}

#[test]
fn test_force_mini_mode_bypasses_gestures() {
    let mut h = open(Note::new());
    assert_eq!(h.controller.force_mini_mode(), Transition::Changed);
    assert!(h.controller.is_mini());
}

// --- pointer ---

#[test]
fn test_text_regions_never_drag() {
    let mut h = open(Note::new());
    assert_eq!(
        h.controller.on_pointer_down(PointerRegion::Body, 1),
        PointerOutcome::TextInput
    );
    assert_eq!(
        h.controller.on_pointer_down(PointerRegion::Title, 1),
        PointerOutcome::TextInput
    );
    assert_eq!(h.probe.snapshot().drags, 0);

    h.controller.enter_mini();
    assert_eq!(
        h.controller.on_pointer_down(PointerRegion::Body, 1),
        PointerOutcome::TextInput
    );
    assert_eq!(h.probe.snapshot().drags, 0);
}

#[test]
fn test_background_press_drags_in_both_modes() {
    let mut h = open(Note::new());
    assert_eq!(
        h.controller.on_pointer_down(PointerRegion::Background, 1),
        PointerOutcome::Drag
    );
    h.controller.enter_mini();
    assert_eq!(
        h.controller.on_pointer_down(PointerRegion::Background, 2),
        PointerOutcome::Drag
    );
    assert_eq!(h.probe.snapshot().drags, 2);
    assert!(h.controller.is_mini());
}

#[test]
fn test_mini_title_drags_on_single_click_and_restores_on_double() {
    let mut h = open(Note::new());
    h.controller.enter_mini();

    assert_eq!(
        h.controller.on_pointer_down(PointerRegion::Title, 1),
        PointerOutcome::Drag
    );
    assert!(h.controller.is_mini());

    assert_eq!(
        h.controller.on_pointer_down(PointerRegion::Title, 2),
        PointerOutcome::Restore
    );
    assert!(!h.controller.is_mini());
}

#[test]
fn test_single_click_restore_policy() {
    let settings = WindowSettings {
        restore_gesture: RestoreGesture::SingleClick,
        ..WindowSettings::default()
    };
    let mut h = open_with(Note::new(), settings);
    h.controller.enter_mini();
    assert_eq!(
        h.controller.on_pointer_down(PointerRegion::Title, 1),
        PointerOutcome::Restore
    );
    assert_eq!(h.probe.snapshot().drags, 0);
}

// --- close ---

#[test]
fn test_close_flushes_final_edit_and_stops_writing() {
    let mut h = open(Note::new());
    h.controller.on_body_edited("last words");
    assert!(h.controller.has_pending_save());

    let expected = h.note();
    let Harness {
        controller,
        probe,
        store,
        clock,
        ..
    } = h;
    controller.close().unwrap();

    let writes = store.write_count();
    assert_eq!(store.last_write().unwrap(), vec![expected]);
    assert!(probe.snapshot().closed);

    clock.advance(Duration::from_secs(5));
    assert_eq!(store.write_count(), writes);
}

#[test]
fn test_close_reports_failed_save_and_keeps_memory() {
    let mut h = open(Note::new());
    h.controller.on_body_edited("unsaved");
    h.store.set_fail_writes(true);

    let note_id = h.controller.note_id();
    let Harness {
        controller,
        store,
        library,
        ..
    } = h;
    assert!(controller.close().is_err());
    assert_eq!(library.get(note_id).unwrap().body, "unsaved");

    store.set_fail_writes(false);
    library.commit().unwrap();
    assert_eq!(store.last_write().unwrap()[0].body, "unsaved");
}

#[test]
fn test_drop_without_close_flushes_pending_edit() {
    let mut h = open(Note::new());
    h.controller.on_title_edited("dropped");
    let Harness {
        controller, store, ..
    } = h;
    drop(controller);
    assert_eq!(store.last_write().unwrap()[0].title, "dropped");
}

#[test]
fn test_failed_debounced_save_retries_on_next_kick() {
    let mut h = open(Note::new());
    h.store.set_fail_writes(true);
    h.controller.on_body_edited("one");
    assert!(h.settle());
    assert_eq!(h.controller.save_count(), 0);

    h.store.set_fail_writes(false);
    h.controller.on_body_edited("two");
    assert!(h.settle());
    assert_eq!(h.controller.save_count(), 1);
    assert_eq!(h.store.last_write().unwrap()[0].body, "two");
}
