//! Notes Storage Layer
//!
//! JSON-file persistence for the whole note collection. The file is a
//! pretty-printed array of notes, rewritten in full on every save through a
//! temp file and a rename so a crash never leaves it half-written.

use std::fs;
use std::path::{Path, PathBuf};

use parking_lot::Mutex;
use tracing::{debug, info};

use super::model::Note;
use crate::error::{Result, StickyNotesError};

/// Durable keyed collection of notes.
pub trait NoteStore: Send + Sync {
    /// Load every persisted note. A store that was never written yields an
    /// empty collection.
    fn load_all(&self) -> Result<Vec<Note>>;

    /// Replace the persisted collection with `notes`.
    fn save_all(&self, notes: &[Note]) -> Result<()>;
}

/// Folder under the local data dir. Shared with the earlier desktop release
/// so its `notes.json` is picked up in place.
pub const DATA_DIR_NAME: &str = "WindowsNotes";

/// Directory holding notes, config and logs:
/// `<local data dir>/WindowsNotes`, or `./.sticky-notes` without a home.
pub fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(DATA_DIR_NAME))
        .unwrap_or_else(|| PathBuf::from(".sticky-notes"))
}

pub const NOTES_FILE_NAME: &str = "notes.json";

/// [`NoteStore`] backed by `notes.json`.
#[derive(Debug, Clone)]
pub struct JsonNoteStore {
    path: PathBuf,
}

impl JsonNoteStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Store at `<dir>/notes.json`.
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(NOTES_FILE_NAME))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl NoteStore for JsonNoteStore {
    fn load_all(&self) -> Result<Vec<Note>> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "Notes file not found, starting empty");
            return Ok(Vec::new());
        }

        let contents =
            fs::read_to_string(&self.path).map_err(|e| StickyNotesError::io(&self.path, e))?;
        if contents.trim().is_empty() {
            return Ok(Vec::new());
        }

        let notes: Vec<Note> = serde_json::from_str(&contents)?;
        debug!(path = %self.path.display(), count = notes.len(), "Loaded notes");
        Ok(notes)
    }

    fn save_all(&self, notes: &[Note]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| StickyNotesError::io(parent, e))?;
            }
        }

        let json = serde_json::to_string_pretty(notes)?;

        // Atomic write: temp file then rename
        let tmp_path = self.tmp_path();
        fs::write(&tmp_path, json.as_bytes()).map_err(|e| StickyNotesError::io(&tmp_path, e))?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            let _ = fs::remove_file(&tmp_path);
            return Err(StickyNotesError::io(&self.path, e));
        }

        info!(path = %self.path.display(), count = notes.len(), "Notes saved");
        Ok(())
    }
}

/// In-memory [`NoteStore`] that records every write. Useful for embedding
/// hosts without a disk and for tests.
#[derive(Debug, Default)]
pub struct MemoryNoteStore {
    state: Mutex<MemoryState>,
}

#[derive(Debug, Default)]
struct MemoryState {
    notes: Vec<Note>,
    writes: Vec<Vec<Note>>,
    fail_writes: bool,
}

impl MemoryNoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_notes(notes: Vec<Note>) -> Self {
        let store = Self::default();
        store.state.lock().notes = notes;
        store
    }

    /// Make subsequent `save_all` calls fail, as a full disk would.
    pub fn set_fail_writes(&self, fail: bool) {
        self.state.lock().fail_writes = fail;
    }

    pub fn write_count(&self) -> usize {
        self.state.lock().writes.len()
    }

    pub fn last_write(&self) -> Option<Vec<Note>> {
        self.state.lock().writes.last().cloned()
    }
}

impl NoteStore for MemoryNoteStore {
    fn load_all(&self) -> Result<Vec<Note>> {
        Ok(self.state.lock().notes.clone())
    }

    fn save_all(&self, notes: &[Note]) -> Result<()> {
        let mut state = self.state.lock();
        if state.fail_writes {
            return Err(StickyNotesError::io(
                "<memory>",
                std::io::Error::other("simulated write failure"),
            ));
        }
        state.notes = notes.to_vec();
        state.writes.push(notes.to_vec());
        Ok(())
    }
}
