//! Shared in-memory note collection
//!
//! `NoteLibrary` is the single owner of the canonical collection. Every open
//! window and the list view hold a clone of the same handle; a window only
//! touches its own note through [`NoteLibrary::update`]. A commit always
//! persists the whole collection as it stands at that instant.

use std::sync::Arc;

use parking_lot::Mutex;
use tracing::{debug, info, warn};

use super::model::{Note, NoteId, NEW_NOTE_TITLE};
use super::storage::NoteStore;
use crate::error::{Result, StickyNotesError};

#[derive(Clone)]
pub struct NoteLibrary {
    notes: Arc<Mutex<Vec<Note>>>,
    store: Arc<dyn NoteStore>,
}

impl std::fmt::Debug for NoteLibrary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NoteLibrary")
            .field("count", &self.notes.lock().len())
            .finish()
    }
}

impl NoteLibrary {
    /// Empty library over `store`; nothing is read yet.
    pub fn new(store: Arc<dyn NoteStore>) -> Self {
        Self {
            notes: Arc::new(Mutex::new(Vec::new())),
            store,
        }
    }

    /// Load from `store`, newest first. An unreadable or corrupt store is
    /// treated as empty so startup never fails.
    pub fn load(store: Arc<dyn NoteStore>) -> Self {
        let mut notes = match store.load_all() {
            Ok(notes) => notes,
            Err(e) => {
                warn!(error = %e, "Failed to load notes, starting with an empty collection");
                Vec::new()
            }
        };
        notes.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        info!(count = notes.len(), "Notes library loaded");

        Self {
            notes: Arc::new(Mutex::new(notes)),
            store,
        }
    }

    pub fn len(&self) -> usize {
        self.notes.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.lock().is_empty()
    }

    pub fn contains(&self, id: NoteId) -> bool {
        self.notes.lock().iter().any(|n| n.id == id)
    }

    pub fn get(&self, id: NoteId) -> Option<Note> {
        self.notes.lock().iter().find(|n| n.id == id).cloned()
    }

    /// Copy of the whole collection in list order.
    pub fn snapshot(&self) -> Vec<Note> {
        self.notes.lock().clone()
    }

    /// Mutate one note in place. The lock is held only for `f`.
    pub fn update<R>(&self, id: NoteId, f: impl FnOnce(&mut Note) -> R) -> Result<R> {
        let mut notes = self.notes.lock();
        let note = notes
            .iter_mut()
            .find(|n| n.id == id)
            .ok_or(StickyNotesError::UnknownNote(id))?;
        Ok(f(note))
    }

    /// Insert a fresh note at the top of the list and persist.
    pub fn create_note(&self) -> Result<Note> {
        self.insert(Note::with_title(NEW_NOTE_TITLE))
    }

    /// Insert `note` at the top of the list and persist.
    pub fn insert(&self, note: Note) -> Result<Note> {
        self.notes.lock().insert(0, note.clone());
        info!(note_id = %note.id, "Note created");
        self.commit()?;
        Ok(note)
    }

    /// Remove a note and persist. Returns the removed note.
    pub fn delete(&self, id: NoteId) -> Result<Note> {
        let removed = {
            let mut notes = self.notes.lock();
            let idx = notes
                .iter()
                .position(|n| n.id == id)
                .ok_or(StickyNotesError::UnknownNote(id))?;
            notes.remove(idx)
        };
        info!(note_id = %id, "Note deleted");
        self.commit()?;
        Ok(removed)
    }

    /// Persist the collection as it is right now.
    pub fn commit(&self) -> Result<()> {
        let snapshot = self.snapshot();
        self.store.save_all(&snapshot)?;
        debug!(count = snapshot.len(), "Notes committed");
        Ok(())
    }
}
