//! Notes Module
//!
//! Data model, JSON persistence and the shared in-memory collection that every
//! open note window edits.
//!
//! ## Usage
//! ```ignore
//! use std::sync::Arc;
//! use sticky_notes::notes::{JsonNoteStore, NoteLibrary};
//!
//! let store = Arc::new(JsonNoteStore::in_dir(&data_dir));
//! let library = NoteLibrary::load(store);
//! let note = library.create_note()?;
//! ```

mod library;
mod model;
mod storage;

pub use library::NoteLibrary;
pub use model::{Note, NoteId, NEW_NOTE_TITLE};
pub use storage::{
    default_data_dir, JsonNoteStore, MemoryNoteStore, NoteStore, DATA_DIR_NAME, NOTES_FILE_NAME,
};
