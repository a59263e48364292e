//! Sticky Notes - desktop sticky-note windows with a collapsible mini mode
//!
//! The crate is toolkit-neutral. A host provides native windows through
//! [`platform::NoteSurface`] and the screen work area through
//! [`platform::WorkAreaSource`]; everything else (mode changes, geometry
//! clamping, debounced persistence) lives here.

pub mod config;
pub mod debounce;
pub mod error;
pub mod event_loop;
pub mod geometry;
pub mod logging;
pub mod notes;
pub mod platform;
pub mod window;
pub mod window_manager;

pub use error::{Result, StickyNotesError};
