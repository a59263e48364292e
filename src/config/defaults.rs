//! Default configuration values
//!
//! All constants used throughout the config module are defined here.

/// Quiet period before an edit is written to disk
pub const DEFAULT_SAVE_DEBOUNCE_MS: u64 = 700;

/// Fixed footprint of a collapsed (mini) note
pub const DEFAULT_MINI_WIDTH: f64 = 220.0;
pub const DEFAULT_MINI_HEIGHT: f64 = 50.0;

/// Size of a note window that has no persisted geometry
pub const DEFAULT_WINDOW_WIDTH: f64 = 300.0;
pub const DEFAULT_WINDOW_HEIGHT: f64 = 250.0;

/// Origin of a note window that has no persisted geometry
pub const DEFAULT_WINDOW_LEFT: f64 = 100.0;
pub const DEFAULT_WINDOW_TOP: f64 = 100.0;

/// Caption shown when a note's title is blank
pub const FALLBACK_TITLE: &str = "Note";

/// Name of the config file inside the data directory
pub const CONFIG_FILE_NAME: &str = "config.json";
