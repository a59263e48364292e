//! Configuration module - Application settings and user preferences
//!
//! This module provides functionality for:
//! - Loading configuration from `<data dir>/config.json`
//! - Default values for all settings
//! - Type definitions for config structures
//!
//! # Module Structure
//!
//! - `defaults` - All default constant values
//! - `types` - Configuration struct definitions (Config, policies)
//! - `loader` - File system loading and parsing

mod defaults;
mod loader;
mod types;

pub use defaults::{
    CONFIG_FILE_NAME, DEFAULT_MINI_HEIGHT, DEFAULT_MINI_WIDTH, DEFAULT_SAVE_DEBOUNCE_MS,
    DEFAULT_WINDOW_HEIGHT, DEFAULT_WINDOW_WIDTH, FALLBACK_TITLE,
};
pub use types::{Config, RestoreGesture, TopmostPolicy};
pub use loader::{default_config_path, load_config, try_load_config};

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
