//! Configuration type definitions

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults::*;
use crate::geometry::{Rect, Size};
use crate::window::WindowSettings;

/// Which click on the title of a mini note restores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RestoreGesture {
    /// Single clicks stay free for dragging the bar
    #[default]
    DoubleClick,
    SingleClick,
}

impl RestoreGesture {
    pub fn matches(self, click_count: u32) -> bool {
        match self {
            RestoreGesture::DoubleClick => click_count >= 2,
            RestoreGesture::SingleClick => click_count >= 1,
        }
    }
}

/// Whether a restored note stays on top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TopmostPolicy {
    /// Once collapsed, the note stays topmost after restore
    #[default]
    Persistent,
    /// Topmost only while collapsed; restore returns to the note's own flag
    Transient,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_save_debounce_ms")]
    pub save_debounce_ms: u64,
    #[serde(default = "default_mini_width")]
    pub mini_width: f64,
    #[serde(default = "default_mini_height")]
    pub mini_height: f64,
    #[serde(default = "default_window_width")]
    pub default_width: f64,
    #[serde(default = "default_window_height")]
    pub default_height: f64,
    #[serde(default)]
    pub restore_gesture: RestoreGesture,
    #[serde(default)]
    pub mini_topmost: TopmostPolicy,
    /// Override for the notes/log directory. `~` is expanded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<String>,
}

fn default_save_debounce_ms() -> u64 {
    DEFAULT_SAVE_DEBOUNCE_MS
}
fn default_mini_width() -> f64 {
    DEFAULT_MINI_WIDTH
}
fn default_mini_height() -> f64 {
    DEFAULT_MINI_HEIGHT
}
fn default_window_width() -> f64 {
    DEFAULT_WINDOW_WIDTH
}
fn default_window_height() -> f64 {
    DEFAULT_WINDOW_HEIGHT
}

impl Default for Config {
    fn default() -> Self {
        Config {
            save_debounce_ms: DEFAULT_SAVE_DEBOUNCE_MS,
            mini_width: DEFAULT_MINI_WIDTH,
            mini_height: DEFAULT_MINI_HEIGHT,
            default_width: DEFAULT_WINDOW_WIDTH,
            default_height: DEFAULT_WINDOW_HEIGHT,
            restore_gesture: RestoreGesture::default(),
            mini_topmost: TopmostPolicy::default(),
            data_dir: None,
        }
    }
}

impl Config {
    /// Directory for notes.json, config and logs.
    pub fn data_dir(&self) -> PathBuf {
        match &self.data_dir {
            Some(dir) => PathBuf::from(shellexpand::tilde(dir).as_ref()),
            None => crate::notes::default_data_dir(),
        }
    }

    pub fn save_debounce(&self) -> Duration {
        Duration::from_millis(self.save_debounce_ms)
    }

    /// Settings every note window controller is built with.
    ///
    /// Non-positive sizes fall back to the defaults.
    pub fn window_settings(&self) -> WindowSettings {
        let positive = |v: f64, fallback: f64| if v.is_finite() && v > 0.0 { v } else { fallback };
        WindowSettings {
            save_debounce: self.save_debounce(),
            mini_size: Size::new(
                positive(self.mini_width, DEFAULT_MINI_WIDTH),
                positive(self.mini_height, DEFAULT_MINI_HEIGHT),
            ),
            default_bounds: Rect::new(
                DEFAULT_WINDOW_LEFT,
                DEFAULT_WINDOW_TOP,
                positive(self.default_width, DEFAULT_WINDOW_WIDTH),
                positive(self.default_height, DEFAULT_WINDOW_HEIGHT),
            ),
            restore_gesture: self.restore_gesture,
            topmost_policy: self.mini_topmost,
            fallback_title: FALLBACK_TITLE.to_string(),
        }
    }
}
