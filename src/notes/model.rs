//! Note data model
//!
//! Notes serialize with PascalCase keys (`Id`, `Title`, `WindowLeft`, ...) so
//! `notes.json` files written by the earlier desktop release load unchanged.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use uuid::Uuid;

use crate::geometry::{Rect, Size};

/// Title given to notes created from the list.
pub const NEW_NOTE_TITLE: &str = "New note";

/// Opaque note identity. Rendered as 32 lowercase hex digits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteId(Uuid);

impl NoteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse either the hyphenated or the 32-digit form.
    pub fn parse(s: &str) -> Option<Self> {
        Uuid::parse_str(s.trim()).ok().map(Self)
    }

    pub fn as_str(&self) -> String {
        self.0.simple().to_string()
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.simple())
    }
}

impl Serialize for NoteId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.as_str())
    }
}

impl<'de> Deserialize<'de> for NoteId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        NoteId::parse(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid note id '{}'", raw)))
    }
}

/// A single sticky note.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Note {
    #[serde(default)]
    pub id: NoteId,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(rename = "CreatedUtc", default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "UpdatedUtc", default = "Utc::now")]
    pub updated_at: DateTime<Utc>,

    // Last-known window geometry. Each field is applied independently.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_left: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_top: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub window_height: Option<f64>,

    #[serde(default)]
    pub always_on_top: bool,
}

impl Default for Note {
    fn default() -> Self {
        Self::new()
    }
}

impl Note {
    /// Blank note with a fresh id and both timestamps set to now.
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            id: NoteId::new(),
            title: String::new(),
            body: String::new(),
            created_at: now,
            updated_at: now,
            window_left: None,
            window_top: None,
            window_width: None,
            window_height: None,
            always_on_top: false,
        }
    }

    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::new()
        }
    }

    /// Refresh `updated_at`, never moving it backwards.
    pub fn touch(&mut self) {
        let now = Utc::now();
        if now > self.updated_at {
            self.updated_at = now;
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
        self.touch();
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
        self.touch();
    }

    /// Overlay whatever geometry was persisted onto `fallback`, field by
    /// field. Non-finite origins and non-positive sizes are ignored.
    pub fn window_rect_or(&self, fallback: Rect) -> Rect {
        let origin = |v: Option<f64>, fb: f64| v.filter(|v| v.is_finite()).unwrap_or(fb);
        let extent =
            |v: Option<f64>, fb: f64| v.filter(|v| v.is_finite() && *v > 0.0).unwrap_or(fb);
        Rect {
            left: origin(self.window_left, fallback.left),
            top: origin(self.window_top, fallback.top),
            width: extent(self.window_width, fallback.width),
            height: extent(self.window_height, fallback.height),
        }
    }

    /// The persisted rectangle, only when all four fields are present.
    pub fn window_rect(&self) -> Option<Rect> {
        Some(Rect::new(
            self.window_left?,
            self.window_top?,
            self.window_width?,
            self.window_height?,
        ))
    }

    pub fn set_window_rect(&mut self, rect: Rect) {
        self.window_left = Some(rect.left);
        self.window_top = Some(rect.top);
        self.window_width = Some(rect.width);
        self.window_height = Some(rect.height);
    }

    pub fn window_size(&self) -> Option<Size> {
        Some(Size::new(self.window_width?, self.window_height?))
    }

    /// First line of the body, trimmed, for list previews.
    pub fn preview(&self, max_chars: usize) -> String {
        let first = self.body.lines().next().unwrap_or("").trim();
        if first.chars().count() <= max_chars {
            first.to_string()
        } else {
            let cut: String = first.chars().take(max_chars.saturating_sub(1)).collect();
            format!("{}…", cut)
        }
    }
}
