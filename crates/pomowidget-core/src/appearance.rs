//! Cosmetic settings: font, colors, panel shape, goal line, icons and the
//! background image.
//!
//! None of this affects timing. It is stored next to the timer settings so
//! the whole panel persists in one file.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::sinks::BackgroundProvider;

pub const DEFAULT_FONT: &str = "'Inter', sans-serif";
pub const DEFAULT_FONT_COLOR: &str = "#ffffff";

/// Built-in background images (mountains, ocean, city night, canyon, forest mist).
pub const PRESETS: [&str; 5] = [
    "https://images.unsplash.com/photo-1501785888041-af3ef285b470?q=80&w=1920&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1507525428034-b723cf961d3e?q=80&w=1920&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1469474968028-56623f02e42e?q=80&w=1920&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1500530855697-b586d89ba3ee?q=80&w=1920&auto=format&fit=crop",
    "https://images.unsplash.com/photo-1441974231531-c6227db76b6e?q=80&w=1920&auto=format&fit=crop",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum Background {
    /// URL of a built-in image.
    Preset(String),
    /// A user image inlined as a `data:` URI.
    Upload(String),
}

impl Background {
    pub fn preset(index: usize) -> Option<Self> {
        PRESETS.get(index).map(|url| Background::Preset((*url).to_string()))
    }

    pub fn restore_default() -> Self {
        Background::Preset(PRESETS[0].to_string())
    }

    /// Inline an image file as a base64 `data:` URI.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read.
    pub fn from_file(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Ok(Background::Upload(data_uri(mime_for(path), &bytes)))
    }

    /// The string a renderer would put in `url(...)`.
    pub fn value(&self) -> &str {
        match self {
            Background::Preset(v) | Background::Upload(v) => v,
        }
    }
}

impl Default for Background {
    fn default() -> Self {
        Self::restore_default()
    }
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        Some("svg") => "image/svg+xml",
        Some("bmp") => "image/bmp",
        _ => "application/octet-stream",
    }
}

fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {what} '{value}' (expected one of: {expected})")]
pub struct UnknownChoice {
    what: &'static str,
    value: String,
    expected: &'static str,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        })
    }
}

impl FromStr for Theme {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(UnknownChoice {
                what: "theme",
                value: s.to_string(),
                expected: "light, dark",
            }),
        }
    }
}

/// Outline of the timer panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    Rounded,
    Square,
    Circle,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Shape::Rounded => "rounded",
            Shape::Square => "square",
            Shape::Circle => "circle",
        })
    }
}

impl FromStr for Shape {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rounded" => Ok(Shape::Rounded),
            "square" => Ok(Shape::Square),
            "circle" => Ok(Shape::Circle),
            _ => Err(UnknownChoice {
                what: "shape",
                value: s.to_string(),
                expected: "rounded, square, circle",
            }),
        }
    }
}

/// Image URLs for the panel buttons. Empty means the built-in glyph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Icons {
    pub reset: String,
    pub settings: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconSlot {
    Reset,
    Settings,
}

impl FromStr for IconSlot {
    type Err = UnknownChoice;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "reset" => Ok(IconSlot::Reset),
            "settings" => Ok(IconSlot::Settings),
            _ => Err(UnknownChoice {
                what: "icon",
                value: s.to_string(),
                expected: "reset, settings",
            }),
        }
    }
}

/// `#rgb` or `#rrggbb`.
pub fn is_hex_color(s: &str) -> bool {
    s.strip_prefix('#').is_some_and(|hex| {
        matches!(hex.len(), 3 | 6) && hex.chars().all(|c| c.is_ascii_hexdigit())
    })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Appearance {
    pub font: String,
    pub font_color: String,
    pub theme: Theme,
    pub shape: Shape,
    /// Free text shown under the clock.
    pub goal: String,
    pub icons: Icons,
    pub background: Background,
}

impl Default for Appearance {
    fn default() -> Self {
        Self {
            font: DEFAULT_FONT.to_string(),
            font_color: DEFAULT_FONT_COLOR.to_string(),
            theme: Theme::default(),
            shape: Shape::default(),
            goal: String::new(),
            icons: Icons::default(),
            background: Background::default(),
        }
    }
}

impl Appearance {
    /// Set the font family. Blank input leaves the current font alone.
    pub fn set_font(&mut self, font: &str) -> bool {
        let font = font.trim();
        if font.is_empty() {
            return false;
        }
        self.font = font.to_string();
        true
    }

    /// Set the text color. Anything but a hex color is refused.
    pub fn set_font_color(&mut self, color: &str) -> bool {
        let color = color.trim();
        if !is_hex_color(color) {
            return false;
        }
        self.font_color = color.to_ascii_lowercase();
        true
    }

    pub fn set_goal(&mut self, goal: &str) {
        self.goal = goal.trim().to_string();
    }

    /// Point a button at a custom image; blank restores the built-in glyph.
    pub fn set_icon(&mut self, slot: IconSlot, url: &str) {
        let url = url.trim().to_string();
        match slot {
            IconSlot::Reset => self.icons.reset = url,
            IconSlot::Settings => self.icons.settings = url,
        }
    }

    pub fn select_preset(&mut self, index: usize) -> bool {
        match Background::preset(index) {
            Some(bg) => {
                self.background = bg;
                true
            }
            None => false,
        }
    }

    pub fn restore_background(&mut self) {
        self.background = Background::restore_default();
    }

    /// Replace values a hand-edited file may have broken.
    pub fn sanitize(&mut self) {
        if self.font.trim().is_empty() {
            self.font = DEFAULT_FONT.to_string();
        }
        if !is_hex_color(&self.font_color) {
            self.font_color = DEFAULT_FONT_COLOR.to_string();
        }
    }
}

impl BackgroundProvider for Appearance {
    fn background(&self) -> &Background {
        &self.background
    }
}
