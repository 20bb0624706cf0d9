//! Font loading and matching module

mod database;
pub mod fixed_point;
mod matching;

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

pub use database::FontDatabase;
pub use fixed_point::Fixed;
pub use matching::{FontQuery, resolve_generic_family};

pub use crate::shaping::orientation::FontOrientation;
use crate::shaping::backend::GlyphBackend;

/// Identifier of a face inside the [`FontDatabase`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub fontdb::ID);

/// Process-unique identity of a loaded [`Font`] backend, used in cache keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FontKey(pub u32);

impl FontKey {
    fn next() -> Self {
        static NEXT: AtomicU32 = AtomicU32::new(1);
        FontKey(NEXT.fetch_add(1, Ordering::Relaxed))
    }
}

/// Font weight (100-900)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FontWeight(pub u16);

impl FontWeight {
    pub const THIN: FontWeight = FontWeight(100);
    pub const LIGHT: FontWeight = FontWeight(300);
    pub const NORMAL: FontWeight = FontWeight(400);
    pub const MEDIUM: FontWeight = FontWeight(500);
    pub const BOLD: FontWeight = FontWeight(700);
    pub const BLACK: FontWeight = FontWeight(900);
}

impl From<u16> for FontWeight {
    fn from(value: u16) -> Self {
        FontWeight(value.clamp(100, 900))
    }
}

/// Font style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
    Oblique,
}

impl From<FontStyle> for fontdb::Style {
    fn from(style: FontStyle) -> Self {
        match style {
            FontStyle::Normal => fontdb::Style::Normal,
            FontStyle::Italic => fontdb::Style::Italic,
            FontStyle::Oblique => fontdb::Style::Oblique,
        }
    }
}

/// Which ligature families the backend may form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LigatureSettings {
    /// `liga` / `clig`
    pub common: bool,
    /// `dlig`
    pub discretionary: bool,
}

impl Default for LigatureSettings {
    fn default() -> Self {
        Self {
            common: true,
            discretionary: false,
        }
    }
}

/// Size and shaping-relevant style of a font
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FontDescription {
    /// Font size in pixels per em
    pub size: f32,
    /// Vertical / horizontal orientation
    pub orientation: FontOrientation,
    /// Ligature features
    pub ligatures: LigatureSettings,
    /// Apply `kern`
    pub kerning: bool,
}

impl FontDescription {
    pub fn new(size: f32) -> Self {
        Self {
            size,
            ..Self::default()
        }
    }

    /// Set orientation
    pub fn orientation(mut self, orientation: FontOrientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// Set ligature features
    pub fn ligatures(mut self, ligatures: LigatureSettings) -> Self {
        self.ligatures = ligatures;
        self
    }

    /// Enable or disable kerning
    pub fn kerning(mut self, kerning: bool) -> Self {
        self.kerning = kerning;
        self
    }

    /// Size scaled to avoid float hashing
    pub(crate) fn size_key(&self) -> u32 {
        (self.size * 100.0).round().max(0.0) as u32
    }
}

impl Default for FontDescription {
    fn default() -> Self {
        Self {
            size: 16.0,
            orientation: FontOrientation::Horizontal,
            ligatures: LigatureSettings::default(),
            kerning: true,
        }
    }
}

/// A glyph backend paired with the description it is shaped at
#[derive(Clone)]
pub struct Font {
    key: FontKey,
    backend: Arc<dyn GlyphBackend>,
    description: FontDescription,
}

impl Font {
    /// Create a font from a backend
    pub fn new(backend: Arc<dyn GlyphBackend>, description: FontDescription) -> Self {
        Self {
            key: FontKey::next(),
            backend,
            description,
        }
    }

    /// Same backend at a different description. The key is kept since the
    /// description is part of every cache key anyway.
    pub fn with_description(&self, description: FontDescription) -> Self {
        Self {
            key: self.key,
            backend: Arc::clone(&self.backend),
            description,
        }
    }

    pub fn key(&self) -> FontKey {
        self.key
    }

    pub fn backend(&self) -> &dyn GlyphBackend {
        self.backend.as_ref()
    }

    pub fn description(&self) -> &FontDescription {
        &self.description
    }

    /// Pixels per font unit
    pub fn scale(&self) -> f32 {
        let units_per_em = self.backend.units_per_em();
        if units_per_em == 0 {
            1.0
        } else {
            self.description.size / units_per_em as f32
        }
    }
}

impl fmt::Debug for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Font")
            .field("key", &self.key)
            .field("units_per_em", &self.backend.units_per_em())
            .field("description", &self.description)
            .finish()
    }
}
