//! runweave Text - Text Shaping Engine
//!
//! This crate turns a range of UTF-16 text, a font and a direction into
//! positioned glyph runs:
//! - Script and orientation segmentation (unicode-script, unicode-segmentation)
//! - Shaping through a pluggable glyph backend (rustybuzz, or a table-driven
//!   backend for headless tests)
//! - Shape results with exact fixed-point metrics, offset/position queries and
//!   safe-to-break offsets
//! - Range composition: copying sub-ranges of results into new results that
//!   measure exactly like a direct shape
//! - Shared, copy-on-write result handles and an LRU shape cache

pub mod buffer;
pub mod font;
pub mod geometry;
pub mod result;
pub mod shaping;

pub use buffer::TextBuffer;
pub use font::{
    Fixed, Font, FontDatabase, FontDescription, FontId, FontKey, FontOrientation, FontQuery,
    FontStyle, FontWeight, LigatureSettings,
};
pub use geometry::FloatRect;
pub use result::{CharacterRange, GlyphData, GlyphRun, ShapeResult, SharedShapeResult, Spacing};
pub use shaping::{
    GlyphBackend, MetricsBackend, RunOrientation, RunSegmenter, RustybuzzBackend, Script,
    ScriptRun, ShapeCache, ShaperConfig, TextDirection, TextShaper,
};

/// Text shaping error types
#[derive(Debug, thiserror::Error)]
pub enum TextError {
    #[error("Font not found: {0}")]
    FontNotFound(String),

    #[error("Failed to parse font: {0}")]
    FontParsing(String),

    #[error("Font I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TextError>;
