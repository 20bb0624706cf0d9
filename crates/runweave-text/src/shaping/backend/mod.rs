//! Glyph backends
//!
//! The one seam between the engine and a font engine. A backend receives the
//! code units of a single script run and returns glyphs in font units.

mod harfbuzz;
mod metrics;

pub use harfbuzz::RustybuzzBackend;
pub use metrics::MetricsBackend;

use super::run::ShapedRun;
use super::script::Script;
use crate::font::FontDescription;

/// Shaping direction handed to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Direction {
    #[default]
    LeftToRight,
    RightToLeft,
    TopToBottom,
    BottomToTop,
}

impl Direction {
    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::LeftToRight | Self::RightToLeft)
    }

    pub fn is_vertical(self) -> bool {
        !self.is_horizontal()
    }

    /// Glyphs come back in reverse logical order
    pub fn is_backward(self) -> bool {
        matches!(self, Self::RightToLeft | Self::BottomToTop)
    }
}

impl From<Direction> for rustybuzz::Direction {
    fn from(d: Direction) -> Self {
        match d {
            Direction::LeftToRight => rustybuzz::Direction::LeftToRight,
            Direction::RightToLeft => rustybuzz::Direction::RightToLeft,
            Direction::TopToBottom => rustybuzz::Direction::TopToBottom,
            Direction::BottomToTop => rustybuzz::Direction::BottomToTop,
        }
    }
}

/// One backend call: a single script run
#[derive(Debug, Clone, Copy)]
pub struct ShapeRequest<'a> {
    /// UTF-16 code units of the run; clusters are relative to this slice
    pub text: &'a [u16],
    pub script: Script,
    pub direction: Direction,
    /// BCP 47 language tag
    pub language: Option<&'a str>,
    pub font: &'a FontDescription,
}

/// Capability interface implemented per font engine.
///
/// Must be deterministic for a fixed font: the same request always yields
/// the same glyphs.
pub trait GlyphBackend: Send + Sync {
    /// Design units per em of the face
    fn units_per_em(&self) -> u16;

    /// Shape one run. Glyphs are returned in visual order for the request
    /// direction, with `.notdef` (glyph 0) for characters the font lacks.
    fn shape(&self, request: &ShapeRequest<'_>) -> ShapedRun;
}

/// Characters that are never rendered and get a zero-advance blank glyph
/// when the font has nothing for them
pub fn is_default_ignorable(c: char) -> bool {
    matches!(c,
        '\u{00AD}' |                // Soft hyphen
        '\u{034F}' |                // Combining grapheme joiner
        '\u{180B}'..='\u{180F}' |   // Mongolian variation selectors
        '\u{200B}'..='\u{200F}' |   // ZWSP, ZWNJ, ZWJ, LRM, RLM
        '\u{202A}'..='\u{202E}' |   // Bidi embedding controls
        '\u{2060}'..='\u{206F}' |   // Word joiner, invisible operators
        '\u{FE00}'..='\u{FE0F}' |   // Variation selectors
        '\u{FEFF}' |                // BOM
        '\u{E0000}'..='\u{E0FFF}'   // Tags, variation selectors supplement
    )
}
