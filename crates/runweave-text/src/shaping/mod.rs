//! Text shaping module

pub mod backend;
pub mod cache;
pub mod orientation;
mod run;
pub mod script;
mod shaper;

pub use backend::{Direction, GlyphBackend, MetricsBackend, RustybuzzBackend, ShapeRequest};
pub use cache::{ShapeCache, ShapeCacheStats};
pub use orientation::{FontOrientation, GlyphRotation, RunOrientation};
pub use run::{GlyphExtents, ShapedGlyph, ShapedRun};
pub use script::{RunSegmenter, Script, ScriptRun};
pub use shaper::{ShaperConfig, TextShaper};

/// Inline direction of a shape result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TextDirection {
    #[default]
    LeftToRight,
    RightToLeft,
}

impl TextDirection {
    pub fn is_rtl(self) -> bool {
        matches!(self, Self::RightToLeft)
    }

    /// Backend direction for a run of the given orientation
    pub fn shaping_direction(self, orientation: RunOrientation) -> Direction {
        match (orientation, self) {
            (RunOrientation::Upright, _) => Direction::TopToBottom,
            (_, Self::LeftToRight) => Direction::LeftToRight,
            (_, Self::RightToLeft) => Direction::RightToLeft,
        }
    }
}
