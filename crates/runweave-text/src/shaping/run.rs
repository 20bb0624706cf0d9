//! Shaped text run
//!
//! Raw backend output in font units, before it is scaled and normalised
//! into a [`GlyphRun`](crate::result::GlyphRun).

/// Glyph ink box in font units, y pointing up
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphExtents {
    pub x_min: i32,
    pub y_min: i32,
    pub x_max: i32,
    pub y_max: i32,
}

/// A shaped glyph with position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShapedGlyph {
    /// Glyph ID in the font (0 is `.notdef`)
    pub glyph_id: u32,
    /// Cluster index, relative to the start of the request text
    pub cluster: u32,
    /// Horizontal advance (in font units)
    pub x_advance: i32,
    /// Vertical advance (in font units, negative going down)
    pub y_advance: i32,
    /// X offset from current position (in font units)
    pub x_offset: i32,
    /// Y offset from current position (in font units)
    pub y_offset: i32,
    /// Breaking right before this glyph would change shaping
    pub unsafe_to_break: bool,
    /// Ink box, `None` for blank glyphs
    pub extents: Option<GlyphExtents>,
}

impl ShapedGlyph {
    /// Glyph with a horizontal advance and no offsets
    pub fn new(glyph_id: u32, cluster: u32, x_advance: i32) -> Self {
        Self {
            glyph_id,
            cluster,
            x_advance,
            y_advance: 0,
            x_offset: 0,
            y_offset: 0,
            unsafe_to_break: false,
            extents: None,
        }
    }
}

/// A run of shaped glyphs, in visual order
#[derive(Debug, Clone, Default)]
pub struct ShapedRun {
    /// The shaped glyphs
    pub glyphs: Vec<ShapedGlyph>,
    /// Units per em from the font
    pub units_per_em: u16,
}

impl ShapedRun {
    /// Create a new shaped run
    pub fn new(glyphs: Vec<ShapedGlyph>, units_per_em: u16) -> Self {
        Self { glyphs, units_per_em }
    }

    /// Number of glyphs
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}
