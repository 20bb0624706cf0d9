//! Vertical Text Orientation
//!
//! Decides which characters stand upright and which are set sideways when
//! a font is used in a vertical writing mode.

/// How a font lays glyphs out along the inline axis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FontOrientation {
    /// Horizontal text
    #[default]
    Horizontal,
    /// Vertical, ideographs upright and other scripts rotated
    VerticalMixed,
    /// Vertical, every character upright
    VerticalUpright,
    /// Vertical, every character rotated 90° clockwise
    VerticalRotated,
}

impl FontOrientation {
    /// Check if vertical
    pub fn is_vertical(&self) -> bool {
        !matches!(self, Self::Horizontal)
    }

    /// Orientation of one character under this mode
    pub fn resolve(&self, c: char) -> RunOrientation {
        match self {
            Self::Horizontal => RunOrientation::Horizontal,
            Self::VerticalUpright => RunOrientation::Upright,
            Self::VerticalRotated => RunOrientation::Rotated,
            Self::VerticalMixed => {
                if is_upright_in_mixed(c) {
                    RunOrientation::Upright
                } else {
                    RunOrientation::Rotated
                }
            }
        }
    }
}

/// Orientation a script run is shaped in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RunOrientation {
    #[default]
    Horizontal,
    /// Shaped top-to-bottom with vertical metrics
    Upright,
    /// Shaped horizontally, drawn rotated 90° clockwise
    Rotated,
}

impl RunOrientation {
    /// Runs that advance along the y axis of the font
    pub fn is_upright(&self) -> bool {
        matches!(self, Self::Upright)
    }

    /// Rotation the renderer applies to each glyph of the run
    pub fn glyph_rotation(&self) -> GlyphRotation {
        match self {
            Self::Rotated => GlyphRotation::Cw90,
            Self::Horizontal | Self::Upright => GlyphRotation::None,
        }
    }
}

/// Glyph rotation for vertical text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphRotation {
    /// No rotation (upright)
    None,
    /// Rotate 90° clockwise
    Cw90,
}

impl GlyphRotation {
    /// Get rotation angle in degrees
    pub fn degrees(&self) -> f32 {
        match self {
            Self::None => 0.0,
            Self::Cw90 => 90.0,
        }
    }
}

/// Check if character should be upright in mixed orientation
pub fn is_upright_in_mixed(c: char) -> bool {
    is_cjk(c) || is_cjk_punctuation(c)
}

/// Ideographs, kana, hangul, bopomofo and Yi
fn is_cjk(c: char) -> bool {
    matches!(c,
        '\u{1100}'..='\u{11FF}' |   // Hangul Jamo
        '\u{2E80}'..='\u{2FDF}' |   // CJK Radicals, Kangxi Radicals
        '\u{3040}'..='\u{309F}' |   // Hiragana
        '\u{30A0}'..='\u{30FF}' |   // Katakana
        '\u{3100}'..='\u{312F}' |   // Bopomofo
        '\u{3130}'..='\u{318F}' |   // Hangul Compatibility Jamo
        '\u{31A0}'..='\u{31FF}' |   // Bopomofo Extended, Katakana Phonetic Extensions
        '\u{3400}'..='\u{4DBF}' |   // CJK Extension A
        '\u{4E00}'..='\u{9FFF}' |   // CJK Unified Ideographs
        '\u{A000}'..='\u{A4CF}' |   // Yi
        '\u{AC00}'..='\u{D7AF}' |   // Hangul Syllables
        '\u{F900}'..='\u{FAFF}' |   // CJK Compatibility Ideographs
        '\u{20000}'..='\u{2FA1F}'   // CJK Extensions B-F, Compatibility Supplement
    )
}

/// Check if character is CJK punctuation or a fullwidth form
fn is_cjk_punctuation(c: char) -> bool {
    matches!(c,
        '\u{3000}'..='\u{303F}' |   // CJK Punctuation
        '\u{3200}'..='\u{33FF}' |   // Enclosed CJK, CJK Compatibility
        '\u{FE30}'..='\u{FE4F}' |   // CJK Compatibility Forms
        '\u{FF00}'..='\u{FF60}' |   // Fullwidth Forms
        '\u{FFE0}'..='\u{FFE6}'
    )
}
