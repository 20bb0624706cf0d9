//! Table-driven glyph backend
//!
//! A deterministic font described entirely by tables of advances, ligatures
//! and kerning pairs. It needs no font file, so layout code can be exercised
//! headless with metrics that are known exactly.

use std::collections::{HashMap, HashSet};

use unicode_script::{Script, UnicodeScript};
use unicode_segmentation::UnicodeSegmentation;

use super::{GlyphBackend, ShapeRequest, is_default_ignorable};
use crate::buffer::CharIndices;
use crate::shaping::run::{GlyphExtents, ShapedGlyph, ShapedRun};

/// Glyph IDs at and above this value are ligatures
pub const LIGATURE_GLYPH_BASE: u32 = 0x11_0000;

/// Glyph used for default-ignorable characters
const BLANK_GLYPH: u32 = 0x20;

#[derive(Debug, Clone)]
struct Ligature {
    sequence: Vec<char>,
    advance: i32,
    discretionary: bool,
}

/// Glyph plus the characters it covers, before ordering
struct LogicalGlyph {
    glyph: ShapedGlyph,
    first: char,
    last: char,
}

/// Deterministic backend with per-character metrics
#[derive(Debug, Clone)]
pub struct MetricsBackend {
    units_per_em: u16,
    default_advance: i32,
    advances: HashMap<char, i32>,
    ligatures: Vec<Ligature>,
    kerning: HashMap<(char, char), i32>,
    missing: HashSet<char>,
}

impl MetricsBackend {
    /// Font with every glyph half an em wide
    pub fn new(units_per_em: u16) -> Self {
        Self {
            units_per_em,
            default_advance: units_per_em as i32 / 2,
            advances: HashMap::new(),
            ligatures: Vec::new(),
            kerning: HashMap::new(),
            missing: HashSet::new(),
        }
    }

    /// Advance for characters without their own entry
    pub fn with_default_advance(mut self, advance: i32) -> Self {
        self.default_advance = advance;
        self
    }

    /// Advance for one character
    pub fn with_advance(mut self, c: char, advance: i32) -> Self {
        self.advances.insert(c, advance);
        self
    }

    /// Ligature formed from `sequence`, gated by `liga` or `dlig`
    pub fn with_ligature(mut self, sequence: &str, advance: i32, discretionary: bool) -> Self {
        self.ligatures.push(Ligature {
            sequence: sequence.chars().collect(),
            advance,
            discretionary,
        });
        self
    }

    /// Kerning adjustment between two characters
    pub fn with_kerning(mut self, left: char, right: char, value: i32) -> Self {
        self.kerning.insert((left, right), value);
        self
    }

    /// Character the font has no glyph for
    pub fn without_glyph(mut self, c: char) -> Self {
        self.missing.insert(c);
        self
    }

    fn advance_of(&self, c: char) -> i32 {
        self.advances.get(&c).copied().unwrap_or(self.default_advance)
    }

    fn ink(&self, advance: i32) -> Option<GlyphExtents> {
        let upem = self.units_per_em as i32;
        Some(GlyphExtents {
            x_min: advance / 20,
            y_min: -upem / 10,
            x_max: advance - advance / 20,
            y_max: upem * 7 / 10,
        })
    }

    /// Longest enabled ligature starting at `chars[0]`
    fn match_ligature(&self, chars: &[char], request: &ShapeRequest<'_>) -> Option<(usize, &Ligature)> {
        let settings = request.font.ligatures;
        self.ligatures
            .iter()
            .enumerate()
            .filter(|(_, lig)| if lig.discretionary { settings.discretionary } else { settings.common })
            .filter(|(_, lig)| !lig.sequence.is_empty() && chars.starts_with(&lig.sequence))
            .max_by_key(|(index, lig)| (lig.sequence.len(), std::cmp::Reverse(*index)))
    }

    fn glyph_for(&self, c: char, cluster: u32) -> ShapedGlyph {
        if is_default_ignorable(c) {
            return ShapedGlyph::new(BLANK_GLYPH, cluster, 0);
        }
        if self.missing.contains(&c) || c.script() == Script::Unknown {
            let advance = self.default_advance;
            return ShapedGlyph {
                extents: self.ink(advance),
                ..ShapedGlyph::new(0, cluster, advance)
            };
        }
        if c.script() == Script::Inherited {
            let upem = self.units_per_em as i32;
            let width = self.default_advance;
            return ShapedGlyph {
                extents: Some(GlyphExtents {
                    x_min: -width * 3 / 10,
                    y_min: upem * 6 / 10,
                    x_max: -width / 10,
                    y_max: upem * 8 / 10,
                }),
                ..ShapedGlyph::new(c as u32, cluster, 0)
            };
        }
        let advance = self.advance_of(c);
        ShapedGlyph {
            extents: if c.is_whitespace() { None } else { self.ink(advance) },
            ..ShapedGlyph::new(c as u32, cluster, advance)
        }
    }
}

impl GlyphBackend for MetricsBackend {
    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn shape(&self, request: &ShapeRequest<'_>) -> ShapedRun {
        let chars: Vec<char> = CharIndices::new(request.text, 0).map(|(_, c)| c).collect();

        // Every character of a grapheme maps to the grapheme's first code unit
        let text: String = chars.iter().collect();
        let mut clusters = Vec::with_capacity(chars.len());
        let mut offset = 0u32;
        for grapheme in text.graphemes(true) {
            let start = offset;
            for c in grapheme.chars() {
                clusters.push(start);
                offset += c.len_utf16() as u32;
            }
        }

        let mut glyphs: Vec<LogicalGlyph> = Vec::with_capacity(chars.len());
        let mut i = 0;
        while i < chars.len() {
            if let Some((index, lig)) = self.match_ligature(&chars[i..], request) {
                let len = lig.sequence.len();
                glyphs.push(LogicalGlyph {
                    glyph: ShapedGlyph {
                        extents: self.ink(lig.advance),
                        ..ShapedGlyph::new(LIGATURE_GLYPH_BASE + index as u32, clusters[i], lig.advance)
                    },
                    first: chars[i],
                    last: chars[i + len - 1],
                });
                i += len;
            } else {
                glyphs.push(LogicalGlyph {
                    glyph: self.glyph_for(chars[i], clusters[i]),
                    first: chars[i],
                    last: chars[i],
                });
                i += 1;
            }
        }

        if request.font.kerning && request.direction.is_horizontal() {
            for k in 1..glyphs.len() {
                let pair = (glyphs[k - 1].last, glyphs[k].first);
                if let Some(&value) = self.kerning.get(&pair) {
                    glyphs[k - 1].glyph.x_advance += value;
                    glyphs[k].glyph.unsafe_to_break = true;
                }
            }
        }

        let mut output: Vec<ShapedGlyph> = glyphs.into_iter().map(|g| g.glyph).collect();

        if request.direction.is_vertical() {
            let upem = self.units_per_em as i32;
            for glyph in &mut output {
                let width = glyph.x_advance;
                glyph.y_advance = if width == 0 { 0 } else { -upem };
                glyph.x_advance = 0;
                glyph.x_offset = -width / 2;
                glyph.y_offset = -upem * 880 / 1000;
            }
        }

        if request.direction.is_backward() {
            output.reverse();
        }

        ShapedRun::new(output, self.units_per_em)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::{FontDescription, LigatureSettings};
    use crate::shaping::backend::Direction;

    fn request<'a>(text: &'a [u16], direction: Direction, font: &'a FontDescription) -> ShapeRequest<'a> {
        ShapeRequest {
            text,
            script: Script::Latin,
            direction,
            language: None,
            font,
        }
    }

    fn utf16(text: &str) -> Vec<u16> {
        text.encode_utf16().collect()
    }

    #[test]
    fn test_plain_advances() {
        let backend = MetricsBackend::new(1000).with_advance('i', 250);
        let font = FontDescription::default();
        let text = utf16("hi");
        let run = backend.shape(&request(&text, Direction::LeftToRight, &font));
        assert_eq!(run.len(), 2);
        assert_eq!(run.glyphs[0].x_advance, 500);
        assert_eq!(run.glyphs[1].x_advance, 250);
        assert_eq!(run.glyphs[1].cluster, 1);
    }

    #[test]
    fn test_ligature_respects_settings() {
        let backend = MetricsBackend::new(1000)
            .with_ligature("ff", 800, false)
            .with_ligature("ffi", 1000, false)
            .with_ligature("st", 700, true);
        let text = utf16("ffist");

        let font = FontDescription::default();
        let run = backend.shape(&request(&text, Direction::LeftToRight, &font));
        let ids: Vec<u32> = run.glyphs.iter().map(|g| g.glyph_id).collect();
        assert_eq!(ids, vec![LIGATURE_GLYPH_BASE + 1, 's' as u32, 't' as u32]);

        let font = FontDescription::default().ligatures(LigatureSettings {
            common: false,
            discretionary: true,
        });
        let run = backend.shape(&request(&text, Direction::LeftToRight, &font));
        assert_eq!(run.len(), 4);
        assert_eq!(run.glyphs[3].glyph_id, LIGATURE_GLYPH_BASE + 2);
        assert_eq!(run.glyphs[3].cluster, 3);
    }

    #[test]
    fn test_kerning_marks_unsafe() {
        let backend = MetricsBackend::new(1000).with_kerning('A', 'V', -80);
        let text = utf16("AVA");
        let font = FontDescription::default();
        let run = backend.shape(&request(&text, Direction::LeftToRight, &font));
        assert_eq!(run.glyphs[0].x_advance, 420);
        assert!(run.glyphs[1].unsafe_to_break);
        assert!(!run.glyphs[2].unsafe_to_break);

        let run = backend.shape(&request(&text, Direction::LeftToRight, &font.kerning(false)));
        assert_eq!(run.glyphs[0].x_advance, 500);
    }

    #[test]
    fn test_rtl_output_is_visual() {
        let backend = MetricsBackend::new(1000);
        let text = utf16("\u{5D0}\u{5D1}");
        let font = FontDescription::default();
        let run = backend.shape(&request(&text, Direction::RightToLeft, &font));
        assert_eq!(run.glyphs[0].cluster, 1);
        assert_eq!(run.glyphs[1].cluster, 0);
    }

    #[test]
    fn test_missing_and_ignorable() {
        let backend = MetricsBackend::new(1000).without_glyph('x');
        let text = utf16("x\u{FFF0}0\u{FE0E}");
        let font = FontDescription::default();
        let run = backend.shape(&request(&text, Direction::LeftToRight, &font));
        assert_eq!(run.glyphs[0].glyph_id, 0);
        assert_eq!(run.glyphs[1].glyph_id, 0);
        assert_eq!(run.glyphs[3].glyph_id, BLANK_GLYPH);
        assert_eq!(run.glyphs[3].x_advance, 0);
        assert_eq!(run.glyphs[3].cluster, 2);
        assert!(run.glyphs[3].extents.is_none());
    }

    #[test]
    fn test_vertical_metrics() {
        let backend = MetricsBackend::new(1000);
        let text = utf16("\u{65E5}");
        let font = FontDescription::default();
        let run = backend.shape(&request(&text, Direction::TopToBottom, &font));
        let glyph = run.glyphs[0];
        assert_eq!((glyph.x_advance, glyph.y_advance), (0, -1000));
        assert_eq!((glyph.x_offset, glyph.y_offset), (-250, -880));
    }
}
