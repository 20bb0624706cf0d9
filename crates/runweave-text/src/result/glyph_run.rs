//! Glyph runs
//!
//! Normalised shaped output for one script run. Glyphs are stored in
//! logical order with character indices relative to the run start.

use std::ops::Range;

use crate::font::Fixed;
use crate::geometry::FixedRect;
use crate::shaping::{GlyphRotation, RunOrientation, Script, TextDirection};

/// Glyph offset in the logical frame (x inline, y block, downwards)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct GlyphOffset {
    pub x: Fixed,
    pub y: Fixed,
}

/// One positioned glyph
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GlyphData {
    /// Glyph ID in the font (0 is `.notdef`)
    pub glyph_id: u32,
    /// First character of the glyph's cluster, relative to the run start
    pub character_index: u32,
    /// Reshaping is not needed when breaking before this glyph
    pub safe_to_break_before: bool,
    /// Inline advance
    pub advance: Fixed,
    pub offset: GlyphOffset,
    /// Ink box relative to the glyph's visual pen position
    pub ink: Option<FixedRect>,
}

impl GlyphData {
    /// Zero-advance stand-in for a run the backend returned nothing for
    pub(crate) fn placeholder() -> Self {
        Self {
            glyph_id: 0,
            character_index: 0,
            safe_to_break_before: true,
            advance: Fixed::ZERO,
            offset: GlyphOffset::default(),
            ink: None,
        }
    }
}

/// Shaped glyphs of one script run
#[derive(Debug, Clone, PartialEq)]
pub struct GlyphRun {
    pub(crate) start_index: u32,
    pub(crate) num_characters: u32,
    pub(crate) script: Script,
    pub(crate) orientation: RunOrientation,
    pub(crate) direction: TextDirection,
    pub(crate) glyphs: Vec<GlyphData>,
    pub(crate) width: Fixed,
}

impl GlyphRun {
    pub(crate) fn new(
        start_index: u32,
        num_characters: u32,
        script: Script,
        orientation: RunOrientation,
        direction: TextDirection,
        glyphs: Vec<GlyphData>,
    ) -> Self {
        let width = glyphs.iter().map(|g| g.advance).sum();
        Self {
            start_index,
            num_characters,
            script,
            orientation,
            direction,
            glyphs,
            width,
        }
    }

    /// Absolute offset of the first character
    pub fn start_index(&self) -> u32 {
        self.start_index
    }

    /// Absolute offset past the last character
    pub fn end_index(&self) -> u32 {
        self.start_index + self.num_characters
    }

    pub fn num_characters(&self) -> u32 {
        self.num_characters
    }

    pub fn script(&self) -> Script {
        self.script
    }

    pub fn orientation(&self) -> RunOrientation {
        self.orientation
    }

    /// Rotation a renderer applies to every glyph
    pub fn rotation(&self) -> GlyphRotation {
        self.orientation.glyph_rotation()
    }

    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    pub fn is_rtl(&self) -> bool {
        self.direction.is_rtl()
    }

    pub fn width(&self) -> Fixed {
        self.width
    }

    /// Glyphs in logical order
    pub fn glyphs(&self) -> &[GlyphData] {
        &self.glyphs
    }

    /// Glyphs in the order they are drawn
    pub fn visual_glyphs(&self) -> impl Iterator<Item = &GlyphData> + '_ {
        let rtl = self.is_rtl();
        let len = self.glyphs.len();
        (0..len).map(move |i| &self.glyphs[if rtl { len - 1 - i } else { i }])
    }

    /// Clusters in logical order
    pub fn clusters(&self) -> Clusters<'_> {
        Clusters { run: self, glyph: 0 }
    }

    pub(crate) fn recompute_width(&mut self) {
        self.width = self.glyphs.iter().map(|g| g.advance).sum();
    }
}

/// Characters shaped as one indivisible glyph sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cluster {
    /// First character, relative to the run
    pub start: u32,
    /// Past the last character, relative to the run
    pub end: u32,
    /// Glyph indices into [`GlyphRun::glyphs`]
    pub glyphs: Range<usize>,
    pub advance: Fixed,
    pub safe_to_break_before: bool,
}

impl Cluster {
    pub fn num_characters(&self) -> u32 {
        self.end - self.start
    }
}

/// Iterator over the clusters of a run
#[derive(Debug, Clone)]
pub struct Clusters<'a> {
    run: &'a GlyphRun,
    glyph: usize,
}

impl Iterator for Clusters<'_> {
    type Item = Cluster;

    fn next(&mut self) -> Option<Cluster> {
        let glyphs = &self.run.glyphs;
        let first = glyphs.get(self.glyph)?;
        let start = first.character_index;

        let mut end_glyph = self.glyph + 1;
        let mut advance = first.advance;
        while let Some(g) = glyphs.get(end_glyph) {
            if g.character_index != start {
                break;
            }
            advance += g.advance;
            end_glyph += 1;
        }
        let end = glyphs
            .get(end_glyph)
            .map_or(self.run.num_characters, |g| g.character_index);

        let cluster = Cluster {
            start,
            end,
            glyphs: self.glyph..end_glyph,
            advance,
            safe_to_break_before: first.safe_to_break_before,
        };
        self.glyph = end_glyph;
        Some(cluster)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(character_index: u32, advance: i32) -> GlyphData {
        GlyphData {
            glyph_id: 1,
            character_index,
            safe_to_break_before: true,
            advance: Fixed::from_i32(advance),
            offset: GlyphOffset::default(),
            ink: None,
        }
    }

    fn run(direction: TextDirection) -> GlyphRun {
        GlyphRun::new(
            10,
            5,
            Script::Latin,
            RunOrientation::Horizontal,
            direction,
            vec![glyph(0, 4), glyph(1, 6), glyph(1, 0), glyph(3, 5)],
        )
    }

    #[test]
    fn test_run_width_and_range() {
        let run = run(TextDirection::LeftToRight);
        assert_eq!(run.width(), Fixed::from_i32(15));
        assert_eq!(run.end_index(), 15);
        assert_eq!(run.num_characters(), 5);
    }

    #[test]
    fn test_clusters_group_glyphs() {
        let clusters: Vec<Cluster> = run(TextDirection::LeftToRight).clusters().collect();
        assert_eq!(clusters.len(), 3);
        assert_eq!((clusters[1].start, clusters[1].end), (1, 3));
        assert_eq!(clusters[1].glyphs, 1..3);
        assert_eq!(clusters[1].advance, Fixed::from_i32(6));
        assert_eq!((clusters[2].start, clusters[2].end), (3, 5));
    }

    #[test]
    fn test_visual_glyphs_reverse_for_rtl() {
        let run = run(TextDirection::RightToLeft);
        let order: Vec<u32> = run.visual_glyphs().map(|g| g.character_index).collect();
        assert_eq!(order, vec![3, 1, 1, 0]);
    }
}
