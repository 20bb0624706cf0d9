//! Shape results
//!
//! A [`ShapeResult`] is the ordered set of glyph runs covering one character
//! range. All metrics are held in 26.6 fixed point, so a result assembled
//! from pieces measures exactly like one shaped in a single pass.

mod copy_range;
mod glyph_run;
mod spacing;

use std::ops::Deref;
use std::sync::Arc;

pub use glyph_run::{Cluster, Clusters, GlyphData, GlyphOffset, GlyphRun};
pub use spacing::Spacing;

use crate::font::Fixed;
use crate::geometry::{FixedRect, FloatRect, unite_if_non_empty};
use crate::shaping::TextDirection;

/// Horizontal extent of one character, for selection painting
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CharacterRange {
    pub start: f32,
    pub end: f32,
}

impl CharacterRange {
    pub fn width(&self) -> f32 {
        self.end - self.start
    }
}

/// Shaped glyph runs for a character range
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeResult {
    /// Logical order
    runs: Vec<GlyphRun>,
    direction: TextDirection,
    start_index: u32,
    num_characters: u32,
    num_glyphs: u32,
    width: Fixed,
    bounds: Option<FixedRect>,
}

impl ShapeResult {
    /// Empty result anchored at `start_index`
    pub fn new(direction: TextDirection, start_index: u32) -> Self {
        Self {
            runs: Vec::new(),
            direction,
            start_index,
            num_characters: 0,
            num_glyphs: 0,
            width: Fixed::ZERO,
            bounds: None,
        }
    }

    /// Append a run that starts at the current end
    pub(crate) fn push_run(&mut self, run: GlyphRun) {
        debug_assert_eq!(run.start_index(), self.end_index_for_result());
        self.num_characters += run.num_characters();
        self.num_glyphs += run.glyphs().len() as u32;
        self.width += run.width();
        self.runs.push(run);
    }

    /// Recompute the ink box with one pass in visual order
    pub(crate) fn recompute_bounds(&mut self) {
        let mut pen = Fixed::ZERO;
        let mut bounds = None;
        for run in self.visual_runs() {
            for glyph in run.visual_glyphs() {
                if let Some(ink) = glyph.ink {
                    bounds = unite_if_non_empty(bounds, ink.translate_x(pen));
                }
                pen += glyph.advance;
            }
        }
        self.bounds = bounds;
    }

    pub(crate) fn recompute_width(&mut self) {
        self.width = self.runs.iter().map(|r| r.width()).sum();
    }

    /// Runs in logical order
    pub fn runs(&self) -> &[GlyphRun] {
        &self.runs
    }

    /// Runs in the order they are drawn
    pub fn visual_runs(&self) -> impl Iterator<Item = &GlyphRun> + '_ {
        let rtl = self.is_rtl();
        let len = self.runs.len();
        (0..len).map(move |i| &self.runs[if rtl { len - 1 - i } else { i }])
    }

    pub fn direction(&self) -> TextDirection {
        self.direction
    }

    pub fn is_rtl(&self) -> bool {
        self.direction.is_rtl()
    }

    pub fn is_empty(&self) -> bool {
        self.num_characters == 0
    }

    pub fn start_index_for_result(&self) -> u32 {
        self.start_index
    }

    pub fn end_index_for_result(&self) -> u32 {
        self.start_index + self.num_characters
    }

    pub fn num_characters(&self) -> u32 {
        self.num_characters
    }

    pub fn num_glyphs(&self) -> u32 {
        self.num_glyphs
    }

    /// Exact inline advance
    pub fn fixed_width(&self) -> Fixed {
        self.width
    }

    pub fn width(&self) -> f32 {
        self.width.to_f32()
    }

    /// Width rounded up to whole pixels
    pub fn snapped_width(&self) -> i32 {
        self.width.ceil_to_i32()
    }

    /// Ink bounding box; empty when nothing has ink
    pub fn bounds(&self) -> FloatRect {
        self.bounds.map(|b| b.to_float_rect()).unwrap_or_default()
    }

    /// Any glyph shifted off the baseline
    pub fn has_vertical_offsets(&self) -> bool {
        self.runs
            .iter()
            .flat_map(|r| r.glyphs())
            .any(|g| g.offset.y != Fixed::ZERO)
    }

    /// Glyphs that rendered as `.notdef`
    pub fn missing_glyph_count(&self) -> usize {
        self.runs
            .iter()
            .flat_map(|r| r.glyphs())
            .filter(|g| g.glyph_id == 0)
            .count()
    }

    fn clamp_offset(&self, offset: u32) -> u32 {
        debug_assert!(
            offset >= self.start_index && offset <= self.end_index_for_result(),
            "offset {} outside {}..={}",
            offset,
            self.start_index,
            self.end_index_for_result()
        );
        offset.clamp(self.start_index, self.end_index_for_result())
    }

    /// Advance from the logical start to `offset`
    fn logical_advance(&self, offset: u32) -> Fixed {
        let mut advance = Fixed::ZERO;
        for run in &self.runs {
            if offset >= run.end_index() {
                advance += run.width();
                continue;
            }
            let k = offset.saturating_sub(run.start_index());
            for cluster in run.clusters() {
                if k >= cluster.end {
                    advance += cluster.advance;
                } else {
                    if k > cluster.start {
                        advance += cluster.advance.mul_div(k - cluster.start, cluster.num_characters());
                    }
                    break;
                }
            }
            break;
        }
        advance
    }

    fn fixed_position_for_offset(&self, offset: u32) -> Fixed {
        let advance = self.logical_advance(self.clamp_offset(offset));
        if self.is_rtl() { self.width - advance } else { advance }
    }

    /// Distance from the visual start to the caret before `offset`
    pub fn position_for_offset(&self, offset: u32) -> f32 {
        self.fixed_position_for_offset(offset).to_f32()
    }

    /// [`position_for_offset`](Self::position_for_offset) rounded to whole pixels
    pub fn snapped_start_position_for_offset(&self, offset: u32) -> i32 {
        self.fixed_position_for_offset(offset).round_to_i32()
    }

    /// Character offset under `position`.
    ///
    /// Without partial glyphs the offset snaps to the start of the owning
    /// cluster. With them it rounds to the nearest character boundary
    /// inside the cluster.
    pub fn offset_for_position(&self, position: f32, include_partial_glyphs: bool) -> u32 {
        let x = Fixed::from_f32(position).clamp(Fixed::ZERO, self.width);
        let target = if self.is_rtl() { self.width - x } else { x };

        let mut advance = Fixed::ZERO;
        for run in &self.runs {
            if target >= advance + run.width() {
                advance += run.width();
                continue;
            }
            for cluster in run.clusters() {
                if target < advance + cluster.advance {
                    let start = run.start_index() + cluster.start;
                    if !include_partial_glyphs {
                        return start;
                    }
                    let n = cluster.num_characters() as i64;
                    let into = (target - advance).to_bits() as i64;
                    let total = cluster.advance.to_bits() as i64;
                    let index = ((into * n * 2 + total) / (2 * total)).clamp(0, n);
                    return start + index as u32;
                }
                advance += cluster.advance;
            }
        }
        self.end_index_for_result()
    }

    /// Nearest offset at or after `offset` where the text may be split
    /// without reshaping
    pub fn next_safe_to_break_offset(&self, offset: u32) -> u32 {
        let offset = self.clamp_offset(offset);
        self.safe_glyph_offsets()
            .find(|&safe| safe >= offset)
            .unwrap_or_else(|| self.end_index_for_result())
    }

    /// Nearest offset at or before `offset` where the text may be split
    /// without reshaping
    pub fn previous_safe_to_break_offset(&self, offset: u32) -> u32 {
        let offset = self.clamp_offset(offset);
        if offset == self.end_index_for_result() {
            return offset;
        }
        self.safe_glyph_offsets()
            .take_while(|&safe| safe <= offset)
            .last()
            .unwrap_or(self.start_index)
    }

    /// All safe-to-break offsets in ascending order, end included
    pub fn safe_to_break_offsets(&self) -> Vec<u32> {
        let mut offsets: Vec<u32> = self.safe_glyph_offsets().collect();
        offsets.dedup();
        offsets.push(self.end_index_for_result());
        offsets.dedup();
        offsets
    }

    fn safe_glyph_offsets(&self) -> impl Iterator<Item = u32> + '_ {
        self.runs.iter().flat_map(|run| {
            run.glyphs()
                .iter()
                .filter(|g| g.safe_to_break_before)
                .map(move |g| run.start_index() + g.character_index)
        })
    }

    /// Visual extent of every character, in logical order
    pub fn character_ranges(&self) -> Vec<CharacterRange> {
        let mut ranges = Vec::with_capacity(self.num_characters as usize);
        let mut advance = Fixed::ZERO;
        for run in &self.runs {
            for cluster in run.clusters() {
                let n = cluster.num_characters();
                for j in 0..n {
                    let from = advance + cluster.advance.mul_div(j, n);
                    let to = advance + cluster.advance.mul_div(j + 1, n);
                    let (start, end) = if self.is_rtl() {
                        (self.width - to, self.width - from)
                    } else {
                        (from, to)
                    };
                    ranges.push(CharacterRange {
                        start: start.to_f32(),
                        end: end.to_f32(),
                    });
                }
                advance += cluster.advance;
            }
        }
        ranges
    }
}

/// Shared handle to an immutable [`ShapeResult`]
#[derive(Debug, Clone)]
pub struct SharedShapeResult {
    inner: Arc<ShapeResult>,
}

impl SharedShapeResult {
    pub fn new(result: ShapeResult) -> Self {
        Self { inner: Arc::new(result) }
    }

    /// Uniquely owned result for editing. A sole owner edits in place;
    /// otherwise this handle detaches onto a deep copy.
    pub fn acquire_mutable(&mut self) -> &mut ShapeResult {
        if !self.is_unique() {
            tracing::trace!("Detaching shared shape result ({} owners)", self.ref_count());
        }
        Arc::make_mut(&mut self.inner)
    }

    pub fn ref_count(&self) -> usize {
        Arc::strong_count(&self.inner)
    }

    pub fn is_unique(&self) -> bool {
        Arc::strong_count(&self.inner) == 1
    }

    /// Both handles share one result
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn as_ptr(&self) -> *const ShapeResult {
        Arc::as_ptr(&self.inner)
    }
}

impl Deref for SharedShapeResult {
    type Target = ShapeResult;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl From<ShapeResult> for SharedShapeResult {
    fn from(result: ShapeResult) -> Self {
        Self::new(result)
    }
}
