//! Letter and word spacing

use super::ShapeResult;
use crate::buffer::TextBuffer;
use crate::font::Fixed;

/// Extra advance added after clusters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spacing {
    /// Added after every cluster
    pub letter_spacing: f32,
    /// Added after space clusters
    pub word_spacing: f32,
}

impl Spacing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn letter_spacing(mut self, value: f32) -> Self {
        self.letter_spacing = value;
        self
    }

    pub fn word_spacing(mut self, value: f32) -> Self {
        self.word_spacing = value;
        self
    }

    pub fn is_zero(&self) -> bool {
        self.letter_spacing == 0.0 && self.word_spacing == 0.0
    }
}

fn is_word_separator(c: char) -> bool {
    matches!(c, ' ' | '\u{00A0}')
}

impl ShapeResult {
    /// Widen clusters by `spacing`. `buffer` is the text the result was
    /// shaped from.
    pub fn apply_spacing(&mut self, buffer: &TextBuffer, spacing: &Spacing) {
        if spacing.is_zero() || self.is_empty() {
            return;
        }
        let letter = Fixed::from_f32(spacing.letter_spacing);
        let word = Fixed::from_f32(spacing.word_spacing);

        for run in &mut self.runs {
            let clusters: Vec<_> = run.clusters().collect();
            for cluster in clusters {
                let mut extra = letter;
                let first = buffer.char_at(run.start_index() + cluster.start);
                if first.is_some_and(is_word_separator) {
                    extra += word;
                }
                if let Some(last) = cluster.glyphs.end.checked_sub(1) {
                    run.glyphs[last].advance += extra;
                }
            }
            run.recompute_width();
        }
        self.recompute_width();
        self.recompute_bounds();
    }
}
