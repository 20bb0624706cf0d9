//! Text shaper
//!
//! Segments a range into script runs, hands each run to the font's glyph
//! backend and normalises the output into a [`ShapeResult`].

use super::backend::ShapeRequest;
use super::orientation::RunOrientation;
use super::run::{ShapedGlyph, ShapedRun};
use super::script::{RunSegmenter, Script, ScriptRun};
use super::TextDirection;
use crate::buffer::TextBuffer;
use crate::font::{Fixed, Font};
use crate::geometry::FixedRect;
use crate::result::{GlyphData, GlyphOffset, GlyphRun, ShapeResult};

/// Text shaper configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct ShaperConfig {
    /// Script used when a range has no script of its own
    pub context_script: Option<Script>,
    /// BCP 47 language tag
    pub language: Option<String>,
}

impl ShaperConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the fallback script
    pub fn context_script(mut self, script: Script) -> Self {
        self.context_script = Some(script);
        self
    }

    /// Set language
    pub fn language(mut self, language: &str) -> Self {
        self.language = Some(language.to_string());
        self
    }
}

/// Stateless shaper over one text buffer
#[derive(Debug, Clone)]
pub struct TextShaper<'t> {
    text: &'t TextBuffer,
    config: ShaperConfig,
}

impl<'t> TextShaper<'t> {
    /// Create a new text shaper
    pub fn new(text: &'t TextBuffer) -> Self {
        Self::with_config(text, ShaperConfig::default())
    }

    pub fn with_config(text: &'t TextBuffer, config: ShaperConfig) -> Self {
        Self { text, config }
    }

    pub fn text(&self) -> &'t TextBuffer {
        self.text
    }

    pub fn config(&self) -> &ShaperConfig {
        &self.config
    }

    /// Shape the whole buffer
    pub fn shape(&self, font: &Font, direction: TextDirection) -> ShapeResult {
        self.shape_range(font, direction, 0, self.text.len())
    }

    /// Shape `[start, end)` as if it were the only text in the buffer
    pub fn shape_range(&self, font: &Font, direction: TextDirection, start: u32, end: u32) -> ShapeResult {
        debug_assert!(
            start <= end && end <= self.text.len(),
            "range {}..{} outside buffer of {}",
            start,
            end,
            self.text.len()
        );
        let end = end.min(self.text.len());
        let start = start.min(end);

        let mut result = ShapeResult::new(direction, start);
        let script_runs = RunSegmenter::segment(
            self.text,
            start..end,
            font.description().orientation,
            self.config.context_script,
        );
        for script_run in &script_runs {
            result.push_run(self.shape_run(font, direction, script_run));
        }
        result.recompute_bounds();

        tracing::debug!(
            "Shaped {}..{}: {} runs, {} glyphs, width {}",
            start,
            end,
            script_runs.len(),
            result.num_glyphs(),
            result.width()
        );
        result
    }

    fn shape_run(&self, font: &Font, direction: TextDirection, script_run: &ScriptRun) -> GlyphRun {
        let backend_direction = direction.shaping_direction(script_run.orientation);
        let request = ShapeRequest {
            text: self.text.slice(script_run.range()),
            script: script_run.script,
            direction: backend_direction,
            language: self.config.language.as_deref(),
            font: font.description(),
        };
        let mut shaped = font.backend().shape(&request);
        if backend_direction.is_backward() {
            shaped.glyphs.reverse();
        }

        let glyphs = normalize(&shaped, font.scale(), script_run);
        let missing = glyphs.iter().filter(|g| g.glyph_id == 0).count();
        if missing > 0 {
            tracing::debug!(
                "{} missing glyphs in {:?} run {}..{}",
                missing,
                script_run.script,
                script_run.start,
                script_run.end
            );
        }
        tracing::trace!(
            "Run {}..{} {:?} {:?}: {} glyphs",
            script_run.start,
            script_run.end,
            script_run.script,
            script_run.orientation,
            glyphs.len()
        );

        GlyphRun::new(
            script_run.start,
            script_run.len(),
            script_run.script,
            script_run.orientation,
            direction,
            glyphs,
        )
    }
}

fn scaled(value: i32, scale: f32) -> Fixed {
    Fixed::from_f32(value as f32 * scale)
}

/// Advance, offset and ink of a glyph in the logical frame
fn place(glyph: &ShapedGlyph, scale: f32, upright: bool) -> (Fixed, GlyphOffset, Option<FixedRect>) {
    if upright {
        let ink = glyph.extents.map(|e| {
            FixedRect::new(
                scaled(-(glyph.y_offset + e.y_max), scale),
                scaled(glyph.x_offset + e.x_min, scale),
                scaled(-(glyph.y_offset + e.y_min), scale),
                scaled(glyph.x_offset + e.x_max, scale),
            )
        });
        let offset = GlyphOffset {
            x: scaled(-glyph.y_offset, scale),
            y: scaled(glyph.x_offset, scale),
        };
        (scaled(-glyph.y_advance, scale), offset, ink)
    } else {
        let ink = glyph.extents.map(|e| {
            FixedRect::new(
                scaled(glyph.x_offset + e.x_min, scale),
                scaled(-(glyph.y_offset + e.y_max), scale),
                scaled(glyph.x_offset + e.x_max, scale),
                scaled(-(glyph.y_offset + e.y_min), scale),
            )
        });
        let offset = GlyphOffset {
            x: scaled(glyph.x_offset, scale),
            y: scaled(-glyph.y_offset, scale),
        };
        (scaled(glyph.x_advance, scale), offset, ink)
    }
}

/// Scale backend glyphs (already in logical order) into glyph data.
///
/// Cluster indices are clamped into the run and made non-decreasing; the
/// first glyph always starts the run. A cluster is safe to break before
/// unless one of its glyphs says otherwise.
fn normalize(shaped: &ShapedRun, scale: f32, script_run: &ScriptRun) -> Vec<GlyphData> {
    let len = script_run.len();
    if shaped.is_empty() {
        if len > 0 {
            tracing::warn!(
                "Backend returned no glyphs for {}..{}, using a placeholder",
                script_run.start,
                script_run.end
            );
        }
        return vec![GlyphData::placeholder()];
    }

    let upright = script_run.orientation == RunOrientation::Upright;
    let mut glyphs = Vec::with_capacity(shaped.len());
    let mut cluster = 0u32;
    for (i, g) in shaped.glyphs.iter().enumerate() {
        let index = if i == 0 { 0 } else { g.cluster.min(len.saturating_sub(1)).max(cluster) };
        cluster = index;
        let (advance, offset, ink) = place(g, scale, upright);
        glyphs.push(GlyphData {
            glyph_id: g.glyph_id,
            character_index: index,
            safe_to_break_before: false,
            advance,
            offset,
            ink,
        });
    }

    let mut i = 0;
    while i < glyphs.len() {
        let index = glyphs[i].character_index;
        let mut j = i;
        let mut safe = true;
        while j < glyphs.len() && glyphs[j].character_index == index {
            safe &= !shaped.glyphs[j].unsafe_to_break;
            j += 1;
        }
        glyphs[i].safe_to_break_before = safe || i == 0;
        i = j;
    }
    glyphs
}
