//! Text shaper using rustybuzz

use std::str::FromStr;
use std::sync::Arc;

use rustybuzz::{Face, Feature, Language, UnicodeBuffer};

use super::{GlyphBackend, ShapeRequest};
use crate::buffer::CharIndices;
use crate::shaping::run::{GlyphExtents, ShapedGlyph, ShapedRun};
use crate::{Result, TextError};

/// HarfBuzz-compatible backend over an owned font file
#[derive(Clone)]
pub struct RustybuzzBackend {
    data: Arc<Vec<u8>>,
    index: u32,
    units_per_em: u16,
}

impl RustybuzzBackend {
    /// Validate font data and keep it for shaping
    pub fn from_data(data: Vec<u8>, index: u32) -> Result<Self> {
        let face = ttf_parser::Face::parse(&data, index)
            .map_err(|e| TextError::FontParsing(e.to_string()))?;
        let units_per_em = face.units_per_em();
        Ok(Self {
            data: Arc::new(data),
            index,
            units_per_em,
        })
    }

    /// Read a font file from disk
    pub fn from_file(path: &std::path::Path, index: u32) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::from_data(data, index)
    }

    /// OpenType features for the request's font description
    fn features(request: &ShapeRequest<'_>) -> Vec<Feature> {
        let ligatures = request.font.ligatures;
        let settings = [
            if ligatures.common { "liga" } else { "-liga" },
            if ligatures.common { "clig" } else { "-clig" },
            if ligatures.discretionary { "dlig" } else { "-dlig" },
            if request.font.kerning { "kern" } else { "-kern" },
        ];
        settings
            .iter()
            .filter_map(|setting| Feature::from_str(setting).ok())
            .collect()
    }
}

impl GlyphBackend for RustybuzzBackend {
    fn units_per_em(&self) -> u16 {
        self.units_per_em
    }

    fn shape(&self, request: &ShapeRequest<'_>) -> ShapedRun {
        let Some(face) = Face::from_slice(&self.data, self.index) else {
            tracing::warn!("Font data no longer parses, returning an empty run");
            return ShapedRun::new(Vec::new(), self.units_per_em);
        };

        let mut buffer = UnicodeBuffer::new();
        for (offset, c) in CharIndices::new(request.text, 0) {
            buffer.add(c, offset);
        }
        buffer.set_direction(request.direction.into());

        // Unknown tags leave the script unset so rustybuzz guesses it from the text
        match rustybuzz::Script::from_str(request.script.short_name()) {
            Ok(script) => buffer.set_script(script),
            Err(_) => tracing::trace!("No backend script for {:?}", request.script),
        }
        if let Some(language) = request.language.and_then(|tag| Language::from_str(tag).ok()) {
            buffer.set_language(language);
        }
        buffer.guess_segment_properties();

        let output = rustybuzz::shape(&face, &Self::features(request), buffer);

        let glyphs = output
            .glyph_infos()
            .iter()
            .zip(output.glyph_positions())
            .map(|(info, pos)| {
                let extents = face
                    .glyph_bounding_box(rustybuzz::ttf_parser::GlyphId(info.glyph_id as u16))
                    .map(|bbox| GlyphExtents {
                        x_min: bbox.x_min as i32,
                        y_min: bbox.y_min as i32,
                        x_max: bbox.x_max as i32,
                        y_max: bbox.y_max as i32,
                    });
                ShapedGlyph {
                    glyph_id: info.glyph_id,
                    cluster: info.cluster,
                    x_advance: pos.x_advance,
                    y_advance: pos.y_advance,
                    x_offset: pos.x_offset,
                    y_offset: pos.y_offset,
                    unsafe_to_break: info.unsafe_to_break(),
                    extents,
                }
            })
            .collect();

        ShapedRun::new(glyphs, self.units_per_em)
    }
}

impl std::fmt::Debug for RustybuzzBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RustybuzzBackend")
            .field("bytes", &self.data.len())
            .field("index", &self.index)
            .field("units_per_em", &self.units_per_em)
            .finish()
    }
}
