//! Font database for loading and managing fonts

use std::path::Path;
use std::sync::Arc;

use fontdb::{Database, FaceInfo, Source};

use super::{Font, FontDescription, FontId, FontQuery, resolve_generic_family};
use crate::shaping::backend::RustybuzzBackend;
use crate::{Result, TextError};

/// Font database for loading and matching fonts
pub struct FontDatabase {
    db: Database,
}

impl FontDatabase {
    /// Create a new empty font database
    pub fn new() -> Self {
        Self { db: Database::new() }
    }

    /// Create a font database with system fonts loaded
    pub fn with_system_fonts() -> Self {
        let mut db = Database::new();
        db.load_system_fonts();
        tracing::debug!("Loaded {} system font faces", db.len());
        Self { db }
    }

    /// Load a font from file
    pub fn load_font_file(&mut self, path: &Path) -> Result<()> {
        self.db.load_font_file(path)?;
        Ok(())
    }

    /// Load a font from memory
    pub fn load_font_data(&mut self, data: Vec<u8>) {
        self.db.load_font_source(Source::Binary(Arc::new(data)));
    }

    /// Find a font matching the query, falling back to well-known families
    /// for generic names
    pub fn query(&self, query: &FontQuery) -> Option<FontId> {
        let lookup = |families: &[fontdb::Family<'_>]| {
            self.db.query(&fontdb::Query {
                families,
                weight: fontdb::Weight(query.weight.0),
                stretch: fontdb::Stretch::Normal,
                style: query.style.into(),
            })
        };

        if let Some(id) = lookup(&query.fontdb_families()) {
            return Some(FontId(id));
        }

        let fallbacks: Vec<fontdb::Family<'_>> = query
            .families
            .iter()
            .flat_map(|family| resolve_generic_family(family).iter())
            .map(|name| fontdb::Family::Name(*name))
            .collect();
        lookup(&fallbacks).map(FontId)
    }

    /// Get font info by ID
    pub fn face_info(&self, id: FontId) -> Option<&FaceInfo> {
        self.db.face(id.0)
    }

    /// Build a shaping backend for a face
    pub fn load_backend(&self, id: FontId) -> Result<RustybuzzBackend> {
        self.db
            .with_face_data(id.0, |data, index| RustybuzzBackend::from_data(data.to_vec(), index))
            .ok_or_else(|| TextError::FontNotFound(format!("face {:?} is not in the database", id.0)))?
    }

    /// Query and load in one step
    pub fn load_font(&self, query: &FontQuery, description: FontDescription) -> Result<Font> {
        let id = self
            .query(query)
            .ok_or_else(|| TextError::FontNotFound(query.families.join(", ")))?;
        let backend = self.load_backend(id)?;
        Ok(Font::new(Arc::new(backend), description))
    }

    /// List all loaded font families
    pub fn families(&self) -> impl Iterator<Item = &str> {
        self.db
            .faces()
            .filter_map(|f| f.families.first().map(|(name, _)| name.as_str()))
    }

    /// Number of loaded fonts
    pub fn len(&self) -> usize {
        self.db.len()
    }

    /// Check if database is empty
    pub fn is_empty(&self) -> bool {
        self.db.len() == 0
    }
}

impl Default for FontDatabase {
    fn default() -> Self {
        Self::new()
    }
}
