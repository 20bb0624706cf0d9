//! Shape Result Cache
//!
//! Caches shaped ranges so identical text is not reshaped. Entries are
//! shared handles: the cache and every consumer point at one result.

use std::num::NonZeroUsize;

use lru::LruCache;

use super::orientation::FontOrientation;
use super::script::Script;
use super::shaper::TextShaper;
use super::TextDirection;
use crate::font::{Font, FontKey, LigatureSettings};
use crate::result::SharedShapeResult;

/// Shape cache key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ShapeCacheKey {
    font: FontKey,
    /// Font size (scaled to avoid float hashing)
    size: u32,
    orientation: FontOrientation,
    ligatures: LigatureSettings,
    kerning: bool,
    direction: TextDirection,
    context_script: Option<Script>,
    language: Option<String>,
    /// Offsets are absolute, so equal text at another start is a new entry
    start: u32,
    text: Box<[u16]>,
}

impl ShapeCacheKey {
    fn new(shaper: &TextShaper<'_>, font: &Font, direction: TextDirection, start: u32, end: u32) -> Self {
        let description = font.description();
        Self {
            font: font.key(),
            size: description.size_key(),
            orientation: description.orientation,
            ligatures: description.ligatures,
            kerning: description.kerning,
            direction,
            context_script: shaper.config().context_script,
            language: shaper.config().language.clone(),
            start,
            text: shaper.text().slice(start..end).into(),
        }
    }
}

/// LRU cache of shape results
pub struct ShapeCache {
    entries: LruCache<ShapeCacheKey, SharedShapeResult>,
    hits: u64,
    misses: u64,
}

impl Default for ShapeCache {
    fn default() -> Self {
        Self::new(512)
    }
}

impl ShapeCache {
    /// Create a cache holding at most `max_entries` results
    pub fn new(max_entries: usize) -> Self {
        let capacity = NonZeroUsize::new(max_entries).unwrap_or(NonZeroUsize::MIN);
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Cached result for `[start, end)`, shaping on a miss
    pub fn get_or_shape(
        &mut self,
        shaper: &TextShaper<'_>,
        font: &Font,
        direction: TextDirection,
        start: u32,
        end: u32,
    ) -> SharedShapeResult {
        let end = end.min(shaper.text().len());
        let start = start.min(end);
        let key = ShapeCacheKey::new(shaper, font, direction, start, end);

        if let Some(result) = self.entries.get(&key) {
            self.hits += 1;
            return result.clone();
        }

        self.misses += 1;
        let result = SharedShapeResult::new(shaper.shape_range(font, direction, start, end));
        self.entries.put(key, result.clone());
        result
    }

    /// Number of cached results
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Get cache statistics
    pub fn stats(&self) -> ShapeCacheStats {
        ShapeCacheStats {
            size: self.entries.len(),
            max_size: self.entries.cap().get(),
            hits: self.hits,
            misses: self.misses,
            hit_rate: if self.hits + self.misses > 0 {
                self.hits as f64 / (self.hits + self.misses) as f64
            } else {
                0.0
            },
        }
    }

    /// Clear the cache
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

/// Cache statistics
#[derive(Debug, Clone)]
pub struct ShapeCacheStats {
    pub size: usize,
    pub max_size: usize,
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}
