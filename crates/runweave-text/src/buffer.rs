//! Character buffer
//!
//! Shaping offsets are UTF-16 code-unit indices into a [`TextBuffer`].

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// Immutable UTF-16 text owned by the caller and read by the shaper.
#[derive(Clone, PartialEq, Eq, Hash, Default)]
pub struct TextBuffer {
    units: Arc<[u16]>,
}

impl TextBuffer {
    /// Create a buffer from UTF-16 code units
    pub fn from_utf16(units: impl Into<Arc<[u16]>>) -> Self {
        Self { units: units.into() }
    }

    /// Number of code units
    pub fn len(&self) -> u32 {
        self.units.len() as u32
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// All code units
    pub fn as_slice(&self) -> &[u16] {
        &self.units
    }

    /// Code units of `range`, clamped to the buffer
    pub fn slice(&self, range: Range<u32>) -> &[u16] {
        let end = (range.end as usize).min(self.units.len());
        let start = (range.start as usize).min(end);
        &self.units[start..end]
    }

    /// Iterate `(offset, char)` pairs over `range`.
    ///
    /// Unpaired surrogates decode to U+FFFD and keep their single-unit width.
    pub fn chars(&self, range: Range<u32>) -> CharIndices<'_> {
        let start = range.start.min(self.len());
        CharIndices::new(self.slice(range), start)
    }

    /// Decode `range` into a `String`
    pub fn to_string_lossy(&self, range: Range<u32>) -> String {
        self.chars(range).map(|(_, c)| c).collect()
    }

    /// The character starting at `offset`, if any
    pub fn char_at(&self, offset: u32) -> Option<char> {
        self.chars(offset..self.len()).next().map(|(_, c)| c)
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self::from_utf16(text.encode_utf16().collect::<Vec<_>>())
    }
}

impl From<String> for TextBuffer {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<Vec<u16>> for TextBuffer {
    fn from(units: Vec<u16>) -> Self {
        Self::from_utf16(units)
    }
}

impl From<&[u16]> for TextBuffer {
    fn from(units: &[u16]) -> Self {
        Self::from_utf16(units)
    }
}

impl fmt::Debug for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TextBuffer")
            .field(&self.to_string_lossy(0..self.len()))
            .finish()
    }
}

/// Iterator over the characters of a code-unit slice with absolute offsets.
#[derive(Debug, Clone)]
pub struct CharIndices<'a> {
    units: &'a [u16],
    position: usize,
    base: u32,
}

impl<'a> CharIndices<'a> {
    /// Decode `units`, reporting offsets relative to `base`
    pub fn new(units: &'a [u16], base: u32) -> Self {
        Self { units, position: 0, base }
    }
}

impl Iterator for CharIndices<'_> {
    type Item = (u32, char);

    fn next(&mut self) -> Option<Self::Item> {
        let first = *self.units.get(self.position)?;
        let offset = self.base + self.position as u32;

        let (c, width) = match first {
            0xD800..=0xDBFF => match self.units.get(self.position + 1) {
                Some(&second @ 0xDC00..=0xDFFF) => {
                    let code = 0x10000 + (((first as u32) - 0xD800) << 10) + ((second as u32) - 0xDC00);
                    (char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER), 2)
                }
                _ => (char::REPLACEMENT_CHARACTER, 1),
            },
            0xDC00..=0xDFFF => (char::REPLACEMENT_CHARACTER, 1),
            unit => (char::from_u32(unit as u32).unwrap_or(char::REPLACEMENT_CHARACTER), 1),
        };

        self.position += width;
        Some((offset, c))
    }
}
