//! Font matching and query

use super::{FontStyle, FontWeight};

/// Font query for matching
#[derive(Debug, Clone)]
pub struct FontQuery {
    /// Font families to try (in order)
    pub families: Vec<String>,
    /// Desired weight
    pub weight: FontWeight,
    /// Desired style
    pub style: FontStyle,
}

impl FontQuery {
    /// Create a new font query
    pub fn new(families: &[&str]) -> Self {
        Self {
            families: families.iter().map(|s| s.to_string()).collect(),
            weight: FontWeight::NORMAL,
            style: FontStyle::Normal,
        }
    }

    /// Set font weight
    pub fn weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Set font style
    pub fn style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    /// Families to hand to fontdb, generic names mapped onto fontdb's
    /// generic families
    pub(crate) fn fontdb_families(&self) -> Vec<fontdb::Family<'_>> {
        self.families
            .iter()
            .map(|name| match name.to_ascii_lowercase().as_str() {
                "serif" => fontdb::Family::Serif,
                "sans-serif" => fontdb::Family::SansSerif,
                "monospace" => fontdb::Family::Monospace,
                "cursive" => fontdb::Family::Cursive,
                "fantasy" => fontdb::Family::Fantasy,
                _ => fontdb::Family::Name(name.as_str()),
            })
            .collect()
    }
}

impl Default for FontQuery {
    fn default() -> Self {
        Self::new(&["sans-serif"])
    }
}

/// Well-known families for a generic name, tried when the generic mapping
/// of the database finds nothing
pub fn resolve_generic_family(family: &str) -> &'static [&'static str] {
    match family.to_ascii_lowercase().as_str() {
        "serif" => &["Times New Roman", "DejaVu Serif", "Noto Serif"],
        "sans-serif" => &["Arial", "DejaVu Sans", "Noto Sans", "Liberation Sans"],
        "monospace" => &["DejaVu Sans Mono", "Noto Sans Mono", "Consolas"],
        "cjk" => &["Noto Sans CJK JP", "Noto Sans CJK SC", "Source Han Sans", "MS Gothic"],
        _ => &[],
    }
}
