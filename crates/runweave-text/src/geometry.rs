//! Ink geometry
//!
//! Boxes are expressed in the logical frame of a shape result: `x` runs
//! along the inline axis from the visual start, `y` along the block axis
//! with positive values below the baseline.

use crate::font::Fixed;

/// Floating-point rectangle returned by the query surface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FloatRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl FloatRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Exact ink box used while accumulating bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FixedRect {
    pub x_min: Fixed,
    pub y_min: Fixed,
    pub x_max: Fixed,
    pub y_max: Fixed,
}

impl FixedRect {
    pub fn new(x_min: Fixed, y_min: Fixed, x_max: Fixed, y_max: Fixed) -> Self {
        Self { x_min, y_min, x_max, y_max }
    }

    /// True when the box has no area
    pub fn is_empty(&self) -> bool {
        self.x_max <= self.x_min || self.y_max <= self.y_min
    }

    /// Shift along the inline axis
    pub fn translate_x(&self, dx: Fixed) -> Self {
        Self {
            x_min: self.x_min + dx,
            x_max: self.x_max + dx,
            ..*self
        }
    }

    /// Smallest box containing both
    pub fn unite(&self, other: &Self) -> Self {
        Self {
            x_min: self.x_min.min(other.x_min),
            y_min: self.y_min.min(other.y_min),
            x_max: self.x_max.max(other.x_max),
            y_max: self.y_max.max(other.y_max),
        }
    }

    pub fn to_float_rect(&self) -> FloatRect {
        FloatRect {
            x: self.x_min.to_f32(),
            y: self.y_min.to_f32(),
            width: (self.x_max - self.x_min).to_f32(),
            height: (self.y_max - self.y_min).to_f32(),
        }
    }
}

/// Accumulates non-empty boxes, skipping empty ones.
pub(crate) fn unite_if_non_empty(acc: Option<FixedRect>, rect: FixedRect) -> Option<FixedRect> {
    if rect.is_empty() {
        return acc;
    }
    Some(match acc {
        Some(existing) => existing.unite(&rect),
        None => rect,
    })
}
