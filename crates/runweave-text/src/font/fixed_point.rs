//! Fixed-Point Arithmetic
//!
//! 26.6 fixed-point values for glyph metrics. Every advance, offset and ink
//! box in a shape result is stored in this form so that widths and positions
//! add up to the same bits no matter how the runs were assembled.

use std::iter::Sum;
use std::ops::{Add, AddAssign, Neg, Sub, SubAssign};

/// 26.6 fixed-point number (32-bit total)
///
/// - 26 bits for integer part: range about ±33 million pixels
/// - 6 bits for fractional part: precision of 1/64 pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Fixed(i32);

impl Fixed {
    pub const FRAC_BITS: u32 = 6;
    pub const SCALE: i32 = 1 << Self::FRAC_BITS;

    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(Self::SCALE);
    pub const MAX: Fixed = Fixed(i32::MAX);
    pub const MIN: Fixed = Fixed(i32::MIN);

    /// Create from raw bits
    #[inline]
    pub const fn from_bits(bits: i32) -> Self {
        Self(bits)
    }

    /// Get raw bits
    #[inline]
    pub const fn to_bits(self) -> i32 {
        self.0
    }

    /// Create from integer
    #[inline]
    pub const fn from_i32(value: i32) -> Self {
        Self(value << Self::FRAC_BITS)
    }

    /// Create from f32, rounding to the nearest 1/64
    #[inline]
    pub fn from_f32(value: f32) -> Self {
        if !value.is_finite() {
            return Self::ZERO;
        }
        let scaled = (value * Self::SCALE as f32).round();
        Self(scaled.clamp(i32::MIN as f32, i32::MAX as f32) as i32)
    }

    /// Convert to f32 (exact for magnitudes below 2^18)
    #[inline]
    pub fn to_f32(self) -> f32 {
        self.0 as f32 / Self::SCALE as f32
    }

    /// Smallest integer not less than this value
    #[inline]
    pub const fn ceil_to_i32(self) -> i32 {
        (self.0 as i64 + (Self::SCALE as i64 - 1)).div_euclid(Self::SCALE as i64) as i32
    }

    /// Nearest integer, halves rounded up
    #[inline]
    pub const fn round_to_i32(self) -> i32 {
        (self.0 as i64 + (Self::SCALE as i64 / 2)).div_euclid(Self::SCALE as i64) as i32
    }

    /// `self * numerator / denominator`, floored, without intermediate overflow
    #[inline]
    pub fn mul_div(self, numerator: u32, denominator: u32) -> Self {
        if denominator == 0 {
            return self;
        }
        let result = (self.0 as i64 * numerator as i64).div_euclid(denominator as i64);
        Self(result.clamp(i32::MIN as i64, i32::MAX as i64) as i32)
    }

    /// Absolute value
    #[inline]
    pub const fn abs(self) -> Self {
        Self(self.0.saturating_abs())
    }

    /// Minimum of two values
    #[inline]
    pub const fn min(self, other: Self) -> Self {
        if self.0 < other.0 { self } else { other }
    }

    /// Maximum of two values
    #[inline]
    pub const fn max(self, other: Self) -> Self {
        if self.0 > other.0 { self } else { other }
    }

    /// Clamp to range
    #[inline]
    pub const fn clamp(self, min: Self, max: Self) -> Self {
        self.max(min).min(max)
    }
}

impl Add for Fixed {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self(self.0.saturating_add(rhs.0))
    }
}

impl AddAssign for Fixed {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Fixed {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self(self.0.saturating_sub(rhs.0))
    }
}

impl SubAssign for Fixed {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Neg for Fixed {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self(self.0.saturating_neg())
    }
}

impl Sum for Fixed {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Fixed::ZERO, |acc, v| acc + v)
    }
}

impl From<i32> for Fixed {
    #[inline]
    fn from(value: i32) -> Self {
        Self::from_i32(value)
    }
}

impl From<f32> for Fixed {
    #[inline]
    fn from(value: f32) -> Self {
        Self::from_f32(value)
    }
}
