//! Sub-pixel pen arithmetic
//!
//! Pen positions and advances are kept in 26.6 fixed point (1/64 px) so that
//! fractional glyph advances accumulate without drift along a row.

use std::fmt;
use std::ops::{Add, AddAssign, Sub};

/// Number of sub-pixel units in one pixel
pub const UNITS_PER_PX: i32 = 64;

/// Widest pixel span a pen position can address
pub const MAX_PX: u32 = i32::MAX as u32 / UNITS_PER_PX as u32;

/// A horizontal offset in 1/64 px units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Fixed(i32);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);

    /// Wraps a raw 26.6 value
    pub const fn from_raw(raw: i32) -> Self {
        Fixed(raw)
    }

    /// Whole pixel count to fixed point, `None` past [`MAX_PX`]
    pub const fn checked_from_px(px: u32) -> Option<Self> {
        if px > MAX_PX {
            return None;
        }
        Some(Fixed(px as i32 * UNITS_PER_PX))
    }

    /// Whole pixel count to fixed point
    ///
    /// # Panics
    /// If `px` is greater than [`MAX_PX`].
    pub const fn from_px(px: u32) -> Self {
        match Self::checked_from_px(px) {
            Some(fixed) => fixed,
            None => panic!("pixel count exceeds the 26.6 range"),
        }
    }

    /// Fractional pixel value, rounded to the nearest 1/64 px
    pub fn from_f32(px: f32) -> Self {
        Fixed((px * UNITS_PER_PX as f32).round() as i32)
    }

    pub const fn raw(self) -> i32 {
        self.0
    }

    /// Largest whole pixel not greater than this value
    pub const fn floor(self) -> i32 {
        self.0 >> 6
    }

    /// Smallest whole pixel not less than this value
    pub const fn ceil(self) -> i32 {
        (self.0 + (UNITS_PER_PX - 1)) >> 6
    }

    pub fn to_f32(self) -> f32 {
        self.0 as f32 / UNITS_PER_PX as f32
    }
}

impl Add for Fixed {
    type Output = Fixed;

    fn add(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 + rhs.0)
    }
}

impl AddAssign for Fixed {
    fn add_assign(&mut self, rhs: Fixed) {
        self.0 += rhs.0;
    }
}

impl Sub for Fixed {
    type Output = Fixed;

    fn sub(self, rhs: Fixed) -> Fixed {
        Fixed(self.0 - rhs.0)
    }
}

impl fmt::Display for Fixed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}px", self.to_f32())
    }
}
