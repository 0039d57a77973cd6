//! Sub-pixel fixed-point coordinates.
//!
//! Coordinates carry 4 fractional bits (1/16 px). Raw values double as path
//! coordinates for primitives: a unit square drawn from raw `(-1, -1)` to
//! `(1, 1)` and scaled from [`FPoint::UNIT`] to `FPoint::from_int(w, h)`
//! covers `2w x 2h` pixels.

use core::ops::{Add, Neg, Sub};

use embedded_graphics::prelude::Point;
use micromath::F32Ext;

pub const FIXED_POINT_SHIFT: i32 = 4;
pub const FIXED_POINT_SCALE: i32 = 1 << FIXED_POINT_SHIFT;

/// A point in 1/16 pixel units.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FPoint {
    pub x: i32,
    pub y: i32,
}

impl FPoint {
    pub const ZERO: Self = Self::new(0, 0);

    /// The smallest representable step on both axes; the reference side of a
    /// scale pair.
    pub const UNIT: Self = Self::new(1, 1);

    /// Build from raw 1/16 px values.
    #[inline]
    pub const fn new(
        x: i32,
        y: i32,
    ) -> Self {
        Self { x, y }
    }

    /// Build from whole pixels.
    #[inline]
    pub const fn from_int(
        x: i32,
        y: i32,
    ) -> Self {
        Self::new(x * FIXED_POINT_SCALE, y * FIXED_POINT_SCALE)
    }

    #[inline]
    pub const fn from_point(p: Point) -> Self { Self::from_int(p.x, p.y) }

    /// Build from fractional pixels, rounding to the nearest 1/16.
    pub fn from_f32(
        x: f32,
        y: f32,
    ) -> Self {
        Self::new(
            (x * FIXED_POINT_SCALE as f32).round() as i32,
            (y * FIXED_POINT_SCALE as f32).round() as i32,
        )
    }

    /// Nearest whole pixel, halves rounding towards +infinity.
    #[inline]
    pub const fn to_point(self) -> Point {
        let half = FIXED_POINT_SCALE / 2;
        Point::new((self.x + half) >> FIXED_POINT_SHIFT, (self.y + half) >> FIXED_POINT_SHIFT)
    }

    /// Fractional pixel coordinates.
    #[inline]
    pub fn to_f32(self) -> (f32, f32) {
        (self.x as f32 / FIXED_POINT_SCALE as f32, self.y as f32 / FIXED_POINT_SCALE as f32)
    }
}

impl Add for FPoint {
    type Output = Self;

    fn add(
        self,
        rhs: Self,
    ) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for FPoint {
    type Output = Self;

    fn sub(
        self,
        rhs: Self,
    ) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for FPoint {
    type Output = Self;

    fn neg(self) -> Self { Self::new(-self.x, -self.y) }
}

impl From<Point> for FPoint {
    fn from(p: Point) -> Self { Self::from_point(p) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_int_scales() {
        assert_eq!(FPoint::from_int(2, -3), FPoint::new(32, -48));
        assert_eq!(FPoint::from_point(Point::new(1, 8)), FPoint::new(16, 128));
    }

    #[test]
    fn test_to_point_rounds_to_nearest() {
        assert_eq!(FPoint::new(23, 24).to_point(), Point::new(1, 2), "23/16 -> 1, 24/16 -> 2");
        assert_eq!(FPoint::new(-23, -25).to_point(), Point::new(-1, -2));
        assert_eq!(FPoint::from_int(7, -7).to_point(), Point::new(7, -7));
    }

    #[test]
    fn test_from_f32_rounds_to_sixteenth() {
        assert_eq!(FPoint::from_f32(1.5, -0.25), FPoint::new(24, -4));
        assert_eq!(FPoint::from_f32(0.03, 0.0), FPoint::new(0, 0));
    }

    #[test]
    fn test_arithmetic() {
        let a = FPoint::from_int(3, 4);
        let b = FPoint::new(8, -8);
        assert_eq!(a + b, FPoint::new(56, 56));
        assert_eq!(a - b, FPoint::new(40, 72));
        assert_eq!(-b, FPoint::new(-8, 8));
    }
}
