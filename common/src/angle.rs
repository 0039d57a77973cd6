//! Turn-fraction angles.
//!
//! Angles are integers in `[0, TRIG_MAX_ANGLE)` where `TRIG_MAX_ANGLE` is one
//! full revolution. Zero points at 12 o'clock and values grow clockwise. All
//! arithmetic stays on integers; conversion to floating point happens only
//! when a point is placed or a path vertex is rotated.

use core::f32::consts::TAU;

use micromath::F32Ext;

/// One full turn in angle units.
pub const TRIG_MAX_ANGLE: u32 = 0x1_0000;

/// A normalized angle, always strictly below one full turn.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Angle(u32);

impl Angle {
    pub const ZERO: Self = Self(0);
    pub const QUARTER_TURN: Self = Self(TRIG_MAX_ANGLE / 4);
    pub const HALF_TURN: Self = Self(TRIG_MAX_ANGLE / 2);

    /// Wrap a raw angle value into a single turn.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self { Self(raw % TRIG_MAX_ANGLE) }

    /// `numerator / denominator` of a full turn, truncated like integer
    /// trig math and reduced modulo one turn.
    ///
    /// A zero denominator yields [`Angle::ZERO`].
    pub const fn from_fraction(
        numerator: u32,
        denominator: u32,
    ) -> Self {
        if denominator == 0 {
            return Self::ZERO;
        }
        let raw = (TRIG_MAX_ANGLE as u64 * numerator as u64) / denominator as u64;
        Self((raw % TRIG_MAX_ANGLE as u64) as u32)
    }

    #[inline]
    pub const fn raw(self) -> u32 { self.0 }

    /// Sum of two angles, wrapped to one turn.
    #[inline]
    pub const fn wrapping_add(
        self,
        other: Self,
    ) -> Self {
        Self((self.0 + other.0) % TRIG_MAX_ANGLE)
    }

    /// Angle in radians, clockwise from 12 o'clock.
    #[inline]
    pub fn to_radians(self) -> f32 { self.0 as f32 * TAU / TRIG_MAX_ANGLE as f32 }

    /// `(sin, cos)` of the angle.
    ///
    /// Quarter turns return exact values so axis-aligned hands and ticks
    /// rasterize without drift.
    pub fn sin_cos(self) -> (f32, f32) {
        match self.0 {
            0 => (0.0, 1.0),
            0x4000 => (1.0, 0.0),
            0x8000 => (0.0, -1.0),
            0xC000 => (-1.0, 0.0),
            _ => {
                let radians = self.to_radians();
                (radians.sin(), radians.cos())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // -------------------------------------------------------------------------
    // Construction
    // -------------------------------------------------------------------------

    #[test]
    fn test_from_raw_wraps() {
        assert_eq!(Angle::from_raw(TRIG_MAX_ANGLE), Angle::ZERO);
        assert_eq!(Angle::from_raw(TRIG_MAX_ANGLE + 5).raw(), 5);
    }

    #[test]
    fn test_from_fraction_matches_integer_math() {
        assert_eq!(Angle::from_fraction(15, 60), Angle::QUARTER_TURN);
        assert_eq!(Angle::from_fraction(6, 12), Angle::HALF_TURN);
        assert_eq!(Angle::from_fraction(1, 60).raw(), TRIG_MAX_ANGLE / 60, "Truncates like integer division");
    }

    #[test]
    fn test_full_turn_fraction_is_zero() {
        assert_eq!(Angle::from_fraction(12, 12), Angle::ZERO, "12/12 of a turn wraps to zero");
        assert_eq!(Angle::from_fraction(60, 60), Angle::ZERO);
    }

    #[test]
    fn test_zero_denominator() {
        assert_eq!(Angle::from_fraction(3, 0), Angle::ZERO);
    }

    #[test]
    fn test_wrapping_add() {
        let three_quarters = Angle::HALF_TURN.wrapping_add(Angle::QUARTER_TURN);
        assert_eq!(three_quarters.raw(), 0xC000);
        assert_eq!(three_quarters.wrapping_add(Angle::QUARTER_TURN), Angle::ZERO);
    }

    // -------------------------------------------------------------------------
    // Trigonometry
    // -------------------------------------------------------------------------

    #[test]
    fn test_sin_cos_quarter_turns_exact() {
        assert_eq!(Angle::ZERO.sin_cos(), (0.0, 1.0));
        assert_eq!(Angle::QUARTER_TURN.sin_cos(), (1.0, 0.0));
        assert_eq!(Angle::HALF_TURN.sin_cos(), (0.0, -1.0));
        assert_eq!(Angle::from_raw(0xC000).sin_cos(), (-1.0, 0.0));
    }

    #[test]
    fn test_sin_cos_eighth_turn() {
        let (sin, cos) = Angle::from_fraction(1, 8).sin_cos();
        assert!((sin - 0.7071).abs() < 0.01, "sin(45deg) was {sin}");
        assert!((cos - 0.7071).abs() < 0.01, "cos(45deg) was {cos}");
    }
}
