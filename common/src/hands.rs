//! Hand polygons and the angle laws that drive them.
//!
//! Each hand is a fixed vertex list pointing at 12 o'clock with its pivot at
//! the local origin. Moving a hand sets the pivot; rotating it sets the
//! angle. Vertices are only transformed when the hand is drawn.

use embedded_graphics::prelude::*;
use heapless::Vec;
use micromath::F32Ext;

use crate::angle::Angle;
use crate::time::WallTime;

/// Most vertices any hand has.
pub const MAX_HAND_POINTS: usize = 8;

/// Thin line from just outside the cap to the minute track.
pub const SECOND_HAND_POINTS: [Point; 2] = [Point::new(0, -4), Point::new(0, -79)];

/// Narrow shaft widening to a lozenge, 70 px long.
pub const MINUTE_HAND_POINTS: [Point; 7] = [
    Point::new(-1, 0),
    Point::new(-1, -13),
    Point::new(-5, -50),
    Point::new(0, -70),
    Point::new(5, -50),
    Point::new(1, -13),
    Point::new(1, 0),
];

/// Wider and shorter than the minute hand, 52 px long.
pub const HOUR_HAND_POINTS: [Point; 7] = [
    Point::new(-3, 0),
    Point::new(-3, -13),
    Point::new(-7, -42),
    Point::new(0, -52),
    Point::new(7, -42),
    Point::new(3, -13),
    Point::new(3, 0),
];

/// Which hand a path belongs to.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Hand {
    Second,
    Minute,
    Hour,
}

/// A polygon with a pivot and a rotation.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HandPath {
    points: &'static [Point],
    pivot: Point,
    rotation: Angle,
}

impl HandPath {
    pub const fn new(points: &'static [Point]) -> Self {
        Self {
            points,
            pivot: Point::zero(),
            rotation: Angle::ZERO,
        }
    }

    #[inline]
    pub const fn move_to(
        &mut self,
        pivot: Point,
    ) {
        self.pivot = pivot;
    }

    #[inline]
    pub const fn rotate_to(
        &mut self,
        rotation: Angle,
    ) {
        self.rotation = rotation;
    }

    #[inline]
    pub const fn pivot(&self) -> Point { self.pivot }

    #[inline]
    pub const fn rotation(&self) -> Angle { self.rotation }

    #[inline]
    pub const fn local_points(&self) -> &'static [Point] { self.points }

    /// Vertices rotated about the pivot, in screen pixels.
    pub fn transformed(&self) -> Vec<Point, MAX_HAND_POINTS> {
        let (sin, cos) = self.rotation.sin_cos();
        let mut out = Vec::new();
        for p in self.points.iter().take(MAX_HAND_POINTS) {
            let (x, y) = (p.x as f32, p.y as f32);
            let rx = (x * cos - y * sin).round() as i32;
            let ry = (x * sin + y * cos).round() as i32;
            out.push(Point::new(rx, ry) + self.pivot).ok();
        }
        out
    }
}

// =============================================================================
// Angle Laws
// =============================================================================

/// `minute / 60` of a turn.
#[inline]
pub const fn minute_angle(minute: u8) -> Angle { Angle::from_fraction(minute as u32, 60) }

/// `second / 60` of a turn.
#[inline]
pub const fn second_angle(second: u8) -> Angle { Angle::from_fraction(second as u32, 60) }

/// Hour hand angle, stepping every ten minutes.
///
/// One revolution takes `12 * multiplier` hours, so a multiplier of 2 gives
/// the 24-hour dial and 1 the 12-hour dial.
#[inline]
pub const fn hour_angle(
    hour: u8,
    minute: u8,
    multiplier: u8,
) -> Angle {
    let steps = hour as u32 * 6 + minute as u32 / 10;
    Angle::from_fraction(steps, 12 * multiplier as u32 * 6)
}

/// The three hand angles at one instant.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HandAngles {
    pub hour: Angle,
    pub minute: Angle,
    pub second: Angle,
}

impl HandAngles {
    /// Angles for `time`. The second angle is only recomputed when the
    /// second hand is shown; otherwise `previous_second` is kept.
    pub const fn compute(
        time: &WallTime,
        multiplier: u8,
        seconds_shown: bool,
        previous_second: Angle,
    ) -> Self {
        Self {
            hour: hour_angle(time.hour, time.minute, multiplier),
            minute: minute_angle(time.minute),
            second: if seconds_shown { second_angle(time.second) } else { previous_second },
        }
    }
}

/// The three hands, owned together.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HandSet {
    pub second: HandPath,
    pub minute: HandPath,
    pub hour: HandPath,
}

impl HandSet {
    /// Build all three paths at the local origin.
    pub const fn new() -> Self {
        Self {
            second: HandPath::new(&SECOND_HAND_POINTS),
            minute: HandPath::new(&MINUTE_HAND_POINTS),
            hour: HandPath::new(&HOUR_HAND_POINTS),
        }
    }

    pub const fn move_to(
        &mut self,
        pivot: Point,
    ) {
        self.second.move_to(pivot);
        self.minute.move_to(pivot);
        self.hour.move_to(pivot);
    }

    pub const fn apply(
        &mut self,
        angles: &HandAngles,
    ) {
        self.hour.rotate_to(angles.hour);
        self.minute.rotate_to(angles.minute);
        self.second.rotate_to(angles.second);
    }

    pub const fn angles(&self) -> HandAngles {
        HandAngles {
            hour: self.hour.rotation(),
            minute: self.minute.rotation(),
            second: self.second.rotation(),
        }
    }
}

impl Default for HandSet {
    fn default() -> Self { Self::new() }
}
