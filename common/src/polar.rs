//! Polar placement of dial marks inside a bounding rectangle.
//!
//! A mark at angle `a` sits on the oval fitted to the region, at
//! `center + (rx * sin a, -ry * cos a)`: 12 o'clock first, then clockwise.
//! The oval runs through pixel centers, so a 180 px wide region has its
//! center at 89.5 and a radius of 89.5.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::angle::Angle;
use crate::fixed::{FIXED_POINT_SCALE, FPoint};

/// How the oval is fitted to a non-square region.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum OvalScaleMode {
    /// Largest circle inside the region (radius from the shorter side).
    #[default]
    FitCircle,
    /// Ellipse touching all four sides of the region.
    FillEllipse,
}

/// Shrink a region by `inset` pixels on every side.
///
/// The result never collapses below 1x1.
pub fn crop(
    region: Rectangle,
    inset: u32,
) -> Rectangle {
    let shrink = inset.saturating_mul(2);
    Rectangle::new(
        region.top_left + Point::new(inset as i32, inset as i32),
        Size::new(
            region.size.width.saturating_sub(shrink).max(1),
            region.size.height.saturating_sub(shrink).max(1),
        ),
    )
}

/// Center of the region in 1/16 px, on the pixel grid's half steps.
pub fn region_center(region: &Rectangle) -> FPoint {
    let half_w = (region.size.width.max(1) as i32 - 1) * FIXED_POINT_SCALE / 2;
    let half_h = (region.size.height.max(1) as i32 - 1) * FIXED_POINT_SCALE / 2;
    FPoint::from_point(region.top_left) + FPoint::new(half_w, half_h)
}

/// `(rx, ry)` of the oval in pixels.
pub fn oval_radii(
    region: &Rectangle,
    mode: OvalScaleMode,
) -> (f32, f32) {
    let rx = (region.size.width.max(1) - 1) as f32 / 2.0;
    let ry = (region.size.height.max(1) - 1) as f32 / 2.0;
    match mode {
        OvalScaleMode::FitCircle => {
            let r = if rx < ry { rx } else { ry };
            (r, r)
        }
        OvalScaleMode::FillEllipse => (rx, ry),
    }
}

/// Point on the region's oval at `angle`, in 1/16 px.
pub fn point_from_polar(
    region: &Rectangle,
    mode: OvalScaleMode,
    angle: Angle,
) -> FPoint {
    let (rx, ry) = oval_radii(region, mode);
    let (sin, cos) = angle.sin_cos();
    region_center(region) + FPoint::from_f32(rx * sin, -ry * cos)
}

#[cfg(test)]
mod tests {
    use super::*;

    const DIAL: Rectangle = Rectangle::new(Point::new(0, 0), Size::new(181, 181));

    // -------------------------------------------------------------------------
    // Cropping
    // -------------------------------------------------------------------------

    #[test]
    fn test_crop_shrinks_every_side() {
        let cropped = crop(Rectangle::new(Point::new(0, 0), Size::new(180, 180)), 3);
        assert_eq!(cropped.top_left, Point::new(3, 3));
        assert_eq!(cropped.size, Size::new(174, 174));
    }

    #[test]
    fn test_crop_never_collapses() {
        let cropped = crop(Rectangle::new(Point::new(10, 10), Size::new(8, 40)), 30);
        assert_eq!(cropped.size, Size::new(1, 1), "Over-inset regions keep a 1x1 size");
    }

    // -------------------------------------------------------------------------
    // Placement
    // -------------------------------------------------------------------------

    #[test]
    fn test_center_on_pixel_grid() {
        assert_eq!(region_center(&DIAL), FPoint::from_int(90, 90));
        let even = Rectangle::new(Point::new(0, 0), Size::new(180, 180));
        assert_eq!(region_center(&even), FPoint::new(89 * 16 + 8, 89 * 16 + 8), "Even sizes center on a half pixel");
    }

    #[test]
    fn test_cardinal_points() {
        let mode = OvalScaleMode::FitCircle;
        assert_eq!(point_from_polar(&DIAL, mode, Angle::ZERO), FPoint::from_int(90, 0), "12 o'clock is top center");
        assert_eq!(point_from_polar(&DIAL, mode, Angle::QUARTER_TURN), FPoint::from_int(180, 90), "3 o'clock is right");
        assert_eq!(point_from_polar(&DIAL, mode, Angle::HALF_TURN), FPoint::from_int(90, 180));
        assert_eq!(point_from_polar(&DIAL, mode, Angle::from_raw(0xC000)), FPoint::from_int(0, 90));
    }

    #[test]
    fn test_fit_circle_uses_short_side() {
        let wide = Rectangle::new(Point::new(0, 0), Size::new(101, 41));
        let p = point_from_polar(&wide, OvalScaleMode::FitCircle, Angle::QUARTER_TURN);
        assert_eq!(p, FPoint::from_int(70, 20), "Radius is 20 on a 101x41 region");
    }

    #[test]
    fn test_fill_ellipse_touches_sides() {
        let wide = Rectangle::new(Point::new(0, 0), Size::new(101, 41));
        let right = point_from_polar(&wide, OvalScaleMode::FillEllipse, Angle::QUARTER_TURN);
        let top = point_from_polar(&wide, OvalScaleMode::FillEllipse, Angle::ZERO);
        assert_eq!(right, FPoint::from_int(100, 20));
        assert_eq!(top, FPoint::from_int(50, 0));
    }
}
