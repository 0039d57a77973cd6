//! Hour ring: 12 o'clock triangle, hour dots, half-hour lines and upright
//! hour numerals.

use embedded_graphics::primitives::Rectangle;

use super::primitives::{draw_numeral, draw_tick, format_numeral};
use super::{FaceModel, Layer};
use crate::angle::Angle;
use crate::config::{HALF_HOUR_TICK_SCALE, HOUR_DOT_INSET, HOUR_DOT_SCALE, INNER_RING_INSET, TOP_MARKER_SCALE};
use crate::context::{DrawContext, TextAlign, TextAnchor};
use crate::fixed::FPoint;
use crate::polar::{OvalScaleMode, crop, point_from_polar};
use crate::render::LayerId;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct InnerRingLayer {
    bounds: Rectangle,
}

impl InnerRingLayer {
    pub const fn new(bounds: Rectangle) -> Self { Self { bounds } }

    /// Triangle pointing down from the top center of the layer.
    fn draw_top_marker(
        &self,
        ctx: &mut dyn DrawContext,
    ) {
        let top = self.bounds.top_left;
        ctx.set_rotation(Angle::ZERO);
        ctx.set_offset(FPoint::from_int(top.x + (self.bounds.size.width / 2) as i32, top.y));
        ctx.set_scale(FPoint::UNIT, TOP_MARKER_SCALE);

        ctx.begin_fill();
        ctx.move_to(FPoint::ZERO);
        ctx.line_to(FPoint::new(-1, 1));
        ctx.line_to(FPoint::new(1, 1));
        ctx.close_path();
        ctx.end_fill();
    }
}

impl Layer for InnerRingLayer {
    fn id(&self) -> LayerId { LayerId::InnerRing }

    fn frame(&self) -> Rectangle { self.bounds }

    fn draw(
        &self,
        ctx: &mut dyn DrawContext,
        face: &FaceModel<'_>,
    ) {
        ctx.set_fill_color(face.settings.hour_hand);
        self.draw_top_marker(ctx);

        ctx.set_fill_color(face.config.palette.tick);
        let dots = crop(self.bounds, HOUR_DOT_INSET);
        for i in (5..60).step_by(5) {
            let angle = Angle::from_fraction(i, 60);
            draw_tick(ctx, angle, point_from_polar(&dots, OvalScaleMode::FitCircle, angle), HOUR_DOT_SCALE);
        }

        // Half-hour positions, 5/120 through 115/120.
        let inner = crop(self.bounds, INNER_RING_INSET);
        for i in (5..120).step_by(10) {
            let angle = Angle::from_fraction(i, 120);
            draw_tick(ctx, angle, point_from_polar(&inner, OvalScaleMode::FitCircle, angle), HALF_HOUR_TICK_SCALE);
        }

        ctx.set_fill_color(face.derived.legible);
        let multiplier = u32::from(face.derived.hour_label_multiplier);
        for i in 1..=12 {
            let offset = point_from_polar(&inner, OvalScaleMode::FitCircle, Angle::from_fraction(i, 12));
            let text = format_numeral(i * multiplier);
            draw_numeral(ctx, &text, face.assets.fonts.hour, Angle::ZERO, offset, TextAlign::Center, TextAnchor::Middle);
        }
    }
}
