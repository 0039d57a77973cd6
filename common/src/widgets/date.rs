//! Date window: a rounded box with the day of month right-aligned inside.

use embedded_graphics::primitives::Rectangle;

use super::{FaceModel, Layer};
use crate::angle::Angle;
use crate::colors::legible_over;
use crate::config::{DATE_BOX_CORNER_RADIUS, DATE_TEXT_PADDING};
use crate::context::{DrawContext, TextAlign, TextAnchor};
use crate::fixed::{FIXED_POINT_SCALE, FPoint};
use crate::render::LayerId;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DateLayer {
    frame: Rectangle,
}

impl DateLayer {
    pub const fn new(frame: Rectangle) -> Self { Self { frame } }

    /// Right-middle text anchor inside the box.
    fn text_anchor(&self) -> FPoint {
        let right = self.frame.top_left.x + self.frame.size.width as i32 - 1 - DATE_TEXT_PADDING;
        let middle = FPoint::from_point(self.frame.top_left).y + (self.frame.size.height as i32 - 1) * FIXED_POINT_SCALE / 2;
        FPoint::new(right * FIXED_POINT_SCALE, middle)
    }
}

impl Layer for DateLayer {
    fn id(&self) -> LayerId { LayerId::Date }

    fn frame(&self) -> Rectangle { self.frame }

    fn draw(
        &self,
        ctx: &mut dyn DrawContext,
        face: &FaceModel<'_>,
    ) {
        let palette = &face.config.palette;
        ctx.set_fill_color(palette.date_fill);
        ctx.fill_rect(self.frame, DATE_BOX_CORNER_RADIUS);
        ctx.set_stroke_color(palette.date_outline);
        ctx.set_stroke_width(1);
        ctx.stroke_rect(self.frame, DATE_BOX_CORNER_RADIUS);

        if face.derived.day_text.is_empty() {
            return;
        }
        ctx.set_fill_color(legible_over(palette.date_fill));
        ctx.set_rotation(Angle::ZERO);
        ctx.set_offset(self.text_anchor());
        ctx.set_scale(FPoint::UNIT, FPoint::UNIT);
        ctx.draw_string(&face.derived.day_text, face.assets.fonts.hour, TextAlign::Right, TextAnchor::Middle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::prelude::*;
    use crate::colors::{BLACK, LIGHT_GRAY, WHITE};
    use crate::config::{DATE_BOX, FaceConfig};
    use crate::context::{DrawCall, RecordingContext};
    use crate::widgets::test_support::FaceFixture;

    #[test]
    fn test_box_then_right_aligned_day() {
        let fixture = FaceFixture::new(FaceConfig::COMPLETE);
        let mut ctx = RecordingContext::new();
        ctx.reset();
        DateLayer::new(DATE_BOX).draw(&mut ctx, &fixture.model());

        assert_eq!(ctx.calls()[0], DrawCall::FillRect { rect: DATE_BOX, color: WHITE });
        assert_eq!(ctx.calls()[1], DrawCall::StrokeRect { rect: DATE_BOX, color: LIGHT_GRAY });
        let DrawCall::Text { text, color, align, anchor, .. } = &ctx.calls()[2] else {
            panic!("Expected the day text, got {:?}", ctx.calls()[2]);
        };
        assert_eq!(text.as_str(), "23");
        assert_eq!(*color, BLACK, "Black reads over the white box");
        assert_eq!((*align, *anchor), (TextAlign::Right, TextAnchor::Middle));
    }

    #[test]
    fn test_text_anchor_is_inside_box() {
        let layer = DateLayer::new(DATE_BOX);
        let anchor = layer.text_anchor().to_point();
        assert!(DATE_BOX.contains(anchor), "{anchor:?} lies outside the date box");
        assert_eq!(anchor.x, DATE_BOX.top_left.x + DATE_BOX.size.width as i32 - 1 - DATE_TEXT_PADDING);
    }

    #[test]
    fn test_empty_day_draws_box_only() {
        let mut fixture = FaceFixture::new(FaceConfig::COMPLETE);
        fixture.derived.day_text.clear();
        let mut ctx = RecordingContext::new();
        ctx.reset();
        DateLayer::new(DATE_BOX).draw(&mut ctx, &fixture.model());
        assert_eq!(ctx.calls().len(), 2, "No text before the first tick");
    }
}
