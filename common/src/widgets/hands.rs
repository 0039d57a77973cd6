//! Hour, minute and second hands plus the pivot cap.

use embedded_graphics::primitives::Rectangle;

use super::{FaceModel, Layer};
use crate::config::{CAP_RADIUS, HAND_OUTLINE_WIDTH, SECOND_HAND_WIDTH};
use crate::context::DrawContext;
use crate::hands::HandPath;
use crate::render::LayerId;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct HandsLayer {
    bounds: Rectangle,
}

impl HandsLayer {
    pub const fn new(bounds: Rectangle) -> Self { Self { bounds } }
}

/// Fill a hand in the current fill color, then outline it.
fn draw_filled_hand(
    ctx: &mut dyn DrawContext,
    hand: &HandPath,
) {
    let points = hand.transformed();
    ctx.fill_polygon(&points);
    ctx.stroke_polygon(&points, true);
}

impl Layer for HandsLayer {
    fn id(&self) -> LayerId { LayerId::Hands }

    fn frame(&self) -> Rectangle { self.bounds }

    fn draw(
        &self,
        ctx: &mut dyn DrawContext,
        face: &FaceModel<'_>,
    ) {
        let hands = face.hands;
        ctx.set_stroke_color(face.config.palette.hand_outline);
        ctx.set_stroke_width(HAND_OUTLINE_WIDTH);

        ctx.set_fill_color(face.settings.minute_hand);
        draw_filled_hand(ctx, &hands.minute);

        ctx.set_fill_color(face.settings.hour_hand);
        draw_filled_hand(ctx, &hands.hour);

        if face.seconds_shown {
            ctx.set_stroke_color(face.settings.second_hand);
            ctx.set_stroke_width(SECOND_HAND_WIDTH);
            ctx.stroke_polygon(&hands.second.transformed(), false);
        }

        ctx.set_fill_color(face.config.palette.cap);
        ctx.fill_circle(hands.minute.pivot(), CAP_RADIUS);
    }
}
