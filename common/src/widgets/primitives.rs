//! Tick and numeral primitives shared by the dial layers.

use core::fmt::Write;

use embedded_graphics::mono_font::MonoFont;
use heapless::String;

use crate::angle::Angle;
use crate::context::{DrawContext, TextAlign, TextAnchor};
use crate::fixed::FPoint;

/// Fill a unit square scaled by `scale`, rotated by `rotation` about its
/// center and centered on `offset`.
///
/// A scale of `(1, 8)` gives a 2 x 16 px tick whose long side points along
/// `rotation`; at a dial angle that is a radial tick.
pub fn draw_tick(
    ctx: &mut dyn DrawContext,
    rotation: Angle,
    offset: FPoint,
    scale: FPoint,
) {
    ctx.begin_fill();

    ctx.set_rotation(rotation);
    ctx.set_offset(offset);
    ctx.set_scale(FPoint::UNIT, scale);

    ctx.move_to(FPoint::new(-1, 1));
    ctx.line_to(FPoint::new(-1, -1));
    ctx.line_to(FPoint::new(1, -1));
    ctx.line_to(FPoint::new(1, 1));
    ctx.close_path();

    ctx.end_fill();
}

/// Draw `text` in the fill color at `offset`, turned by `rotation`.
pub fn draw_numeral(
    ctx: &mut dyn DrawContext,
    text: &str,
    font: &'static MonoFont<'static>,
    rotation: Angle,
    offset: FPoint,
    align: TextAlign,
    anchor: TextAnchor,
) {
    ctx.set_rotation(rotation);
    ctx.set_offset(offset);
    ctx.set_scale(FPoint::UNIT, FPoint::UNIT);
    ctx.draw_string(text, font, align, anchor);
}

/// Two-digit zero-padded numeral ("05", "24"); three digits pass through.
pub fn format_numeral(value: u32) -> String<3> {
    let mut text = String::new();
    write!(text, "{:02}", value.min(999)).ok();
    text
}

/// Rotation and anchor for a numeral turning with the dial at
/// `position / 12` of a turn.
///
/// Numerals on the lower half (positions 4 through 8) get an extra half
/// turn so they read upright, and are anchored at their baseline so the
/// text still grows towards the dial center.
pub const fn dial_numeral_orientation(position: u32) -> (Angle, TextAnchor) {
    let angle = Angle::from_fraction(position, 12);
    if position % 12 > 3 && position % 12 < 9 {
        (angle.wrapping_add(Angle::HALF_TURN), TextAnchor::Baseline)
    } else {
        (angle, TextAnchor::Top)
    }
}
