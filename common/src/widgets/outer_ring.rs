//! Minute ring: sixty ticks with five-minute numerals turning with the dial.

use embedded_graphics::primitives::Rectangle;

use super::primitives::{dial_numeral_orientation, draw_numeral, draw_tick, format_numeral};
use super::{FaceModel, Layer};
use crate::angle::Angle;
use crate::config::{MINUTE_TICK_SCALE, OUTER_RING_INSET, TopMarker};
use crate::context::{DrawContext, TextAlign};
use crate::polar::{OvalScaleMode, crop, point_from_polar};
use crate::render::LayerId;

/// Minute positions on the ring.
const MINUTE_POSITIONS: u32 = 60;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct OuterRingLayer {
    bounds: Rectangle,
}

impl OuterRingLayer {
    pub const fn new(bounds: Rectangle) -> Self { Self { bounds } }

    /// Whether minute position `index` carries a tick.
    ///
    /// Five-minute positions carry a numeral instead; 12 o'clock keeps its
    /// tick unless the face puts a "60" there.
    pub const fn has_tick(
        index: u32,
        marker: TopMarker,
    ) -> bool {
        if index % 5 != 0 {
            return true;
        }
        index == 0 && matches!(marker, TopMarker::Tick)
    }

    /// Hour positions (1-based, of 12) that carry a numeral.
    pub fn numeral_positions(marker: TopMarker) -> core::ops::RangeInclusive<u32> {
        match marker {
            TopMarker::Tick => 1..=11,
            TopMarker::Numeral => 1..=12,
        }
    }
}

impl Layer for OuterRingLayer {
    fn id(&self) -> LayerId { LayerId::OuterRing }

    fn frame(&self) -> Rectangle { self.bounds }

    fn draw(
        &self,
        ctx: &mut dyn DrawContext,
        face: &FaceModel<'_>,
    ) {
        let ring = crop(self.bounds, OUTER_RING_INSET);
        let marker = face.config.top_marker;

        ctx.set_fill_color(face.config.palette.tick);
        for i in (0..MINUTE_POSITIONS).filter(|i| Self::has_tick(*i, marker)) {
            let angle = Angle::from_fraction(i, MINUTE_POSITIONS);
            let offset = point_from_polar(&ring, OvalScaleMode::FitCircle, angle);
            draw_tick(ctx, angle, offset, MINUTE_TICK_SCALE);
        }

        ctx.set_fill_color(face.derived.legible);
        let font = face.assets.fonts.minute;
        for i in Self::numeral_positions(marker) {
            let angle = Angle::from_fraction(i, 12);
            let (rotation, anchor) = dial_numeral_orientation(i);
            let offset = point_from_polar(&ring, OvalScaleMode::FitCircle, angle);
            draw_numeral(ctx, &format_numeral(i * 5), font, rotation, offset, TextAlign::Center, anchor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FaceConfig, SCREEN_BOUNDS};
    use crate::context::{DrawCall, RecordingContext, TextAnchor};
    use crate::widgets::test_support::FaceFixture;

    fn record(config: FaceConfig) -> RecordingContext {
        let fixture = FaceFixture::new(config);
        let mut ctx = RecordingContext::new();
        ctx.reset();
        OuterRingLayer::new(SCREEN_BOUNDS).draw(&mut ctx, &fixture.model());
        ctx
    }

    // -------------------------------------------------------------------------
    // Tick Skipping
    // -------------------------------------------------------------------------

    #[test]
    fn test_tick_marker_keeps_twelve_o_clock_tick() {
        let ctx = record(FaceConfig::CLASSIC);
        assert_eq!(ctx.fill_path_count(), 49, "60 positions minus 11 numerals");
        let DrawCall::FillPath { rotation, .. } = &ctx.calls()[0] else {
            panic!("Expected a tick first, got {:?}", ctx.calls()[0]);
        };
        assert_eq!(*rotation, Angle::ZERO, "First tick sits at 12 o'clock");
    }

    #[test]
    fn test_numeral_marker_skips_every_fifth_tick() {
        let ctx = record(FaceConfig::MINIMAL);
        assert_eq!(ctx.fill_path_count(), 48, "60 positions minus 12 numerals");
        assert!(!OuterRingLayer::has_tick(0, TopMarker::Numeral));
        assert!(OuterRingLayer::has_tick(0, TopMarker::Tick));
        assert!(!OuterRingLayer::has_tick(35, TopMarker::Tick));
    }

    // -------------------------------------------------------------------------
    // Numerals
    // -------------------------------------------------------------------------

    #[test]
    fn test_minute_numerals() {
        let ctx = record(FaceConfig::CLASSIC);
        let texts: heapless::Vec<&str, 12> = ctx.texts().collect();
        assert_eq!(texts.as_slice(), &["05", "10", "15", "20", "25", "30", "35", "40", "45", "50", "55"]);

        let ctx = record(FaceConfig::MINIMAL);
        assert_eq!(ctx.texts().last(), Some("60"), "Numeral marker adds 60 at the top");
    }

    #[test]
    fn test_lower_numerals_are_flipped_and_legible() {
        let fixture = FaceFixture::new(FaceConfig::CLASSIC);
        let ctx = record(FaceConfig::CLASSIC);
        for call in ctx.calls() {
            if let DrawCall::Text { text, color, anchor, .. } = call {
                assert_eq!(*color, fixture.derived.legible, "{text} uses the legible color");
                let lower = matches!(text.as_str(), "20" | "25" | "30" | "35" | "40");
                let expected = if lower { TextAnchor::Baseline } else { TextAnchor::Top };
                assert_eq!(*anchor, expected, "Anchor of {text}");
            }
        }
    }

    #[test]
    fn test_ticks_use_palette_color() {
        let ctx = record(FaceConfig::CLASSIC);
        let palette = FaceConfig::CLASSIC.palette;
        for call in ctx.calls() {
            if let DrawCall::FillPath { color, scale, .. } = call {
                assert_eq!(*color, palette.tick);
                assert_eq!(*scale, MINUTE_TICK_SCALE);
            }
        }
    }
}
