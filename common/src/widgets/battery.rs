//! Battery icon with per-segment visibility and a charging bolt.

use embedded_graphics::primitives::Rectangle;

use super::{FaceModel, Layer};
use crate::assets::{BATTERY_BOLT_COMMAND, battery_segment_command};
use crate::battery::{BATTERY_SEGMENTS, SegmentMask};
use crate::context::DrawContext;
use crate::render::LayerId;
use crate::vector::VectorImage;

/// Show or hide the fill segments and the bolt of the battery icon.
pub fn apply_battery_state(
    icon: &mut VectorImage,
    hidden: SegmentMask,
    charging: bool,
) {
    for segment in 1..=BATTERY_SEGMENTS {
        icon.set_hidden(battery_segment_command(segment), hidden.contains(segment));
    }
    icon.set_hidden(BATTERY_BOLT_COMMAND, !charging);
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct BatteryLayer {
    frame: Rectangle,
}

impl BatteryLayer {
    pub const fn new(frame: Rectangle) -> Self { Self { frame } }
}

impl Layer for BatteryLayer {
    fn id(&self) -> LayerId { LayerId::Battery }

    fn frame(&self) -> Rectangle { self.frame }

    fn draw(
        &self,
        ctx: &mut dyn DrawContext,
        face: &FaceModel<'_>,
    ) {
        ctx.draw_vector(&face.assets.battery_icon, self.frame.top_left);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::Assets;
    use crate::battery::BatteryState;
    use crate::config::{BATTERY_FRAME, FaceConfig};
    use crate::context::{DrawCall, RecordingContext};
    use crate::widgets::test_support::FaceFixture;

    fn visible_segments(icon: &VectorImage) -> heapless::Vec<u8, 3> {
        (1..=BATTERY_SEGMENTS).filter(|s| !icon.is_hidden(battery_segment_command(*s))).collect()
    }

    #[test]
    fn test_segments_follow_charge() {
        let mut icon = Assets::load().battery_icon;
        for (charge, visible) in [(5, &[][..]), (15, &[1][..]), (45, &[1, 2][..]), (85, &[1, 2, 3][..])] {
            let state = BatteryState::new(charge, false);
            apply_battery_state(&mut icon, state.hidden_segments(), state.charging);
            assert_eq!(visible_segments(&icon).as_slice(), visible, "Visible segments at {charge}%");
            assert!(!icon.is_hidden(0), "Body is always drawn");
        }
    }

    #[test]
    fn test_bolt_only_while_charging() {
        let mut icon = Assets::load().battery_icon;
        assert!(icon.is_hidden(BATTERY_BOLT_COMMAND), "Bolt starts hidden");
        apply_battery_state(&mut icon, SegmentMask::NONE, true);
        assert!(!icon.is_hidden(BATTERY_BOLT_COMMAND));
        apply_battery_state(&mut icon, SegmentMask::NONE, false);
        assert!(icon.is_hidden(BATTERY_BOLT_COMMAND));
    }

    #[test]
    fn test_draws_icon_at_frame_origin() {
        let mut fixture = FaceFixture::new(FaceConfig::COMPLETE);
        apply_battery_state(&mut fixture.assets.battery_icon, SegmentMask::for_charge(45), false);
        let mut ctx = RecordingContext::new();
        ctx.reset();
        BatteryLayer::new(BATTERY_FRAME).draw(&mut ctx, &fixture.model());
        assert_eq!(
            ctx.calls(),
            &[DrawCall::Vector {
                origin: BATTERY_FRAME.top_left,
                visible_commands: 4,
            }],
            "Body, terminal and two segments"
        );
    }
}
