//! Dial layers.
//!
//! Every layer draws itself from a read-only [`FaceModel`] snapshot through a
//! [`DrawContext`]. The controller holds the layers in back-to-front order
//! and hands each one a freshly reset context during a redraw pass.

mod battery;
mod date;
mod hands;
mod inner_ring;
mod logo;
mod outer_ring;
mod primitives;

use embedded_graphics::primitives::Rectangle;
use heapless::Vec;

pub use battery::{BatteryLayer, apply_battery_state};
pub use date::DateLayer;
pub use hands::HandsLayer;
pub use inner_ring::InnerRingLayer;
pub use logo::LogoLayer;
pub use outer_ring::OuterRingLayer;
pub use primitives::{dial_numeral_orientation, draw_numeral, draw_tick, format_numeral};

use crate::assets::Assets;
use crate::config::{BATTERY_FRAME, DATE_BOX, FaceConfig, LOGO_FRAME};
use crate::context::DrawContext;
use crate::derived::DerivedDisplayState;
use crate::hands::HandSet;
use crate::render::{LAYER_COUNT, LayerId};
use crate::settings::DisplaySettings;

/// Everything a layer may read while drawing.
#[derive(Clone, Copy)]
pub struct FaceModel<'a> {
    pub config: &'a FaceConfig,
    pub settings: &'a DisplaySettings,
    pub derived: &'a DerivedDisplayState,
    pub hands: &'a HandSet,
    pub assets: &'a Assets,
    /// Second hand enabled by both the variant and the user.
    pub seconds_shown: bool,
}

/// A renderable region of the face.
pub trait Layer {
    fn id(&self) -> LayerId;

    fn frame(&self) -> Rectangle;

    fn draw(
        &self,
        ctx: &mut dyn DrawContext,
        face: &FaceModel<'_>,
    );
}

/// The closed set of dial layers.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum DialLayer {
    Logo(LogoLayer),
    OuterRing(OuterRingLayer),
    InnerRing(InnerRingLayer),
    Date(DateLayer),
    Battery(BatteryLayer),
    Hands(HandsLayer),
}

impl DialLayer {
    fn as_layer(&self) -> &dyn Layer {
        match self {
            Self::Logo(layer) => layer,
            Self::OuterRing(layer) => layer,
            Self::InnerRing(layer) => layer,
            Self::Date(layer) => layer,
            Self::Battery(layer) => layer,
            Self::Hands(layer) => layer,
        }
    }
}

impl Layer for DialLayer {
    fn id(&self) -> LayerId { self.as_layer().id() }

    fn frame(&self) -> Rectangle { self.as_layer().frame() }

    fn draw(
        &self,
        ctx: &mut dyn DrawContext,
        face: &FaceModel<'_>,
    ) {
        self.as_layer().draw(ctx, face);
    }
}

/// Layers for `config` inside `bounds`, back to front.
pub fn build_layers(
    config: &FaceConfig,
    bounds: Rectangle,
) -> Vec<DialLayer, LAYER_COUNT> {
    let mut layers = Vec::new();
    if config.logo {
        layers.push(DialLayer::Logo(LogoLayer::new(LOGO_FRAME))).ok();
    }
    layers.push(DialLayer::OuterRing(OuterRingLayer::new(bounds))).ok();
    layers.push(DialLayer::InnerRing(InnerRingLayer::new(bounds))).ok();
    if config.date_window {
        layers.push(DialLayer::Date(DateLayer::new(DATE_BOX))).ok();
    }
    if config.battery_indicator {
        layers.push(DialLayer::Battery(BatteryLayer::new(BATTERY_FRAME))).ok();
    }
    layers.push(DialLayer::Hands(HandsLayer::new(bounds))).ok();
    layers
}
