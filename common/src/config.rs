//! Face layout constants and per-variant configuration.
//!
//! Every shipped face is the same dial with a different [`FaceConfig`]:
//! which optional layers exist, how the minute ring treats 12 o'clock,
//! whether the numbering mode is pinned, and the fixed palette.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::colors::{DARK_GRAY, LIGHT_GRAY, WHITE};
use crate::fixed::FPoint;
use crate::settings::ClockMode;

// =============================================================================
// Display
// =============================================================================

/// Display width in pixels (round 180 px class watch).
pub const SCREEN_WIDTH: u32 = 180;

/// Display height in pixels.
pub const SCREEN_HEIGHT: u32 = 180;

/// Full-screen layer frame.
pub const SCREEN_BOUNDS: Rectangle = Rectangle::new(Point::new(0, 0), Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));

/// Integer screen center.
pub const CENTER: Point = Point::new((SCREEN_WIDTH / 2) as i32, (SCREEN_HEIGHT / 2) as i32);

/// Common pivot of the three hands: one pixel up-left of the integer center.
pub const HAND_PIVOT: Point = Point::new(CENTER.x - 1, CENTER.y - 1);

// =============================================================================
// Rings
// =============================================================================

/// Bezel inset of the minute ring.
pub const OUTER_RING_INSET: u32 = 3;

/// Inset of the hour dots.
pub const HOUR_DOT_INSET: u32 = 14;

/// Inset of the half-hour lines and hour numerals.
pub const INNER_RING_INSET: u32 = 30;

const _: () = assert!(OUTER_RING_INSET < HOUR_DOT_INSET);
const _: () = assert!(HOUR_DOT_INSET < INNER_RING_INSET);
const _: () = assert!(2 * INNER_RING_INSET < SCREEN_WIDTH);

/// Minute tick: 2 x 16 px.
pub const MINUTE_TICK_SCALE: FPoint = FPoint::from_int(1, 8);

/// Hour dot: 6 x 6 px.
pub const HOUR_DOT_SCALE: FPoint = FPoint::from_int(3, 3);

/// Half-hour line: 2 x 24 px.
pub const HALF_HOUR_TICK_SCALE: FPoint = FPoint::from_int(1, 12);

/// 12 o'clock triangle: 18 px wide, 12 px tall.
pub const TOP_MARKER_SCALE: FPoint = FPoint::from_int(9, 12);

// =============================================================================
// Hands
// =============================================================================

/// Radius of the cap over the pivot.
pub const CAP_RADIUS: u32 = 4;

/// Outline width of the hour and minute hands.
pub const HAND_OUTLINE_WIDTH: u32 = 1;

/// Stroke width of the second hand.
pub const SECOND_HAND_WIDTH: u32 = 1;

// =============================================================================
// Complications
// =============================================================================

/// Band the logo is centered in, top-aligned.
pub const LOGO_FRAME: Rectangle = Rectangle::new(Point::new(0, 60), Size::new(SCREEN_WIDTH, 21));

/// Date window, left of the 3 o'clock numeral.
pub const DATE_BOX: Rectangle = Rectangle::new(Point::new(106, 79), Size::new(30, 22));

pub const DATE_BOX_CORNER_RADIUS: u32 = 3;

/// Gap between the date text and the right edge of the box.
pub const DATE_TEXT_PADDING: i32 = 3;

/// Battery icon frame, right of the 9 o'clock numeral.
pub const BATTERY_FRAME: Rectangle = Rectangle::new(Point::new(44, 84), Size::new(23, 12));

// =============================================================================
// Variants
// =============================================================================

/// What sits at 12 o'clock on the minute ring.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum TopMarker {
    /// A minute tick; numerals "05".."55".
    #[default]
    Tick,
    /// A "60" numeral; every fifth tick is skipped.
    Numeral,
}

/// Fixed colors that do not follow user settings.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Palette {
    pub tick: Rgb565,
    pub hand_outline: Rgb565,
    pub cap: Rgb565,
    pub date_fill: Rgb565,
    pub date_outline: Rgb565,
}

impl Palette {
    pub const STANDARD: Self = Self {
        tick: LIGHT_GRAY,
        hand_outline: DARK_GRAY,
        cap: DARK_GRAY,
        date_fill: WHITE,
        date_outline: LIGHT_GRAY,
    };
}

/// Which parts of the face exist.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct FaceConfig {
    /// Second hand layer exists (still subject to the user setting).
    pub seconds_hand: bool,
    pub date_window: bool,
    pub battery_indicator: bool,
    pub logo: bool,
    pub top_marker: TopMarker,
    /// Numbering pinned by the variant; `None` follows the user setting.
    pub clock_mode: Option<ClockMode>,
    pub palette: Palette,
}

impl FaceConfig {
    /// 24-hour dial with seconds and logo.
    pub const CLASSIC: Self = Self {
        seconds_hand: true,
        date_window: false,
        battery_indicator: false,
        logo: true,
        top_marker: TopMarker::Tick,
        clock_mode: Some(ClockMode::TwentyFourHour),
        palette: Palette::STANDARD,
    };

    /// Every complication on; numbering follows settings.
    pub const COMPLETE: Self = Self {
        seconds_hand: true,
        date_window: true,
        battery_indicator: true,
        logo: true,
        top_marker: TopMarker::Tick,
        clock_mode: None,
        palette: Palette::STANDARD,
    };

    /// Rings and two hands only.
    pub const MINIMAL: Self = Self {
        seconds_hand: false,
        date_window: false,
        battery_indicator: false,
        logo: false,
        top_marker: TopMarker::Numeral,
        clock_mode: None,
        palette: Palette::STANDARD,
    };

    /// Date window without battery.
    pub const DATE: Self = Self {
        seconds_hand: true,
        date_window: true,
        battery_indicator: false,
        logo: true,
        top_marker: TopMarker::Tick,
        clock_mode: None,
        palette: Palette::STANDARD,
    };

    /// Conventional 01..12 dial with battery.
    pub const TWELVE_HOUR: Self = Self {
        seconds_hand: true,
        date_window: true,
        battery_indicator: true,
        logo: false,
        top_marker: TopMarker::Numeral,
        clock_mode: Some(ClockMode::TwelveHour),
        palette: Palette::STANDARD,
    };

    /// All presets with their names, in menu order.
    pub const PRESETS: [(&'static str, Self); 5] = [
        ("classic", Self::CLASSIC),
        ("complete", Self::COMPLETE),
        ("minimal", Self::MINIMAL),
        ("date", Self::DATE),
        ("twelve-hour", Self::TWELVE_HOUR),
    ];

    /// Look a preset up by name.
    pub fn preset(name: &str) -> Option<Self> {
        Self::PRESETS.iter().find(|(preset, _)| preset.eq_ignore_ascii_case(name)).map(|(_, config)| *config)
    }

    /// Numbering in effect given the user's choice.
    #[inline]
    pub const fn effective_clock_mode(
        &self,
        user: ClockMode,
    ) -> ClockMode {
        match self.clock_mode {
            Some(pinned) => pinned,
            None => user,
        }
    }
}

impl Default for FaceConfig {
    fn default() -> Self { Self::CLASSIC }
}
