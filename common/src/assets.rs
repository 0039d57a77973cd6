//! Bundled resources: numeral fonts, the logo glyph and the battery icon.
//!
//! Loading is synchronous and infallible; everything is compiled in.

use embedded_graphics::prelude::*;

use crate::colors::WHITE;
use crate::styles::NumeralFonts;
use crate::vector::{VectorCommand, VectorImage};

// =============================================================================
// Battery Icon
// =============================================================================

pub const BATTERY_ICON_SIZE: Size = Size::new(23, 12);

const BATTERY_BODY: [Point; 4] = [Point::new(0, 0), Point::new(19, 0), Point::new(19, 11), Point::new(0, 11)];
const BATTERY_TERMINAL: [Point; 4] = [Point::new(20, 3), Point::new(22, 3), Point::new(22, 8), Point::new(20, 8)];
const BATTERY_SEGMENT_1: [Point; 4] = [Point::new(2, 2), Point::new(7, 2), Point::new(7, 10), Point::new(2, 10)];
const BATTERY_SEGMENT_2: [Point; 4] = [Point::new(8, 2), Point::new(13, 2), Point::new(13, 10), Point::new(8, 10)];
const BATTERY_SEGMENT_3: [Point; 4] = [Point::new(14, 2), Point::new(18, 2), Point::new(18, 10), Point::new(14, 10)];
const BATTERY_BOLT: [Point; 6] = [
    Point::new(11, 1),
    Point::new(6, 6),
    Point::new(10, 6),
    Point::new(8, 11),
    Point::new(14, 5),
    Point::new(10, 5),
];

/// Command index of the charging bolt.
pub const BATTERY_BOLT_COMMAND: usize = 5;

/// Command index of fill segment `segment` (1-based).
#[inline]
pub const fn battery_segment_command(segment: u8) -> usize { 1 + segment as usize }

fn battery_icon() -> VectorImage {
    VectorImage::new(
        BATTERY_ICON_SIZE,
        &[
            VectorCommand::stroked_path(&BATTERY_BODY, false, WHITE, 1),
            VectorCommand::filled_path(&BATTERY_TERMINAL, WHITE),
            VectorCommand::filled_path(&BATTERY_SEGMENT_1, WHITE),
            VectorCommand::filled_path(&BATTERY_SEGMENT_2, WHITE),
            VectorCommand::filled_path(&BATTERY_SEGMENT_3, WHITE),
            VectorCommand::filled_path(&BATTERY_BOLT, WHITE).hide(),
        ],
    )
}

// =============================================================================
// Logo
// =============================================================================

pub const LOGO_SIZE: Size = Size::new(41, 15);

const LOGO_OUTLINE: [Point; 6] = [
    Point::new(0, 7),
    Point::new(8, 0),
    Point::new(32, 0),
    Point::new(40, 7),
    Point::new(32, 14),
    Point::new(8, 14),
];
const LOGO_STONE: [Point; 4] = [Point::new(20, 3), Point::new(25, 8), Point::new(20, 13), Point::new(15, 8)];

fn logo() -> VectorImage {
    VectorImage::new(
        LOGO_SIZE,
        &[
            VectorCommand::stroked_path(&LOGO_OUTLINE, false, WHITE, 1),
            VectorCommand::filled_path(&LOGO_STONE, WHITE),
        ],
    )
}

// =============================================================================
// Asset Set
// =============================================================================

/// Everything loaded at startup and released at shutdown.
#[derive(Clone, Debug)]
pub struct Assets {
    pub fonts: NumeralFonts,
    pub logo: VectorImage,
    pub battery_icon: VectorImage,
}

impl Assets {
    pub fn load() -> Self {
        Self {
            fonts: NumeralFonts::load(),
            logo: logo(),
            battery_icon: battery_icon(),
        }
    }
}
