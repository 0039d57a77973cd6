//! Watch palette in RGB565.
//!
//! The face is authored against the 64-color watch palette, where every
//! channel is one of `0x00`, `0x55`, `0xAA` or `0xFF`. Each constant below is
//! that 8-bit color truncated to 5-6-5.

use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
use embedded_graphics::prelude::IntoStorage;

// =============================================================================
// Neutrals
// =============================================================================

/// `#000000`
pub const BLACK: Rgb565 = Rgb565::BLACK;

/// `#FFFFFF`
pub const WHITE: Rgb565 = Rgb565::WHITE;

/// `#AAAAAA`. Tick marks.
pub const LIGHT_GRAY: Rgb565 = Rgb565::new(21, 42, 21);

/// `#555555`. Hand outlines and the pivot cap.
pub const DARK_GRAY: Rgb565 = Rgb565::new(10, 21, 10);

// =============================================================================
// Accents
// =============================================================================

/// `#FF0000`
pub const RED: Rgb565 = Rgb565::RED;

/// `#FF5500`
pub const ORANGE: Rgb565 = Rgb565::new(31, 21, 0);

/// `#FFAA00`
pub const CHROME_YELLOW: Rgb565 = Rgb565::new(31, 42, 0);

/// `#FFFF00`
pub const YELLOW: Rgb565 = Rgb565::YELLOW;

/// `#00AA00`
pub const ISLAMIC_GREEN: Rgb565 = Rgb565::new(0, 42, 0);

/// `#00AAFF`
pub const VIVID_CERULEAN: Rgb565 = Rgb565::new(0, 42, 31);

/// `#0055AA`
pub const COBALT_BLUE: Rgb565 = Rgb565::new(0, 21, 21);

/// `#000055`
pub const OXFORD_BLUE: Rgb565 = Rgb565::new(0, 0, 10);

/// `#AA00FF`
pub const VIVID_VIOLET: Rgb565 = Rgb565::new(21, 0, 31);

/// Background choices offered by the simulator's settings page, in cycle order.
pub const BACKGROUNDS: [Rgb565; 6] = [BLACK, OXFORD_BLUE, COBALT_BLUE, LIGHT_GRAY, WHITE, CHROME_YELLOW];

// =============================================================================
// Legibility
// =============================================================================

/// Foreground guaranteed to read over `background`: white on dark, black on
/// light.
pub fn legible_over(background: Rgb565) -> Rgb565 {
    let luma = luminance(background);
    if luma < 128 { WHITE } else { BLACK }
}

/// Perceived brightness in `0..=255` (BT.601 weights in 8-bit fixed point).
#[inline]
pub fn luminance(color: Rgb565) -> u32 {
    let raw = color.into_storage();
    let r5 = u32::from((raw >> 11) & 0x1F);
    let g6 = u32::from((raw >> 5) & 0x3F);
    let b5 = u32::from(raw & 0x1F);

    let r8 = (r5 << 3) | (r5 >> 2);
    let g8 = (g6 << 2) | (g6 >> 4);
    let b8 = (b5 << 3) | (b5 >> 2);

    (r8 * 77 + g8 * 150 + b8 * 29) >> 8
}
