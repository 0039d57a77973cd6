//! Fonts used on the dial.
//!
//! Numerals come in two sizes: a 10 px em for the minute ring and a ProFont
//! 14 point (roughly 18 px line) for the hour ring. Both are mono fonts so
//! rotated numerals keep a fixed advance.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use profont::PROFONT_14_POINT;

/// Minute-ring numerals ("05".."60").
pub const MINUTE_NUMERAL_FONT: &MonoFont<'static> = &FONT_6X10;

/// Hour-ring numerals and the date window.
pub const HOUR_NUMERAL_FONT: &MonoFont<'static> = &PROFONT_14_POINT;

/// Font handle the controller owns between start and shutdown.
#[derive(Clone, Copy, Debug)]
pub struct NumeralFonts {
    pub minute: &'static MonoFont<'static>,
    pub hour: &'static MonoFont<'static>,
}

impl NumeralFonts {
    pub const fn load() -> Self {
        Self {
            minute: MINUTE_NUMERAL_FONT,
            hour: HOUR_NUMERAL_FONT,
        }
    }
}
