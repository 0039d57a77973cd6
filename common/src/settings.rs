//! User display settings, as read from the settings store.
//!
//! The core never stores or persists these; it re-reads the whole struct on
//! each change notification.

use embedded_graphics::pixelcolor::Rgb565;

use crate::colors::{BLACK, DARK_GRAY, RED, WHITE};

/// How the twelve hour-ring numerals are labelled.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockMode {
    /// Labels "01".."12"; the hour hand turns twice a day.
    TwelveHour,
    /// Labels "02".."24"; the hour hand turns once a day.
    #[default]
    TwentyFourHour,
}

impl ClockMode {
    /// Value each numeral position is multiplied by.
    #[inline]
    pub const fn hour_label_multiplier(self) -> u8 {
        match self {
            Self::TwelveHour => 1,
            Self::TwentyFourHour => 2,
        }
    }

    #[inline]
    #[must_use]
    pub const fn toggle(self) -> Self {
        match self {
            Self::TwelveHour => Self::TwentyFourHour,
            Self::TwentyFourHour => Self::TwelveHour,
        }
    }
}

/// When to buzz on phone connection changes.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum ConnectionVibe {
    Off = 0,
    #[default]
    Disconnect = 1,
    Connect = 2,
    Both = 3,
}

impl ConnectionVibe {
    /// Parse the numeric string the settings payload carries.
    ///
    /// Only the leading decimal digits count; anything unrecognised is `Off`.
    pub fn from_setting(value: &str) -> Self {
        let digits = value.trim_start();
        let end = digits.find(|c: char| !c.is_ascii_digit()).unwrap_or(digits.len());
        match digits[..end].parse::<u32>() {
            Ok(1) => Self::Disconnect,
            Ok(2) => Self::Connect,
            Ok(3) => Self::Both,
            _ => Self::Off,
        }
    }
}

/// Current values of every user-facing setting.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DisplaySettings {
    pub background: Rgb565,
    pub hour_hand: Rgb565,
    pub minute_hand: Rgb565,
    pub second_hand: Rgb565,
    pub seconds_enabled: bool,
    pub clock_mode: ClockMode,
    pub connection_vibe: ConnectionVibe,
    pub hourly_vibe: bool,
    pub health_enabled: bool,
}

impl DisplaySettings {
    pub const DEFAULT: Self = Self {
        background: BLACK,
        hour_hand: RED,
        minute_hand: WHITE,
        second_hand: DARK_GRAY,
        seconds_enabled: true,
        clock_mode: ClockMode::TwentyFourHour,
        connection_vibe: ConnectionVibe::Disconnect,
        hourly_vibe: false,
        health_enabled: false,
    };
}

impl Default for DisplaySettings {
    fn default() -> Self { Self::DEFAULT }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hour_label_multiplier() {
        assert_eq!(ClockMode::TwentyFourHour.hour_label_multiplier(), 2, "Labels 02..24");
        assert_eq!(ClockMode::TwelveHour.hour_label_multiplier(), 1, "Labels 01..12");
    }

    #[test]
    fn test_clock_mode_toggle_cycle() {
        assert_eq!(ClockMode::TwelveHour.toggle().toggle(), ClockMode::TwelveHour);
    }

    #[test]
    fn test_connection_vibe_parses_leading_digits() {
        assert_eq!(ConnectionVibe::from_setting("0"), ConnectionVibe::Off);
        assert_eq!(ConnectionVibe::from_setting("1"), ConnectionVibe::Disconnect);
        assert_eq!(ConnectionVibe::from_setting("2"), ConnectionVibe::Connect);
        assert_eq!(ConnectionVibe::from_setting(" 3 (both)"), ConnectionVibe::Both);
    }

    #[test]
    fn test_connection_vibe_unknown_is_off() {
        assert_eq!(ConnectionVibe::from_setting(""), ConnectionVibe::Off);
        assert_eq!(ConnectionVibe::from_setting("always"), ConnectionVibe::Off);
        assert_eq!(ConnectionVibe::from_setting("7"), ConnectionVibe::Off);
    }

    #[test]
    fn test_defaults() {
        let settings = DisplaySettings::default();
        assert!(settings.seconds_enabled);
        assert_eq!(settings.clock_mode, ClockMode::TwentyFourHour);
        assert_eq!(settings.background, BLACK);
    }
}
