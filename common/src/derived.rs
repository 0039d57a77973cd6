//! Display state derived from time, settings and battery events.
//!
//! Each field is recomputed only by the event that owns it: the day string
//! on a day change, the multiplier and legible color on a settings change,
//! the segment mask on a battery change.

use core::fmt::Write;

use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;

use crate::battery::{BatteryState, SegmentMask};
use crate::colors::{WHITE, legible_over};
use crate::settings::ClockMode;

/// Day-of-month text, no leading zero ("3", "23").
pub fn format_day(day: u8) -> String<2> {
    let mut text = String::new();
    write!(text, "{}", day.min(31)).ok();
    text
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DerivedDisplayState {
    pub day: u8,
    pub day_text: String<2>,
    pub hour_label_multiplier: u8,
    pub battery: BatteryState,
    pub hidden_segments: SegmentMask,
    /// Foreground that reads over the current background.
    pub legible: Rgb565,
}

impl DerivedDisplayState {
    pub fn new() -> Self {
        Self {
            day: 0,
            day_text: String::new(),
            hour_label_multiplier: ClockMode::default().hour_label_multiplier(),
            battery: BatteryState::default(),
            hidden_segments: SegmentMask::NONE,
            legible: WHITE,
        }
    }

    /// Returns `true` when the day actually changed.
    pub fn update_day(
        &mut self,
        day: u8,
    ) -> bool {
        if day == self.day && !self.day_text.is_empty() {
            return false;
        }
        self.day = day;
        self.day_text = format_day(day);
        true
    }

    /// Returns `true` when the multiplier changed.
    pub fn update_clock_mode(
        &mut self,
        mode: ClockMode,
    ) -> bool {
        let multiplier = mode.hour_label_multiplier();
        let changed = multiplier != self.hour_label_multiplier;
        self.hour_label_multiplier = multiplier;
        changed
    }

    /// Returns `true` when the legible color changed.
    pub fn update_background(
        &mut self,
        background: Rgb565,
    ) -> bool {
        let legible = legible_over(background);
        let changed = legible != self.legible;
        self.legible = legible;
        changed
    }

    /// Returns `true` when segment visibility or charging changed.
    pub fn update_battery(
        &mut self,
        battery: BatteryState,
    ) -> bool {
        let hidden = battery.hidden_segments();
        let changed = hidden != self.hidden_segments || battery.charging != self.battery.charging;
        self.battery = battery;
        self.hidden_segments = hidden;
        changed
    }
}

impl Default for DerivedDisplayState {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, LIGHT_GRAY};

    #[test]
    fn test_format_day_has_no_leading_zero() {
        assert_eq!(format_day(3).as_str(), "3");
        assert_eq!(format_day(23).as_str(), "23");
        assert_eq!(format_day(31).as_str(), "31");
    }

    #[test]
    fn test_update_day_reports_change_once() {
        let mut state = DerivedDisplayState::new();
        assert!(state.update_day(9), "First day always counts as a change");
        assert!(!state.update_day(9));
        assert!(state.update_day(10));
        assert_eq!(state.day_text.as_str(), "10");
    }

    #[test]
    fn test_update_clock_mode() {
        let mut state = DerivedDisplayState::new();
        assert!(!state.update_clock_mode(ClockMode::TwentyFourHour));
        assert!(state.update_clock_mode(ClockMode::TwelveHour));
        assert_eq!(state.hour_label_multiplier, 1);
    }

    #[test]
    fn test_update_background_tracks_legible_color() {
        let mut state = DerivedDisplayState::new();
        assert!(!state.update_background(BLACK));
        assert!(state.update_background(LIGHT_GRAY));
        assert_eq!(state.legible, BLACK);
    }

    #[test]
    fn test_update_battery_ignores_same_segments() {
        let mut state = DerivedDisplayState::new();
        assert!(state.update_battery(BatteryState::new(50, false)));
        assert!(!state.update_battery(BatteryState::new(60, false)), "50% and 60% show the same segments");
        assert_eq!(state.battery.charge_percent, 60);
        assert!(state.update_battery(BatteryState::new(60, true)), "Charging toggles the bolt");
    }
}
