//! Wall-clock time as the tick source delivers it.

/// A broken-down local time.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct WallTime {
    pub year: u16,
    /// 1..=12
    pub month: u8,
    /// 1..=31
    pub day: u8,
    /// 0..=23
    pub hour: u8,
    /// 0..=59
    pub minute: u8,
    /// 0..=59
    pub second: u8,
}

impl WallTime {
    /// Time of day on a fixed date; fields out of range are wrapped.
    pub const fn new(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
    ) -> Self {
        Self {
            year,
            month: if month == 0 || month > 12 { 1 } else { month },
            day: if day == 0 || day > 31 { 1 } else { day },
            hour: hour % 24,
            minute: minute % 60,
            second: second % 60,
        }
    }

    /// Break a Unix timestamp (UTC) into calendar fields.
    ///
    /// Civil-from-days conversion, valid for every `u32` timestamp.
    pub const fn from_unix(timestamp: u32) -> Self {
        let days = timestamp / 86_400;
        let secs = timestamp % 86_400;
        let hour = (secs / 3600) as u8;
        let minute = ((secs % 3600) / 60) as u8;
        let second = (secs % 60) as u8;

        // days since 0000-03-01
        let z = days as i32 + 719_468;
        let era = z / 146_097;
        let doe = z - era * 146_097;
        let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
        let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
        let mp = (5 * doy + 2) / 153;
        let day = doy - (153 * mp + 2) / 5 + 1;
        let month = if mp < 10 { mp + 3 } else { mp - 9 };
        let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };

        Self {
            year: year as u16,
            month: month as u8,
            day: day as u8,
            hour,
            minute,
            second,
        }
    }

    /// Seconds since local midnight.
    #[inline]
    pub const fn seconds_of_day(&self) -> u32 { self.hour as u32 * 3600 + self.minute as u32 * 60 + self.second as u32 }

    /// Whether `other` falls on a different calendar day.
    #[inline]
    pub const fn is_different_day(
        &self,
        other: &Self,
    ) -> bool {
        self.day != other.day || self.month != other.month || self.year != other.year
    }
}

// =============================================================================
// Changed Units
// =============================================================================

/// Bitmask of the time fields that changed since the previous tick.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeUnits(u8);

impl TimeUnits {
    pub const NONE: Self = Self(0);
    pub const SECOND: Self = Self(1 << 0);
    pub const MINUTE: Self = Self(1 << 1);
    pub const HOUR: Self = Self(1 << 2);
    pub const DAY: Self = Self(1 << 3);
    pub const MONTH: Self = Self(1 << 4);
    pub const YEAR: Self = Self(1 << 5);
    pub const ALL: Self = Self(0x3F);

    #[inline]
    pub const fn bits(self) -> u8 { self.0 }

    #[inline]
    pub const fn contains(
        self,
        other: Self,
    ) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    pub const fn intersects(
        self,
        other: Self,
    ) -> bool {
        self.0 & other.0 != 0
    }

    #[inline]
    #[must_use]
    pub const fn union(
        self,
        other: Self,
    ) -> Self {
        Self(self.0 | other.0)
    }

    /// Units that differ between two times.
    pub const fn changed_between(
        previous: &WallTime,
        next: &WallTime,
    ) -> Self {
        let mut bits = 0;
        if previous.second != next.second {
            bits |= Self::SECOND.0;
        }
        if previous.minute != next.minute {
            bits |= Self::MINUTE.0;
        }
        if previous.hour != next.hour {
            bits |= Self::HOUR.0;
        }
        if previous.day != next.day {
            bits |= Self::DAY.0;
        }
        if previous.month != next.month {
            bits |= Self::MONTH.0;
        }
        if previous.year != next.year {
            bits |= Self::YEAR.0;
        }
        Self(bits)
    }
}

/// How often the tick source fires.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TickGranularity {
    #[default]
    PerMinute,
    PerSecond,
}

impl TickGranularity {
    /// Per-second only while a second hand is on screen.
    #[inline]
    pub const fn for_seconds(seconds_shown: bool) -> Self { if seconds_shown { Self::PerSecond } else { Self::PerMinute } }

    /// The smallest unit whose change fires a tick.
    #[inline]
    pub const fn unit(self) -> TimeUnits {
        match self {
            Self::PerMinute => TimeUnits::MINUTE,
            Self::PerSecond => TimeUnits::SECOND,
        }
    }

    /// Whether a change in `changed` is delivered at this granularity.
    #[inline]
    pub const fn fires_on(
        self,
        changed: TimeUnits,
    ) -> bool {
        match self {
            Self::PerSecond => changed.bits() != 0,
            Self::PerMinute => changed.bits() & !TimeUnits::SECOND.bits() != 0,
        }
    }
}
