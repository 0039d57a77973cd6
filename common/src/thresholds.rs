//! Battery icon thresholds.
//!
//! All thresholds are compile-time constants. `const` assertions check their
//! ordering, so a bad edit fails the build instead of drawing a battery that
//! fills out of order.

// =============================================================================
// Battery Segment Thresholds
// =============================================================================

/// Charge (percent) at or above which the first fill segment shows.
/// Below it the icon is an empty outline.
pub const BATTERY_SEGMENT_1: u8 = 10;

/// Charge at or above which the second fill segment shows.
pub const BATTERY_SEGMENT_2: u8 = 40;

/// Charge at or above which the third fill segment shows (icon full).
pub const BATTERY_SEGMENT_3: u8 = 80;

/// Thresholds indexed by segment (segment 1 first).
pub const BATTERY_SEGMENT_THRESHOLDS: [u8; 3] = [BATTERY_SEGMENT_1, BATTERY_SEGMENT_2, BATTERY_SEGMENT_3];

const _: () = assert!(BATTERY_SEGMENT_1 > 0);
const _: () = assert!(BATTERY_SEGMENT_1 < BATTERY_SEGMENT_2);
const _: () = assert!(BATTERY_SEGMENT_2 < BATTERY_SEGMENT_3);
const _: () = assert!(BATTERY_SEGMENT_3 <= 100);

/// Charge at or below which the battery layer logs a low-battery warning.
pub const BATTERY_LOW_WARNING: u8 = 10;

const _: () = assert!(BATTERY_LOW_WARNING <= BATTERY_SEGMENT_2);

#[cfg(test)]
#[allow(clippy::assertions_on_constants)]
mod tests {
    use super::*;

    #[test]
    fn test_battery_threshold_ordering() {
        assert!(BATTERY_SEGMENT_1 < BATTERY_SEGMENT_2);
        assert!(BATTERY_SEGMENT_2 < BATTERY_SEGMENT_3);
    }

    #[test]
    fn test_thresholds_in_percent_range() {
        for threshold in BATTERY_SEGMENT_THRESHOLDS {
            assert!(threshold > 0 && threshold <= 100, "Threshold {threshold} outside 1..=100");
        }
    }
}
