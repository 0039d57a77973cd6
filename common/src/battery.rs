//! Battery state and the icon segments it implies.

use crate::thresholds::BATTERY_SEGMENT_THRESHOLDS;

/// Number of optional fill segments in the battery icon.
pub const BATTERY_SEGMENTS: u8 = 3;

/// A reading from the battery source.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct BatteryState {
    /// 0..=100
    pub charge_percent: u8,
    pub charging: bool,
}

impl BatteryState {
    pub const fn new(
        charge_percent: u8,
        charging: bool,
    ) -> Self {
        Self {
            charge_percent: if charge_percent > 100 { 100 } else { charge_percent },
            charging,
        }
    }

    /// Segments hidden at this charge level.
    #[inline]
    pub const fn hidden_segments(&self) -> SegmentMask { SegmentMask::for_charge(self.charge_percent) }
}

impl Default for BatteryState {
    fn default() -> Self { Self::new(100, false) }
}

/// Set of hidden battery segments, numbered 1..=3 from the empty end.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SegmentMask(u8);

impl SegmentMask {
    pub const NONE: Self = Self(0);

    /// Segment `n` is hidden while the charge is below its threshold.
    pub const fn for_charge(charge_percent: u8) -> Self {
        let mut bits = 0;
        let mut i = 0;
        while i < BATTERY_SEGMENT_THRESHOLDS.len() {
            if charge_percent < BATTERY_SEGMENT_THRESHOLDS[i] {
                bits |= 1 << i;
            }
            i += 1;
        }
        Self(bits)
    }

    /// Whether segment `segment` (1-based) is hidden.
    #[inline]
    pub const fn contains(
        self,
        segment: u8,
    ) -> bool {
        segment >= 1 && segment <= BATTERY_SEGMENTS && self.0 & (1 << (segment - 1)) != 0
    }

    #[inline]
    pub const fn count(self) -> u32 { self.0.count_ones() }

    #[inline]
    pub const fn is_empty(self) -> bool { self.0 == 0 }

    /// Hidden segments, highest first.
    pub fn iter(self) -> impl Iterator<Item = u8> { (1..=BATTERY_SEGMENTS).rev().filter(move |s| self.contains(*s)) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hidden(charge: u8) -> heapless::Vec<u8, 3> { SegmentMask::for_charge(charge).iter().collect() }

    #[test]
    fn test_reference_charges() {
        assert_eq!(hidden(5).as_slice(), &[3, 2, 1], "5% hides every segment");
        assert_eq!(hidden(15).as_slice(), &[3, 2]);
        assert_eq!(hidden(45).as_slice(), &[3]);
        assert!(hidden(85).is_empty(), "85% hides nothing");
    }

    #[test]
    fn test_thresholds_are_inclusive() {
        assert!(!SegmentMask::for_charge(10).contains(1), "Segment 1 shows at exactly 10%");
        assert!(SegmentMask::for_charge(79).contains(3));
        assert!(!SegmentMask::for_charge(80).contains(3));
    }

    #[test]
    fn test_contains_rejects_out_of_range() {
        let mask = SegmentMask::for_charge(0);
        assert!(!mask.contains(0));
        assert!(!mask.contains(4));
        assert_eq!(mask.count(), 3);
    }

    #[test]
    fn test_state_clamps_percent() {
        assert_eq!(BatteryState::new(150, true).charge_percent, 100);
        assert!(BatteryState::new(100, false).hidden_segments().is_empty());
    }
}
