//! Dirty tracking for dial layers.
//!
//! Handlers only mark layers dirty; drawing happens in the next redraw
//! pass. A pass composites the background and every layer in order whenever
//! anything is dirty, because layers overlap (hands sweep over the rings and
//! the date window).
//!
//! | Layer | Marked dirty by |
//! |-------|-----------------|
//! | Hands | every tick |
//! | Date | day change |
//! | Battery | battery event that changes segments or charging |
//! | All + background | settings change, start |

/// Dial layers in back-to-front order.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LayerId {
    Logo = 0,
    OuterRing = 1,
    InnerRing = 2,
    Date = 3,
    Battery = 4,
    Hands = 5,
}

/// Number of distinct layers.
pub const LAYER_COUNT: usize = 6;

impl LayerId {
    pub const ALL: [Self; LAYER_COUNT] = [
        Self::Logo,
        Self::OuterRing,
        Self::InnerRing,
        Self::Date,
        Self::Battery,
        Self::Hands,
    ];

    #[inline]
    const fn bit(self) -> u8 { 1 << self as u8 }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Logo => "logo",
            Self::OuterRing => "outer",
            Self::InnerRing => "inner",
            Self::Date => "date",
            Self::Battery => "battery",
            Self::Hands => "hands",
        }
    }
}

/// Set of layers, as a bitmask.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LayerMask(u8);

impl LayerMask {
    pub const NONE: Self = Self(0);

    #[inline]
    pub const fn contains(
        self,
        layer: LayerId,
    ) -> bool {
        self.0 & layer.bit() != 0
    }

    #[inline]
    pub const fn is_empty(self) -> bool { self.0 == 0 }

    #[inline]
    pub const fn count(self) -> u32 { self.0.count_ones() }

    #[inline]
    #[must_use]
    pub const fn with(
        self,
        layer: LayerId,
    ) -> Self {
        Self(self.0 | layer.bit())
    }
}

/// Tracks which layers need redrawing.
///
/// The background has no flag of its own: every pass repaints it under the
/// layers, so a pass happens exactly when some layer is dirty.
pub struct RenderState {
    dirty: LayerMask,
}

impl RenderState {
    /// Every layer dirty, so the first pass draws the whole face.
    pub const fn new() -> Self {
        let mut state = Self { dirty: LayerMask::NONE };
        state.mark_all_dirty();
        state
    }

    #[inline]
    pub const fn mark_dirty(
        &mut self,
        layer: LayerId,
    ) {
        self.dirty = self.dirty.with(layer);
    }

    pub const fn mark_all_dirty(&mut self) {
        let mut i = 0;
        while i < LAYER_COUNT {
            self.dirty = self.dirty.with(LayerId::ALL[i]);
            i += 1;
        }
    }

    #[inline]
    pub const fn is_dirty(
        &self,
        layer: LayerId,
    ) -> bool {
        self.dirty.contains(layer)
    }

    #[inline]
    pub const fn dirty(&self) -> LayerMask { self.dirty }

    /// Whether a redraw pass has anything to do.
    #[inline]
    pub const fn needs_redraw(&self) -> bool { !self.dirty.is_empty() }

    /// Call after a redraw pass.
    pub const fn end_frame(&mut self) { self.dirty = LayerMask::NONE; }
}

impl Default for RenderState {
    fn default() -> Self { Self::new() }
}
