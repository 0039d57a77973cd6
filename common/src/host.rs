//! Services the watchface needs from whatever runs it.
//!
//! The host owns the event sources. Subscribing hands back a
//! [`SubscriptionId`]; while it is active the host delivers the matching
//! events by calling the controller's `handle_*` methods from its run loop.
//! Unsubscribing with `None` is a no-op.

use heapless::Vec;

use crate::battery::BatteryState;
use crate::settings::{ConnectionVibe, DisplaySettings};
use crate::time::{TickGranularity, WallTime};

/// Hourly chime: one 300 ms pulse.
pub const HOURLY_VIBE_PATTERN_MS: [u32; 1] = [300];

/// Handle of one active subscription.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SubscriptionId(pub u32);

pub trait TickService {
    /// Current local wall-clock time.
    fn now(&self) -> WallTime;

    fn subscribe_ticks(
        &mut self,
        granularity: TickGranularity,
    ) -> SubscriptionId;

    fn unsubscribe_ticks(
        &mut self,
        id: Option<SubscriptionId>,
    );
}

pub trait SettingsStore {
    /// Current value of every setting.
    fn settings(&self) -> DisplaySettings;

    fn subscribe_settings(&mut self) -> SubscriptionId;

    fn unsubscribe_settings(
        &mut self,
        id: Option<SubscriptionId>,
    );
}

pub trait BatteryService {
    fn battery_state(&self) -> BatteryState;

    fn subscribe_battery(&mut self) -> SubscriptionId;

    fn unsubscribe_battery(
        &mut self,
        id: Option<SubscriptionId>,
    );
}

/// Vibration helpers for connection changes and the hourly chime.
pub trait VibeService {
    fn set_connection_vibe(
        &mut self,
        mode: ConnectionVibe,
    );

    fn set_hourly_vibe(
        &mut self,
        enabled: bool,
    );

    /// Quiet the connection helper while the wearer sleeps.
    fn enable_connection_health(
        &mut self,
        enabled: bool,
    );

    /// Quiet the hourly chime while the wearer sleeps.
    fn enable_hourly_health(
        &mut self,
        enabled: bool,
    );

    fn configure_hourly_pattern(
        &mut self,
        durations_ms: &[u32],
    );
}

/// Everything the controller talks to.
pub trait Host: TickService + SettingsStore + BatteryService + VibeService {}

impl<T: TickService + SettingsStore + BatteryService + VibeService> Host for T {}

// =============================================================================
// Subscription Registry
// =============================================================================

/// Maximum simultaneously active subscriptions in a [`SubscriptionRegistry`].
pub const MAX_SUBSCRIPTIONS: usize = 8;

/// Bookkeeping of issued and active subscription ids, for hosts.
#[derive(Clone, Debug, Default)]
pub struct SubscriptionRegistry {
    next: u32,
    active: Vec<SubscriptionId, MAX_SUBSCRIPTIONS>,
}

impl SubscriptionRegistry {
    pub const fn new() -> Self {
        Self {
            next: 1,
            active: Vec::new(),
        }
    }

    /// Issue a fresh id and mark it active.
    pub fn issue(&mut self) -> SubscriptionId {
        let id = SubscriptionId(self.next.max(1));
        self.next = id.0.wrapping_add(1);
        debug_assert!(!self.active.is_full(), "too many active subscriptions");
        self.active.push(id).ok();
        id
    }

    /// Deactivate `id`. Returns `false` for `None` or an inactive id.
    pub fn release(
        &mut self,
        id: Option<SubscriptionId>,
    ) -> bool {
        let Some(id) = id else { return false };
        match self.active.iter().position(|active| *active == id) {
            Some(index) => {
                self.active.swap_remove(index);
                true
            }
            None => false,
        }
    }

    pub fn is_active(
        &self,
        id: SubscriptionId,
    ) -> bool {
        self.active.contains(&id)
    }

    #[inline]
    pub fn active_count(&self) -> usize { self.active.len() }
}
