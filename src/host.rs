//! Desktop implementation of the watchface host services.
//!
//! The simulated clock runs from a Unix timestamp that the frame loop
//! advances. Settings and battery are plain values the keyboard or the
//! scripted session change; each change reports whether a subscriber must be
//! notified. Vibration requests are only recorded.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use embedded_graphics::pixelcolor::Rgb565;
use watchface_common::colors::BACKGROUNDS;
use watchface_common::host::SubscriptionRegistry;
use watchface_common::{
    BatteryService,
    BatteryState,
    ConnectionVibe,
    DisplaySettings,
    LogBuffer,
    SettingsStore,
    SubscriptionId,
    TickGranularity,
    TickService,
    TimeUnits,
    VibeService,
    WallTime,
    log_debug,
    log_info,
};

use crate::config::BATTERY_START;

/// What the vibration helpers were last told.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VibeState {
    pub connection: ConnectionVibe,
    pub hourly: bool,
    pub connection_health: bool,
    pub hourly_health: bool,
    pub hourly_pattern_ms: Vec<u32>,
}

pub struct SimHost {
    unix_time: u32,
    /// Sub-second remainder carried between `advance` calls, in ms.
    carry_ms: u32,
    last_delivered: Option<WallTime>,
    settings: DisplaySettings,
    battery: BatteryState,
    subscriptions: SubscriptionRegistry,
    tick_subscription: Option<(SubscriptionId, TickGranularity)>,
    settings_subscription: Option<SubscriptionId>,
    battery_subscription: Option<SubscriptionId>,
    pub vibe: VibeState,
    pub log: LogBuffer,
}

impl SimHost {
    /// Host whose clock starts at `unix_time`.
    pub fn new(unix_time: u32) -> Self {
        Self {
            unix_time,
            carry_ms: 0,
            last_delivered: None,
            settings: DisplaySettings::default(),
            battery: BatteryState::new(BATTERY_START, false),
            subscriptions: SubscriptionRegistry::new(),
            tick_subscription: None,
            settings_subscription: None,
            battery_subscription: None,
            vibe: VibeState::default(),
            log: LogBuffer::new(),
        }
    }

    /// Host whose clock starts at the system time.
    #[cfg_attr(not(feature = "window"), allow(dead_code))]
    pub fn from_system_clock() -> Result<Self> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH).context("system clock is before 1970")?;
        let secs = u32::try_from(now.as_secs()).context("system clock is past the 32-bit Unix range")?;
        Ok(Self::new(secs))
    }

    // -------------------------------------------------------------------------
    // Clock
    // -------------------------------------------------------------------------

    /// Move the simulated clock forward.
    #[cfg_attr(not(feature = "window"), allow(dead_code))]
    pub fn advance_ms(
        &mut self,
        ms: u32,
    ) {
        let total = self.carry_ms + ms;
        self.unix_time = self.unix_time.saturating_add(total / 1000);
        self.carry_ms = total % 1000;
    }

    pub fn advance_secs(
        &mut self,
        secs: u32,
    ) {
        self.unix_time = self.unix_time.saturating_add(secs);
    }

    /// Tick due for the active subscription, if the clock moved far enough.
    pub fn poll_tick(&mut self) -> Option<(WallTime, TimeUnits)> {
        let (_, granularity) = self.tick_subscription?;
        let now = self.now();
        let changed = match self.last_delivered {
            Some(previous) => TimeUnits::changed_between(&previous, &now),
            None => TimeUnits::ALL,
        };
        if !granularity.fires_on(changed) {
            return None;
        }
        self.last_delivered = Some(now);
        Some((now, changed))
    }

    // -------------------------------------------------------------------------
    // Settings And Battery
    // -------------------------------------------------------------------------

    /// Change settings; returns `true` when a subscriber must be told.
    pub fn update_settings(
        &mut self,
        update: impl FnOnce(&mut DisplaySettings),
    ) -> bool {
        update(&mut self.settings);
        self.settings_subscription.is_some()
    }

    /// Next entry of the background palette.
    #[cfg_attr(not(feature = "window"), allow(dead_code))]
    pub fn next_background(&self) -> Rgb565 {
        let index = BACKGROUNDS.iter().position(|c| *c == self.settings.background).map_or(0, |i| i + 1);
        BACKGROUNDS[index % BACKGROUNDS.len()]
    }

    /// Change the battery; returns the new state when a subscriber must be
    /// told.
    pub fn set_battery(
        &mut self,
        state: BatteryState,
    ) -> Option<BatteryState> {
        self.battery = state;
        self.battery_subscription.map(|_| state)
    }

    #[inline]
    #[cfg_attr(not(feature = "window"), allow(dead_code))]
    pub const fn battery(&self) -> BatteryState { self.battery }

    /// Subscriptions still active.
    #[inline]
    pub fn active_subscriptions(&self) -> usize { self.subscriptions.active_count() }
}

impl TickService for SimHost {
    fn now(&self) -> WallTime { WallTime::from_unix(self.unix_time) }

    fn subscribe_ticks(
        &mut self,
        granularity: TickGranularity,
    ) -> SubscriptionId {
        let id = self.subscriptions.issue();
        self.tick_subscription = Some((id, granularity));
        self.last_delivered = Some(self.now());
        log_debug!(self.log, "ticks {:?} #{}", granularity, id.0);
        id
    }

    fn unsubscribe_ticks(
        &mut self,
        id: Option<SubscriptionId>,
    ) {
        if self.subscriptions.release(id) {
            self.tick_subscription = None;
            log_debug!(self.log, "ticks off");
        }
    }
}

impl SettingsStore for SimHost {
    fn settings(&self) -> DisplaySettings { self.settings }

    fn subscribe_settings(&mut self) -> SubscriptionId {
        let id = self.subscriptions.issue();
        self.settings_subscription = Some(id);
        id
    }

    fn unsubscribe_settings(
        &mut self,
        id: Option<SubscriptionId>,
    ) {
        if self.subscriptions.release(id) {
            self.settings_subscription = None;
        }
    }
}

impl BatteryService for SimHost {
    fn battery_state(&self) -> BatteryState { self.battery }

    fn subscribe_battery(&mut self) -> SubscriptionId {
        let id = self.subscriptions.issue();
        self.battery_subscription = Some(id);
        id
    }

    fn unsubscribe_battery(
        &mut self,
        id: Option<SubscriptionId>,
    ) {
        if self.subscriptions.release(id) {
            self.battery_subscription = None;
        }
    }
}

impl VibeService for SimHost {
    fn set_connection_vibe(
        &mut self,
        mode: ConnectionVibe,
    ) {
        self.vibe.connection = mode;
    }

    fn set_hourly_vibe(
        &mut self,
        enabled: bool,
    ) {
        self.vibe.hourly = enabled;
    }

    fn enable_connection_health(
        &mut self,
        enabled: bool,
    ) {
        self.vibe.connection_health = enabled;
    }

    fn enable_hourly_health(
        &mut self,
        enabled: bool,
    ) {
        self.vibe.hourly_health = enabled;
    }

    fn configure_hourly_pattern(
        &mut self,
        durations_ms: &[u32],
    ) {
        self.vibe.hourly_pattern_ms = durations_ms.to_vec();
        log_info!(self.log, "hourly pattern {:?}", durations_ms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SCRIPT_START_UNIX;
    use watchface_common::host::HOURLY_VIBE_PATTERN_MS;

    #[test]
    fn test_clock_starts_at_script_time() {
        let host = SimHost::new(SCRIPT_START_UNIX);
        assert_eq!(host.now(), WallTime::new(2024, 5, 3, 10, 8, 30));
    }

    #[test]
    fn test_poll_tick_respects_granularity() {
        let mut host = SimHost::new(SCRIPT_START_UNIX);
        assert!(host.poll_tick().is_none(), "No ticks without a subscription");

        host.subscribe_ticks(TickGranularity::PerMinute);
        host.advance_secs(1);
        assert!(host.poll_tick().is_none(), "Second change is not delivered per minute");

        host.advance_secs(30);
        let (time, units) = host.poll_tick().expect("minute changed");
        assert_eq!(time.minute, 9);
        assert!(units.contains(TimeUnits::MINUTE));
        assert!(host.poll_tick().is_none(), "Same minute is delivered once");
    }

    #[test]
    fn test_system_clock_is_after_script_start() {
        let host = SimHost::from_system_clock().expect("system clock within range");
        assert!(host.now().year >= 2024, "Clock should read the current year, got {}", host.now().year);
    }

    #[test]
    fn test_advance_ms_carries_remainder() {
        let mut host = SimHost::new(0);
        host.advance_ms(600);
        host.advance_ms(600);
        assert_eq!(host.now().second, 1);
    }

    #[test]
    fn test_notifications_need_subscribers() {
        let mut host = SimHost::new(0);
        assert!(!host.update_settings(|s| s.seconds_enabled = false));
        assert!(host.set_battery(BatteryState::new(40, false)).is_none());

        host.subscribe_settings();
        host.subscribe_battery();
        assert!(host.update_settings(|s| s.seconds_enabled = true));
        assert_eq!(host.set_battery(BatteryState::new(30, true)), Some(BatteryState::new(30, true)));
    }

    #[test]
    fn test_background_cycles() {
        let mut host = SimHost::new(0);
        let mut seen = Vec::new();
        for _ in 0..BACKGROUNDS.len() {
            let next = host.next_background();
            host.update_settings(|s| s.background = next);
            seen.push(next);
        }
        assert_eq!(host.next_background(), seen[0], "Palette wraps around");
    }

    #[test]
    fn test_hourly_pattern_recorded() {
        let mut host = SimHost::new(0);
        host.configure_hourly_pattern(&HOURLY_VIBE_PATTERN_MS);
        assert_eq!(host.vibe.hourly_pattern_ms, vec![300]);
    }

    #[test]
    fn test_watchface_lifecycle_on_sim_host() {
        let mut host = SimHost::new(SCRIPT_START_UNIX);
        let mut face = watchface_common::Watchface::new(watchface_common::FaceConfig::COMPLETE);
        face.start(&mut host);
        assert_eq!(host.active_subscriptions(), 3);
        assert_eq!(host.vibe.connection, ConnectionVibe::Disconnect);

        host.advance_secs(1);
        let (time, units) = host.poll_tick().expect("seconds shown by default");
        face.handle_tick(time, units);
        assert_eq!(face.hand_angles().map(|a| a.second), Some(watchface_common::Angle::from_fraction(31, 60)));

        face.shutdown(&mut host);
        assert_eq!(host.active_subscriptions(), 0, "Shutdown releases every subscription");
        assert!(host.poll_tick().is_none());
    }
}
