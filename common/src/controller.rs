//! The watchface controller.
//!
//! One [`Watchface`] owns everything the face needs between `start` and
//! `shutdown`: assets, hand paths, layers, the last settings read and the
//! derived display state. Handlers update that state and mark layers dirty;
//! [`Watchface::render`] composites the dirty face through a
//! [`DrawContext`].
//!
//! ```text
//!   Uninitialized --start--> Running --shutdown--> Uninitialized
//!                            |  ^
//!                            |  | handle_tick / handle_settings_changed /
//!                            +--+ handle_battery / render
//! ```
//!
//! Everything acquired during `start` is recorded in order, and `shutdown`
//! releases it in reverse.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::Vec;

use crate::assets::Assets;
use crate::battery::BatteryState;
use crate::colors::BLACK;
use crate::config::{FaceConfig, SCREEN_BOUNDS};
use crate::context::DrawContext;
use crate::derived::DerivedDisplayState;
use crate::hands::{Hand, HandAngles, HandSet};
use crate::host::{HOURLY_VIBE_PATTERN_MS, Host, SubscriptionId};
use crate::log_buffer::LogBuffer;
use crate::render::{LAYER_COUNT, LayerId, LayerMask, RenderState};
use crate::settings::DisplaySettings;
use crate::thresholds::BATTERY_LOW_WARNING;
use crate::time::{TickGranularity, TimeUnits, WallTime};
use crate::vector::VectorImage;
use crate::widgets::{DialLayer, FaceModel, Layer, apply_battery_state, build_layers};
use crate::{log_debug, log_info, log_warn};

/// Most resources one running face holds.
pub const MAX_RESOURCES: usize = 16;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ControllerState {
    Uninitialized,
    Running,
}

/// Something acquired during start and released at shutdown.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Resource {
    Font,
    Logo,
    BatteryIcon,
    HandPath(Hand),
    Layer(LayerId),
    TickSubscription,
    SettingsSubscription,
    BatterySubscription,
}

impl Resource {
    pub const fn name(self) -> &'static str {
        match self {
            Self::Font => "font",
            Self::Logo => "logo",
            Self::BatteryIcon => "battery icon",
            Self::HandPath(Hand::Second) => "second hand",
            Self::HandPath(Hand::Minute) => "minute hand",
            Self::HandPath(Hand::Hour) => "hour hand",
            Self::Layer(layer) => layer.name(),
            Self::TickSubscription => "tick sub",
            Self::SettingsSubscription => "settings sub",
            Self::BatterySubscription => "battery sub",
        }
    }
}

/// Resources released by [`Watchface::shutdown`], in release order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Teardown {
    released: Vec<Resource, MAX_RESOURCES>,
}

impl Teardown {
    #[inline]
    pub fn released(&self) -> &[Resource] { &self.released }
}

/// Pivot of the hands inside `bounds`: one pixel up-left of the center.
pub fn hand_pivot(bounds: &Rectangle) -> Point {
    bounds.top_left + Point::new(bounds.size.width as i32 / 2 - 1, bounds.size.height as i32 / 2 - 1)
}

// =============================================================================
// Running State
// =============================================================================

struct RunningFace {
    assets: Assets,
    hands: HandSet,
    layers: Vec<DialLayer, LAYER_COUNT>,
    settings: DisplaySettings,
    derived: DerivedDisplayState,
    render: RenderState,
    granularity: TickGranularity,
    last_time: Option<WallTime>,
    tick_subscription: Option<SubscriptionId>,
    settings_subscription: Option<SubscriptionId>,
    battery_subscription: Option<SubscriptionId>,
    acquired: Vec<Resource, MAX_RESOURCES>,
}

impl RunningFace {
    fn acquire(
        &mut self,
        resource: Resource,
    ) {
        if !self.acquired.contains(&resource) {
            debug_assert!(!self.acquired.is_full(), "resource ledger full");
            self.acquired.push(resource).ok();
        }
    }

    #[inline]
    fn seconds_shown(
        &self,
        config: &FaceConfig,
    ) -> bool {
        config.seconds_hand && self.settings.seconds_enabled
    }

    /// Recompute hand angles for `time` and pick up a day change.
    fn tick(
        &mut self,
        config: &FaceConfig,
        time: WallTime,
        units: TimeUnits,
        log: &mut LogBuffer,
    ) {
        let angles = HandAngles::compute(
            &time,
            self.derived.hour_label_multiplier,
            self.seconds_shown(config),
            self.hands.second.rotation(),
        );
        self.hands.apply(&angles);
        self.render.mark_dirty(LayerId::Hands);

        let new_day = units.contains(TimeUnits::DAY) || self.last_time.is_none_or(|previous| previous.is_different_day(&time));
        if new_day && self.derived.update_day(time.day) {
            self.render.mark_dirty(LayerId::Date);
            log_info!(log, "day {}", self.derived.day_text.as_str());
        }

        self.last_time = Some(time);
        log.set_clock(time.seconds_of_day());
    }

    /// Re-read settings and apply everything that depends on them.
    fn apply_settings<H: Host + ?Sized>(
        &mut self,
        config: &FaceConfig,
        host: &mut H,
        log: &mut LogBuffer,
    ) {
        let settings = host.settings();
        self.settings = settings;

        host.set_connection_vibe(settings.connection_vibe);
        host.set_hourly_vibe(settings.hourly_vibe);
        host.enable_connection_health(settings.health_enabled);
        host.enable_hourly_health(settings.health_enabled);

        let mode = config.effective_clock_mode(settings.clock_mode);
        self.derived.update_clock_mode(mode);
        self.derived.update_background(settings.background);

        let granularity = TickGranularity::for_seconds(self.seconds_shown(config));
        host.unsubscribe_ticks(self.tick_subscription.take());
        let now = host.now();
        self.tick(config, now, granularity.unit(), log);
        self.tick_subscription = Some(host.subscribe_ticks(granularity));
        self.granularity = granularity;
        self.acquire(Resource::TickSubscription);

        let legible = self.derived.legible;
        self.assets.logo.recolor(legible);
        self.assets.battery_icon.recolor(legible);

        self.render.mark_all_dirty();
        log_info!(log, "{:?} x{} {:?}", granularity, self.derived.hour_label_multiplier, mode);
    }

    /// Take a battery reading. Returns `true` when the icon changed.
    fn battery(
        &mut self,
        state: BatteryState,
        log: &mut LogBuffer,
    ) -> bool {
        let changed = self.derived.update_battery(state);
        if changed {
            apply_battery_state(&mut self.assets.battery_icon, self.derived.hidden_segments, state.charging);
            self.render.mark_dirty(LayerId::Battery);
            log_info!(
                log,
                "battery {}%{} hidden {}",
                state.charge_percent,
                if state.charging { "+" } else { "" },
                self.derived.hidden_segments.count()
            );
        }
        if state.charge_percent <= BATTERY_LOW_WARNING && !state.charging {
            log_warn!(log, "battery low: {}%", state.charge_percent);
        }
        changed
    }
}

// =============================================================================
// Watchface
// =============================================================================

/// An analog watchface driven by host events.
pub struct Watchface {
    config: FaceConfig,
    bounds: Rectangle,
    log: LogBuffer,
    running: Option<RunningFace>,
}

impl Watchface {
    /// Face filling the whole screen.
    pub const fn new(config: FaceConfig) -> Self { Self::with_bounds(config, SCREEN_BOUNDS) }

    pub const fn with_bounds(
        config: FaceConfig,
        bounds: Rectangle,
    ) -> Self {
        Self {
            config,
            bounds,
            log: LogBuffer::new(),
            running: None,
        }
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Load assets, build the hands and layers, subscribe to every event
    /// source and compute the first frame.
    pub fn start<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
    ) {
        if self.running.is_some() {
            log_warn!(self.log, "start while running");
            return;
        }

        host.configure_hourly_pattern(&HOURLY_VIBE_PATTERN_MS);

        let mut face = RunningFace {
            assets: Assets::load(),
            hands: HandSet::new(),
            layers: Vec::new(),
            settings: DisplaySettings::default(),
            derived: DerivedDisplayState::new(),
            render: RenderState::new(),
            granularity: TickGranularity::default(),
            last_time: None,
            tick_subscription: None,
            settings_subscription: None,
            battery_subscription: None,
            acquired: Vec::new(),
        };
        face.acquire(Resource::Font);
        face.acquire(Resource::Logo);
        face.acquire(Resource::BatteryIcon);
        log_debug!(self.log, "assets loaded");

        face.hands.move_to(hand_pivot(&self.bounds));
        face.acquire(Resource::HandPath(Hand::Second));
        face.acquire(Resource::HandPath(Hand::Minute));
        face.acquire(Resource::HandPath(Hand::Hour));

        face.layers = build_layers(&self.config, self.bounds);
        let layer_ids: Vec<LayerId, LAYER_COUNT> = face.layers.iter().map(Layer::id).collect();
        for id in layer_ids {
            face.acquire(Resource::Layer(id));
        }
        log_debug!(self.log, "{} layers", face.layers.len());

        face.apply_settings(&self.config, host, &mut self.log);
        face.settings_subscription = Some(host.subscribe_settings());
        face.acquire(Resource::SettingsSubscription);

        if self.config.battery_indicator {
            face.battery(host.battery_state(), &mut self.log);
            face.battery_subscription = Some(host.subscribe_battery());
            face.acquire(Resource::BatterySubscription);
        }

        face.render.mark_all_dirty();
        log_info!(self.log, "started, {} resources", face.acquired.len());
        self.running = Some(face);
    }

    /// Unsubscribe and release everything acquired by `start`, newest
    /// first. The face returns to [`ControllerState::Uninitialized`].
    pub fn shutdown<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
    ) -> Teardown {
        let Some(face) = self.running.take() else {
            log_warn!(self.log, "shutdown while not running");
            return Teardown::default();
        };

        let mut teardown = Teardown::default();
        for resource in face.acquired.iter().rev().copied() {
            match resource {
                Resource::TickSubscription => host.unsubscribe_ticks(face.tick_subscription),
                Resource::SettingsSubscription => host.unsubscribe_settings(face.settings_subscription),
                Resource::BatterySubscription => host.unsubscribe_battery(face.battery_subscription),
                _ => {}
            }
            log_debug!(self.log, "released {}", resource.name());
            teardown.released.push(resource).ok();
        }
        drop(face);

        log_info!(self.log, "stopped, {} released", teardown.released.len());
        teardown
    }

    // -------------------------------------------------------------------------
    // Event Handlers
    // -------------------------------------------------------------------------

    /// Tick from the tick source. Ticks finer than the subscribed
    /// granularity are ignored.
    pub fn handle_tick(
        &mut self,
        time: WallTime,
        units: TimeUnits,
    ) {
        let Some(face) = self.running.as_mut() else {
            log_warn!(self.log, "tick while not running");
            return;
        };
        if !face.granularity.fires_on(units) {
            return;
        }
        face.tick(&self.config, time, units, &mut self.log);
    }

    /// The settings store changed; re-read everything.
    pub fn handle_settings_changed<H: Host + ?Sized>(
        &mut self,
        host: &mut H,
    ) {
        let Some(face) = self.running.as_mut() else {
            log_warn!(self.log, "settings while not running");
            return;
        };
        face.apply_settings(&self.config, host, &mut self.log);
    }

    /// New battery reading. Returns `true` when the icon changed.
    pub fn handle_battery(
        &mut self,
        state: BatteryState,
    ) -> bool {
        let Some(face) = self.running.as_mut() else {
            log_warn!(self.log, "battery while not running");
            return false;
        };
        face.battery(state, &mut self.log)
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Composite the face if anything is dirty: background, then every
    /// layer back to front. Returns the layers that were dirty.
    pub fn render(
        &mut self,
        ctx: &mut dyn DrawContext,
    ) -> LayerMask {
        let Some(face) = self.running.as_mut() else {
            return LayerMask::NONE;
        };
        if !face.render.needs_redraw() {
            return LayerMask::NONE;
        }
        let dirty = face.render.dirty();

        ctx.reset();
        ctx.set_fill_color(face.settings.background);
        ctx.fill_rect(self.bounds, 0);

        let model = FaceModel {
            config: &self.config,
            settings: &face.settings,
            derived: &face.derived,
            hands: &face.hands,
            assets: &face.assets,
            seconds_shown: face.seconds_shown(&self.config),
        };
        for layer in &face.layers {
            ctx.reset();
            layer.draw(ctx, &model);
        }

        face.render.end_frame();
        dirty
    }

    /// Force a full composite on the next [`render`](Self::render), e.g.
    /// after something else drew over the screen.
    pub fn invalidate(&mut self) {
        if let Some(face) = self.running.as_mut() {
            face.render.mark_all_dirty();
        }
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub const fn state(&self) -> ControllerState {
        match self.running {
            Some(_) => ControllerState::Running,
            None => ControllerState::Uninitialized,
        }
    }

    #[inline]
    pub const fn config(&self) -> &FaceConfig { &self.config }

    #[inline]
    pub const fn bounds(&self) -> Rectangle { self.bounds }

    #[inline]
    pub const fn log(&self) -> &LogBuffer { &self.log }

    /// Background color currently in effect.
    pub fn background(&self) -> Rgb565 { self.running.as_ref().map_or(BLACK, |face| face.settings.background) }

    pub fn settings(&self) -> Option<&DisplaySettings> { self.running.as_ref().map(|face| &face.settings) }

    pub fn derived(&self) -> Option<&DerivedDisplayState> { self.running.as_ref().map(|face| &face.derived) }

    pub fn hand_angles(&self) -> Option<HandAngles> { self.running.as_ref().map(|face| face.hands.angles()) }

    pub fn granularity(&self) -> Option<TickGranularity> { self.running.as_ref().map(|face| face.granularity) }

    /// Whether the second hand is drawn.
    pub fn seconds_shown(&self) -> bool { self.running.as_ref().is_some_and(|face| face.seconds_shown(&self.config)) }

    pub fn battery_icon(&self) -> Option<&VectorImage> { self.running.as_ref().map(|face| &face.assets.battery_icon) }

    pub fn logo(&self) -> Option<&VectorImage> { self.running.as_ref().map(|face| &face.assets.logo) }

    /// Layers in draw order; empty while not running.
    pub fn layer_ids(&self) -> Vec<LayerId, LAYER_COUNT> {
        self.running.as_ref().map(|face| face.layers.iter().map(Layer::id).collect()).unwrap_or_default()
    }

    pub fn is_dirty(
        &self,
        layer: LayerId,
    ) -> bool {
        self.running.as_ref().is_some_and(|face| face.render.is_dirty(layer))
    }

    pub fn needs_redraw(&self) -> bool { self.running.as_ref().is_some_and(|face| face.render.needs_redraw()) }

    /// Resources held right now, in acquisition order.
    pub fn acquired(&self) -> &[Resource] {
        match &self.running {
            Some(face) => &face.acquired,
            None => &[],
        }
    }
}
