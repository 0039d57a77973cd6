//! Core of an analog watchface.
//!
//! Platform-agnostic and `no_std`. The desktop simulator and any device
//! port drive the same [`controller::Watchface`] through the services in
//! [`host`]:
//!
//! - [`angle`], [`fixed`], [`polar`]: turn-fraction angles, 1/16 px fixed
//!   point and placement of marks on the dial oval
//! - [`context`], [`raster`]: the drawing seam and its embedded-graphics
//!   implementation
//! - [`widgets`]: tick and numeral primitives and the dial layers
//! - [`hands`]: hand polygons and angle laws
//! - [`derived`], [`battery`], [`settings`], [`time`]: event-driven state
//! - [`config`], [`colors`], [`styles`], [`thresholds`], [`assets`]:
//!   layout, palette and bundled resources
//! - [`render`]: layer dirty tracking
//! - [`log_buffer`]: owned on-screen log ring
//!
//! # no_std Compatibility
//!
//! No allocator is needed; every collection is a `heapless` container with a
//! fixed capacity.

#![no_std]
// Crate-level lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

pub mod angle;
pub mod assets;
pub mod battery;
pub mod colors;
pub mod config;
pub mod context;
pub mod controller;
pub mod derived;
pub mod fixed;
pub mod hands;
pub mod host;
pub mod log_buffer;
pub mod polar;
pub mod raster;
pub mod render;
pub mod settings;
pub mod styles;
pub mod thresholds;
pub mod time;
pub mod vector;
pub mod widgets;

// Re-export commonly used items
pub use angle::Angle;
pub use battery::BatteryState;
pub use config::FaceConfig;
pub use context::DrawContext;
pub use controller::{ControllerState, Resource, Teardown, Watchface};
pub use host::{BatteryService, Host, SettingsStore, SubscriptionId, TickService, VibeService};
pub use log_buffer::{LogBuffer, LogLevel};
pub use raster::GraphicsContext;
pub use settings::{ClockMode, ConnectionVibe, DisplaySettings};
pub use time::{TickGranularity, TimeUnits, WallTime};
