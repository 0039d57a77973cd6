//! Simulator configuration.
//!
//! Dial layout lives in `watchface_common::config`; this module only holds
//! what the desktop host needs: frame pacing, window scale, the simulated
//! clock and command-line options (parsed with clap).

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use watchface_common::FaceConfig;

// =============================================================================
// Timing Configuration
// =============================================================================

/// Target frame time (~50 FPS). The main loop sleeps if frame completes early.
pub const FRAME_TIME: Duration = Duration::from_millis(20);

/// Simulated seconds per real second with the fast clock on.
pub const FAST_CLOCK_FACTOR: u32 = 60;

/// Start of the scripted session: 2024-05-03 10:08:30 UTC.
pub const SCRIPT_START_UNIX: u32 = 1_714_730_910;

// =============================================================================
// Window Configuration
// =============================================================================

/// Pixel scale of the simulator window and snapshot.
pub const WINDOW_SCALE: u32 = 2;

pub const WINDOW_TITLE: &str = "Watchface Sim";

/// Snapshot written by the scripted session.
pub const DEFAULT_SNAPSHOT_PATH: &str = "watchface.png";

// =============================================================================
// Battery Simulation
// =============================================================================

/// Charge change per Up/Down key press.
pub const BATTERY_STEP: u8 = 5;

/// Charge the simulated battery starts at.
pub const BATTERY_START: u8 = 85;

// =============================================================================
// Command Line
// =============================================================================

/// Dial variant to run, one per [`FaceConfig`] preset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, ValueEnum)]
pub enum Preset {
    /// 24-hour dial with seconds and logo
    #[default]
    Classic,
    /// Every complication on
    Complete,
    /// Rings and two hands only
    Minimal,
    /// Date window without battery
    Date,
    /// 01..12 numbering with battery
    TwelveHour,
}

impl Preset {
    pub const fn face(self) -> FaceConfig {
        match self {
            Self::Classic => FaceConfig::CLASSIC,
            Self::Complete => FaceConfig::COMPLETE,
            Self::Minimal => FaceConfig::MINIMAL,
            Self::Date => FaceConfig::DATE,
            Self::TwelveHour => FaceConfig::TWELVE_HOUR,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "watchface-sim")]
#[command(about = "Analog watchface simulator", long_about = None)]
#[command(version)]
pub struct SimOptions {
    /// Dial variant
    #[arg(value_enum, ignore_case = true, default_value_t = Preset::Classic)]
    pub preset: Preset,

    /// PNG written by the scripted session
    pub snapshot: Option<PathBuf>,
}

impl SimOptions {
    /// Snapshot path, falling back to [`DEFAULT_SNAPSHOT_PATH`].
    pub fn snapshot_path(&self) -> PathBuf {
        self.snapshot.clone().unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH))
    }
}
