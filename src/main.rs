// Crate-level lints: Allow common embedded/graphics patterns that pedantic lints flag
#![allow(clippy::cast_possible_truncation)] // Intentional f32->i32, u32->i32 casts for pixel math
#![allow(clippy::cast_precision_loss)] // u32/i32->f32 in graphics calculations
#![allow(clippy::cast_possible_wrap)] // u32->i32 wrapping is acceptable for our value ranges
#![allow(clippy::cast_sign_loss)] // i32->u32 where we know sign is positive
#![allow(clippy::too_many_lines)] // main loop is long but linear

//! Desktop simulator for the analog watchface.
//!
//! Drives [`watchface_common::Watchface`] through a simulated host: a clock
//! that the frame loop advances, a settings store and a battery that the
//! keyboard changes.
//!
//! # Modes
//!
//! Without features the binary runs a scripted session (start, a minute
//! passing, a battery drop, a settings change, midnight, shutdown) and
//! writes the final frame as a PNG:
//!
//! ```text
//! watchface-sim [preset] [snapshot.png]
//! ```
//!
//! With `--features window` it opens an SDL2 window instead.
//!
//! # Keys (window mode)
//!
//! | Key       | Action                                  |
//! |-----------|-----------------------------------------|
//! | `S`       | Toggle the second hand setting          |
//! | `N`       | Toggle 12/24 hour numbering             |
//! | `B`       | Next background color                   |
//! | `C`       | Toggle charging                         |
//! | `Up/Down` | Battery charge +/- 5%                   |
//! | `D`       | Jump one day ahead                      |
//! | `F`       | Fast clock (one minute per second)      |
//! | `Tab`     | Switch page (Watchface <-> Debug)       |
//! | `Q/Esc`   | Quit                                    |

mod config;
mod host;
#[cfg_attr(not(feature = "window"), allow(dead_code))]
mod pages;
mod profiling;
#[cfg_attr(not(feature = "window"), allow(dead_code))]
mod screens;

use anyhow::{Context, Result};
use clap::Parser;
use config::{SCRIPT_START_UNIX, SimOptions, WINDOW_SCALE};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics_simulator::{OutputSettingsBuilder, SimulatorDisplay};
use host::SimHost;
use profiling::ProfilingMetrics;
use watchface_common::colors::OXFORD_BLUE;
use watchface_common::config::{SCREEN_HEIGHT, SCREEN_WIDTH};
use watchface_common::{BatteryState, GraphicsContext, LogBuffer, Teardown, Watchface};

fn main() -> Result<()> {
    let options = SimOptions::parse();

    #[cfg(feature = "window")]
    run_window(&options).context("window session failed")?;
    #[cfg(not(feature = "window"))]
    run_script(&options).context("scripted session failed")?;
    Ok(())
}

/// Render `face` into `display` if anything changed.
fn render_face(
    face: &mut Watchface,
    display: &mut SimulatorDisplay<Rgb565>,
    metrics: &mut ProfilingMetrics,
) {
    let mut ctx = GraphicsContext::new(display);
    let dirty = face.render(&mut ctx);
    metrics.record_redraw(dirty);
}

fn print_log(
    title: &str,
    log: &LogBuffer,
) {
    println!("-- {title} --");
    for entry in log.iter() {
        let t = entry.timestamp_s;
        println!(
            "{} {:02}:{:02}:{:02} {}",
            entry.level.prefix(),
            t / 3600,
            (t / 60) % 60,
            t % 60,
            entry.message
        );
    }
}

fn print_teardown(teardown: &Teardown) {
    let names: Vec<&str> = teardown.released().iter().map(|r| r.name()).collect();
    println!("released {} resources: {}", names.len(), names.join(", "));
}

// =============================================================================
// Scripted Session
// =============================================================================

/// Run the fixed event script headless and save the last frame.
#[cfg_attr(feature = "window", allow(dead_code))]
fn run_script(options: &SimOptions) -> Result<()> {
    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let mut host = SimHost::new(SCRIPT_START_UNIX);
    let mut face = Watchface::new(options.preset.face());
    let mut metrics = ProfilingMetrics::new();

    println!("preset {:?}", options.preset);
    face.start(&mut host);
    render_face(&mut face, &mut display, &mut metrics);

    // A minute passes
    host.advance_secs(60);
    if let Some((time, units)) = host.poll_tick() {
        face.handle_tick(time, units);
    }
    render_face(&mut face, &mut display, &mut metrics);

    // Unplugged and draining
    if let Some(state) = host.set_battery(BatteryState::new(45, false)) {
        face.handle_battery(state);
    }
    render_face(&mut face, &mut display, &mut metrics);

    // User picks a new background and hides the second hand
    if host.update_settings(|s| {
        s.background = OXFORD_BLUE;
        s.seconds_enabled = false;
    }) {
        face.handle_settings_changed(&mut host);
    }
    render_face(&mut face, &mut display, &mut metrics);

    // Next day
    host.advance_secs(24 * 3600);
    if let Some((time, units)) = host.poll_tick() {
        face.handle_tick(time, units);
    }
    render_face(&mut face, &mut display, &mut metrics);

    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let snapshot_path = options.snapshot_path();
    display
        .to_rgb_output_image(&output_settings)
        .save_png(&snapshot_path)
        .with_context(|| format!("failed to write snapshot {}", snapshot_path.display()))?;
    println!(
        "{} redraws, {} layers drawn, snapshot {}",
        metrics.redraw_passes,
        metrics.layers_drawn,
        snapshot_path.display()
    );

    let teardown = face.shutdown(&mut host);
    print_teardown(&teardown);
    println!("{} subscriptions left", host.active_subscriptions());
    print_log("watchface", face.log());
    print_log("host", &host.log);
    Ok(())
}

// =============================================================================
// Interactive Window
// =============================================================================

#[cfg(feature = "window")]
fn run_window(options: &SimOptions) -> Result<()> {
    use std::thread;
    use std::time::Instant;

    use embedded_graphics_simulator::sdl2::Keycode;
    use embedded_graphics_simulator::{SimulatorEvent, Window};
    use watchface_common::ClockMode;

    use crate::config::{BATTERY_STEP, FAST_CLOCK_FACTOR, FRAME_TIME, WINDOW_TITLE};
    use crate::pages::Page;
    use crate::screens::{DebugView, draw_debug_page};

    let mut display: SimulatorDisplay<Rgb565> = SimulatorDisplay::new(Size::new(SCREEN_WIDTH, SCREEN_HEIGHT));
    let output_settings = OutputSettingsBuilder::new().scale(WINDOW_SCALE).build();
    let mut window = Window::new(WINDOW_TITLE, &output_settings);

    let mut host = SimHost::from_system_clock().context("cannot start the simulated clock")?;
    let mut face = Watchface::new(options.preset.face());
    face.start(&mut host);

    let mut metrics = ProfilingMetrics::new();
    let mut current_page = Page::default();
    let mut fast_clock = false;

    // ==========================================================================
    // Main Loop
    // ==========================================================================

    'running: loop {
        let frame_start = Instant::now();

        for ev in window.events() {
            match ev {
                SimulatorEvent::Quit => break 'running,
                SimulatorEvent::KeyDown { keycode, repeat, .. } => {
                    // Holding Up/Down keeps stepping the battery; toggles ignore repeats
                    if repeat && !matches!(keycode, Keycode::Up | Keycode::Down) {
                        continue;
                    }
                    let mut settings_changed = false;
                    let mut battery = None;
                    match keycode {
                        Keycode::Q | Keycode::Escape => break 'running,
                        Keycode::Tab => {
                            current_page = current_page.toggle();
                            face.invalidate();
                        },
                        Keycode::S => settings_changed = host.update_settings(|s| s.seconds_enabled = !s.seconds_enabled),
                        Keycode::N => {
                            settings_changed = host.update_settings(|s| s.clock_mode = ClockMode::toggle(s.clock_mode));
                        },
                        Keycode::B => {
                            let next = host.next_background();
                            settings_changed = host.update_settings(|s| s.background = next);
                        },
                        Keycode::C => {
                            let state = host.battery();
                            battery = host.set_battery(BatteryState::new(state.charge_percent, !state.charging));
                        },
                        Keycode::Up => {
                            let state = host.battery();
                            let charge = state.charge_percent.saturating_add(BATTERY_STEP);
                            battery = host.set_battery(BatteryState::new(charge, state.charging));
                        },
                        Keycode::Down => {
                            let state = host.battery();
                            let charge = state.charge_percent.saturating_sub(BATTERY_STEP);
                            battery = host.set_battery(BatteryState::new(charge, state.charging));
                        },
                        Keycode::D => host.advance_secs(24 * 3600),
                        Keycode::F => fast_clock = !fast_clock,
                        _ => {},
                    }
                    if settings_changed {
                        face.handle_settings_changed(&mut host);
                    }
                    if let Some(state) = battery {
                        face.handle_battery(state);
                    }
                },
                _ => {},
            }
        }

        // ======================================================================
        // Clock
        // ======================================================================

        let step_ms = FRAME_TIME.as_millis() as u32;
        host.advance_ms(if fast_clock { step_ms * FAST_CLOCK_FACTOR } else { step_ms });
        if let Some((time, units)) = host.poll_tick() {
            face.handle_tick(time, units);
            metrics.ticks_delivered += 1;
        }

        // ======================================================================
        // Render
        // ======================================================================

        let render_start = Instant::now();
        match current_page {
            Page::Watchface => render_face(&mut face, &mut display, &mut metrics),
            Page::Debug => {
                let view = DebugView {
                    face: &face,
                    battery: host.battery(),
                    metrics: &metrics,
                    fast_clock,
                };
                draw_debug_page(&mut display, &view);
            },
        }
        let render_time = render_start.elapsed();

        window.update(&display);

        // Sleep to maintain target frame rate (~50 FPS)
        let elapsed = frame_start.elapsed();
        if let Some(remaining) = FRAME_TIME.checked_sub(elapsed) {
            thread::sleep(remaining);
        }
        metrics.record_frame(frame_start.elapsed(), render_time);
    }

    let teardown = face.shutdown(&mut host);
    print_teardown(&teardown);
    println!("{} subscriptions left", host.active_subscriptions());
    print_log("watchface", face.log());
    Ok(())
}
