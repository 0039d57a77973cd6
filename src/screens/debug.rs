//! Debug page rendering.
//!
//! # Layout
//!
//! ```text
//! ┌──────────────────────────────┐
//! │ DEBUG              UP 00:01:12│
//! ├──────────────────────────────┤
//! │ STATE Running   24H  SEC ON  │
//! │ TICK  PerSecond  DAY 23      │
//! │ BATT  85%  CHG               │
//! │ FRAME 20.1ms  RENDER 0.4ms   │
//! │ DRAWS 61 LAY 190 TICK 60     │
//! ├──────────────────────────────┤
//! │ I 10:08:30 started           │
//! │ D 10:09:00 tick              │
//! └──────────────────────────────┘
//! ```

use core::fmt::Write;

use embedded_graphics::mono_font::MonoTextStyle;
use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle};
use embedded_graphics::text::Text;
use heapless::String;
use watchface_common::colors::{BLACK, DARK_GRAY, ISLAMIC_GREEN, LIGHT_GRAY, WHITE};
use watchface_common::config::SCREEN_WIDTH;
use watchface_common::log_buffer::LOG_ENTRIES;
use watchface_common::{BatteryState, ControllerState, LogBuffer, Watchface};

use crate::profiling::ProfilingMetrics;

// =============================================================================
// Layout Constants
// =============================================================================

const LEFT_X: i32 = 3;

/// Header text baseline
const HEADER_Y: i32 = 10;

const HEADER_DIVIDER_Y: i32 = 14;

/// Baseline of the first stats row
const STATS_Y: i32 = 25;

const STAT_LINE_HEIGHT: i32 = 11;

const STAT_ROWS: i32 = 5;

const LOG_DIVIDER_Y: i32 = STATS_Y + STAT_ROWS * STAT_LINE_HEIGHT - 6;

const LOG_Y: i32 = LOG_DIVIDER_Y + 11;

const LOG_LINE_HEIGHT: i32 = 10;

/// Log lines that fit under the stats.
pub const LOG_LINES: usize = 9;

// =============================================================================
// Colors
// =============================================================================

const DEBUG_BG: Rgb565 = BLACK;

const HEADER_COLOR: Rgb565 = ISLAMIC_GREEN;

const VALUE_COLOR: Rgb565 = WHITE;

const LABEL_COLOR: Rgb565 = LIGHT_GRAY;

const DIVIDER_COLOR: Rgb565 = DARK_GRAY;

// =============================================================================
// Debug Page Drawing
// =============================================================================

/// Everything the debug page shows.
pub struct DebugView<'a> {
    pub face: &'a Watchface,
    pub battery: BatteryState,
    pub metrics: &'a ProfilingMetrics,
    pub fast_clock: bool,
}

/// Draw the debug page over the whole target.
pub fn draw_debug_page<D>(
    display: &mut D,
    view: &DebugView<'_>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    display.clear(DEBUG_BG).ok();

    draw_header(display, view);
    draw_horizontal_line(display, HEADER_DIVIDER_Y);

    for (row, line) in stat_lines(view).iter().enumerate() {
        let y = STATS_Y + row as i32 * STAT_LINE_HEIGHT;
        Text::new(line, Point::new(LEFT_X, y), MonoTextStyle::new(&FONT_6X10, VALUE_COLOR))
            .draw(display)
            .ok();
    }

    draw_horizontal_line(display, LOG_DIVIDER_Y);
    draw_log_terminal(display, view.face.log());
}

fn draw_header<D>(
    display: &mut D,
    view: &DebugView<'_>,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let title = if view.fast_clock { "DEBUG  x60" } else { "DEBUG" };
    Text::new(title, Point::new(LEFT_X, HEADER_Y), MonoTextStyle::new(&FONT_6X10, HEADER_COLOR))
        .draw(display)
        .ok();

    let secs = view.metrics.uptime().as_secs();
    let mut uptime: String<16> = String::new();
    let _ = write!(uptime, "UP {:02}:{:02}:{:02}", secs / 3600, (secs / 60) % 60, secs % 60);
    let x = SCREEN_WIDTH as i32 - LEFT_X - uptime.len() as i32 * 6;
    Text::new(&uptime, Point::new(x, HEADER_Y), MonoTextStyle::new(&FONT_6X10, LABEL_COLOR))
        .draw(display)
        .ok();
}

/// Text of each stats row.
pub fn stat_lines(view: &DebugView<'_>) -> [String<40>; STAT_ROWS as usize] {
    let face = view.face;
    let mut lines: [String<40>; STAT_ROWS as usize] = Default::default();

    let state = match face.state() {
        ControllerState::Uninitialized => "Stopped",
        ControllerState::Running => "Running",
    };
    let mode = match face.derived().map(|d| d.hour_label_multiplier) {
        Some(1) => "12H",
        Some(_) => "24H",
        None => "--",
    };
    let seconds = if face.seconds_shown() { "ON" } else { "OFF" };
    let _ = write!(lines[0], "STATE {state} {mode} SEC {seconds}");

    let day = face.derived().map_or("--", |d| d.day_text.as_str());
    match face.granularity() {
        Some(granularity) => {
            let _ = write!(lines[1], "TICK {granularity:?} DAY {day}");
        },
        None => {
            let _ = write!(lines[1], "TICK off DAY {day}");
        },
    }

    let charging = if view.battery.charging { "CHG" } else { "" };
    let _ = write!(lines[2], "BATT {}% {charging}", view.battery.charge_percent);

    let metrics = view.metrics;
    let _ = write!(
        lines[3],
        "FRAME {:.1}ms R {:.1}ms",
        metrics.frame_time_avg_us() as f32 / 1000.0,
        metrics.render_time_us as f32 / 1000.0
    );
    let _ = write!(
        lines[4],
        "DRAWS {} LAY {} TICK {}",
        metrics.redraw_passes, metrics.layers_drawn, metrics.ticks_delivered
    );

    lines
}

/// Most recent log lines with their level prefix, oldest first.
fn draw_log_terminal<D>(
    display: &mut D,
    log: &LogBuffer,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let skip = log.len().saturating_sub(LOG_LINES);
    for (row, entry) in log.iter().skip(skip).enumerate() {
        let y = LOG_Y + row as i32 * LOG_LINE_HEIGHT;
        let t = entry.timestamp_s;
        let mut line: String<56> = String::new();
        let _ = write!(
            line,
            "{} {:02}:{:02}:{:02} {}",
            entry.level.prefix(),
            t / 3600,
            (t / 60) % 60,
            t % 60,
            entry.message
        );
        Text::new(&line, Point::new(LEFT_X, y), MonoTextStyle::new(&FONT_6X10, entry.level.color()))
            .draw(display)
            .ok();
    }
}

fn draw_horizontal_line<D>(
    display: &mut D,
    y: i32,
) where
    D: DrawTarget<Color = Rgb565>,
{
    Line::new(Point::new(0, y), Point::new(SCREEN_WIDTH as i32 - 1, y))
        .into_styled(PrimitiveStyle::with_stroke(DIVIDER_COLOR, 1))
        .draw(display)
        .ok();
}

const _: () = assert!(LOG_LINES <= LOG_ENTRIES, "terminal shows at most the whole ring");

#[cfg(test)]
mod tests {
    use watchface_common::FaceConfig;
    use watchface_common::config::SCREEN_HEIGHT;

    use super::*;
    use crate::config::SCRIPT_START_UNIX;
    use crate::host::SimHost;

    #[test]
    fn test_layout_fits_screen() {
        let last_log_baseline = LOG_Y + (LOG_LINES as i32 - 1) * LOG_LINE_HEIGHT;
        assert!(last_log_baseline < SCREEN_HEIGHT as i32, "Log must end above the bottom edge");
    }

    #[test]
    fn test_stat_lines_before_start() {
        let face = Watchface::new(FaceConfig::CLASSIC);
        let metrics = ProfilingMetrics::new();
        let view = DebugView {
            face: &face,
            battery: BatteryState::new(85, false),
            metrics: &metrics,
            fast_clock: false,
        };
        let lines = stat_lines(&view);
        assert_eq!(lines[0].as_str(), "STATE Stopped -- SEC OFF");
        assert_eq!(lines[1].as_str(), "TICK off DAY --");
        assert!(lines[2].starts_with("BATT 85%"));
    }

    #[test]
    fn test_stat_lines_while_running() {
        let mut host = SimHost::new(SCRIPT_START_UNIX);
        let mut face = Watchface::new(FaceConfig::CLASSIC);
        face.start(&mut host);
        let metrics = ProfilingMetrics::new();
        let view = DebugView {
            face: &face,
            battery: BatteryState::new(40, true),
            metrics: &metrics,
            fast_clock: true,
        };
        let lines = stat_lines(&view);
        assert_eq!(lines[0].as_str(), "STATE Running 24H SEC ON");
        assert_eq!(lines[1].as_str(), "TICK PerSecond DAY 3");
        assert_eq!(lines[2].as_str(), "BATT 40% CHG");
    }

    /// Remembers which pixels were drawn in which color.
    struct Canvas {
        pixels: Vec<(Point, Rgb565)>,
    }

    impl OriginDimensions for Canvas {
        fn size(&self) -> Size { Size::new(SCREEN_WIDTH, SCREEN_HEIGHT) }
    }

    impl DrawTarget for Canvas {
        type Color = Rgb565;
        type Error = core::convert::Infallible;

        fn draw_iter<I>(
            &mut self,
            pixels: I,
        ) -> Result<(), Self::Error>
        where
            I: IntoIterator<Item = Pixel<Self::Color>>,
        {
            self.pixels.extend(pixels.into_iter().map(|Pixel(p, c)| (p, c)));
            Ok(())
        }
    }

    #[test]
    fn test_debug_page_draws_dividers_and_log() {
        let mut host = SimHost::new(SCRIPT_START_UNIX);
        let mut face = Watchface::new(FaceConfig::CLASSIC);
        face.start(&mut host);
        let metrics = ProfilingMetrics::new();
        let view = DebugView {
            face: &face,
            battery: host.battery(),
            metrics: &metrics,
            fast_clock: false,
        };
        let mut canvas = Canvas { pixels: Vec::new() };
        draw_debug_page(&mut canvas, &view);

        let on_divider = |y: i32| canvas.pixels.iter().filter(|(p, c)| p.y == y && *c == DIVIDER_COLOR).count();
        assert_eq!(on_divider(HEADER_DIVIDER_Y), SCREEN_WIDTH as usize, "Header divider spans the screen");
        assert_eq!(on_divider(LOG_DIVIDER_Y), SCREEN_WIDTH as usize);

        let info = watchface_common::LogLevel::Info.color();
        assert!(
            canvas.pixels.iter().any(|(p, c)| p.y > LOG_DIVIDER_Y && *c == info),
            "Startup log line is drawn below the stats"
        );
    }
}
