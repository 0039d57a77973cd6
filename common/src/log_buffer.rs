//! Leveled log ring for on-screen log viewing.
//!
//! Each owner (the controller, the simulator host) keeps its own buffer; the
//! `log_*!` macros format into a fixed-size string and push it with the
//! owner's current timestamp. Trace and Debug entries are only recorded in
//! debug builds. With the `defmt` feature every recorded entry is also sent
//! to the defmt logger.
//!
//! # Usage
//!
//! ```ignore
//! use watchface_common::{log_info, log_warn};
//!
//! log_info!(self.log, "tick granularity {:?}", granularity);
//! log_warn!(self.log, "handler called before start");
//! ```

use embedded_graphics::pixelcolor::Rgb565;
use heapless::String;

use crate::colors::{CHROME_YELLOW, DARK_GRAY, ISLAMIC_GREEN, LIGHT_GRAY, RED};

/// Maximum number of log entries to keep.
pub const LOG_ENTRIES: usize = 14;

/// Maximum characters per log message.
pub const LOG_MSG_LEN: usize = 40;

/// Log severity level.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum LogLevel {
    /// Verbose debugging (dark gray)
    Trace = 0,
    /// Debug information (light gray)
    Debug = 1,
    /// Normal operation (green)
    #[default]
    Info = 2,
    /// Warnings (yellow)
    Warn = 3,
    /// Errors (red)
    Error = 4,
}

impl LogLevel {
    /// Lowest level recorded by this build.
    pub const BUILD_MINIMUM: Self = if cfg!(debug_assertions) { Self::Debug } else { Self::Info };

    /// Display color for this level.
    pub const fn color(self) -> Rgb565 {
        match self {
            Self::Trace => DARK_GRAY,
            Self::Debug => LIGHT_GRAY,
            Self::Info => ISLAMIC_GREEN,
            Self::Warn => CHROME_YELLOW,
            Self::Error => RED,
        }
    }

    /// Single-character prefix for this level.
    pub const fn prefix(self) -> char {
        match self {
            Self::Trace => 'T',
            Self::Debug => 'D',
            Self::Info => 'I',
            Self::Warn => 'W',
            Self::Error => 'E',
        }
    }
}

/// A single log entry with level, message, and timestamp.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogEntry {
    pub level: LogLevel,
    /// Truncated to `LOG_MSG_LEN - 1` characters.
    pub message: String<LOG_MSG_LEN>,
    /// Seconds of day when the entry was recorded.
    pub timestamp_s: u32,
}

impl LogEntry {
    pub fn new(
        level: LogLevel,
        message: &str,
        timestamp_s: u32,
    ) -> Self {
        let mut msg: String<LOG_MSG_LEN> = String::new();
        for (i, c) in message.chars().enumerate() {
            if i >= LOG_MSG_LEN - 1 {
                break;
            }
            if msg.push(c).is_err() {
                break;
            }
        }
        Self {
            level,
            message: msg,
            timestamp_s,
        }
    }
}

impl Default for LogEntry {
    fn default() -> Self { Self::new(LogLevel::Info, "", 0) }
}

/// Circular buffer of log entries.
pub struct LogBuffer {
    entries: [LogEntry; LOG_ENTRIES],
    head: usize, // Next write position
    count: usize,
    minimum: LogLevel,
    clock_s: u32,
}

impl LogBuffer {
    /// Empty buffer recording from [`LogLevel::BUILD_MINIMUM`] up.
    pub const fn new() -> Self { Self::with_minimum(LogLevel::BUILD_MINIMUM) }

    pub const fn with_minimum(minimum: LogLevel) -> Self {
        Self {
            entries: [const {
                LogEntry {
                    level: LogLevel::Info,
                    message: String::new(),
                    timestamp_s: 0,
                }
            }; LOG_ENTRIES],
            head: 0,
            count: 0,
            minimum,
            clock_s: 0,
        }
    }

    /// Set the timestamp given to subsequent entries.
    #[inline]
    pub const fn set_clock(
        &mut self,
        seconds_of_day: u32,
    ) {
        self.clock_s = seconds_of_day;
    }

    #[inline]
    pub const fn enabled(
        &self,
        level: LogLevel,
    ) -> bool {
        level as u8 >= self.minimum as u8
    }

    /// Record `message` at `level` if the level is enabled.
    pub fn record(
        &mut self,
        level: LogLevel,
        message: &str,
    ) {
        if !self.enabled(level) {
            return;
        }
        #[cfg(feature = "defmt")]
        match level {
            LogLevel::Trace => defmt::trace!("{=str}", message),
            LogLevel::Debug => defmt::debug!("{=str}", message),
            LogLevel::Info => defmt::info!("{=str}", message),
            LogLevel::Warn => defmt::warn!("{=str}", message),
            LogLevel::Error => defmt::error!("{=str}", message),
        }
        let entry = LogEntry::new(level, message, self.clock_s);
        self.push(entry);
    }

    /// Push a new log entry. Oldest entry is dropped if buffer is full.
    pub fn push(
        &mut self,
        entry: LogEntry,
    ) {
        self.entries[self.head] = entry;
        self.head = (self.head + 1) % LOG_ENTRIES;
        if self.count < LOG_ENTRIES {
            self.count += 1;
        }
    }

    #[inline]
    pub const fn len(&self) -> usize { self.count }

    #[inline]
    pub const fn is_empty(&self) -> bool { self.count == 0 }

    /// Iterate over entries from oldest to newest.
    pub fn iter(&self) -> LogBufferIter<'_> {
        let start = if self.count < LOG_ENTRIES { 0 } else { self.head };
        LogBufferIter {
            buffer: self,
            pos: start,
            remaining: self.count,
        }
    }

    /// Most recent entry, if any.
    pub fn last(&self) -> Option<&LogEntry> {
        if self.count == 0 {
            return None;
        }
        Some(&self.entries[(self.head + LOG_ENTRIES - 1) % LOG_ENTRIES])
    }
}

impl Default for LogBuffer {
    fn default() -> Self { Self::new() }
}

/// Iterator over log buffer entries (oldest to newest).
pub struct LogBufferIter<'a> {
    buffer: &'a LogBuffer,
    pos: usize,
    remaining: usize,
}

impl<'a> Iterator for LogBufferIter<'a> {
    type Item = &'a LogEntry;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = &self.buffer.entries[self.pos];
        self.pos = (self.pos + 1) % LOG_ENTRIES;
        self.remaining -= 1;
        Some(entry)
    }
}

/// Log at an explicit level into a [`LogBuffer`].
#[macro_export]
macro_rules! log_at {
    ($buffer:expr, $level:expr, $($arg:tt)*) => {{
        use core::fmt::Write as _;
        let level = $level;
        if $buffer.enabled(level) {
            let mut buf: heapless::String<{ $crate::log_buffer::LOG_MSG_LEN }> = heapless::String::new();
            let _ = write!(buf, $($arg)*);
            $buffer.record(level, buf.as_str());
        }
    }};
}

/// Log a message at Debug level.
#[macro_export]
macro_rules! log_debug {
    ($buffer:expr, $($arg:tt)*) => {
        $crate::log_at!($buffer, $crate::log_buffer::LogLevel::Debug, $($arg)*)
    };
}

/// Log a message at Info level.
#[macro_export]
macro_rules! log_info {
    ($buffer:expr, $($arg:tt)*) => {
        $crate::log_at!($buffer, $crate::log_buffer::LogLevel::Info, $($arg)*)
    };
}

/// Log a message at Warn level.
#[macro_export]
macro_rules! log_warn {
    ($buffer:expr, $($arg:tt)*) => {
        $crate::log_at!($buffer, $crate::log_buffer::LogLevel::Warn, $($arg)*)
    };
}

/// Log a message at Error level.
#[macro_export]
macro_rules! log_error {
    ($buffer:expr, $($arg:tt)*) => {
        $crate::log_at!($buffer, $crate::log_buffer::LogLevel::Error, $($arg)*)
    };
}
