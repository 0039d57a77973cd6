//! Frame timing and render counters for the debug page.

use std::time::{Duration, Instant};

use watchface_common::render::LayerMask;

/// Frame timing and render statistics.
pub struct ProfilingMetrics {
    // Frame timing (microseconds)
    pub frame_time_us: u32,
    pub render_time_us: u32,
    pub frame_time_max_us: u32,
    frame_time_avg_us: f32,

    // Counters
    pub total_frames: u64,
    pub redraw_passes: u32,
    pub layers_drawn: u32,
    pub ticks_delivered: u32,

    start_time: Instant,
}

impl ProfilingMetrics {
    const EMA_ALPHA: f32 = 0.1;

    pub fn new() -> Self {
        Self {
            frame_time_us: 0,
            render_time_us: 0,
            frame_time_max_us: 0,
            frame_time_avg_us: 0.0,
            total_frames: 0,
            redraw_passes: 0,
            layers_drawn: 0,
            ticks_delivered: 0,
            start_time: Instant::now(),
        }
    }

    /// Record frame timing for this frame.
    pub fn record_frame(
        &mut self,
        total_time: Duration,
        render_time: Duration,
    ) {
        let total_us = total_time.as_micros() as u32;
        self.frame_time_us = total_us;
        self.render_time_us = render_time.as_micros() as u32;
        self.frame_time_max_us = self.frame_time_max_us.max(total_us);

        if self.total_frames == 0 {
            self.frame_time_avg_us = total_us as f32;
        } else {
            self.frame_time_avg_us =
                Self::EMA_ALPHA.mul_add(total_us as f32, (1.0 - Self::EMA_ALPHA) * self.frame_time_avg_us);
        }

        self.total_frames += 1;
    }

    /// Count a redraw pass that drew the `dirty` layers.
    pub fn record_redraw(
        &mut self,
        dirty: LayerMask,
    ) {
        if !dirty.is_empty() {
            self.redraw_passes += 1;
            self.layers_drawn += dirty.count();
        }
    }

    #[inline]
    pub const fn frame_time_avg_us(&self) -> u32 { self.frame_time_avg_us as u32 }

    #[inline]
    pub fn uptime(&self) -> Duration { self.start_time.elapsed() }
}

impl Default for ProfilingMetrics {
    fn default() -> Self { Self::new() }
}
