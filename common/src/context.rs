//! The drawing seam between dial layers and a pixel target.
//!
//! Layers never touch pixels directly. They set a transform (rotation,
//! offset, scale), open a fill path in local coordinates, and close it; or
//! they draw strings, vector images and plain shapes. A context is reset
//! before each layer draws, so no transform leaks from one layer to the next.
//!
//! Path coordinates are raw [`FPoint`] values mapped to the target as
//! `offset + rotate(p * scale_to / scale_from)`.

use embedded_graphics::mono_font::MonoFont;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use heapless::{String, Vec};

use crate::angle::Angle;
use crate::fixed::FPoint;
use crate::vector::VectorImage;

/// Vertical reference of a string relative to the current offset.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextAnchor {
    #[default]
    Top,
    Baseline,
    Middle,
}

/// Horizontal reference of a string relative to the current offset.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TextAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Primitive drawing operations the dial layers are written against.
pub trait DrawContext {
    /// Restore identity transform, default colors and an empty path.
    fn reset(&mut self);

    fn set_fill_color(
        &mut self,
        color: Rgb565,
    );

    fn set_stroke_color(
        &mut self,
        color: Rgb565,
    );

    fn set_stroke_width(
        &mut self,
        width: u32,
    );

    fn set_rotation(
        &mut self,
        rotation: Angle,
    );

    fn set_offset(
        &mut self,
        offset: FPoint,
    );

    /// Scale path coordinates by `to / from` on each axis.
    fn set_scale(
        &mut self,
        from: FPoint,
        to: FPoint,
    );

    fn begin_fill(&mut self);

    fn move_to(
        &mut self,
        point: FPoint,
    );

    fn line_to(
        &mut self,
        point: FPoint,
    );

    fn close_path(&mut self);

    /// Fill everything since [`DrawContext::begin_fill`] with the fill color
    /// (even-odd rule).
    fn end_fill(&mut self);

    /// Draw `text` in the fill color at the current offset and rotation.
    fn draw_string(
        &mut self,
        text: &str,
        font: &'static MonoFont<'static>,
        align: TextAlign,
        anchor: TextAnchor,
    );

    /// Draw every visible command of `image` with its top-left at `origin`.
    fn draw_vector(
        &mut self,
        image: &VectorImage,
        origin: Point,
    );

    fn fill_circle(
        &mut self,
        center: Point,
        radius: u32,
    );

    fn fill_rect(
        &mut self,
        rect: Rectangle,
        corner_radius: u32,
    );

    fn stroke_rect(
        &mut self,
        rect: Rectangle,
        corner_radius: u32,
    );

    /// Fill a polygon given in target pixels.
    fn fill_polygon(
        &mut self,
        points: &[Point],
    );

    /// Outline a polygon given in target pixels with the stroke color.
    fn stroke_polygon(
        &mut self,
        points: &[Point],
        closed: bool,
    );
}

// =============================================================================
// Recording Context
// =============================================================================

/// Capacity of a [`RecordingContext`].
pub const MAX_RECORDED_CALLS: usize = 256;

/// One observed draw operation.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum DrawCall {
    FillPath {
        color: Rgb565,
        rotation: Angle,
        offset: FPoint,
        scale: FPoint,
        vertices: usize,
    },
    Text {
        text: String<8>,
        color: Rgb565,
        rotation: Angle,
        offset: FPoint,
        align: TextAlign,
        anchor: TextAnchor,
    },
    Vector {
        origin: Point,
        visible_commands: usize,
    },
    Circle {
        center: Point,
        radius: u32,
        color: Rgb565,
    },
    FillRect {
        rect: Rectangle,
        color: Rgb565,
    },
    StrokeRect {
        rect: Rectangle,
        color: Rgb565,
    },
    FillPolygon {
        vertices: usize,
        color: Rgb565,
    },
    StrokePolygon {
        vertices: usize,
        closed: bool,
        color: Rgb565,
        width: u32,
    },
}

/// A context that records operations instead of drawing them.
///
/// Used to check what a layer would draw without a framebuffer.
#[derive(Clone, Debug, Default)]
pub struct RecordingContext {
    calls: Vec<DrawCall, MAX_RECORDED_CALLS>,
    dropped: usize,
    fill: Rgb565,
    stroke: Rgb565,
    stroke_width: u32,
    rotation: Angle,
    offset: FPoint,
    scale: FPoint,
    path_vertices: usize,
}

impl RecordingContext {
    pub fn new() -> Self { Self::default() }

    #[inline]
    pub fn calls(&self) -> &[DrawCall] { &self.calls }

    /// Calls that did not fit in the buffer.
    #[inline]
    pub const fn dropped(&self) -> usize { self.dropped }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.dropped = 0;
    }

    /// All recorded strings, in draw order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.calls.iter().filter_map(|call| match call {
            DrawCall::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    /// Number of filled paths (ticks, markers).
    pub fn fill_path_count(&self) -> usize { self.calls.iter().filter(|c| matches!(c, DrawCall::FillPath { .. })).count() }

    fn record(
        &mut self,
        call: DrawCall,
    ) {
        if self.calls.push(call).is_err() {
            self.dropped += 1;
        }
    }
}

impl DrawContext for RecordingContext {
    fn reset(&mut self) {
        self.fill = Rgb565::default();
        self.stroke = Rgb565::default();
        self.stroke_width = 1;
        self.rotation = Angle::ZERO;
        self.offset = FPoint::ZERO;
        self.scale = FPoint::UNIT;
        self.path_vertices = 0;
    }

    fn set_fill_color(
        &mut self,
        color: Rgb565,
    ) {
        self.fill = color;
    }

    fn set_stroke_color(
        &mut self,
        color: Rgb565,
    ) {
        self.stroke = color;
    }

    fn set_stroke_width(
        &mut self,
        width: u32,
    ) {
        self.stroke_width = width;
    }

    fn set_rotation(
        &mut self,
        rotation: Angle,
    ) {
        self.rotation = rotation;
    }

    fn set_offset(
        &mut self,
        offset: FPoint,
    ) {
        self.offset = offset;
    }

    fn set_scale(
        &mut self,
        _from: FPoint,
        to: FPoint,
    ) {
        self.scale = to;
    }

    fn begin_fill(&mut self) { self.path_vertices = 0; }

    fn move_to(
        &mut self,
        _point: FPoint,
    ) {
        self.path_vertices += 1;
    }

    fn line_to(
        &mut self,
        _point: FPoint,
    ) {
        self.path_vertices += 1;
    }

    fn close_path(&mut self) {}

    fn end_fill(&mut self) {
        let call = DrawCall::FillPath {
            color: self.fill,
            rotation: self.rotation,
            offset: self.offset,
            scale: self.scale,
            vertices: self.path_vertices,
        };
        self.record(call);
        self.path_vertices = 0;
    }

    fn draw_string(
        &mut self,
        text: &str,
        _font: &'static MonoFont<'static>,
        align: TextAlign,
        anchor: TextAnchor,
    ) {
        let mut recorded = String::new();
        for c in text.chars() {
            if recorded.push(c).is_err() {
                break;
            }
        }
        let call = DrawCall::Text {
            text: recorded,
            color: self.fill,
            rotation: self.rotation,
            offset: self.offset,
            align,
            anchor,
        };
        self.record(call);
    }

    fn draw_vector(
        &mut self,
        image: &VectorImage,
        origin: Point,
    ) {
        let call = DrawCall::Vector {
            origin,
            visible_commands: image.visible_commands().count(),
        };
        self.record(call);
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: u32,
    ) {
        let color = self.fill;
        self.record(DrawCall::Circle { center, radius, color });
    }

    fn fill_rect(
        &mut self,
        rect: Rectangle,
        _corner_radius: u32,
    ) {
        let color = self.fill;
        self.record(DrawCall::FillRect { rect, color });
    }

    fn stroke_rect(
        &mut self,
        rect: Rectangle,
        _corner_radius: u32,
    ) {
        let color = self.stroke;
        self.record(DrawCall::StrokeRect { rect, color });
    }

    fn fill_polygon(
        &mut self,
        points: &[Point],
    ) {
        let color = self.fill;
        self.record(DrawCall::FillPolygon {
            vertices: points.len(),
            color,
        });
    }

    fn stroke_polygon(
        &mut self,
        points: &[Point],
        closed: bool,
    ) {
        let call = DrawCall::StrokePolygon {
            vertices: points.len(),
            closed,
            color: self.stroke,
            width: self.stroke_width,
        };
        self.record(call);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{LIGHT_GRAY, RED};
    use embedded_graphics::mono_font::ascii::FONT_6X10;

    #[test]
    fn test_records_fill_path_with_transform() {
        let mut ctx = RecordingContext::new();
        ctx.reset();
        ctx.set_fill_color(LIGHT_GRAY);
        ctx.set_rotation(Angle::QUARTER_TURN);
        ctx.set_offset(FPoint::from_int(10, 20));
        ctx.set_scale(FPoint::UNIT, FPoint::from_int(1, 8));
        ctx.begin_fill();
        ctx.move_to(FPoint::new(-1, 1));
        ctx.line_to(FPoint::new(-1, -1));
        ctx.line_to(FPoint::new(1, -1));
        ctx.close_path();
        ctx.end_fill();

        assert_eq!(
            ctx.calls(),
            &[DrawCall::FillPath {
                color: LIGHT_GRAY,
                rotation: Angle::QUARTER_TURN,
                offset: FPoint::from_int(10, 20),
                scale: FPoint::from_int(1, 8),
                vertices: 3,
            }]
        );
    }

    #[test]
    fn test_records_text_in_fill_color() {
        let mut ctx = RecordingContext::new();
        ctx.reset();
        ctx.set_fill_color(RED);
        ctx.draw_string("05", &FONT_6X10, TextAlign::Center, TextAnchor::Top);
        assert_eq!(ctx.texts().collect::<heapless::Vec<&str, 4>>().as_slice(), &["05"]);
        let DrawCall::Text { color, .. } = &ctx.calls()[0] else {
            panic!("Expected a text call, got {:?}", ctx.calls()[0]);
        };
        assert_eq!(*color, RED);
    }

    #[test]
    fn test_overflow_counts_dropped_calls() {
        let mut ctx = RecordingContext::new();
        for _ in 0..MAX_RECORDED_CALLS + 3 {
            ctx.fill_circle(Point::zero(), 1);
        }
        assert_eq!(ctx.calls().len(), MAX_RECORDED_CALLS);
        assert_eq!(ctx.dropped(), 3, "Calls past capacity are counted, not stored");
    }
}
