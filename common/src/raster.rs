//! [`DrawContext`] over any embedded-graphics RGB565 target.
//!
//! Fill paths are scanline-converted with the even-odd rule, sampling at
//! pixel centers in 1/16 px precision. Strings are rendered with mono fonts
//! through a rotating target adapter, so upright and half-turn numerals map
//! pixel for pixel. Plain shapes go straight to embedded-graphics
//! primitives. Draw errors from the target are discarded.

use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{
    Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, RoundedRectangle, StrokeAlignment,
};
use embedded_graphics::text::{Alignment, Baseline, Text, TextStyleBuilder};
use heapless::Vec;
use micromath::F32Ext;

use crate::angle::Angle;
use crate::colors::{BLACK, WHITE};
use crate::context::{DrawContext, TextAlign, TextAnchor};
use crate::fixed::{FIXED_POINT_SCALE, FIXED_POINT_SHIFT, FPoint};
use crate::vector::{VectorImage, VectorShape};

/// Edges a single fill path may hold.
pub const MAX_PATH_EDGES: usize = 64;

/// Vertices of a vector path or hand polygon.
pub const MAX_POLYGON_POINTS: usize = 16;

const HALF_PIXEL: i32 = FIXED_POINT_SCALE / 2;

/// Half-width of the local plane strings are laid out in before rotation.
const TEXT_PLANE_EXTENT: i32 = 1024;

type Edge = (FPoint, FPoint);

/// Drawing context writing into `D`.
pub struct GraphicsContext<'d, D> {
    target: &'d mut D,
    fill: Rgb565,
    stroke: Rgb565,
    stroke_width: u32,
    rotation: Angle,
    sin: f32,
    cos: f32,
    offset: FPoint,
    scale_from: FPoint,
    scale_to: FPoint,
    edges: Vec<Edge, MAX_PATH_EDGES>,
    subpath_start: Option<FPoint>,
    cursor: Option<FPoint>,
}

impl<'d, D> GraphicsContext<'d, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    pub fn new(target: &'d mut D) -> Self {
        let mut ctx = Self {
            target,
            fill: WHITE,
            stroke: BLACK,
            stroke_width: 1,
            rotation: Angle::ZERO,
            sin: 0.0,
            cos: 1.0,
            offset: FPoint::ZERO,
            scale_from: FPoint::UNIT,
            scale_to: FPoint::UNIT,
            edges: Vec::new(),
            subpath_start: None,
            cursor: None,
        };
        ctx.reset();
        ctx
    }

    /// Map a local path coordinate to the target.
    fn transform(
        &self,
        p: FPoint,
    ) -> FPoint {
        let sx = scale_axis(p.x, self.scale_from.x, self.scale_to.x) as f32;
        let sy = scale_axis(p.y, self.scale_from.y, self.scale_to.y) as f32;
        let rx = sx * self.cos - sy * self.sin;
        let ry = sx * self.sin + sy * self.cos;
        FPoint::new(rx.round() as i32, ry.round() as i32) + self.offset
    }

    fn push_edge(
        &mut self,
        from: FPoint,
        to: FPoint,
    ) {
        if from.y == to.y {
            // horizontal edges never cross a sample row
            return;
        }
        debug_assert!(!self.edges.is_full(), "fill path exceeds {MAX_PATH_EDGES} edges");
        self.edges.push((from, to)).ok();
    }

    fn close_subpath(&mut self) {
        if let (Some(start), Some(cursor)) = (self.subpath_start, self.cursor) {
            if start != cursor {
                self.push_edge(cursor, start);
            }
            self.cursor = Some(start);
        }
    }

    fn fill_edges(
        &mut self,
        color: Rgb565,
    ) {
        fill_even_odd(self.target, &self.edges, color);
        self.edges.clear();
        self.subpath_start = None;
        self.cursor = None;
    }

    fn fill_points(
        &mut self,
        points: &[Point],
        color: Rgb565,
    ) {
        if points.len() < 3 {
            return;
        }
        let mut edges: Vec<Edge, MAX_PATH_EDGES> = Vec::new();
        let centers = points.iter().map(|p| pixel_center(*p));
        let next = points.iter().cycle().skip(1).map(|p| pixel_center(*p));
        for (a, b) in centers.zip(next) {
            if a.y != b.y {
                edges.push((a, b)).ok();
            }
        }
        fill_even_odd(self.target, &edges, color);
    }

    fn stroke_points(
        &mut self,
        points: &[Point],
        closed: bool,
        color: Rgb565,
        width: u32,
    ) {
        if points.is_empty() || width == 0 {
            return;
        }
        let style = PrimitiveStyle::with_stroke(color, width);
        for pair in points.windows(2) {
            Line::new(pair[0], pair[1]).into_styled(style).draw(self.target).ok();
        }
        if closed && points.len() > 2 {
            let (first, last) = (points[0], points[points.len() - 1]);
            Line::new(last, first).into_styled(style).draw(self.target).ok();
        }
        if points.len() == 1 {
            Pixel(points[0], color).draw(self.target).ok();
        }
    }
}

impl<D> DrawContext for GraphicsContext<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    fn reset(&mut self) {
        self.fill = WHITE;
        self.stroke = BLACK;
        self.stroke_width = 1;
        self.set_rotation(Angle::ZERO);
        self.offset = FPoint::ZERO;
        self.scale_from = FPoint::UNIT;
        self.scale_to = FPoint::UNIT;
        self.edges.clear();
        self.subpath_start = None;
        self.cursor = None;
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
        let (sin, cos) = rotation.sin_cos();
        self.rotation = rotation;
        self.sin = sin;
        self.cos = cos;
    }

    fn set_offset(
        &mut self,
        offset: FPoint,
    ) {
        self.offset = offset;
    }

    fn set_scale(
        &mut self,
        from: FPoint,
        to: FPoint,
    ) {
        self.scale_from = from;
        self.scale_to = to;
    }

    fn begin_fill(&mut self) {
        self.edges.clear();
        self.subpath_start = None;
        self.cursor = None;
    }

    fn move_to(
        &mut self,
        point: FPoint,
    ) {
        self.close_subpath();
        let p = self.transform(point);
        self.subpath_start = Some(p);
        self.cursor = Some(p);
    }

    fn line_to(
        &mut self,
        point: FPoint,
    ) {
        let p = self.transform(point);
        match self.cursor {
            Some(cursor) => self.push_edge(cursor, p),
            None => self.subpath_start = Some(p),
        }
        self.cursor = Some(p);
    }

    fn close_path(&mut self) { self.close_subpath(); }

    fn end_fill(&mut self) {
        self.close_subpath();
        let color = self.fill;
        self.fill_edges(color);
    }

    fn draw_string(
        &mut self,
        text: &str,
        font: &'static MonoFont<'static>,
        align: TextAlign,
        anchor: TextAnchor,
    ) {
        let character_style = MonoTextStyle::new(font, self.fill);
        let text_style = TextStyleBuilder::new()
            .alignment(match align {
                TextAlign::Left => Alignment::Left,
                TextAlign::Center => Alignment::Center,
                TextAlign::Right => Alignment::Right,
            })
            .baseline(match anchor {
                TextAnchor::Top => Baseline::Top,
                TextAnchor::Baseline => Baseline::Alphabetic,
                TextAnchor::Middle => Baseline::Middle,
            })
            .build();
        let (ox, oy) = self.offset.to_f32();
        let mut plane = RotatedPlane {
            target: &mut *self.target,
            sin: self.sin,
            cos: self.cos,
            ox,
            oy,
        };
        Text::with_text_style(text, Point::zero(), character_style, text_style)
            .draw(&mut plane)
            .ok();
    }

    fn draw_vector(
        &mut self,
        image: &VectorImage,
        origin: Point,
    ) {
        for command in image.visible_commands() {
            match command.shape {
                VectorShape::Path { points, open } => {
                    let mut placed: Vec<Point, MAX_POLYGON_POINTS> = Vec::new();
                    for p in points.iter().take(MAX_POLYGON_POINTS) {
                        placed.push(*p + origin).ok();
                    }
                    if let (Some(color), false) = (command.fill, open) {
                        self.fill_points(&placed, color);
                    }
                    if let Some(color) = command.stroke {
                        self.stroke_points(&placed, !open, color, command.stroke_width);
                    }
                }
                VectorShape::Circle { center, radius } => {
                    let circle = Circle::with_center(center + origin, radius * 2 + 1);
                    let mut style = PrimitiveStyleBuilder::new();
                    if let Some(color) = command.fill {
                        style = style.fill_color(color);
                    }
                    if let Some(color) = command.stroke {
                        style = style
                            .stroke_color(color)
                            .stroke_width(command.stroke_width)
                            .stroke_alignment(StrokeAlignment::Inside);
                    }
                    circle.into_styled(style.build()).draw(self.target).ok();
                }
            }
        }
    }

    fn fill_circle(
        &mut self,
        center: Point,
        radius: u32,
    ) {
        Circle::with_center(center, radius * 2 + 1)
            .into_styled(PrimitiveStyle::with_fill(self.fill))
            .draw(self.target)
            .ok();
    }

    fn fill_rect(
        &mut self,
        rect: Rectangle,
        corner_radius: u32,
    ) {
        RoundedRectangle::with_equal_corners(rect, Size::new(corner_radius, corner_radius))
            .into_styled(PrimitiveStyle::with_fill(self.fill))
            .draw(self.target)
            .ok();
    }

    fn stroke_rect(
        &mut self,
        rect: Rectangle,
        corner_radius: u32,
    ) {
        let style = PrimitiveStyleBuilder::new()
            .stroke_color(self.stroke)
            .stroke_width(self.stroke_width)
            .stroke_alignment(StrokeAlignment::Inside)
            .build();
        RoundedRectangle::with_equal_corners(rect, Size::new(corner_radius, corner_radius))
            .into_styled(style)
            .draw(self.target)
            .ok();
    }

    fn fill_polygon(
        &mut self,
        points: &[Point],
    ) {
        let color = self.fill;
        self.fill_points(points, color);
    }

    fn stroke_polygon(
        &mut self,
        points: &[Point],
        closed: bool,
    ) {
        let (color, width) = (self.stroke, self.stroke_width);
        self.stroke_points(points, closed, color, width);
    }
}

// =============================================================================
// Scanline Fill
// =============================================================================

#[inline]
const fn pixel_center(p: Point) -> FPoint { FPoint::new(p.x * FIXED_POINT_SCALE + HALF_PIXEL, p.y * FIXED_POINT_SCALE + HALF_PIXEL) }

#[inline]
const fn floor_px(v: i32) -> i32 { v >> FIXED_POINT_SHIFT }

#[inline]
const fn ceil_px(v: i32) -> i32 { -((-v) >> FIXED_POINT_SHIFT) }

fn scale_axis(
    value: i32,
    from: i32,
    to: i32,
) -> i32 {
    if from == 0 {
        return value;
    }
    (i64::from(value) * i64::from(to) / i64::from(from)) as i32
}

/// Fill the region enclosed by `edges` (even-odd), sampling pixel centers.
fn fill_even_odd<D>(
    target: &mut D,
    edges: &[Edge],
    color: Rgb565,
) where
    D: DrawTarget<Color = Rgb565>,
{
    let Some(min_y) = edges.iter().map(|(a, b)| a.y.min(b.y)).min() else {
        return;
    };
    let max_y = edges.iter().map(|(a, b)| a.y.max(b.y)).max().unwrap_or(min_y);

    let first_row = ceil_px(min_y - HALF_PIXEL);
    let last_row = floor_px(max_y - HALF_PIXEL);
    let mut crossings: Vec<i32, MAX_PATH_EDGES> = Vec::new();

    for row in first_row..=last_row {
        let sample_y = row * FIXED_POINT_SCALE + HALF_PIXEL;
        crossings.clear();
        for (a, b) in edges {
            let spans = (a.y <= sample_y && b.y > sample_y) || (b.y <= sample_y && a.y > sample_y);
            if !spans {
                continue;
            }
            let dy = i64::from(b.y - a.y);
            let x = i64::from(a.x) + i64::from(sample_y - a.y) * i64::from(b.x - a.x) / dy;
            crossings.push(x as i32).ok();
        }
        crossings.sort_unstable();

        for pair in crossings.chunks_exact(2) {
            let start = ceil_px(pair[0] - HALF_PIXEL);
            let end = ceil_px(pair[1] - HALF_PIXEL);
            if end > start {
                let span = Rectangle::new(Point::new(start, row), Size::new((end - start) as u32, 1));
                target.fill_solid(&span, color).ok();
            }
        }
    }
}

// =============================================================================
// Rotated Text Plane
// =============================================================================

/// Target adapter placing a local text plane at an offset and rotation.
struct RotatedPlane<'a, D> {
    target: &'a mut D,
    sin: f32,
    cos: f32,
    ox: f32,
    oy: f32,
}

impl<D> Dimensions for RotatedPlane<'_, D> {
    fn bounding_box(&self) -> Rectangle {
        Rectangle::new(
            Point::new(-TEXT_PLANE_EXTENT, -TEXT_PLANE_EXTENT),
            Size::new(2 * TEXT_PLANE_EXTENT as u32, 2 * TEXT_PLANE_EXTENT as u32),
        )
    }
}

impl<D> DrawTarget for RotatedPlane<'_, D>
where
    D: DrawTarget<Color = Rgb565>,
{
    type Color = Rgb565;
    type Error = D::Error;

    fn draw_iter<I>(
        &mut self,
        pixels: I,
    ) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (sin, cos, ox, oy) = (self.sin, self.cos, self.ox, self.oy);
        self.target.draw_iter(pixels.into_iter().map(|Pixel(p, color)| {
            let (x, y) = (p.x as f32 + 0.5, p.y as f32 + 0.5);
            let rx = x * cos - y * sin + ox;
            let ry = x * sin + y * cos + oy;
            Pixel(Point::new(rx.floor() as i32, ry.floor() as i32), color)
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{LIGHT_GRAY, RED};
    use crate::vector::VectorCommand;
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::mono_font::ascii::FONT_6X10;

    fn display() -> MockDisplay<Rgb565> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display.set_allow_out_of_bounds_drawing(true);
        display
    }

    fn unit_square(ctx: &mut dyn DrawContext) {
        ctx.begin_fill();
        ctx.move_to(FPoint::new(-1, 1));
        ctx.line_to(FPoint::new(-1, -1));
        ctx.line_to(FPoint::new(1, -1));
        ctx.line_to(FPoint::new(1, 1));
        ctx.close_path();
        ctx.end_fill();
    }

    // -------------------------------------------------------------------------
    // Fill Paths
    // -------------------------------------------------------------------------

    #[test]
    fn test_tick_fills_scaled_square() {
        let mut display = display();
        let mut ctx = GraphicsContext::new(&mut display);
        ctx.set_fill_color(LIGHT_GRAY);
        ctx.set_offset(FPoint::from_int(20, 20));
        ctx.set_scale(FPoint::UNIT, FPoint::from_int(1, 8));
        unit_square(&mut ctx);

        assert_eq!(
            display.affected_area(),
            Rectangle::new(Point::new(19, 12), Size::new(2, 16)),
            "A (1, 8) tick covers 2x16 pixels"
        );
        assert_eq!(display.get_pixel(Point::new(20, 20)), Some(LIGHT_GRAY));
    }

    #[test]
    fn test_quarter_turn_swaps_axes() {
        let mut display = display();
        let mut ctx = GraphicsContext::new(&mut display);
        ctx.set_offset(FPoint::from_int(20, 20));
        ctx.set_rotation(Angle::QUARTER_TURN);
        ctx.set_scale(FPoint::UNIT, FPoint::from_int(1, 8));
        unit_square(&mut ctx);

        assert_eq!(display.affected_area(), Rectangle::new(Point::new(12, 19), Size::new(16, 2)));
    }

    #[test]
    fn test_even_odd_leaves_hole() {
        let mut display = display();
        let mut ctx = GraphicsContext::new(&mut display);
        ctx.set_fill_color(RED);
        ctx.begin_fill();
        for (x0, y0, x1, y1) in [(0, 0, 10, 10), (3, 3, 7, 7)] {
            ctx.move_to(FPoint::from_int(x0, y0));
            ctx.line_to(FPoint::from_int(x1, y0));
            ctx.line_to(FPoint::from_int(x1, y1));
            ctx.line_to(FPoint::from_int(x0, y1));
            ctx.close_path();
        }
        ctx.end_fill();

        assert_eq!(display.get_pixel(Point::new(1, 1)), Some(RED));
        assert_eq!(display.get_pixel(Point::new(5, 5)), None, "Inner square is a hole");
        assert_eq!(display.get_pixel(Point::new(10, 10)), None, "Right and bottom edges are exclusive");
    }

    #[test]
    fn test_reset_restores_identity() {
        let mut display = display();
        let mut ctx = GraphicsContext::new(&mut display);
        ctx.set_offset(FPoint::from_int(40, 40));
        ctx.set_rotation(Angle::HALF_TURN);
        ctx.reset();
        let p = ctx.transform(FPoint::from_int(3, 4));
        assert_eq!(p, FPoint::from_int(3, 4));
    }

    // -------------------------------------------------------------------------
    // Shapes
    // -------------------------------------------------------------------------

    #[test]
    fn test_fill_polygon_covers_interior() {
        let mut display = display();
        let mut ctx = GraphicsContext::new(&mut display);
        ctx.set_fill_color(RED);
        ctx.fill_polygon(&[Point::new(2, 2), Point::new(8, 2), Point::new(8, 6), Point::new(2, 6)]);
        assert_eq!(display.affected_area(), Rectangle::new(Point::new(2, 2), Size::new(6, 4)));
    }

    #[test]
    fn test_stroke_polygon_closes() {
        let mut display = display();
        let mut ctx = GraphicsContext::new(&mut display);
        ctx.set_stroke_color(RED);
        ctx.stroke_polygon(&[Point::new(2, 2), Point::new(8, 2), Point::new(8, 6)], true);
        assert_eq!(display.get_pixel(Point::new(5, 4)), Some(RED), "Closing edge from (8,6) to (2,2)");
    }

    #[test]
    fn test_open_polyline_is_not_closed() {
        let mut display = display();
        let mut ctx = GraphicsContext::new(&mut display);
        ctx.set_stroke_color(RED);
        ctx.stroke_polygon(&[Point::new(2, 2), Point::new(8, 2), Point::new(8, 6)], false);
        assert_eq!(display.get_pixel(Point::new(5, 4)), None);
    }

    #[test]
    fn test_draw_vector_skips_hidden_commands() {
        const BOX: [Point; 4] = [Point::new(0, 0), Point::new(4, 0), Point::new(4, 4), Point::new(0, 4)];
        let image = VectorImage::new(
            Size::new(5, 5),
            &[
                VectorCommand::filled_path(&BOX, RED),
                VectorCommand::filled_circle(Point::new(2, 2), 1, WHITE).hide(),
            ],
        );
        let mut display = display();
        let mut ctx = GraphicsContext::new(&mut display);
        ctx.draw_vector(&image, Point::new(10, 10));
        assert_eq!(display.get_pixel(Point::new(12, 12)), Some(RED), "Hidden circle does not paint over");
    }

    // -------------------------------------------------------------------------
    // Text
    // -------------------------------------------------------------------------

    #[test]
    fn test_upright_text_lands_at_offset() {
        let mut display = display();
        let mut ctx = GraphicsContext::new(&mut display);
        ctx.set_fill_color(WHITE);
        ctx.set_offset(FPoint::from_int(4, 4));
        ctx.draw_string("8", &FONT_6X10, TextAlign::Left, TextAnchor::Top);
        let area = display.affected_area();
        assert!(area.top_left.x >= 4 && area.top_left.y >= 4, "Glyph starts at the offset, got {area:?}");
        assert!(area.size.width <= 6 && area.size.height <= 10);
    }

    #[test]
    fn test_half_turn_text_is_mirrored_through_offset() {
        let mut display = display();
        let mut ctx = GraphicsContext::new(&mut display);
        ctx.set_fill_color(WHITE);
        ctx.set_offset(FPoint::from_int(30, 30));
        ctx.set_rotation(Angle::HALF_TURN);
        ctx.draw_string("8", &FONT_6X10, TextAlign::Left, TextAnchor::Top);
        let area = display.affected_area();
        assert!(area.bottom_right().is_some_and(|br| br.x <= 29 && br.y <= 29), "Rotated glyph sits above-left, got {area:?}");
    }
}
