//! Pre-authored vector images.
//!
//! An image is a short list of draw commands (paths and circles) with their
//! own stroke and fill colors. Commands can be hidden one by one, which is how
//! the battery icon shows its charge level, and the whole image can be
//! recolored when the background changes.

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use heapless::Vec;

/// Most commands a single image can hold.
pub const MAX_VECTOR_COMMANDS: usize = 8;

/// Geometry of one command, in image-local pixels.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum VectorShape {
    /// Polyline through `points`; closed unless `open` is set.
    Path { points: &'static [Point], open: bool },
    Circle { center: Point, radius: u32 },
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct VectorCommand {
    pub shape: VectorShape,
    pub fill: Option<Rgb565>,
    pub stroke: Option<Rgb565>,
    pub stroke_width: u32,
    pub hidden: bool,
}

impl VectorCommand {
    /// Filled closed path without outline.
    pub const fn filled_path(
        points: &'static [Point],
        color: Rgb565,
    ) -> Self {
        Self {
            shape: VectorShape::Path { points, open: false },
            fill: Some(color),
            stroke: None,
            stroke_width: 0,
            hidden: false,
        }
    }

    /// Outlined path without fill.
    pub const fn stroked_path(
        points: &'static [Point],
        open: bool,
        color: Rgb565,
        width: u32,
    ) -> Self {
        Self {
            shape: VectorShape::Path { points, open },
            fill: None,
            stroke: Some(color),
            stroke_width: width,
            hidden: false,
        }
    }

    pub const fn filled_circle(
        center: Point,
        radius: u32,
        color: Rgb565,
    ) -> Self {
        Self {
            shape: VectorShape::Circle { center, radius },
            fill: Some(color),
            stroke: None,
            stroke_width: 0,
            hidden: false,
        }
    }

    #[must_use]
    pub const fn hide(mut self) -> Self {
        self.hidden = true;
        self
    }
}

/// A sized list of vector commands.
#[derive(Clone, Debug)]
pub struct VectorImage {
    size: Size,
    commands: Vec<VectorCommand, MAX_VECTOR_COMMANDS>,
}

impl VectorImage {
    /// Build an image from `commands`. Commands past
    /// [`MAX_VECTOR_COMMANDS`] are dropped.
    pub fn new(
        size: Size,
        commands: &[VectorCommand],
    ) -> Self {
        debug_assert!(commands.len() <= MAX_VECTOR_COMMANDS, "vector image has too many commands");
        let mut list = Vec::new();
        for command in commands.iter().take(MAX_VECTOR_COMMANDS) {
            list.push(*command).ok();
        }
        Self { size, commands: list }
    }

    #[inline]
    pub const fn size(&self) -> Size { self.size }

    #[inline]
    pub fn commands(&self) -> &[VectorCommand] { &self.commands }

    /// Commands that will actually be drawn.
    pub fn visible_commands(&self) -> impl Iterator<Item = &VectorCommand> { self.commands.iter().filter(|c| !c.hidden) }

    /// Hide or show command `index`. Out-of-range indices are ignored.
    pub fn set_hidden(
        &mut self,
        index: usize,
        hidden: bool,
    ) {
        if let Some(command) = self.commands.get_mut(index) {
            command.hidden = hidden;
        }
    }

    pub fn is_hidden(
        &self,
        index: usize,
    ) -> bool {
        self.commands.get(index).is_some_and(|c| c.hidden)
    }

    /// Replace every stroke and fill color with `color`.
    pub fn recolor(
        &mut self,
        color: Rgb565,
    ) {
        for command in &mut self.commands {
            if command.fill.is_some() {
                command.fill = Some(color);
            }
            if command.stroke.is_some() {
                command.stroke = Some(color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colors::{BLACK, RED, WHITE};

    const SQUARE: [Point; 4] = [Point::new(0, 0), Point::new(4, 0), Point::new(4, 4), Point::new(0, 4)];

    fn sample() -> VectorImage {
        VectorImage::new(
            Size::new(8, 8),
            &[
                VectorCommand::stroked_path(&SQUARE, false, BLACK, 1),
                VectorCommand::filled_path(&SQUARE, RED),
                VectorCommand::filled_circle(Point::new(2, 2), 1, RED).hide(),
            ],
        )
    }

    #[test]
    fn test_visible_commands_skip_hidden() {
        let image = sample();
        assert_eq!(image.commands().len(), 3);
        assert_eq!(image.visible_commands().count(), 2, "Hidden circle is skipped");
    }

    #[test]
    fn test_set_hidden_toggles() {
        let mut image = sample();
        image.set_hidden(0, true);
        assert!(image.is_hidden(0));
        image.set_hidden(2, false);
        assert!(!image.is_hidden(2));
        image.set_hidden(42, true);
        assert!(!image.is_hidden(42), "Out-of-range index is ignored");
    }

    #[test]
    fn test_recolor_keeps_unset_channels() {
        let mut image = sample();
        image.recolor(WHITE);
        let outline = image.commands()[0];
        assert_eq!(outline.stroke, Some(WHITE));
        assert_eq!(outline.fill, None, "Stroke-only command stays unfilled");
        assert_eq!(image.commands()[1].fill, Some(WHITE));
        assert_eq!(image.commands()[1].stroke, None);
    }
}
