//! Logo glyph, centered horizontally and top-aligned in its band.

use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use super::{FaceModel, Layer};
use crate::context::DrawContext;
use crate::render::LayerId;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LogoLayer {
    frame: Rectangle,
}

impl LogoLayer {
    pub const fn new(frame: Rectangle) -> Self { Self { frame } }

    /// Top-left corner of an image of `size` inside the band.
    pub fn origin(
        &self,
        size: Size,
    ) -> Point {
        let slack = self.frame.size.width.saturating_sub(size.width) / 2;
        self.frame.top_left + Point::new(slack as i32, 0)
    }
}

impl Layer for LogoLayer {
    fn id(&self) -> LayerId { LayerId::Logo }

    fn frame(&self) -> Rectangle { self.frame }

    fn draw(
        &self,
        ctx: &mut dyn DrawContext,
        face: &FaceModel<'_>,
    ) {
        let logo = &face.assets.logo;
        ctx.draw_vector(logo, self.origin(logo.size()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::LOGO_SIZE;
    use crate::config::LOGO_FRAME;

    #[test]
    fn test_logo_is_centered_and_top_aligned() {
        let layer = LogoLayer::new(LOGO_FRAME);
        assert_eq!(layer.origin(LOGO_SIZE), Point::new(69, 60));
    }

    #[test]
    fn test_oversized_logo_clamps_to_left_edge() {
        let layer = LogoLayer::new(LOGO_FRAME);
        assert_eq!(layer.origin(Size::new(400, 10)), LOGO_FRAME.top_left);
    }
}
