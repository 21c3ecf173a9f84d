//! Background fill layer.

use resvg::tiny_skia::{Paint, Rect, Transform};

use super::{LayerEffect, RenderContext};
use crate::background::Background;
use crate::color::Rgba8;
use crate::error::LoadError;

/// Fills the whole surface with a solid color or a linear gradient.
///
/// A descriptor that does not parse fills black.
#[derive(Debug, Clone, PartialEq)]
pub struct BackgroundLayer {
    background: Option<Background>,
}

impl BackgroundLayer {
    pub fn new(descriptor: &str) -> Self {
        let background = Background::parse(descriptor);
        if background.is_none() {
            tracing::warn!(descriptor, "unparseable background, filling black");
        }
        Self { background }
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }
}

impl LayerEffect for BackgroundLayer {
    fn name(&self) -> &'static str {
        "background"
    }

    fn transform(&self, ctx: &mut RenderContext) -> Result<(), LoadError> {
        let size = ctx.size();
        let Some(rect) = Rect::from_xywh(0.0, 0.0, size.w(), size.h()) else {
            return Ok(());
        };

        let mut paint = Paint {
            anti_alias: false,
            ..Paint::default()
        };
        match &self.background {
            Some(Background::Solid(color)) => paint.set_color(color.to_skia()),
            Some(background @ Background::Linear(gradient)) => {
                match gradient.shader(f64::from(size.width), f64::from(size.height)) {
                    Some(shader) => paint.shader = shader,
                    // tiny-skia returns no shader for a degenerate gradient line.
                    None => paint.set_color(background.first_color().to_skia()),
                }
            }
            None => paint.set_color(Rgba8::BLACK.to_skia()),
        }

        ctx.surface
            .pixmap_mut()
            .fill_rect(rect, &paint, Transform::identity(), None);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::apply;
    use crate::surface::{PixelSurface, SizePx};

    fn render(descriptor: &str) -> RenderContext {
        let mut ctx = RenderContext::new(PixelSurface::new(SizePx::new(100, 50)).unwrap());
        assert!(apply(&BackgroundLayer::new(descriptor), &mut ctx));
        ctx
    }

    #[test]
    fn solid_fill_covers_surface() {
        let ctx = render("#ff0000");
        assert_eq!(ctx.surface.pixel(0, 0), Some(Rgba8::new(255, 0, 0, 255)));
        assert_eq!(ctx.surface.pixel(99, 49), Some(Rgba8::new(255, 0, 0, 255)));
    }

    #[test]
    fn unparseable_background_fills_black() {
        let ctx = render("sparkly-unicorn");
        assert_eq!(ctx.surface.pixel(50, 25), Some(Rgba8::BLACK));
    }

    #[test]
    fn single_color_gradient_falls_back_to_solid() {
        let ctx = render("linear-gradient(#00ff00, #00ff00)");
        assert_eq!(ctx.surface.pixel(10, 10), Some(Rgba8::new(0, 255, 0, 255)));
    }

    #[test]
    fn horizontal_gradient_runs_left_to_right() {
        let ctx = render("linear-gradient(90deg, #000000 0%, #ffffff 100%)");
        let left = ctx.surface.pixel(1, 25).unwrap();
        let right = ctx.surface.pixel(98, 25).unwrap();
        assert!(left.r < 20, "left = {left:?}");
        assert!(right.r > 235, "right = {right:?}");
        assert_eq!(left.a, 255);
    }
}
