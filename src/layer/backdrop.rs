//! Background photo layer: a dimmed, cover-scaled image under the pattern.

use resvg::tiny_skia::{FilterQuality, Paint, PixmapPaint, Rect, Transform};

use super::{LayerEffect, RenderContext};
use crate::color::Rgba8;
use crate::error::LoadError;
use crate::loader::LoadedImage;
use crate::surface::{RectF, SizePx};

/// Opacity of the photo itself.
pub const BACKDROP_OPACITY: f32 = 0.3;
/// Opacity of the black rectangle drawn over the photo.
pub const BACKDROP_DIM: f32 = 0.6;

/// Scales an image to cover `size`, preserving its aspect ratio, centered.
pub fn cover_rect(width: f32, height: f32, size: SizePx) -> RectF {
    if width <= 0.0 || height <= 0.0 {
        return RectF::new(0.0, 0.0, size.w(), size.h());
    }
    let scale = (size.w() / width).max(size.h() / height);
    let (w, h) = (width * scale, height * scale);
    RectF::new((size.w() - w) / 2.0, (size.h() - h) / 2.0, w, h)
}

/// Draws the background image at reduced opacity, then darkens it.
#[derive(Debug, Clone)]
pub struct BackdropLayer {
    image: LoadedImage,
    opacity: f32,
    dim: f32,
}

impl BackdropLayer {
    pub fn new(image: LoadedImage) -> Self {
        Self {
            image,
            opacity: BACKDROP_OPACITY,
            dim: BACKDROP_DIM,
        }
    }

    pub fn with_opacity(mut self, opacity: f32) -> Self {
        self.opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_dim(mut self, dim: f32) -> Self {
        self.dim = dim.clamp(0.0, 1.0);
        self
    }
}

impl LayerEffect for BackdropLayer {
    fn name(&self) -> &'static str {
        "background-image"
    }

    fn transform(&self, ctx: &mut RenderContext) -> Result<(), LoadError> {
        let size = ctx.size();
        let target = cover_rect(self.image.width, self.image.height, size);
        let pixmap = &self.image.pixmap;

        let transform = Transform::from_row(
            target.width / pixmap.width() as f32,
            0.0,
            0.0,
            target.height / pixmap.height() as f32,
            target.x,
            target.y,
        );
        let paint = PixmapPaint {
            opacity: self.opacity,
            quality: FilterQuality::Bilinear,
            ..PixmapPaint::default()
        };
        let canvas = ctx.surface.pixmap_mut();
        canvas.draw_pixmap(0, 0, pixmap.as_ref(), &paint, transform, None);

        if let Some(rect) = Rect::from_xywh(0.0, 0.0, size.w(), size.h()) {
            let mut dim = Paint::default();
            dim.set_color(Rgba8::new(0, 0, 0, (self.dim * 255.0).round() as u8).to_skia());
            canvas.fill_rect(rect, &dim, Transform::identity(), None);
        }
        Ok(())
    }
}
