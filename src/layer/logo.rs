//! Logo layer: the uploaded mark, fitted into a box above the title.

use resvg::tiny_skia::{FilterQuality, PixmapPaint, Transform};

use super::{LayerEffect, LogoPlacement, RenderContext};
use crate::error::LoadError;
use crate::loader::LoadedImage;
use crate::surface::{RectF, SizePx};

/// Logo box, as fractions of the surface width and height.
const MAX_WIDTH: f32 = 0.3;
const MAX_HEIGHT: f32 = 0.15;
/// Top edge of the logo, as a fraction of the surface height.
const TOP: f32 = 0.25;

/// Fits a logo of `width x height` into the logo box of `size`.
///
/// Width overflow is resolved first; the height is then re-checked against
/// the already shrunk size. Smaller logos keep their size.
pub fn fit_logo(width: f32, height: f32, size: SizePx) -> RectF {
    let (max_w, max_h) = (size.w() * MAX_WIDTH, size.h() * MAX_HEIGHT);
    let (mut w, mut h) = (width, height);

    if w > max_w {
        h = h * max_w / w;
        w = max_w;
    }
    if h > max_h {
        w = w * max_h / h;
        h = max_h;
    }

    RectF::new((size.w() - w) / 2.0, size.h() * TOP, w, h)
}

#[derive(Debug, Clone)]
pub struct LogoLayer {
    image: LoadedImage,
}

impl LogoLayer {
    pub fn new(image: LoadedImage) -> Self {
        Self { image }
    }

    fn placement(&self, size: SizePx) -> RectF {
        fit_logo(self.image.width, self.image.height, size)
    }
}

impl LayerEffect for LogoLayer {
    fn name(&self) -> &'static str {
        "logo"
    }

    fn transform(&self, ctx: &mut RenderContext) -> Result<(), LoadError> {
        let rect = self.placement(ctx.size());
        let pixmap = &self.image.pixmap;
        let transform = Transform::from_row(
            rect.width / pixmap.width() as f32,
            0.0,
            0.0,
            rect.height / pixmap.height() as f32,
            rect.x,
            rect.y,
        );
        let paint = PixmapPaint {
            quality: FilterQuality::Bicubic,
            ..PixmapPaint::default()
        };
        ctx.surface
            .pixmap_mut()
            .draw_pixmap(0, 0, pixmap.as_ref(), &paint, transform, None);
        Ok(())
    }

    fn emit(&self, ctx: &mut RenderContext) {
        let placement = self.placement(ctx.size());
        ctx.set(LogoPlacement(placement));
    }
}
