//! Pattern layer: the encoded tile, repeated over the whole surface.

use resvg::tiny_skia::{
    FilterQuality, Paint, Pattern, Pixmap, PixmapPaint, Rect, SpreadMode, Transform,
};

use super::{LayerConfig, LayerEffect, RenderContext};
use crate::error::LoadError;
use crate::loader::LoadedImage;
use crate::pattern::PaintReference;
use crate::settings::PatternSettings;

// ============================================================================
// PatternConfig
// ============================================================================

/// The pattern fields that shape the encoded tile.
///
/// The background descriptor is ignored: the pattern is drawn over it and
/// does not change with it.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternConfig(PatternSettings);

impl PatternConfig {
    pub fn new(settings: &PatternSettings) -> Self {
        Self(settings.clone())
    }

    /// Encodes the tile for this configuration.
    pub fn paint_reference(&self) -> PaintReference {
        self.0.paint_reference()
    }
}

impl LayerConfig for PatternConfig {
    fn differs_from(&self, other: &Self) -> bool {
        let (a, b) = (&self.0, &other.0);
        a.pattern_type != b.pattern_type
            || a.color != b.color
            || a.scale != b.scale
            || a.opacity.to_bits() != b.opacity.to_bits()
    }
}

// ============================================================================
// PatternLayer
// ============================================================================

/// Tiles the rasterized pattern over an offscreen surface, then composites
/// that surface onto the canvas.
#[derive(Debug, Clone)]
pub struct PatternLayer {
    tile: LoadedImage,
}

impl PatternLayer {
    pub fn new(tile: LoadedImage) -> Self {
        Self { tile }
    }
}

impl LayerEffect for PatternLayer {
    fn name(&self) -> &'static str {
        "pattern"
    }

    fn transform(&self, ctx: &mut RenderContext) -> Result<(), LoadError> {
        let size = ctx.size();
        let mut offscreen = Pixmap::new(size.width, size.height).ok_or_else(|| {
            LoadError::Svg(format!(
                "cannot allocate a {}x{} pattern surface",
                size.width, size.height
            ))
        })?;

        // The tile pixmap is rounded up to whole pixels; scale it back so the
        // repeat period matches the tile's own size.
        let pixmap = &self.tile.pixmap;
        let shader_transform = Transform::from_scale(
            self.tile.width / pixmap.width() as f32,
            self.tile.height / pixmap.height() as f32,
        );
        let paint = Paint {
            shader: Pattern::new(
                pixmap.as_ref(),
                SpreadMode::Repeat,
                FilterQuality::Bilinear,
                1.0,
                shader_transform,
            ),
            ..Paint::default()
        };

        if let Some(rect) = Rect::from_xywh(0.0, 0.0, size.w(), size.h()) {
            offscreen.fill_rect(rect, &paint, Transform::identity(), None);
        }

        ctx.surface.pixmap_mut().draw_pixmap(
            0,
            0,
            offscreen.as_ref(),
            &PixmapPaint::default(),
            Transform::identity(),
            None,
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use resvg::usvg::fontdb;

    use super::*;
    use crate::color::Rgba8;
    use crate::layer::apply;
    use crate::loader::{DefaultLoader, ImageLoader};
    use crate::pattern::PatternType;
    use crate::surface::{PixelSurface, SizePx};

    fn tile_for(settings: &PatternSettings) -> LoadedImage {
        let loader = DefaultLoader::new(Arc::new(fontdb::Database::new()));
        loader.load(settings.paint_reference().data_uri()).unwrap()
    }

    #[test]
    fn config_ignores_background() {
        let a = PatternSettings::default();
        let b = PatternSettings {
            background: "#000000".into(),
            ..a.clone()
        };
        let c = PatternSettings {
            opacity: 0.2,
            ..a.clone()
        };
        assert!(!PatternConfig::new(&a).differs_from(&PatternConfig::new(&b)));
        assert!(PatternConfig::new(&a).differs_from(&PatternConfig::new(&c)));
    }

    #[test]
    fn grid_lines_repeat_across_surface() {
        let settings = PatternSettings {
            pattern_type: PatternType::Grid,
            color: "#ffffff".into(),
            opacity: 1.0,
            scale: 10,
            ..PatternSettings::default()
        };
        let mut ctx = RenderContext::new(PixelSurface::new(SizePx::new(100, 60)).unwrap());
        assert!(apply(&PatternLayer::new(tile_for(&settings)), &mut ctx));

        // Vertical centerline of each 20 px tile sits on x = 10, 30, 50, ...
        let on_line = |x: u32, y: u32| {
            let a = ctx.surface.pixel(x - 1, y).unwrap().a;
            let b = ctx.surface.pixel(x, y).unwrap().a;
            a.max(b)
        };
        assert!(on_line(10, 5) > 60);
        assert!(on_line(70, 45) > 60);

        // Between lines the surface stays untouched.
        assert_eq!(ctx.surface.pixel(4, 4), Some(Rgba8::TRANSPARENT));
        assert_eq!(ctx.surface.pixel(84, 44), Some(Rgba8::TRANSPARENT));
    }
}
