//! Pixel surfaces and geometry types for the compositor.
//!
//! A [`PixelSurface`] is a fixed-size premultiplied RGBA buffer that the
//! layers draw into. It is converted to a straight-alpha [`RgbaImage`] only at
//! the edge, when encoding the exported PNG.

use std::io::Cursor;

use image::{ImageFormat, RgbaImage};
use resvg::tiny_skia::Pixmap;

use crate::color::Rgba8;
use crate::error::RenderError;
use crate::raster::{pixmap_to_rgba_image, unpremultiply};

/// A 2D size in pixel units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SizePx {
    pub width: u32,
    pub height: u32,
}

impl SizePx {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width as a float, for layout math.
    pub fn w(&self) -> f32 {
        self.width as f32
    }

    /// Height as a float, for layout math.
    pub fn h(&self) -> f32 {
        self.height as f32
    }
}

/// A rectangle in surface coordinates.
///
/// Placement math (logo fit, cover scaling) produces fractional positions, so
/// unlike [`SizePx`] this uses floats.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    /// X offset from the left edge of the surface
    pub x: f32,
    /// Y offset from the top edge of the surface
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns the right edge coordinate (x + width).
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge coordinate (y + height).
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }
}

// ============================================================================
// PixelSurface
// ============================================================================

/// An in-memory raster buffer of fixed size.
pub struct PixelSurface {
    pixmap: Pixmap,
}

impl PixelSurface {
    /// Allocates a transparent surface.
    ///
    /// Fails with [`RenderError::SurfaceUnavailable`] for zero or oversized
    /// dimensions.
    pub fn new(size: SizePx) -> Result<Self, RenderError> {
        let pixmap =
            Pixmap::new(size.width, size.height).ok_or(RenderError::SurfaceUnavailable {
                width: size.width,
                height: size.height,
            })?;
        Ok(Self { pixmap })
    }

    pub fn size(&self) -> SizePx {
        SizePx::new(self.pixmap.width(), self.pixmap.height())
    }

    pub fn pixmap(&self) -> &Pixmap {
        &self.pixmap
    }

    pub(crate) fn pixmap_mut(&mut self) -> &mut Pixmap {
        &mut self.pixmap
    }

    /// Reads a single pixel with straight alpha.
    pub fn pixel(&self, x: u32, y: u32) -> Option<Rgba8> {
        let p = self.pixmap.pixel(x, y)?;
        let (r, g, b, a) = unpremultiply(p.red(), p.green(), p.blue(), p.alpha());
        Some(Rgba8::new(r, g, b, a))
    }

    /// Converts the surface to a straight-alpha image.
    pub fn to_rgba_image(&self) -> RgbaImage {
        pixmap_to_rgba_image(&self.pixmap)
    }

    /// Encodes the surface as PNG bytes.
    pub fn encode_png(&self) -> Result<Vec<u8>, RenderError> {
        let mut bytes = Vec::new();
        self.to_rgba_image()
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        Ok(bytes)
    }
}

impl std::fmt::Debug for PixelSurface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PixelSurface")
            .field("width", &self.pixmap.width())
            .field("height", &self.pixmap.height())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_transparent() {
        let surface = PixelSurface::new(SizePx::new(8, 4)).unwrap();
        assert_eq!(surface.size(), SizePx::new(8, 4));
        assert_eq!(surface.pixel(3, 2), Some(Rgba8::TRANSPARENT));
        assert_eq!(surface.pixel(8, 0), None);
    }

    #[test]
    fn zero_size_is_unavailable() {
        let err = PixelSurface::new(SizePx::new(0, 10)).unwrap_err();
        assert!(matches!(
            err,
            RenderError::SurfaceUnavailable {
                width: 0,
                height: 10
            }
        ));
    }

    #[test]
    fn png_roundtrips_dimensions() {
        let surface = PixelSurface::new(SizePx::new(12, 7)).unwrap();
        let bytes = surface.encode_png().unwrap();
        assert_eq!(&bytes[1..4], b"PNG");

        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (12, 7));
    }

    #[test]
    fn rect_edges() {
        let rect = RectF::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(rect.right(), 110.0);
        assert_eq!(rect.bottom(), 70.0);
    }
}
