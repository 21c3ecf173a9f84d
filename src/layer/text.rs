//! Title and subtitle layer.

use std::sync::Arc;

use resvg::tiny_skia::Transform;
use resvg::usvg::fontdb;

use super::{LayerEffect, RenderContext};
use crate::error::LoadError;
use crate::raster::{parse_svg, svg_options};
use crate::surface::SizePx;
use crate::text::{TextBlock, TextLayout, write_text_element};

/// Draws a precomputed [`TextLayout`] and emits it for the caller.
///
/// The lines are written into one full-surface SVG document and rendered by
/// resvg, so glyphs come from the same font database used for measuring.
#[derive(Debug, Clone)]
pub struct TextLayer {
    layout: TextLayout,
    fontdb: Arc<fontdb::Database>,
}

impl TextLayer {
    pub fn new(layout: TextLayout, fontdb: Arc<fontdb::Database>) -> Self {
        Self { layout, fontdb }
    }

    pub fn layout(&self) -> &TextLayout {
        &self.layout
    }

    /// The SVG document drawn for a surface of `size`.
    pub fn to_svg(&self, size: SizePx) -> String {
        let mut svg = format!(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\">",
            w = size.width,
            h = size.height,
        );
        write_block(&mut svg, &self.layout.title);
        write_block(&mut svg, &self.layout.subtitle);
        svg.push_str("</svg>");
        svg
    }
}

fn write_block(svg: &mut String, block: &TextBlock) {
    for (y, line) in block.positioned_lines() {
        if line.is_empty() {
            continue;
        }
        write_text_element(svg, block.center_x, y, line, &block.font, block.color);
    }
}

impl LayerEffect for TextLayer {
    fn name(&self) -> &'static str {
        "text"
    }

    fn transform(&self, ctx: &mut RenderContext) -> Result<(), LoadError> {
        let svg = self.to_svg(ctx.size());
        let tree = parse_svg(svg.as_bytes(), &svg_options(&self.fontdb))?;
        resvg::render(
            &tree,
            Transform::identity(),
            &mut ctx.surface.pixmap_mut().as_mut(),
        );
        Ok(())
    }

    fn emit(&self, ctx: &mut RenderContext) {
        ctx.set(self.layout.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layer::apply;
    use crate::surface::PixelSurface;
    use crate::text::{DEFAULT_FONT_FAMILY, FixedAdvance, layout_text};

    const SIZE: SizePx = SizePx::new(600, 315);

    fn layer(title: &str, subtitle: &str) -> TextLayer {
        let layout = layout_text(
            SIZE,
            title,
            subtitle,
            false,
            DEFAULT_FONT_FAMILY,
            &FixedAdvance::default(),
        );
        TextLayer::new(layout, Arc::new(fontdb::Database::new()))
    }

    #[test]
    fn svg_contains_every_line_escaped() {
        let svg = layer("Fish & Chips", "<fresh>").to_svg(SIZE);
        assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"600\""));
        assert!(svg.contains(">Fish &amp; Chips</text>"));
        assert!(svg.contains(">&lt;fresh&gt;</text>"));
        assert_eq!(svg.matches("<text ").count(), 2);
    }

    #[test]
    fn empty_lines_are_not_written() {
        let svg = layer("Title", "").to_svg(SIZE);
        assert_eq!(svg.matches("<text ").count(), 1);
    }

    #[test]
    fn emits_layout_even_without_fonts() {
        let text = layer("Hello", "World");
        let mut ctx = RenderContext::new(PixelSurface::new(SIZE).unwrap());
        assert!(apply(&text, &mut ctx));
        assert_eq!(ctx.get::<TextLayout>(), Some(text.layout()));
    }
}
