use std::sync::Arc;

use resvg::usvg::{self, Tree};

use super::{FontSpec, TextMeasure, write_text_element};
use crate::color::Rgba8;
use crate::raster::svg_options;

/// Average advance of a sans-serif glyph, as a fraction of the font size.
const AVERAGE_ADVANCE: f32 = 0.55;

// ============================================================================
// FixedAdvance
// ============================================================================

/// Every character advances by `ratio * font.size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedAdvance {
    pub ratio: f32,
}

impl FixedAdvance {
    pub fn new(ratio: f32) -> Self {
        Self { ratio }
    }
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self::new(AVERAGE_ADVANCE)
    }
}

impl TextMeasure for FixedAdvance {
    fn width(&self, text: &str, font: &FontSpec) -> f32 {
        text.chars().count() as f32 * font.size * self.ratio
    }
}

// ============================================================================
// SvgTextMeasure
// ============================================================================

/// Measures by shaping the text through usvg.
///
/// Falls back to [`FixedAdvance`] when the database has no faces or no face
/// resolves for the requested family, so layout never collapses to zero.
#[derive(Debug, Clone)]
pub struct SvgTextMeasure {
    fontdb: Arc<usvg::fontdb::Database>,
    fallback: FixedAdvance,
}

impl SvgTextMeasure {
    pub fn new(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self {
            fontdb,
            fallback: FixedAdvance::default(),
        }
    }

    fn shaped_width(&self, text: &str, font: &FontSpec) -> Option<f32> {
        if self.fontdb.is_empty() || text.is_empty() {
            return None;
        }

        let mut svg = String::from(
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"1\" height=\"1\">",
        );
        write_text_element(&mut svg, 0.0, 0.0, text, font, Rgba8::BLACK);
        svg.push_str("</svg>");

        let tree = Tree::from_str(&svg, &svg_options(&self.fontdb)).ok()?;
        find_text_width(tree.root())
    }
}

impl TextMeasure for SvgTextMeasure {
    fn width(&self, text: &str, font: &FontSpec) -> f32 {
        self.shaped_width(text, font)
            .unwrap_or_else(|| self.fallback.width(text, font))
    }
}

fn find_text_width(group: &usvg::Group) -> Option<f32> {
    group.children().iter().find_map(|node| match node {
        usvg::Node::Text(text) => Some(text.bounding_box().width()),
        usvg::Node::Group(g) => find_text_width(g),
        usvg::Node::Path(_) | usvg::Node::Image(_) => None,
    })
}
