//! Text measurement, word wrapping, and line placement.
//!
//! Layout is measured against a pluggable [`TextMeasure`]. The compositor
//! uses [`SvgTextMeasure`], which shapes text with the same font database
//! used to draw it; tests and headless callers use [`FixedAdvance`] for
//! deterministic widths.

mod layout;
mod measure;
mod wrap;

pub use layout::{TextBlock, TextLayout, layout_text};
pub use measure::{FixedAdvance, SvgTextMeasure};
pub use wrap::wrap;

use std::fmt::Write as _;

use crate::color::Rgba8;

/// CSS font stack used for title and subtitle.
pub const DEFAULT_FONT_FAMILY: &str = "Inter, sans-serif";

/// A font request: family stack, pixel size, and weight.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub size: f32,
    pub bold: bool,
}

impl FontSpec {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Measures the advance width of a single line of text.
pub trait TextMeasure: Send + Sync {
    fn width(&self, text: &str, font: &FontSpec) -> f32;
}

/// Writes one SVG `<text>` element centered on `(x, y)`.
///
/// The line is anchored at its horizontal center and at its vertical middle.
pub(crate) fn write_text_element(
    svg: &mut String,
    x: f32,
    y: f32,
    text: &str,
    font: &FontSpec,
    fill: Rgba8,
) {
    let weight = if font.bold { "bold" } else { "normal" };
    // Writing into a String cannot fail.
    let _ = write!(
        svg,
        "<text x=\"{x}\" y=\"{y}\" text-anchor=\"middle\" dominant-baseline=\"middle\" \
         font-family=\"{}\" font-size=\"{}\" font-weight=\"{weight}\" \
         fill=\"rgb({},{},{})\" fill-opacity=\"{}\" xml:space=\"preserve\">{}</text>",
        escape_xml(&font.family),
        font.size,
        fill.r,
        fill.g,
        fill.b,
        f32::from(fill.a) / 255.0,
        escape_xml(text),
    );
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
