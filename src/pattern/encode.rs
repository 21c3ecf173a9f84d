//! Serialization of vector tiles into embeddable paint references.

use std::fmt::Write as _;

use serde::{Deserialize, Serialize};

use super::{Point, Primitive, VectorTile};
use crate::color::NormalizedColor;

const SVG_DATA_PREFIX: &str = "data:image/svg+xml,";

// ============================================================================
// PaintReference
// ============================================================================

/// A tile encoded as a percent-encoded `data:image/svg+xml` URI.
///
/// Usable as a repeating CSS background (`css()`) and loadable as an image by
/// the compositor (`data_uri()`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PaintReference {
    data_uri: String,
}

impl PaintReference {
    /// The raw `data:` URI.
    pub fn data_uri(&self) -> &str {
        &self.data_uri
    }

    /// The CSS `url("...")` value.
    pub fn css(&self) -> String {
        format!("url(\"{}\")", self.data_uri)
    }

    /// Extracts a reference from a CSS `url("...")` value.
    ///
    /// Returns `None` for anything that is not a quoted SVG data URL.
    pub fn from_css(value: &str) -> Option<Self> {
        let inner = value.trim().strip_prefix("url(\"")?.strip_suffix("\")")?;
        inner.starts_with(SVG_DATA_PREFIX).then(|| Self {
            data_uri: inner.to_string(),
        })
    }
}

// ============================================================================
// Encoding
// ============================================================================

/// Encodes a tile into a paint reference.
pub fn encode(tile: &VectorTile) -> PaintReference {
    let svg = tile_to_svg(tile);
    PaintReference {
        data_uri: format!("{SVG_DATA_PREFIX}{}", encode_uri_component(svg.trim())),
    }
}

/// Writes the tile as standalone SVG markup.
///
/// Primitives whose paint has an unparsed channel are painted `none`.
pub fn tile_to_svg(tile: &VectorTile) -> String {
    let (w, h) = (tile.width, tile.height);
    let mut svg = format!(
        "<svg width=\"{w}\" height=\"{h}\" viewBox=\"0 0 {w} {h}\" xmlns=\"http://www.w3.org/2000/svg\">\
         <rect width=\"{w}\" height=\"{h}\" fill=\"none\"/>"
    );

    for primitive in &tile.primitives {
        // Writing into a String cannot fail.
        let _ = match primitive {
            Primitive::Line {
                from,
                to,
                stroke,
                stroke_width,
            } => write!(
                svg,
                "<path d=\"M {} {} L {} {}\" stroke=\"{}\" stroke-width=\"{stroke_width}\"/>",
                from.x,
                from.y,
                to.x,
                to.y,
                paint(stroke)
            ),
            Primitive::Circle {
                center,
                radius,
                fill,
            } => write!(
                svg,
                "<circle cx=\"{}\" cy=\"{}\" r=\"{radius}\" fill=\"{}\"/>",
                center.x,
                center.y,
                paint(fill)
            ),
            Primitive::Polygon {
                points,
                stroke,
                stroke_width,
            } => write!(
                svg,
                "<path d=\"{}\" stroke=\"{}\" fill=\"none\" stroke-width=\"{stroke_width}\"/>",
                polygon_path(points),
                paint(stroke)
            ),
        };
    }

    svg.push_str("</svg>");
    svg
}

fn paint(color: &NormalizedColor) -> String {
    if color.is_renderable() {
        color.to_string()
    } else {
        "none".to_string()
    }
}

fn polygon_path(points: &[Point]) -> String {
    let mut d = String::new();
    for (i, p) in points.iter().enumerate() {
        let cmd = if i == 0 { "M" } else { " L" };
        let _ = write!(d, "{cmd} {} {}", p.x, p.y);
    }
    d.push_str(" Z");
    d
}

/// Percent-encodes everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
pub(crate) fn encode_uri_component(input: &str) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";

    let mut out = String::with_capacity(input.len() * 3);
    for byte in input.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => out.push(byte as char),
            _ => {
                out.push('%');
                out.push(HEX[(byte >> 4) as usize] as char);
                out.push(HEX[(byte & 0x0f) as usize] as char);
            }
        }
    }
    out
}
