//! Procedural tiling patterns.
//!
//! A pattern is described by a [`PatternType`] plus color, opacity and scale.
//! [`synth`] turns those parameters into a [`VectorTile`], one repeat unit of
//! vector geometry, and [`encode`] serializes the tile into a
//! [`PaintReference`] that both the live preview and the compositor consume.

pub mod encode;
pub mod synth;

pub use encode::{PaintReference, encode, tile_to_svg};
pub use synth::{synthesize, synthesize_seeded};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::color::NormalizedColor;

// ============================================================================
// PatternType
// ============================================================================

/// The six pattern families.
///
/// Parsing is lenient: unknown names resolve to [`PatternType::Grid`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum PatternType {
    #[default]
    Grid,
    Dots,
    Graph,
    Diagonal,
    Honeycomb,
    Noise,
}

impl PatternType {
    pub const ALL: [PatternType; 6] = [
        Self::Grid,
        Self::Dots,
        Self::Graph,
        Self::Diagonal,
        Self::Honeycomb,
        Self::Noise,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::Dots => "dots",
            Self::Graph => "graph",
            Self::Diagonal => "diagonal",
            Self::Honeycomb => "honeycomb",
            Self::Noise => "noise",
        }
    }

    /// Width and height of one tile at `scale`, matching [`synthesize`].
    pub fn tile_size(self, scale: u32) -> (f64, f64) {
        let s = f64::from(scale.max(1));
        match self {
            Self::Grid | Self::Dots | Self::Graph | Self::Diagonal => (s * 2.0, s * 2.0),
            Self::Honeycomb => (s * 3.0, s * 3f64.sqrt()),
            Self::Noise => (s * 4.0, s * 4.0),
        }
    }

    /// Parses a family name, falling back to grid geometry for unknown names.
    pub fn parse_lenient(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "dots" => Self::Dots,
            "graph" => Self::Graph,
            "diagonal" => Self::Diagonal,
            "honeycomb" => Self::Honeycomb,
            "noise" => Self::Noise,
            _ => Self::Grid,
        }
    }
}

impl From<String> for PatternType {
    fn from(name: String) -> Self {
        Self::parse_lenient(&name)
    }
}

impl From<&str> for PatternType {
    fn from(name: &str) -> Self {
        Self::parse_lenient(name)
    }
}

impl fmt::Display for PatternType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// VectorTile
// ============================================================================

/// A point in tile coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A single draw primitive inside a tile.
#[derive(Debug, Clone, PartialEq)]
pub enum Primitive {
    /// A stroked straight segment.
    Line {
        from: Point,
        to: Point,
        stroke: NormalizedColor,
        stroke_width: f64,
    },
    /// A filled circle.
    Circle {
        center: Point,
        radius: f64,
        fill: NormalizedColor,
    },
    /// A closed, stroked, unfilled outline.
    Polygon {
        points: Vec<Point>,
        stroke: NormalizedColor,
        stroke_width: f64,
    },
}

/// One repeat unit of a background pattern.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorTile {
    pub width: f64,
    pub height: f64,
    pub primitives: Vec<Primitive>,
}

impl VectorTile {
    pub fn line_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Line { .. }))
            .count()
    }

    pub fn circle_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Circle { .. }))
            .count()
    }

    pub fn polygon_count(&self) -> usize {
        self.primitives
            .iter()
            .filter(|p| matches!(p, Primitive::Polygon { .. }))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_names_fall_back_to_grid() {
        assert_eq!(PatternType::parse_lenient("waves"), PatternType::Grid);
        assert_eq!(PatternType::parse_lenient(" Honeycomb "), PatternType::Honeycomb);
    }

    #[test]
    fn serde_uses_lowercase_names() {
        let json = serde_json::to_string(&PatternType::Diagonal).unwrap();
        assert_eq!(json, "\"diagonal\"");

        let parsed: PatternType = serde_json::from_str("\"noise\"").unwrap();
        assert_eq!(parsed, PatternType::Noise);

        let fallback: PatternType = serde_json::from_str("\"zigzag\"").unwrap();
        assert_eq!(fallback, PatternType::Grid);
    }
}
