//! Tile geometry for each pattern family.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::{PatternType, Point, Primitive, VectorTile};
use crate::color::{NormalizedColor, normalize};

/// Number of dots in a noise tile.
const NOISE_DOTS: usize = 40;

/// Synthesizes one tile for `pattern_type`.
///
/// Noise tiles draw from the thread RNG and differ on every call; use
/// [`synthesize_seeded`] for a stable tile. A `scale` of zero is clamped to 1.
pub fn synthesize(
    pattern_type: PatternType,
    color: Option<&str>,
    opacity: f64,
    scale: u32,
) -> VectorTile {
    let paint = normalize(color, opacity);
    build(pattern_type, paint, scale, &mut rand::thread_rng())
}

/// Like [`synthesize`], but noise positions come from `seed`.
pub fn synthesize_seeded(
    pattern_type: PatternType,
    color: Option<&str>,
    opacity: f64,
    scale: u32,
    seed: u64,
) -> VectorTile {
    let paint = normalize(color, opacity);
    build(pattern_type, paint, scale, &mut StdRng::seed_from_u64(seed))
}

fn build(
    pattern_type: PatternType,
    paint: NormalizedColor,
    scale: u32,
    rng: &mut impl Rng,
) -> VectorTile {
    let s = f64::from(scale.max(1));
    match pattern_type {
        PatternType::Grid => grid(paint, s),
        PatternType::Dots => dots(paint, s),
        PatternType::Graph => graph(paint, s),
        PatternType::Diagonal => diagonal(paint, s),
        PatternType::Honeycomb => honeycomb(paint, s),
        PatternType::Noise => noise(paint, s, rng),
    }
}

fn line(from: Point, to: Point, stroke: NormalizedColor, stroke_width: f64) -> Primitive {
    Primitive::Line {
        from,
        to,
        stroke,
        stroke_width,
    }
}

fn grid(paint: NormalizedColor, s: f64) -> VectorTile {
    let size = s * 2.0;
    VectorTile {
        width: size,
        height: size,
        primitives: vec![
            line(Point::new(s, 0.0), Point::new(s, size), paint, 1.0),
            line(Point::new(size, s), Point::new(0.0, s), paint, 1.0),
        ],
    }
}

fn dots(paint: NormalizedColor, s: f64) -> VectorTile {
    let size = s * 2.0;
    let centers = [
        Point::new(s, s),
        Point::new(size, size),
        Point::new(size, 0.0),
        Point::new(0.0, size),
        Point::new(0.0, 0.0),
    ];
    VectorTile {
        width: size,
        height: size,
        primitives: centers
            .into_iter()
            .map(|center| Primitive::Circle {
                center,
                radius: 1.5,
                fill: paint,
            })
            .collect(),
    }
}

fn graph(paint: NormalizedColor, s: f64) -> VectorTile {
    let size = s * 2.0;
    let offsets = (1..=7).map(|k| s * f64::from(k) / 4.0);

    let vertical = offsets
        .clone()
        .map(|x| line(Point::new(x, 0.0), Point::new(x, size), paint, 0.5));
    let horizontal = offsets.map(|y| line(Point::new(0.0, y), Point::new(size, y), paint, 0.5));

    VectorTile {
        width: size,
        height: size,
        primitives: vertical.chain(horizontal).collect(),
    }
}

fn diagonal(paint: NormalizedColor, s: f64) -> VectorTile {
    let size = s * 2.0;
    VectorTile {
        width: size,
        height: size,
        primitives: vec![
            line(Point::new(0.0, 0.0), Point::new(size, size), paint, 1.0),
            line(Point::new(0.0, size), Point::new(size, 0.0), paint, 1.0),
        ],
    }
}

fn honeycomb(paint: NormalizedColor, s: f64) -> VectorTile {
    let h = s * 3f64.sqrt();
    let mid = h / 2.0;
    let hexagon = vec![
        Point::new(s, 0.0),
        Point::new(s * 2.0, 0.0),
        Point::new(s * 2.5, mid),
        Point::new(s * 2.0, h),
        Point::new(s, h),
        Point::new(s / 2.0, mid),
    ];

    VectorTile {
        width: s * 3.0,
        height: h,
        primitives: vec![
            Primitive::Polygon {
                points: hexagon,
                stroke: paint,
                stroke_width: 1.0,
            },
            line(Point::new(s * 2.5, mid), Point::new(s * 3.0, mid), paint, 1.0),
            line(Point::new(s / 2.0, mid), Point::new(0.0, mid), paint, 1.0),
        ],
    }
}

fn noise(paint: NormalizedColor, s: f64, rng: &mut impl Rng) -> VectorTile {
    let size = s * 4.0;
    let primitives = (0..NOISE_DOTS)
        .map(|_| {
            let x = rng.gen_range(0.0..size);
            let y = rng.gen_range(0.0..size);
            let radius = rng.gen_range(0.5..2.0);
            Primitive::Circle {
                center: Point::new(x, y),
                radius,
                fill: paint,
            }
        })
        .collect();

    VectorTile {
        width: size,
        height: size,
        primitives,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Option<&str> = Some("#ffffff");

    #[test]
    fn tile_size_agrees_with_geometry() {
        for pattern_type in PatternType::ALL {
            let tile = synthesize(pattern_type, WHITE, 0.1, 13);
            assert_eq!(pattern_type.tile_size(13), (tile.width, tile.height));
        }
    }

    #[test]
    fn grid_tile_has_two_centerlines() {
        let tile = synthesize(PatternType::Grid, WHITE, 0.1, 20);
        assert_eq!((tile.width, tile.height), (40.0, 40.0));
        assert_eq!(tile.line_count(), 2);
        assert_eq!(tile.primitives.len(), 2);
    }

    #[test]
    fn dots_tile_has_corners_and_center() {
        let tile = synthesize(PatternType::Dots, WHITE, 0.1, 20);
        assert_eq!(tile.circle_count(), 5);
        for p in &tile.primitives {
            let Primitive::Circle { radius, .. } = p else {
                panic!("dots tile should only contain circles");
            };
            assert_eq!(*radius, 1.5);
        }
    }

    #[test]
    fn graph_tile_rules_eighths() {
        let tile = synthesize(PatternType::Graph, WHITE, 0.1, 20);
        assert_eq!(tile.line_count(), 14);

        let xs: Vec<f64> = tile
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Line { from, to, stroke_width, .. } if from.x == to.x => {
                    assert_eq!(*stroke_width, 0.5);
                    Some(from.x)
                }
                _ => None,
            })
            .collect();
        assert_eq!(xs, vec![5.0, 10.0, 15.0, 20.0, 25.0, 30.0, 35.0]);
    }

    #[test]
    fn diagonal_tile_is_an_x() {
        let tile = synthesize(PatternType::Diagonal, WHITE, 0.1, 10);
        assert_eq!((tile.width, tile.height), (20.0, 20.0));
        assert_eq!(tile.line_count(), 2);
    }

    #[test]
    fn honeycomb_tile_dimensions() {
        let tile = synthesize(PatternType::Honeycomb, WHITE, 0.1, 20);
        assert_eq!(tile.width, 60.0);
        assert!((tile.height - 20.0 * 3f64.sqrt()).abs() < 1e-9);
        assert_eq!(tile.polygon_count(), 1);
        assert_eq!(tile.line_count(), 2);
    }

    #[test]
    fn honeycomb_connectors_reach_tile_edges() {
        let tile = synthesize(PatternType::Honeycomb, WHITE, 0.1, 10);
        let ends: Vec<f64> = tile
            .primitives
            .iter()
            .filter_map(|p| match p {
                Primitive::Line { to, .. } => Some(to.x),
                _ => None,
            })
            .collect();
        assert_eq!(ends, vec![30.0, 0.0]);
    }

    #[test]
    fn noise_tile_bounds() {
        let tile = synthesize(PatternType::Noise, WHITE, 0.1, 10);
        assert_eq!((tile.width, tile.height), (40.0, 40.0));
        assert_eq!(tile.circle_count(), NOISE_DOTS);
        for p in &tile.primitives {
            let Primitive::Circle { center, radius, .. } = p else {
                panic!("noise tile should only contain circles");
            };
            assert!((0.0..40.0).contains(&center.x));
            assert!((0.0..40.0).contains(&center.y));
            assert!((0.5..2.0).contains(radius));
        }
    }

    #[test]
    fn seeded_noise_is_stable() {
        let a = synthesize_seeded(PatternType::Noise, WHITE, 0.1, 10, 7);
        let b = synthesize_seeded(PatternType::Noise, WHITE, 0.1, 10, 7);
        let c = synthesize_seeded(PatternType::Noise, WHITE, 0.1, 10, 8);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn zero_scale_is_clamped() {
        let tile = synthesize(PatternType::Grid, WHITE, 0.1, 0);
        assert_eq!((tile.width, tile.height), (2.0, 2.0));
    }

    #[test]
    fn primitives_carry_normalized_paint() {
        let tile = synthesize(PatternType::Grid, Some("#3B82F6"), 0.1, 20);
        let Primitive::Line { stroke, .. } = &tile.primitives[0] else {
            panic!("expected a line");
        };
        assert_eq!(stroke.to_string(), "rgba(59,130,246,0.1)");
    }
}
