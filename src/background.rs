//! Background descriptors: solid colors and CSS `linear-gradient(...)`.
//!
//! The gradient geometry follows CSS: `0deg` points up, angles grow
//! clockwise, and the gradient line is long enough for the 0% and 100% stops
//! to touch the corners of the box.

use resvg::tiny_skia::{self, GradientStop, Point, Shader, SpreadMode, Transform};

use crate::color::{Rgba8, parse_css_color};

/// Angle used when a gradient omits its direction (`to bottom`).
const DEFAULT_ANGLE: f64 = 180.0;

// ============================================================================
// Types
// ============================================================================

/// A parsed background.
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    Solid(Rgba8),
    Linear(LinearGradient),
}

/// Direction of a linear gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Direction {
    /// CSS angle in degrees.
    Angle(f64),
    /// `to <vertical> <horizontal>`; signs are +1 for right/bottom, -1 for left/top.
    Corner { horizontal: f64, vertical: f64 },
}

/// A color stop. `position` is a fraction of the gradient line, if given.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub color: Rgba8,
    pub position: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LinearGradient {
    pub direction: Direction,
    pub stops: Vec<ColorStop>,
}

// ============================================================================
// Parsing
// ============================================================================

impl Background {
    /// Parses a solid CSS color or a `linear-gradient(...)` descriptor.
    pub fn parse(input: &str) -> Option<Self> {
        let s = input.trim();
        let lower = s.to_ascii_lowercase();
        if lower.starts_with("linear-gradient(") {
            let body = s["linear-gradient(".len()..].strip_suffix(')')?;
            return LinearGradient::parse_args(body).map(Self::Linear);
        }
        parse_css_color(s).map(Self::Solid)
    }

    /// A representative single color, used where a gradient cannot be drawn.
    pub fn first_color(&self) -> Rgba8 {
        match self {
            Self::Solid(c) => *c,
            Self::Linear(g) => g.stops.first().map(|s| s.color).unwrap_or(Rgba8::BLACK),
        }
    }

    /// This background as a CSS image layer with every alpha multiplied by
    /// `alpha`. Solid colors become a flat two-stop gradient.
    pub fn css_with_alpha(&self, alpha: f64) -> String {
        let color = |c: Rgba8| {
            let a = (f64::from(c.a) / 255.0 * alpha.clamp(0.0, 1.0) * 1000.0).round() / 1000.0;
            format!("rgba({},{},{},{a})", c.r, c.g, c.b)
        };
        match self {
            Self::Solid(c) => {
                let c = color(*c);
                format!("linear-gradient({c}, {c})")
            }
            Self::Linear(g) => {
                let direction = match g.direction {
                    Direction::Angle(deg) => format!("{deg}deg"),
                    Direction::Corner {
                        horizontal,
                        vertical,
                    } => format!(
                        "to {} {}",
                        if vertical < 0.0 { "top" } else { "bottom" },
                        if horizontal < 0.0 { "left" } else { "right" },
                    ),
                };
                let stops: Vec<String> = g
                    .resolved_stops()
                    .into_iter()
                    .map(|(pos, c)| format!("{} {}%", color(c), (pos * 10000.0).round() / 100.0))
                    .collect();
                format!("linear-gradient({direction}, {})", stops.join(", "))
            }
        }
    }
}

impl LinearGradient {
    fn parse_args(body: &str) -> Option<Self> {
        let args = split_top_level(body);
        let mut args = args.iter().map(|a| a.trim()).peekable();

        let first = *args.peek()?;
        let direction = match parse_direction(first) {
            Some(d) => {
                args.next();
                d
            }
            None => Direction::Angle(DEFAULT_ANGLE),
        };

        let stops = args.map(parse_stop).collect::<Option<Vec<_>>>()?;
        if stops.len() < 2 {
            return None;
        }

        Some(Self { direction, stops })
    }

    /// The CSS angle in degrees for a box of `width` by `height`.
    pub fn angle(&self, width: f64, height: f64) -> f64 {
        match self.direction {
            Direction::Angle(deg) => deg,
            Direction::Corner {
                horizontal,
                vertical,
            } => (horizontal * height).atan2(-vertical * width).to_degrees(),
        }
    }

    /// Stop positions with CSS fix-up applied: missing ends become 0 and 1,
    /// positions never decrease, and unpositioned runs are spaced evenly.
    pub fn resolved_stops(&self) -> Vec<(f64, Rgba8)> {
        let n = self.stops.len();
        let mut positions: Vec<Option<f64>> = self.stops.iter().map(|s| s.position).collect();
        if let Some(first) = positions.first_mut() {
            first.get_or_insert(0.0);
        }
        if let Some(last) = positions.last_mut() {
            last.get_or_insert(1.0);
        }

        let mut max_seen = f64::NEG_INFINITY;
        for p in positions.iter_mut().flatten() {
            *p = p.max(max_seen);
            max_seen = *p;
        }

        let mut i = 0;
        while i < n {
            if positions[i].is_some() {
                i += 1;
                continue;
            }
            let start = i - 1;
            let mut end = i;
            while positions[end].is_none() {
                end += 1;
            }
            let (from, to) = (positions[start].unwrap_or(0.0), positions[end].unwrap_or(1.0));
            let span = (end - start) as f64;
            for (k, slot) in positions[start + 1..end].iter_mut().enumerate() {
                *slot = Some(from + (to - from) * (k + 1) as f64 / span);
            }
            i = end;
        }

        positions
            .into_iter()
            .zip(&self.stops)
            .map(|(p, s)| (p.unwrap_or(0.0), s.color))
            .collect()
    }

    /// Start and end points of the gradient line inside a `width` x `height` box.
    pub fn line(&self, width: f64, height: f64) -> ((f64, f64), (f64, f64)) {
        let rad = self.angle(width, height).to_radians();
        let (dx, dy) = (rad.sin(), -rad.cos());
        let half = (width * dx.abs() + height * dy.abs()) / 2.0;
        let (cx, cy) = (width / 2.0, height / 2.0);
        ((cx - dx * half, cy - dy * half), (cx + dx * half, cy + dy * half))
    }

    /// Builds a tiny-skia shader for a `width` x `height` surface.
    pub fn shader(&self, width: f64, height: f64) -> Option<Shader<'static>> {
        let ((x0, y0), (x1, y1)) = self.line(width, height);
        let stops = self
            .resolved_stops()
            .into_iter()
            .map(|(pos, color)| GradientStop::new(pos as f32, color.to_skia()))
            .collect();
        tiny_skia::LinearGradient::new(
            Point::from_xy(x0 as f32, y0 as f32),
            Point::from_xy(x1 as f32, y1 as f32),
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        )
    }
}

fn parse_direction(arg: &str) -> Option<Direction> {
    let lower = arg.to_ascii_lowercase();
    if let Some(sides) = lower.strip_prefix("to ") {
        let (mut horizontal, mut vertical) = (0.0, 0.0);
        for side in sides.split_whitespace() {
            match side {
                "left" => horizontal = -1.0,
                "right" => horizontal = 1.0,
                "top" => vertical = -1.0,
                "bottom" => vertical = 1.0,
                _ => return None,
            }
        }
        return Some(match (horizontal != 0.0, vertical != 0.0) {
            (true, true) => Direction::Corner {
                horizontal,
                vertical,
            },
            (true, false) => Direction::Angle(if horizontal > 0.0 { 90.0 } else { 270.0 }),
            (false, true) => Direction::Angle(if vertical > 0.0 { 180.0 } else { 0.0 }),
            (false, false) => return None,
        });
    }

    let units: [(&str, f64); 4] = [
        ("grad", 0.9),
        ("turn", 360.0),
        ("rad", 180.0 / std::f64::consts::PI),
        ("deg", 1.0),
    ];
    units.iter().find_map(|(suffix, factor)| {
        let value = lower.strip_suffix(suffix)?.trim().parse::<f64>().ok()?;
        Some(Direction::Angle(value * factor))
    })
}

fn parse_stop(arg: &str) -> Option<ColorStop> {
    if let Some((color, pos)) = arg.rsplit_once(char::is_whitespace) {
        if let Some(pct) = pos.trim().strip_suffix('%') {
            if let Ok(value) = pct.parse::<f64>() {
                return Some(ColorStop {
                    color: parse_css_color(color)?,
                    position: Some(value / 100.0),
                });
            }
        }
    }
    Some(ColorStop {
        color: parse_css_color(arg)?,
        position: None,
    })
}

/// Splits on commas that are not nested inside parentheses.
fn split_top_level(input: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut depth = 0usize;
    let mut start = 0;
    for (i, c) in input.char_indices() {
        match c {
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ',' if depth == 0 => {
                parts.push(&input[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    parts.push(&input[start..]);
    parts
}
