//! Color normalization for pattern paint and CSS color parsing for
//! backgrounds.
//!
//! [`normalize`] folds a user supplied pattern color and a separate opacity
//! into a single `rgba(...)` paint. It mirrors a lenient integer parse: no
//! range validation, and channels that fail to parse are carried as invalid
//! (printed `NaN`) instead of raising an error. Renderers must treat a color
//! with an invalid channel as transparent, see [`NormalizedColor::is_renderable`].
//!
//! [`parse_css_color`] is the strict parser used for solid backgrounds and
//! gradient stops.

use std::fmt;
use std::str::FromStr;

use palette::Srgb;
use resvg::tiny_skia;

// ============================================================================
// NormalizedColor
// ============================================================================

/// A pattern color with its opacity baked in.
///
/// Channels are `None` when the source digits could not be parsed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizedColor {
    pub channels: [Option<i64>; 3],
    pub opacity: f64,
}

impl NormalizedColor {
    /// Opaque-white fallback used for unknown or missing colors.
    pub fn white(opacity: f64) -> Self {
        Self {
            channels: [Some(255), Some(255), Some(255)],
            opacity,
        }
    }

    /// Returns true when every channel parsed and the opacity is a number.
    pub fn is_renderable(&self) -> bool {
        self.channels.iter().all(Option::is_some) && self.opacity.is_finite()
    }

    /// Converts to 8-bit RGBA, clamping out-of-range values.
    ///
    /// Returns `None` for colors that are not renderable.
    pub fn to_rgba8(&self) -> Option<Rgba8> {
        if !self.is_renderable() {
            return None;
        }
        let c = |v: Option<i64>| v.unwrap_or(0).clamp(0, 255) as u8;
        Some(Rgba8 {
            r: c(self.channels[0]),
            g: c(self.channels[1]),
            b: c(self.channels[2]),
            a: (self.opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
        })
    }
}

impl fmt::Display for NormalizedColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("rgba(")?;
        for channel in self.channels {
            match channel {
                Some(v) => write!(f, "{v},")?,
                None => f.write_str("NaN,")?,
            }
        }
        write!(f, "{})", self.opacity)
    }
}

/// Normalizes a pattern color and opacity into a single `rgba(...)` paint.
///
/// Accepts `#RRGGBB`, `rgb(r,g,b)` and `rgba(r,g,b,a)`; any existing alpha is
/// replaced by `opacity`. Everything else, including `None`, becomes white.
pub fn normalize(color: Option<&str>, opacity: f64) -> NormalizedColor {
    let Some(color) = color else {
        return NormalizedColor::white(opacity);
    };

    if let Some(hex) = color.strip_prefix('#') {
        let channel = |start: usize| {
            let pair: String = hex.chars().skip(start).take(2).collect();
            parse_int_prefix(&pair, 16)
        };
        return NormalizedColor {
            channels: [channel(0), channel(2), channel(4)],
            opacity,
        };
    }

    let args = color
        .strip_prefix("rgba(")
        .or_else(|| color.strip_prefix("rgb("));
    if let Some(args) = args {
        let args = args.strip_suffix(')').unwrap_or(args);
        let mut parts = args.split(',').map(|p| parse_int_prefix(p.trim(), 10));
        let mut next = || parts.next().flatten();
        return NormalizedColor {
            channels: [next(), next(), next()],
            opacity,
        };
    }

    NormalizedColor::white(opacity)
}

/// Parses the leading integer of `s` in `radix`, ignoring trailing garbage.
///
/// Returns `None` when no digit is found.
fn parse_int_prefix(s: &str, radix: u32) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s.strip_prefix('+').unwrap_or(s)),
    };

    let mut value: i64 = 0;
    let mut any = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(d));
        any = true;
    }

    any.then_some(if negative { -value } else { value })
}

// ============================================================================
// Rgba8 / CSS colors
// ============================================================================

/// A straight-alpha 8-bit color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    pub const TRANSPARENT: Self = Self::new(0, 0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub fn to_skia(self) -> tiny_skia::Color {
        tiny_skia::Color::from_rgba8(self.r, self.g, self.b, self.a)
    }
}

/// Parses a CSS color: hex (3, 6 or 8 digits), `rgb()`/`rgba()`,
/// `transparent`, or a named color.
pub fn parse_css_color(input: &str) -> Option<Rgba8> {
    let s = input.trim();
    let lower = s.to_ascii_lowercase();

    if lower == "transparent" {
        return Some(Rgba8::TRANSPARENT);
    }

    if let Some(hex) = lower.strip_prefix('#') {
        return parse_hex(hex);
    }

    let args = lower
        .strip_prefix("rgba(")
        .or_else(|| lower.strip_prefix("rgb("));
    if let Some(args) = args {
        return parse_rgb_function(args.strip_suffix(')')?);
    }

    palette::named::from_str(&lower).map(|c| Rgba8::new(c.red, c.green, c.blue, 255))
}

fn parse_hex(hex: &str) -> Option<Rgba8> {
    match hex.len() {
        3 | 6 => {
            let rgb = Srgb::<u8>::from_str(hex).ok()?;
            Some(Rgba8::new(rgb.red, rgb.green, rgb.blue, 255))
        }
        8 => {
            let rgb = Srgb::<u8>::from_str(&hex[..6]).ok()?;
            let a = u8::from_str_radix(&hex[6..], 16).ok()?;
            Some(Rgba8::new(rgb.red, rgb.green, rgb.blue, a))
        }
        _ => None,
    }
}

fn parse_rgb_function(args: &str) -> Option<Rgba8> {
    let parts: Vec<&str> = if args.contains(',') {
        args.split(',').map(str::trim).collect()
    } else {
        args.split(|c: char| c.is_whitespace() || c == '/')
            .filter(|p| !p.is_empty())
            .collect()
    };

    if parts.len() < 3 || parts.len() > 4 {
        return None;
    }

    let channel = |p: &str| -> Option<u8> {
        let v = match p.strip_suffix('%') {
            Some(pct) => pct.trim().parse::<f64>().ok()? / 100.0 * 255.0,
            None => p.parse::<f64>().ok()?,
        };
        Some(v.round().clamp(0.0, 255.0) as u8)
    };
    let alpha = |p: &str| -> Option<u8> {
        let v = match p.strip_suffix('%') {
            Some(pct) => pct.trim().parse::<f64>().ok()? / 100.0,
            None => p.parse::<f64>().ok()?,
        };
        Some((v.clamp(0.0, 1.0) * 255.0).round() as u8)
    };

    Some(Rgba8::new(
        channel(parts[0])?,
        channel(parts[1])?,
        channel(parts[2])?,
        match parts.get(3) {
            Some(a) => alpha(a)?,
            None => 255,
        },
    ))
}

// ============================================================================
// Tests
// ============================================================================
