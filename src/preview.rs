//! CSS declarations for the live preview.
//!
//! The preview is declarative: the same snapshot the compositor rasterizes
//! is expressed as stacked CSS background layers over a fallback color. Top
//! to bottom: pattern, darkening veil, the background faded to stand in for
//! photo opacity, the photo, and the background itself.

use std::fmt::Write as _;

use crate::background::Background;
use crate::color::Rgba8;
use crate::layer::backdrop::BACKDROP_OPACITY;
use crate::settings::SessionSnapshot;

/// Veil drawn over a background photo.
const PHOTO_VEIL: &str = "linear-gradient(rgba(0,0,0,0.6), rgba(0,0,0,0.6))";

/// One CSS background layer.
#[derive(Debug, Clone, PartialEq)]
struct CssLayer {
    image: String,
    size: String,
    position: &'static str,
    repeat: &'static str,
}

/// Background declarations for a preview element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewStyle {
    /// Fallback color under every image layer.
    pub background: String,
    pub background_image: String,
    pub background_size: String,
    pub background_position: String,
    pub background_repeat: String,
    pub background_blend_mode: String,
}

impl PreviewStyle {
    pub fn from_snapshot(snapshot: &SessionSnapshot) -> Self {
        let pattern = &snapshot.pattern;
        let (tile_w, tile_h) = pattern.pattern_type.tile_size(pattern.scale);

        let mut layers = vec![CssLayer {
            image: snapshot.paint.css(),
            size: format!("{}px {}px", round_px(tile_w), round_px(tile_h)),
            position: "0 0",
            repeat: "repeat",
        }];

        let parsed = Background::parse(&pattern.background);
        if let Some(photo) = &snapshot.content.background_image {
            // CSS has no per-layer opacity; covering the photo with the
            // background at the complementary alpha composites the same.
            let under = parsed.clone().unwrap_or(Background::Solid(Rgba8::BLACK));
            let fade = under.css_with_alpha(1.0 - f64::from(BACKDROP_OPACITY));
            layers.push(cover(PHOTO_VEIL.to_string()));
            layers.push(cover(fade));
            layers.push(cover(format!("url(\"{}\")", css_escape(photo))));
        }

        let background = match parsed {
            Some(Background::Solid(_)) => pattern.background.trim().to_string(),
            Some(gradient @ Background::Linear(_)) => {
                layers.push(cover(pattern.background.trim().to_string()));
                let c = gradient.first_color();
                format!("rgb({},{},{})", c.r, c.g, c.b)
            }
            None => "#000000".to_string(),
        };

        let blend = vec!["normal"; layers.len()].join(", ");
        Self {
            background,
            background_image: join(&layers, |l| l.image.as_str()),
            background_size: join(&layers, |l| l.size.as_str()),
            background_position: join(&layers, |l| l.position),
            background_repeat: join(&layers, |l| l.repeat),
            background_blend_mode: blend,
        }
    }

    /// `(property, value)` pairs in the order they should be applied.
    pub fn declarations(&self) -> [(&'static str, &str); 6] {
        [
            ("background", self.background.as_str()),
            ("background-image", self.background_image.as_str()),
            ("background-size", self.background_size.as_str()),
            ("background-position", self.background_position.as_str()),
            ("background-repeat", self.background_repeat.as_str()),
            ("background-blend-mode", self.background_blend_mode.as_str()),
        ]
    }

    /// The declarations as an inline style string.
    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (property, value) in self.declarations() {
            let _ = write!(css, "{property}: {value}; ");
        }
        css.truncate(css.trim_end().len());
        css
    }
}

fn cover(image: String) -> CssLayer {
    CssLayer {
        image,
        size: "cover".to_string(),
        position: "center",
        repeat: "no-repeat",
    }
}

fn join<'a>(layers: &'a [CssLayer], field: impl Fn(&'a CssLayer) -> &'a str) -> String {
    layers.iter().map(field).collect::<Vec<_>>().join(", ")
}

fn round_px(value: f64) -> String {
    let rounded = (value * 100.0).round() / 100.0;
    format!("{rounded}")
}

fn css_escape(url: &str) -> String {
    url.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::PatternType;
    use crate::settings::{Content, PatternSettings};

    #[test]
    fn pattern_sits_over_gradient() {
        let style = PreviewStyle::from_snapshot(&SessionSnapshot::default());
        let snap = SessionSnapshot::default();

        assert!(style.background_image.starts_with(&snap.paint.css()));
        assert!(style
            .background_image
            .ends_with("linear-gradient(225deg, #2A2A2A 0%, #121212 100%)"));
        assert_eq!(style.background_size, "40px 40px, cover");
        assert_eq!(style.background_repeat, "repeat, no-repeat");
        assert_eq!(style.background_blend_mode, "normal, normal");
        assert_eq!(style.background, "rgb(42,42,42)");
    }

    #[test]
    fn solid_background_is_the_fallback_color() {
        let snap = SessionSnapshot::new(
            PatternSettings {
                background: "#1e293b".into(),
                ..PatternSettings::default()
            },
            Content::default(),
        );
        let style = PreviewStyle::from_snapshot(&snap);
        assert_eq!(style.background, "#1e293b");
        assert_eq!(style.background_size, "40px 40px");
    }

    #[test]
    fn photo_is_veiled_under_pattern() {
        let snap = SessionSnapshot::new(
            PatternSettings {
                pattern_type: PatternType::Honeycomb,
                scale: 10,
                ..PatternSettings::default()
            },
            Content::default().with_background_image("https://example.com/a.jpg"),
        );
        let style = PreviewStyle::from_snapshot(&snap);
        let layers: Vec<&str> = style.background_size.split(", ").collect();
        assert_eq!(layers, ["30px 17.32px", "cover", "cover", "cover", "cover"]);
        assert!(style.background_image.contains(PHOTO_VEIL));
        assert!(style.background_image.contains("url(\"https://example.com/a.jpg\")"));
    }

    #[test]
    fn photo_is_faded_toward_background() {
        let snap = SessionSnapshot::new(
            PatternSettings {
                background: "#102030".into(),
                ..PatternSettings::default()
            },
            Content::default().with_background_image("photo.png"),
        );
        let style = PreviewStyle::from_snapshot(&snap);
        let images: Vec<&str> = style.background_image.split(", linear-gradient").collect();
        let fade = "(rgba(16,32,48,0.7), rgba(16,32,48,0.7)), url(\"photo.png\")";

        assert!(images[1].starts_with("(rgba(0,0,0,0.6)"));
        assert!(images[2].starts_with(fade), "{}", images[2]);
        assert_eq!(style.background, "#102030");
    }

    #[test]
    fn inline_css_lists_background_first() {
        let css = PreviewStyle::from_snapshot(&SessionSnapshot::default()).to_css();
        assert!(css.starts_with("background: rgb(42,42,42); background-image: url("));
        assert!(css.ends_with("background-blend-mode: normal, normal;"));
    }
}
