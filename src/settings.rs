//! Session data model: pattern settings, text content, and the immutable
//! snapshot the compositor reads.

use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::pattern::{PaintReference, PatternType, VectorTile, encode, synthesize_seeded};

pub const DEFAULT_COLOR: &str = "#ffffff";
pub const DEFAULT_OPACITY: f64 = 0.1;
pub const DEFAULT_SCALE: u32 = 20;
pub const DEFAULT_BACKGROUND: &str = "linear-gradient(225deg, #2A2A2A 0%, #121212 100%)";
pub const DEFAULT_TITLE: &str = "Create Beautiful OG Images";
pub const DEFAULT_SUBTITLE: &str = "Generate perfect social media previews in seconds";

// ============================================================================
// PatternSettings
// ============================================================================

/// Pattern and background parameters.
///
/// `background` is independent of the other four fields: the pattern is drawn
/// on top of it and never derives from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternSettings {
    #[serde(rename = "type")]
    pub pattern_type: PatternType,
    pub color: String,
    pub opacity: f64,
    pub scale: u32,
    pub background: String,
}

impl Default for PatternSettings {
    fn default() -> Self {
        Self {
            pattern_type: PatternType::Grid,
            color: DEFAULT_COLOR.to_string(),
            opacity: DEFAULT_OPACITY,
            scale: DEFAULT_SCALE,
            background: DEFAULT_BACKGROUND.to_string(),
        }
    }
}

impl PatternSettings {
    /// Checks the numeric ranges the synthesizer relies on.
    pub fn validate(&self) -> Result<(), EditorError> {
        validate_opacity(self.opacity)?;
        validate_scale(i64::from(self.scale))?;
        Ok(())
    }

    /// A stable seed derived from the fields that shape the tile.
    ///
    /// Two settings that only differ in `background` share a seed, so a noise
    /// tile stays put while the user edits the background.
    pub fn seed(&self) -> u64 {
        let mut hash = Fnv1a64::new();
        hash.write(self.pattern_type.as_str().as_bytes());
        hash.write(self.color.as_bytes());
        hash.write(&self.opacity.to_bits().to_le_bytes());
        hash.write(&self.scale.to_le_bytes());
        hash.finish()
    }

    /// The vector tile for these settings.
    pub fn tile(&self) -> VectorTile {
        synthesize_seeded(
            self.pattern_type,
            Some(&self.color),
            self.opacity,
            self.scale,
            self.seed(),
        )
    }

    /// Encodes the tile for these settings.
    pub fn paint_reference(&self) -> PaintReference {
        encode(&self.tile())
    }
}

pub(crate) fn validate_opacity(opacity: f64) -> Result<(), EditorError> {
    if opacity > 0.0 && opacity <= 1.0 {
        Ok(())
    } else {
        Err(EditorError::InvalidOpacity(opacity))
    }
}

pub(crate) fn validate_scale(scale: i64) -> Result<u32, EditorError> {
    u32::try_from(scale)
        .ok()
        .filter(|s| *s > 0)
        .ok_or(EditorError::InvalidScale(scale))
}

/// 64-bit FNV-1a. Output is identical across builds and processes.
struct Fnv1a64(u64);

impl Fnv1a64 {
    const OFFSET_BASIS: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    fn new() -> Self {
        Self(Self::OFFSET_BASIS)
    }

    fn write(&mut self, bytes: &[u8]) {
        for b in bytes {
            self.0 ^= u64::from(*b);
            self.0 = self.0.wrapping_mul(Self::PRIME);
        }
        // Field separator so ("ab", "c") and ("a", "bc") differ.
        self.0 ^= 0xff;
        self.0 = self.0.wrapping_mul(Self::PRIME);
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

// ============================================================================
// Content
// ============================================================================

/// Text and image content drawn over the background.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    pub title: String,
    pub subtitle: String,

    /// Image reference: a `data:` URI, a file path, or a remote URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image: Option<String>,
}

impl Default for Content {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            subtitle: DEFAULT_SUBTITLE.to_string(),
            logo: None,
            background_image: None,
        }
    }
}

impl Content {
    pub fn new(title: impl Into<String>, subtitle: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: subtitle.into(),
            logo: None,
            background_image: None,
        }
    }

    pub fn with_logo(mut self, logo: impl Into<String>) -> Self {
        self.logo = Some(logo.into());
        self
    }

    pub fn with_background_image(mut self, image: impl Into<String>) -> Self {
        self.background_image = Some(image.into());
        self
    }
}

// ============================================================================
// SessionSnapshot
// ============================================================================

/// An immutable copy of the session read by one render or export.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSnapshot {
    pub pattern: PatternSettings,
    pub content: Content,
    pub paint: PaintReference,
}

impl SessionSnapshot {
    /// Builds a snapshot, encoding the pattern from `pattern`.
    pub fn new(pattern: PatternSettings, content: Content) -> Self {
        let paint = pattern.paint_reference();
        Self {
            pattern,
            content,
            paint,
        }
    }
}

impl Default for SessionSnapshot {
    fn default() -> Self {
        Self::new(PatternSettings::default(), Content::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let p = PatternSettings::default();
        assert_eq!(p.pattern_type, PatternType::Grid);
        assert_eq!(p.color, "#ffffff");
        assert_eq!(p.opacity, 0.1);
        assert_eq!(p.scale, 20);
        assert_eq!(p.background, DEFAULT_BACKGROUND);

        let c = Content::default();
        assert_eq!(c.title, "Create Beautiful OG Images");
        assert_eq!(c.subtitle, "Generate perfect social media previews in seconds");
        assert!(c.logo.is_none() && c.background_image.is_none());
    }

    #[test]
    fn serializes_type_field_name() {
        let json = serde_json::to_value(PatternSettings::default()).unwrap();
        assert_eq!(json["type"], "grid");
        assert_eq!(json["scale"], 20);
        assert!(json.get("patternType").is_none());
    }

    #[test]
    fn content_uses_camel_case_and_skips_missing_images() {
        let c = Content::default().with_background_image("bg.png");
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["backgroundImage"], "bg.png");
        assert!(json.get("logo").is_none());

        let parsed: Content =
            serde_json::from_str(r#"{"title":"a","subtitle":"b"}"#).unwrap();
        assert_eq!(parsed, Content::new("a", "b"));
    }

    #[test]
    fn validation_ranges() {
        let mut p = PatternSettings::default();
        assert!(p.validate().is_ok());

        p.opacity = 0.0;
        assert!(matches!(p.validate(), Err(EditorError::InvalidOpacity(_))));
        p.opacity = 1.0;
        p.scale = 0;
        assert!(matches!(p.validate(), Err(EditorError::InvalidScale(0))));

        assert!(validate_scale(-3).is_err());
        assert_eq!(validate_scale(50).unwrap(), 50);
    }

    #[test]
    fn hash_separates_fields() {
        let mut a = Fnv1a64::new();
        a.write(b"ab");
        a.write(b"c");
        let mut b = Fnv1a64::new();
        b.write(b"a");
        b.write(b"bc");

        assert_ne!(a.finish(), b.finish());
        assert_eq!(Fnv1a64::new().finish(), Fnv1a64::OFFSET_BASIS);
    }

    #[test]
    fn seed_ignores_background() {
        let a = PatternSettings::default();
        let b = PatternSettings {
            background: "#000000".to_string(),
            ..a.clone()
        };
        let c = PatternSettings {
            scale: 21,
            ..a.clone()
        };
        assert_eq!(a.seed(), b.seed());
        assert_ne!(a.seed(), c.seed());
    }

    #[test]
    fn noise_tile_is_stable_for_settings() {
        let p = PatternSettings {
            pattern_type: PatternType::Noise,
            ..PatternSettings::default()
        };
        assert_eq!(p.paint_reference(), p.paint_reference());
    }

    #[test]
    fn snapshot_carries_encoded_pattern() {
        let snap = SessionSnapshot::default();
        assert_eq!(snap.paint, PatternSettings::default().paint_reference());
    }
}
