//! Social platform output profiles.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::surface::SizePx;

/// Fixed output dimensions and display label for a sharing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformProfile {
    pub width: u32,
    pub height: u32,
    pub label: &'static str,
}

impl PlatformProfile {
    pub fn size(&self) -> SizePx {
        SizePx::new(self.width, self.height)
    }
}

/// A sharing platform with a preset export size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum Platform {
    Twitter,
    Linkedin,
    Facebook,
    Discord,
}

impl Platform {
    pub const ALL: [Platform; 4] = [
        Self::Twitter,
        Self::Linkedin,
        Self::Facebook,
        Self::Discord,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Twitter => "twitter",
            Self::Linkedin => "linkedin",
            Self::Facebook => "facebook",
            Self::Discord => "discord",
        }
    }

    pub fn profile(self) -> PlatformProfile {
        let (width, height, label) = match self {
            Self::Twitter => (1200, 630, "X / Twitter"),
            Self::Linkedin => (1200, 627, "LinkedIn"),
            Self::Facebook => (1200, 630, "Facebook"),
            Self::Discord => (1200, 675, "Discord"),
        };
        PlatformProfile {
            width,
            height,
            label,
        }
    }

    /// Download name of the exported image, e.g. `og-image-twitter.png`.
    pub fn file_name(self) -> String {
        format!("og-image-{}.png", self.as_str())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unknown platform names.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown platform: {0}")]
pub struct UnknownPlatform(pub String);

impl FromStr for Platform {
    type Err = UnknownPlatform;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPlatform(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profiles_match_platform_presets() {
        assert_eq!(Platform::Twitter.profile().size(), SizePx::new(1200, 630));
        assert_eq!(Platform::Linkedin.profile().size(), SizePx::new(1200, 627));
        assert_eq!(Platform::Facebook.profile().size(), SizePx::new(1200, 630));
        assert_eq!(Platform::Discord.profile().size(), SizePx::new(1200, 675));
        assert_eq!(Platform::Twitter.profile().label, "X / Twitter");
    }

    #[test]
    fn file_names_use_platform_key() {
        assert_eq!(Platform::Discord.file_name(), "og-image-discord.png");
    }

    #[test]
    fn parses_names() {
        assert_eq!("LinkedIn".parse::<Platform>(), Ok(Platform::Linkedin));
        assert!("myspace".parse::<Platform>().is_err());
    }
}
