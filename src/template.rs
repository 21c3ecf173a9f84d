//! Built-in templates and gradient presets.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::pattern::PatternType::{self, Diagonal, Dots, Graph, Grid, Honeycomb, Noise};
use crate::settings::{Content, PatternSettings};

/// An immutable bundle of pattern and content used to seed the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub name: String,
    pub pattern: PatternSettings,
    pub content: Content,
}

// ============================================================================
// Catalog
// ============================================================================

struct Entry {
    id: &'static str,
    name: &'static str,
    pattern_type: PatternType,
    color: &'static str,
    opacity: f64,
    scale: u32,
    background: &'static str,
    title: &'static str,
    subtitle: &'static str,
    background_image: Option<&'static str>,
    logo: Option<&'static str>,
}

impl Entry {
    const fn plain(
        id: &'static str,
        name: &'static str,
        (pattern_type, color, opacity, scale): (PatternType, &'static str, f64, u32),
        background: &'static str,
        title: &'static str,
        subtitle: &'static str,
    ) -> Self {
        Self {
            id,
            name,
            pattern_type,
            color,
            opacity,
            scale,
            background,
            title,
            subtitle,
            background_image: None,
            logo: None,
        }
    }

    const fn photo(mut self, key: &'static str) -> Self {
        self.background_image = Some(key);
        self
    }

    const fn logo(mut self, logo: &'static str) -> Self {
        self.logo = Some(logo);
        self
    }

    fn to_template(&self) -> Template {
        Template {
            id: self.id.to_string(),
            name: self.name.to_string(),
            pattern: PatternSettings {
                pattern_type: self.pattern_type,
                color: self.color.to_string(),
                opacity: self.opacity,
                scale: self.scale,
                background: self.background.to_string(),
            },
            content: Content {
                title: self.title.to_string(),
                subtitle: self.subtitle.to_string(),
                logo: self.logo.map(str::to_string),
                background_image: self.background_image.and_then(placeholder_image),
            },
        }
    }
}

const GOOGLE_LOGO: &str = "https://upload.wikimedia.org/wikipedia/commons/5/53/Google_%22G%22_Logo.svg";

const CATALOG: &[Entry] = &[
    Entry::plain(
        "modern",
        "Modern",
        (Grid, "#ffffff", 0.3, 24),
        "linear-gradient(60deg, #29323c 0%, #485563 100%)",
        "Modern Design System",
        "Clean, minimal, and straightforward",
    ),
    Entry::plain(
        "vibrant",
        "Vibrant",
        (Dots, "#ffffff", 0.5, 20),
        "linear-gradient(120deg, #f093fb 0%, #f5576c 100%)",
        "Vibrant & Bold",
        "Stand out with vibrant colors",
    ),
    Entry::plain(
        "basic",
        "Basic",
        (Diagonal, "#334155", 0.5, 12),
        "#1e293b",
        "Basic Dark Theme",
        "Simple and effective dark mode visuals",
    ),
    Entry::plain(
        "tech-image",
        "Tech Image",
        (Graph, "#ffffff", 0.2, 18),
        "linear-gradient(rgba(12, 12, 24, 0.8), rgba(12, 12, 24, 0.9))",
        "Technology Solutions",
        "Innovative tech for modern problems",
    )
    .photo("tech"),
    Entry::plain(
        "nature",
        "Nature",
        (Diagonal, "#ffffff", 0.2, 20),
        "linear-gradient(rgba(5, 32, 15, 0.7), rgba(5, 32, 15, 0.8))",
        "Natural Beauty",
        "Connect with the world around you",
    )
    .photo("nature"),
    Entry::plain(
        "corporate",
        "Corporate",
        (Grid, "#ffffff", 0.15, 16),
        "linear-gradient(rgba(20, 30, 60, 0.8), rgba(20, 30, 60, 0.9))",
        "Business Growth",
        "Professional solutions for your company",
    )
    .photo("business")
    .logo(GOOGLE_LOGO),
    Entry::plain(
        "productivity",
        "Productivity",
        (Graph, "#ffffff", 0.2, 20),
        "linear-gradient(rgba(25, 25, 40, 0.8), rgba(25, 25, 40, 0.9))",
        "Boost Your Productivity",
        "Tools and tips for efficient workflows",
    )
    .photo("productivity"),
    Entry::plain(
        "developer",
        "Developer",
        (Dots, "#00ff00", 0.3, 16),
        "linear-gradient(rgba(10, 10, 10, 0.85), rgba(10, 10, 10, 0.95))",
        "Developer Tools",
        "Resources for modern web development",
    )
    .photo("coding"),
    Entry::plain(
        "city",
        "City",
        (Honeycomb, "#ffffff", 0.15, 18),
        "linear-gradient(rgba(0, 0, 20, 0.7), rgba(0, 0, 20, 0.8))",
        "Urban Exploration",
        "Discover the beauty of city landscapes",
    )
    .photo("city"),
    Entry::plain(
        "architecture",
        "Architecture",
        (Diagonal, "#ffffff", 0.2, 16),
        "linear-gradient(rgba(30, 30, 30, 0.8), rgba(30, 30, 30, 0.9))",
        "Architectural Wonders",
        "Exploring remarkable structures and designs",
    )
    .photo("architecture"),
    Entry::plain(
        "adventure",
        "Adventure",
        (Honeycomb, "#ffffff", 0.25, 20),
        "linear-gradient(rgba(20, 40, 60, 0.7), rgba(20, 40, 60, 0.8))",
        "Mountain Adventures",
        "Explore the heights of natural beauty",
    )
    .photo("mountain"),
    Entry::plain(
        "minimal",
        "Minimal",
        (Grid, "#ffffff", 0.1, 20),
        "linear-gradient(225deg, #2A2A2A 0%, #121212 100%)",
        "Clean & Minimal Design",
        "Perfect for professional content",
    ),
    Entry::plain(
        "gradient",
        "Gradient",
        (Dots, "#ffffff", 0.15, 15),
        "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
        "Gradient Background",
        "Eye-catching and modern",
    ),
    Entry::plain(
        "tech",
        "Tech",
        (Graph, "#00f2fe", 0.2, 25),
        "linear-gradient(90deg, #0C0F13 0%, #151A22 100%)",
        "Technology Theme",
        "For tech products and services",
    ),
    Entry::plain(
        "geometric",
        "Geometric",
        (Honeycomb, "#ffffff", 0.08, 30),
        "linear-gradient(60deg, #29323c 0%, #485563 100%)",
        "Geometric Patterns",
        "Modern and architectural",
    ),
    Entry::plain(
        "vibrant-energetic",
        "Vibrant",
        (Diagonal, "#ffffff", 0.1, 20),
        "linear-gradient(90deg, #FF416C 0%, #FF4B2B 100%)",
        "Vibrant & Energetic",
        "Stand out from the crowd",
    ),
    Entry::plain(
        "ocean",
        "Ocean",
        (Dots, "#ffffff", 0.12, 18),
        "linear-gradient(90deg, #4b6cb7 0%, #182848 100%)",
        "Deep Ocean Theme",
        "Calming and professional",
    ),
    Entry::plain(
        "purple-haze",
        "Purple Haze",
        (Noise, "#ffffff", 0.07, 30),
        "linear-gradient(225deg, #FF057C 0%, #8D0B93 50%, #321575 100%)",
        "Purple Haze Effect",
        "Creative and distinctive",
    ),
    Entry::plain(
        "fresh",
        "Fresh",
        (Grid, "#ffffff", 0.08, 15),
        "linear-gradient(90deg, #00C9FF 0%, #92FE9D 100%)",
        "Fresh & Modern Look",
        "Bright and optimistic design",
    ),
    Entry::plain(
        "midnight",
        "Midnight",
        (Honeycomb, "#4338CA", 0.15, 25),
        "linear-gradient(90deg, #0f0c29 0%, #302b63 50%, #24243e 100%)",
        "Midnight Theme",
        "Elegant and mysterious",
    ),
    Entry::plain(
        "sunset",
        "Sunset",
        (Dots, "#ffffff", 0.12, 20),
        "linear-gradient(90deg, #f12711 0%, #f5af19 100%)",
        "Sunset Vibes",
        "Warm and inviting",
    ),
    Entry::plain(
        "monochrome",
        "Monochrome",
        (Grid, "#ffffff", 0.07, 15),
        "#1A1A1A",
        "Monochrome Design",
        "Timeless and elegant",
    ),
    Entry::plain(
        "teal-delight",
        "Teal Delight",
        (Diagonal, "#ffffff", 0.1, 25),
        "linear-gradient(90deg, #8360c3 0%, #2ebf91 100%)",
        "Teal Delight Theme",
        "Fresh and professional",
    ),
];

/// Every built-in template, in catalog order.
pub fn templates() -> Vec<Template> {
    CATALOG.iter().map(Entry::to_template).collect()
}

/// Looks up a built-in template by id (case-insensitive).
pub fn find(id: &str) -> Option<Template> {
    let id = id.trim();
    CATALOG
        .iter()
        .find(|e| e.id.eq_ignore_ascii_case(id))
        .map(Entry::to_template)
}

/// Ids of the built-in templates, in catalog order.
pub fn template_ids() -> impl Iterator<Item = &'static str> {
    CATALOG.iter().map(|e| e.id)
}

// ============================================================================
// Placeholder photos
// ============================================================================

const PLACEHOLDER_IMAGES: &[(&str, &str)] = &[
    ("nature", "1469474968028-56623f02e42e"),
    ("tech", "1488590528505-98d2b5aba04b"),
    ("business", "1486312338219-ce68d2c6f44d"),
    ("productivity", "1498050108023-c5249f4df085"),
    ("coding", "1461749280684-dccba630e2f6"),
    ("city", "1477959858617-67f85cf4f1df"),
    ("architecture", "1486718448742-163732cd1544"),
    ("mountain", "1501854140801-50d01698950b"),
];

/// Remote stock photo URL for a placeholder key such as `"city"`.
pub fn placeholder_image(key: &str) -> Option<String> {
    PLACEHOLDER_IMAGES
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, photo)| {
            format!("https://images.unsplash.com/photo-{photo}?w=800&auto=format&fit=crop")
        })
}

// ============================================================================
// Gradient presets
// ============================================================================

pub const PRESET_GRADIENTS: [&str; 36] = [
    "linear-gradient(135deg, #667eea 0%, #764ba2 100%)",
    "linear-gradient(90deg, #FC466B 0%, #3F5EFB 100%)",
    "linear-gradient(90deg, #4b6cb7 0%, #182848 100%)",
    "linear-gradient(45deg, #00dbde 0%, #fc00ff 100%)",
    "linear-gradient(90deg, #8E2DE2 0%, #4A00E0 100%)",
    "linear-gradient(90deg, #ff9966 0%, #ff5e62 100%)",
    "linear-gradient(90deg, #1A2980 0%, #26D0CE 100%)",
    "linear-gradient(90deg, #FF416C 0%, #FF4B2B 100%)",
    "linear-gradient(225deg, #FF057C 0%, #8D0B93 50%, #321575 100%)",
    "linear-gradient(90deg, #00C9FF 0%, #92FE9D 100%)",
    "linear-gradient(90deg, #3F2B96 0%, #A8C0FF 100%)",
    "linear-gradient(90deg, #f953c6 0%, #b91d73 100%)",
    "linear-gradient(90deg, #00d2ff 0%, #3a7bd5 100%)",
    "linear-gradient(90deg, #F761A1 0%, #8C1BAB 100%)",
    "linear-gradient(90deg, #43cea2 0%, #185a9d 100%)",
    "linear-gradient(90deg, #ffefba 0%, #ffffff 100%)",
    "linear-gradient(90deg, #3c1053 0%, #ad5389 100%)",
    "linear-gradient(90deg, #20002c 0%, #cbb4d4 100%)",
    "linear-gradient(90deg, #0f0c29 0%, #302b63 50%, #24243e 100%)",
    "linear-gradient(90deg, #12c2e9 0%, #c471ed 50%, #f64f59 100%)",
    "linear-gradient(90deg, #c31432 0%, #240b36 100%)",
    "linear-gradient(90deg, #f12711 0%, #f5af19 100%)",
    "linear-gradient(90deg, #659999 0%, #f4791f 100%)",
    "linear-gradient(90deg, #dd3e54 0%, #6be585 100%)",
    "linear-gradient(90deg, #8360c3 0%, #2ebf91 100%)",
    "linear-gradient(90deg, #544a7d 0%, #ffd452 100%)",
    "linear-gradient(90deg, #009fff 0%, #ec2f4b 100%)",
    "linear-gradient(90deg, #654ea3 0%, #eaafc8 100%)",
    "linear-gradient(90deg, #ff416c 0%, #ff4b2b 100%)",
    "linear-gradient(90deg, #0b8793 0%, #360033 100%)",
    "linear-gradient(90deg, #329d9c 0%, #7be495 100%)",
    "linear-gradient(90deg, #74ebd5 0%, #9face6 100%)",
    "linear-gradient(90deg, #6a11cb 0%, #2575fc 100%)",
    "linear-gradient(90deg, #2c3e50 0%, #4ca1af 100%)",
    "linear-gradient(90deg, #00467f 0%, #a5cc82 100%)",
    "linear-gradient(90deg, #1D2B64 0%, #F8CDDA 100%)",
];

/// A preset gradient picked uniformly at random.
pub fn random_gradient() -> &'static str {
    random_gradient_with(&mut rand::thread_rng())
}

/// Like [`random_gradient`], drawing from `rng`.
pub fn random_gradient_with<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    PRESET_GRADIENTS
        .choose(rng)
        .copied()
        .unwrap_or(PRESET_GRADIENTS[0])
}

/// A two-stop linear gradient descriptor. `angle` defaults to 90 degrees.
pub fn create_gradient(start: &str, end: &str, angle: Option<f64>) -> String {
    let angle = angle.unwrap_or(90.0);
    format!("linear-gradient({angle}deg, {start} 0%, {end} 100%)")
}
