//! og-renderer: procedural pattern backgrounds and social preview images
//!
//! This crate turns a small editable session (a pattern, a background, a
//! title, a subtitle, and optional images) into Open Graph images sized for
//! each sharing platform, plus the CSS needed to preview the same design
//! live.
//!
//! # Example
//!
//! ```no_run
//! use og_renderer::{Compositor, CompositorConfig, Editor, Platform};
//!
//! let mut editor = Editor::new();
//! editor.apply_template_id("ocean").unwrap();
//! editor.set_title("Release 2.0");
//!
//! let compositor = Compositor::new(CompositorConfig::default());
//! let artifact = compositor.export(Platform::Twitter, &editor.snapshot()).unwrap();
//! artifact.save(".").unwrap();
//! ```
//!
//! # Serializable Profiles
//!
//! Sessions travel as JSON through [`SessionProfile`] and the
//! [`Configurable`] trait:
//!
//! ```
//! use og_renderer::{Configurable, Editor, SessionProfile};
//!
//! let mut editor = Editor::new();
//! editor.set_title("Hello");
//!
//! let json = editor.export_profile().to_json().unwrap();
//!
//! let mut restored = Editor::new();
//! restored.apply_profile(&SessionProfile::from_json(&json).unwrap()).unwrap();
//! assert_eq!(restored.content().title, "Hello");
//! ```

mod background;
mod color;
mod compositor;
mod editor;
mod error;
mod layer;
mod loader;
mod pattern;
mod platform;
mod preview;
mod profile;
mod raster;
mod settings;
mod surface;
mod text;

pub mod template;
pub mod theme;
pub mod url_stub;

pub use background::{Background, ColorStop, Direction, LinearGradient};
pub use color::{NormalizedColor, Rgba8, normalize, parse_css_color};
pub use compositor::{Compositor, CompositorConfig, ExportArtifact, LoadStage, LoadedAssets};
pub use editor::{Configurable, Editor, MAX_LOGO_BYTES, TemplateMerge};
pub use error::{EditorError, LoadError, RenderError};
pub use layer::{
    BackdropLayer, BackgroundLayer, Layer, LayerConfig, LayerEffect, LogoLayer, LogoPlacement,
    PatternConfig, PatternLayer, RenderContext, TextLayer, cover_rect, fit_logo,
};
pub use loader::{
    DataUrl, DefaultLoader, ImageLoader, ImageRef, LoadedImage, decode_data_url, encode_data_url,
};
pub use pattern::{
    PaintReference, PatternType, Point, Primitive, VectorTile, encode, synthesize,
    synthesize_seeded, tile_to_svg,
};
pub use platform::{Platform, PlatformProfile, UnknownPlatform};
pub use preview::PreviewStyle;
pub use profile::SessionProfile;
pub use raster::{pixmap_to_rgba_image, render_svg, rgba_image_to_pixmap};
pub use settings::{Content, PatternSettings, SessionSnapshot};
pub use surface::{PixelSurface, RectF, SizePx};
pub use template::Template;
pub use text::{
    DEFAULT_FONT_FAMILY, FixedAdvance, FontSpec, SvgTextMeasure, TextBlock, TextLayout,
    TextMeasure, layout_text, wrap,
};
