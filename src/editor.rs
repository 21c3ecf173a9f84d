use serde::{Deserialize, Serialize};

use crate::error::EditorError;
use crate::layer::{Layer, PatternConfig};
use crate::loader::encode_data_url;
use crate::pattern::{PaintReference, PatternType};
use crate::preview::PreviewStyle;
use crate::profile::SessionProfile;
use crate::settings::{
    Content, PatternSettings, SessionSnapshot, validate_opacity, validate_scale,
};
use crate::template::{self, Template};
use crate::url_stub;

/// Largest accepted logo upload, in bytes.
pub const MAX_LOGO_BYTES: usize = 2 * 1024 * 1024;

// ============================================================================
// Configurable Trait
// ============================================================================

/// Trait for types that can be configured from a [`SessionProfile`].
pub trait Configurable {
    /// Applies a profile's settings to this instance.
    ///
    /// Invalid profiles are rejected as a whole.
    fn apply_profile(&mut self, profile: &SessionProfile) -> Result<(), EditorError>;

    /// Exports the current settings as a profile.
    fn export_profile(&self) -> SessionProfile;
}

/// How [`Editor::apply_template`] treats the current background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum TemplateMerge {
    /// The template replaces every field.
    #[default]
    ReplaceAll,
    /// A background the user picked since the last template or reset
    /// survives; everything else is replaced.
    PreserveBackground,
}

// ============================================================================
// Editor
// ============================================================================

/// Mutable session state behind the form controls.
///
/// Every setter touches exactly one field. The encoded pattern is cached and
/// only re-encoded when a field that shapes the tile changes, so repeated
/// snapshots of an unchanged noise pattern show the same dots.
///
/// # Example
///
/// ```
/// use og_renderer::{Editor, PatternType};
///
/// let mut editor = Editor::new();
/// editor.set_pattern_type(PatternType::Dots);
/// editor.set_scale(32).unwrap();
/// editor.set_title("Ship it");
///
/// let snapshot = editor.snapshot();
/// assert_eq!(snapshot.pattern.scale, 32);
/// ```
#[derive(Debug, Clone)]
pub struct Editor {
    pattern: PatternSettings,
    content: Content,
    merge: TemplateMerge,
    background_customized: bool,
    paint: Layer<PatternConfig, PaintReference>,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new()
    }
}

impl Editor {
    /// Creates an editor holding the default session.
    pub fn new() -> Self {
        let pattern = PatternSettings::default();
        Self {
            paint: Layer::new(PatternConfig::new(&pattern)),
            pattern,
            content: Content::default(),
            merge: TemplateMerge::default(),
            background_customized: false,
        }
    }

    pub fn with_merge(mut self, merge: TemplateMerge) -> Self {
        self.merge = merge;
        self
    }

    pub fn pattern(&self) -> &PatternSettings {
        &self.pattern
    }

    pub fn content(&self) -> &Content {
        &self.content
    }

    pub fn merge(&self) -> TemplateMerge {
        self.merge
    }

    pub fn set_merge(&mut self, merge: TemplateMerge) {
        self.merge = merge;
    }

    /// Version of the cached pattern encoding. Increments whenever the tile
    /// has to be re-encoded.
    pub fn paint_version(&self) -> u64 {
        self.paint.version()
    }

    fn sync_paint(&mut self) {
        self.paint.set_config(PatternConfig::new(&self.pattern));
    }

    // ------------------------------------------------------------------------
    // Pattern fields
    // ------------------------------------------------------------------------

    pub fn set_pattern_type(&mut self, pattern_type: PatternType) {
        self.pattern.pattern_type = pattern_type;
        self.sync_paint();
    }

    pub fn set_pattern_color(&mut self, color: impl Into<String>) {
        self.pattern.color = color.into();
        self.sync_paint();
    }

    /// Sets the pattern opacity. Accepts `(0, 1]`.
    pub fn set_opacity(&mut self, opacity: f64) -> Result<(), EditorError> {
        validate_opacity(opacity)?;
        self.pattern.opacity = opacity;
        self.sync_paint();
        Ok(())
    }

    /// Sets the tile unit in pixels. Must be positive.
    pub fn set_scale(&mut self, scale: i64) -> Result<(), EditorError> {
        self.pattern.scale = validate_scale(scale)?;
        self.sync_paint();
        Ok(())
    }

    /// Sets the background descriptor. The pattern is left untouched.
    pub fn set_background(&mut self, background: impl Into<String>) {
        self.pattern.background = background.into();
        self.background_customized = true;
    }

    /// Picks a random preset gradient as the background.
    pub fn randomize_background(&mut self) -> &str {
        self.set_background(template::random_gradient());
        &self.pattern.background
    }

    // ------------------------------------------------------------------------
    // Content fields
    // ------------------------------------------------------------------------

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.content.title = title.into();
    }

    pub fn set_subtitle(&mut self, subtitle: impl Into<String>) {
        self.content.subtitle = subtitle.into();
    }

    /// Sets the logo to an existing image reference.
    pub fn set_logo(&mut self, logo: Option<String>) {
        self.content.logo = logo;
    }

    pub fn set_background_image(&mut self, image: Option<String>) {
        self.content.background_image = image;
    }

    /// Stores uploaded logo bytes as a base64 data URI.
    ///
    /// Uploads over [`MAX_LOGO_BYTES`] are rejected and the current logo is
    /// kept.
    pub fn upload_logo(&mut self, bytes: &[u8], mime: &str) -> Result<(), EditorError> {
        if bytes.len() > MAX_LOGO_BYTES {
            tracing::warn!(size = bytes.len(), limit = MAX_LOGO_BYTES, "logo upload rejected");
            return Err(EditorError::LogoTooLarge {
                size: bytes.len(),
                limit: MAX_LOGO_BYTES,
            });
        }
        self.content.logo = Some(encode_data_url(mime, bytes));
        Ok(())
    }

    pub fn remove_logo(&mut self) {
        self.content.logo = None;
    }

    // ------------------------------------------------------------------------
    // Bulk updates
    // ------------------------------------------------------------------------

    /// Replaces pattern and content with `template` in one update.
    pub fn apply_template(&mut self, template: &Template) {
        let keep_background =
            self.merge == TemplateMerge::PreserveBackground && self.background_customized;

        let background = if keep_background {
            std::mem::take(&mut self.pattern.background)
        } else {
            self.background_customized = false;
            template.pattern.background.clone()
        };

        self.pattern = PatternSettings {
            background,
            ..template.pattern.clone()
        };
        self.content = template.content.clone();
        self.sync_paint();
        tracing::debug!(template = %template.id, keep_background, "template applied");
    }

    /// Applies a built-in template by id.
    pub fn apply_template_id(&mut self, id: &str) -> Result<(), EditorError> {
        let template =
            template::find(id).ok_or_else(|| EditorError::UnknownTemplate(id.to_string()))?;
        self.apply_template(&template);
        Ok(())
    }

    /// Restores the default pattern, title, and subtitle, and clears the logo.
    ///
    /// The background image is left as is.
    pub fn reset(&mut self) {
        self.pattern = PatternSettings::default();
        self.content = Content {
            background_image: self.content.background_image.take(),
            ..Content::default()
        };
        self.background_customized = false;
        self.sync_paint();
    }

    /// Fills title and subtitle from a website address.
    ///
    /// Invalid URLs leave the session unchanged.
    pub fn apply_url_stub(&mut self, url: &str) -> Result<(), EditorError> {
        let stub = url_stub::derive(url)?;
        self.content.title = stub.title;
        self.content.subtitle = stub.subtitle;
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Outputs
    // ------------------------------------------------------------------------

    /// The encoded pattern, re-encoded only when the tile changed.
    pub fn paint_reference(&mut self) -> &PaintReference {
        self.paint.get_or_render(PatternConfig::paint_reference)
    }

    /// An immutable copy of the session for one render or export.
    pub fn snapshot(&mut self) -> SessionSnapshot {
        let paint = self.paint_reference().clone();
        SessionSnapshot {
            pattern: self.pattern.clone(),
            content: self.content.clone(),
            paint,
        }
    }

    pub fn preview_style(&mut self) -> PreviewStyle {
        PreviewStyle::from_snapshot(&self.snapshot())
    }
}

impl Configurable for Editor {
    fn apply_profile(&mut self, profile: &SessionProfile) -> Result<(), EditorError> {
        profile.pattern.validate()?;
        if profile.pattern.background != self.pattern.background {
            self.background_customized = true;
        }
        self.pattern = profile.pattern.clone();
        self.content = profile.content.clone();
        self.sync_paint();
        Ok(())
    }

    fn export_profile(&self) -> SessionProfile {
        SessionProfile {
            pattern: self.pattern.clone(),
            content: self.content.clone(),
        }
    }
}
