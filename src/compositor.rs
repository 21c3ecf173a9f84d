//! The compositing engine: turns a [`SessionSnapshot`] into a platform-sized
//! raster image.
//!
//! Rendering happens in two phases. First every image the snapshot refers to
//! is resolved by an explicit, ordered [`LoadStage`] plan; a stage that fails
//! yields nothing and is logged. Then the drawing layers run in their fixed
//! order against a fresh [`PixelSurface`].

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use resvg::usvg::fontdb;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::RenderError;
use crate::layer::{
    self, BackdropLayer, BackgroundLayer, LayerEffect, LogoLayer, PatternLayer, RenderContext,
    TextLayer,
};
use crate::loader::{DefaultLoader, ImageLoader, LoadedImage};
use crate::platform::Platform;
use crate::raster::bind_generic_families;
use crate::settings::SessionSnapshot;
use crate::surface::{PixelSurface, SizePx};
use crate::text::{DEFAULT_FONT_FAMILY, SvgTextMeasure, TextMeasure, layout_text};

// ============================================================================
// Configuration
// ============================================================================

/// Render knobs that are not part of the editable session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompositorConfig {
    /// CSS font family list used for the title and subtitle.
    pub font_family: String,

    /// Whether to populate the font database from the system.
    pub load_system_fonts: bool,

    /// Extra font files or directories to load.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub font_paths: Vec<PathBuf>,

    pub backdrop_opacity: f32,
    pub backdrop_dim: f32,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            load_system_fonts: true,
            font_paths: Vec::new(),
            backdrop_opacity: layer::backdrop::BACKDROP_OPACITY,
            backdrop_dim: layer::backdrop::BACKDROP_DIM,
        }
    }
}

impl CompositorConfig {
    /// A configuration that never touches the system font directories.
    pub fn headless() -> Self {
        Self {
            load_system_fonts: false,
            ..Self::default()
        }
    }

    pub fn with_font_family(mut self, family: impl Into<String>) -> Self {
        self.font_family = family.into();
        self
    }

    pub fn with_font_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.font_paths.push(path.into());
        self
    }
}

// ============================================================================
// Load plan
// ============================================================================

/// One image-loading step of a render, in plan order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadStage {
    BackgroundImage,
    PatternTile,
    Logo,
}

impl LoadStage {
    /// Every stage, in the order they run.
    pub const PLAN: [LoadStage; 3] = [Self::BackgroundImage, Self::PatternTile, Self::Logo];

    /// The image reference this stage resolves, if the snapshot has one.
    pub fn reference(self, snapshot: &SessionSnapshot) -> Option<&str> {
        match self {
            Self::BackgroundImage => snapshot.content.background_image.as_deref(),
            Self::PatternTile => Some(snapshot.paint.data_uri()),
            Self::Logo => snapshot.content.logo.as_deref(),
        }
    }
}

/// The outcome of running the load plan.
#[derive(Debug, Clone, Default)]
pub struct LoadedAssets {
    pub background_image: Option<LoadedImage>,
    pub pattern_tile: Option<LoadedImage>,
    pub logo: Option<LoadedImage>,
}

impl LoadedAssets {
    fn slot(&mut self, stage: LoadStage) -> &mut Option<LoadedImage> {
        match stage {
            LoadStage::BackgroundImage => &mut self.background_image,
            LoadStage::PatternTile => &mut self.pattern_tile,
            LoadStage::Logo => &mut self.logo,
        }
    }
}

// ============================================================================
// Export artifact
// ============================================================================

/// An encoded PNG for one platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub platform: Platform,
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ExportArtifact {
    /// Writes the PNG into `dir` under [`file_name`](Self::file_name).
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<PathBuf, RenderError> {
        let path = dir.as_ref().join(&self.file_name);
        std::fs::write(&path, &self.bytes).map_err(|source| RenderError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), bytes = self.bytes.len(), "saved export");
        Ok(path)
    }
}

// ============================================================================
// Compositor
// ============================================================================

/// Renders snapshots into platform-sized images.
///
/// The compositor never mutates session state; each call owns its surface,
/// so repeated or concurrent exports are independent.
pub struct Compositor {
    config: CompositorConfig,
    fontdb: Arc<fontdb::Database>,
    loader: Box<dyn ImageLoader>,
    measure: Box<dyn TextMeasure>,
}

impl Compositor {
    pub fn new(config: CompositorConfig) -> Self {
        let mut db = fontdb::Database::new();
        if config.load_system_fonts {
            db.load_system_fonts();
        }
        for path in &config.font_paths {
            if path.is_dir() {
                db.load_fonts_dir(path);
            } else if let Err(err) = db.load_font_file(path) {
                warn!(path = %path.display(), error = %err, "could not load font file");
            }
        }
        if db.is_empty() {
            warn!("font database is empty, title and subtitle will not be drawn");
        } else {
            bind_generic_families(&mut db);
        }
        debug!(faces = db.len(), "font database ready");

        let fontdb = Arc::new(db);
        Self {
            loader: Box::new(DefaultLoader::new(Arc::clone(&fontdb))),
            measure: Box::new(SvgTextMeasure::new(Arc::clone(&fontdb))),
            config,
            fontdb,
        }
    }

    /// Replaces the image loader.
    pub fn with_loader(mut self, loader: impl ImageLoader + 'static) -> Self {
        self.loader = Box::new(loader);
        self
    }

    /// Replaces the text measurer used for wrapping.
    pub fn with_measure(mut self, measure: impl TextMeasure + 'static) -> Self {
        self.measure = Box::new(measure);
        self
    }

    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    pub fn fontdb(&self) -> &Arc<fontdb::Database> {
        &self.fontdb
    }

    /// Runs the load plan for `snapshot`.
    pub fn load_assets(&self, snapshot: &SessionSnapshot) -> LoadedAssets {
        let mut assets = LoadedAssets::default();
        for stage in LoadStage::PLAN {
            let Some(reference) = stage.reference(snapshot) else {
                continue;
            };
            match self.loader.load(reference) {
                Ok(image) => {
                    debug!(?stage, width = image.width, height = image.height, "image loaded");
                    *assets.slot(stage) = Some(image);
                }
                Err(err) => warn!(?stage, error = %err, "image failed to load, skipping"),
            }
        }
        assets
    }

    /// The drawing layers for one render, in order.
    fn layers(
        &self,
        size: SizePx,
        snapshot: &SessionSnapshot,
        assets: LoadedAssets,
    ) -> Vec<Box<dyn LayerEffect>> {
        let content = &snapshot.content;
        let mut layers: Vec<Box<dyn LayerEffect>> =
            vec![Box::new(BackgroundLayer::new(&snapshot.pattern.background))];

        if let Some(image) = assets.background_image {
            layers.push(Box::new(
                BackdropLayer::new(image)
                    .with_opacity(self.config.backdrop_opacity)
                    .with_dim(self.config.backdrop_dim),
            ));
        }
        if let Some(tile) = assets.pattern_tile {
            layers.push(Box::new(PatternLayer::new(tile)));
        }

        let layout = layout_text(
            size,
            &content.title,
            &content.subtitle,
            content.logo.is_some(),
            &self.config.font_family,
            self.measure.as_ref(),
        );
        layers.push(Box::new(TextLayer::new(layout, Arc::clone(&self.fontdb))));

        if let Some(logo) = assets.logo {
            layers.push(Box::new(LogoLayer::new(logo)));
        }
        layers
    }

    /// Renders `snapshot` onto a surface of `size`, keeping the properties
    /// the layers emitted.
    #[tracing::instrument(skip(self, snapshot))]
    pub fn render_context(
        &self,
        size: SizePx,
        snapshot: &SessionSnapshot,
    ) -> Result<RenderContext, RenderError> {
        let surface = PixelSurface::new(size)?;
        let assets = self.load_assets(snapshot);

        let mut ctx = RenderContext::new(surface);
        for layer in self.layers(size, snapshot, assets) {
            layer::apply(layer.as_ref(), &mut ctx);
        }
        Ok(ctx)
    }

    /// Renders `snapshot` at the size of `platform`.
    #[tracing::instrument(skip(self, snapshot))]
    pub fn render(
        &self,
        platform: Platform,
        snapshot: &SessionSnapshot,
    ) -> Result<PixelSurface, RenderError> {
        let size = platform.profile().size();
        Ok(self.render_context(size, snapshot)?.into_surface())
    }

    /// Renders and encodes `snapshot` for `platform`.
    #[tracing::instrument(skip(self, snapshot))]
    pub fn export(
        &self,
        platform: Platform,
        snapshot: &SessionSnapshot,
    ) -> Result<ExportArtifact, RenderError> {
        let surface = self.render(platform, snapshot)?;
        let bytes = surface.encode_png()?;
        info!(bytes = bytes.len(), "export encoded");
        Ok(ExportArtifact {
            platform,
            file_name: platform.file_name(),
            bytes,
        })
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new(CompositorConfig::default())
    }
}

impl fmt::Debug for Compositor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Compositor")
            .field("config", &self.config)
            .field("faces", &self.fontdb.len())
            .finish_non_exhaustive()
    }
}
