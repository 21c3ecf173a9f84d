//! Error types for the editor session, image loading, and export.
//!
//! Each stage of the pipeline owns its own error enum. Load failures are
//! recoverable (the compositor skips the affected layer), render failures
//! abort the export, and editor errors reject an input without touching
//! session state.

use std::path::PathBuf;

/// Rejected user input. The session is left unchanged.
#[derive(Debug, thiserror::Error)]
pub enum EditorError {
    #[error("Image too large. Maximum size is 2MB (got {size} bytes, limit {limit})")]
    LogoTooLarge { size: usize, limit: usize },

    #[error("invalid url: {0}")]
    InvalidUrl(String),

    #[error("pattern scale must be positive (got {0})")]
    InvalidScale(i64),

    #[error("pattern opacity must be in (0, 1] (got {0})")]
    InvalidOpacity(f64),

    #[error("unknown template: {0}")]
    UnknownTemplate(String),
}

/// An image reference could not be turned into a bitmap.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("remote image references are not fetched: {0}")]
    Remote(String),

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid data uri: {0}")]
    DataUri(String),

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("failed to rasterize svg: {0}")]
    Svg(String),
}

/// The export could not produce an artifact.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("unable to allocate a {width}x{height} drawing surface")]
    SurfaceUnavailable { width: u32, height: u32 },

    #[error("failed to encode png: {0}")]
    Encode(String),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
