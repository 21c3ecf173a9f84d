//! Resolution of image references into bitmaps.
//!
//! Content fields hold image references as strings: `data:` URIs (uploads
//! and encoded patterns), local file paths, or remote `http(s)` URLs. Remote
//! references are never fetched and always fail with [`LoadError::Remote`].

use std::path::Path;
use std::sync::Arc;

use base64::Engine;
use resvg::tiny_skia::Pixmap;
use resvg::usvg;

use crate::error::LoadError;
use crate::raster::{intrinsic_size, parse_svg, render_tree, rgba_image_to_pixmap, svg_options};

const DATA_URL_PREFIX: &str = "data:";
const SVG_MIME: &str = "image/svg+xml";

// ============================================================================
// LoadedImage
// ============================================================================

/// A decoded image and the size it reports before any scaling.
///
/// For raster images the intrinsic size equals the pixel size. For SVG it is
/// the document size, which may be fractional (the pixmap is rounded up).
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub pixmap: Pixmap,
    pub width: f32,
    pub height: f32,
}

impl LoadedImage {
    fn from_pixmap(pixmap: Pixmap) -> Self {
        Self {
            width: pixmap.width() as f32,
            height: pixmap.height() as f32,
            pixmap,
        }
    }
}

// ============================================================================
// ImageLoader
// ============================================================================

/// Turns an image reference into a bitmap.
pub trait ImageLoader: Send + Sync {
    fn load(&self, reference: &str) -> Result<LoadedImage, LoadError>;
}

/// The kind of an image reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageRef<'a> {
    Data(&'a str),
    Remote(&'a str),
    File(&'a Path),
}

impl<'a> ImageRef<'a> {
    pub fn classify(reference: &'a str) -> Self {
        let trimmed = reference.trim();
        let scheme = trimmed
            .split_once(':')
            .map(|(s, _)| s.to_ascii_lowercase());
        match scheme.as_deref() {
            Some("data") => Self::Data(trimmed),
            Some("http") | Some("https") => Self::Remote(trimmed),
            _ => Self::File(Path::new(trimmed)),
        }
    }
}

/// Loader for data URIs and local files. SVG sources are rasterized at their
/// intrinsic size with text resolved against the shared font database.
#[derive(Debug, Clone)]
pub struct DefaultLoader {
    fontdb: Arc<usvg::fontdb::Database>,
}

impl DefaultLoader {
    pub fn new(fontdb: Arc<usvg::fontdb::Database>) -> Self {
        Self { fontdb }
    }

    /// Decodes raw bytes. `mime` is a hint; content sniffing wins for SVG.
    pub fn decode(&self, bytes: &[u8], mime: Option<&str>) -> Result<LoadedImage, LoadError> {
        if mime.is_some_and(|m| m.eq_ignore_ascii_case(SVG_MIME)) || looks_like_svg(bytes) {
            let tree = parse_svg(bytes, &svg_options(&self.fontdb))?;
            let size = tree.size();
            let (w, h) = intrinsic_size(&tree);
            return Ok(LoadedImage {
                pixmap: render_tree(&tree, w, h)?,
                width: size.width(),
                height: size.height(),
            });
        }

        let img = image::load_from_memory(bytes)?.to_rgba8();
        let pixmap = rgba_image_to_pixmap(img)
            .ok_or_else(|| LoadError::DataUri("decoded image is empty".to_string()))?;
        Ok(LoadedImage::from_pixmap(pixmap))
    }
}

impl ImageLoader for DefaultLoader {
    fn load(&self, reference: &str) -> Result<LoadedImage, LoadError> {
        match ImageRef::classify(reference) {
            ImageRef::Remote(url) => Err(LoadError::Remote(url.to_string())),
            ImageRef::Data(uri) => {
                let data = decode_data_url(uri)?;
                self.decode(&data.bytes, Some(&data.mime))
            }
            ImageRef::File(path) => {
                let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
                    path: path.to_path_buf(),
                    source,
                })?;
                let mime = path
                    .extension()
                    .and_then(|e| e.to_str())
                    .filter(|e| e.eq_ignore_ascii_case("svg"))
                    .map(|_| SVG_MIME);
                self.decode(&bytes, mime)
            }
        }
    }
}

fn looks_like_svg(bytes: &[u8]) -> bool {
    let start = bytes
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(bytes.len());
    let head = &bytes[start..bytes.len().min(start + 256)];
    head.starts_with(b"<svg") || (head.starts_with(b"<?xml") && contains(head, b"<svg"))
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack.windows(needle.len()).any(|w| w == needle)
}

// ============================================================================
// Data URLs
// ============================================================================

/// The payload of a `data:` URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUrl {
    /// Media type without parameters, lowercased. Empty means unspecified.
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Decodes a `data:` URL, base64 or percent-encoded.
pub fn decode_data_url(url: &str) -> Result<DataUrl, LoadError> {
    let rest = url
        .strip_prefix(DATA_URL_PREFIX)
        .ok_or_else(|| LoadError::DataUri("URL does not start with 'data:'".to_string()))?;
    let (metadata, data) = rest
        .split_once(',')
        .ok_or_else(|| LoadError::DataUri("missing comma in data URL".to_string()))?;

    let mut params = metadata.split(';');
    let mime = params.next().unwrap_or("").trim().to_ascii_lowercase();
    let is_base64 = params.any(|p| p.trim().eq_ignore_ascii_case("base64"));

    let bytes = if is_base64 {
        decode_base64(data)?
    } else {
        percent_decode(data)?
    };

    Ok(DataUrl { mime, bytes })
}

/// Encodes bytes as a base64 `data:` URL.
pub fn encode_data_url(mime: &str, bytes: &[u8]) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("{DATA_URL_PREFIX}{mime};base64,{encoded}")
}

fn decode_base64(data: &str) -> Result<Vec<u8>, LoadError> {
    let cleaned: Vec<u8> = data
        .bytes()
        .filter(|b| !b.is_ascii_whitespace())
        .collect();
    base64::engine::general_purpose::STANDARD
        .decode(cleaned)
        .map_err(|e| LoadError::DataUri(format!("invalid base64: {e}")))
}

/// Percent-decodes without treating `+` as a space.
fn percent_decode(input: &str) -> Result<Vec<u8>, LoadError> {
    let bytes = input.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] != b'%' {
            out.push(bytes[i]);
            i += 1;
            continue;
        }
        let hex = bytes
            .get(i + 1..i + 3)
            .ok_or_else(|| LoadError::DataUri("incomplete percent-escape".to_string()))?;
        let hi = (hex[0] as char).to_digit(16);
        let lo = (hex[1] as char).to_digit(16);
        match (hi, lo) {
            (Some(hi), Some(lo)) => out.push(((hi << 4) | lo) as u8),
            _ => return Err(LoadError::DataUri("invalid percent-escape".to_string())),
        }
        i += 3;
    }

    Ok(out)
}
