//! SVG rasterization and pixel format conversion using resvg/usvg.
//!
//! tiny-skia stores premultiplied alpha; the `image` crate works with
//! straight alpha. Everything crossing between the two goes through
//! [`rgba_image_to_pixmap`] and [`pixmap_to_rgba_image`].

use std::sync::Arc;

use image::RgbaImage;
use resvg::tiny_skia::{IntSize, Pixmap, Transform};
use resvg::usvg::fontdb::{self, Family};
use resvg::usvg::{self, FontResolver, Options, Tree};
use tracing::debug;

use crate::error::LoadError;

// ============================================================================
// SVG Rendering
// ============================================================================

/// Parser options that resolve fonts against `fontdb`.
pub fn svg_options(fontdb: &Arc<fontdb::Database>) -> Options<'static> {
    Options {
        fontdb: Arc::clone(fontdb),
        font_resolver: font_resolver(),
        ..Options::default()
    }
}

/// Font selection that tries the requested stack, then the generic families,
/// then any loaded face. Text is dropped only when the database is empty.
fn font_resolver() -> FontResolver<'static> {
    FontResolver {
        select_font: Box::new(|font, db| {
            let mut families: Vec<Family<'_>> = font
                .families()
                .iter()
                .map(|family| match family {
                    usvg::FontFamily::Serif => Family::Serif,
                    usvg::FontFamily::SansSerif => Family::SansSerif,
                    usvg::FontFamily::Cursive => Family::Cursive,
                    usvg::FontFamily::Fantasy => Family::Fantasy,
                    usvg::FontFamily::Monospace => Family::Monospace,
                    usvg::FontFamily::Named(name) => Family::Name(name),
                })
                .collect();
            families.extend([Family::SansSerif, Family::Serif, Family::Monospace]);

            let stretch = match font.stretch() {
                usvg::FontStretch::UltraCondensed => fontdb::Stretch::UltraCondensed,
                usvg::FontStretch::ExtraCondensed => fontdb::Stretch::ExtraCondensed,
                usvg::FontStretch::Condensed => fontdb::Stretch::Condensed,
                usvg::FontStretch::SemiCondensed => fontdb::Stretch::SemiCondensed,
                usvg::FontStretch::Normal => fontdb::Stretch::Normal,
                usvg::FontStretch::SemiExpanded => fontdb::Stretch::SemiExpanded,
                usvg::FontStretch::Expanded => fontdb::Stretch::Expanded,
                usvg::FontStretch::ExtraExpanded => fontdb::Stretch::ExtraExpanded,
                usvg::FontStretch::UltraExpanded => fontdb::Stretch::UltraExpanded,
            };
            let style = match font.style() {
                usvg::FontStyle::Normal => fontdb::Style::Normal,
                usvg::FontStyle::Italic => fontdb::Style::Italic,
                usvg::FontStyle::Oblique => fontdb::Style::Oblique,
            };

            let query = fontdb::Query {
                families: &families,
                weight: fontdb::Weight(font.weight()),
                stretch,
                style,
            };
            db.query(&query)
                .or_else(|| db.faces().next().map(|face| face.id))
        }),
        select_fallback: FontResolver::default_fallback_selector(),
    }
}

/// Rebinds generic families whose default face is not loaded.
///
/// fontdb maps `sans-serif` to Arial and `serif` to Times New Roman out of
/// the box. On hosts without those faces both generics point at a face
/// loaded here instead, preferring a proportional sans face.
pub fn bind_generic_families(db: &mut fontdb::Database) {
    let Some(replacement) = preferred_family(db) else {
        return;
    };

    if !has_family(db, db.family_name(&Family::SansSerif)) {
        debug!(family = %replacement, "binding sans-serif");
        db.set_sans_serif_family(replacement.clone());
    }
    if !has_family(db, db.family_name(&Family::Serif)) {
        debug!(family = %replacement, "binding serif");
        db.set_serif_family(replacement);
    }
}

fn has_family(db: &fontdb::Database, name: &str) -> bool {
    db.faces()
        .any(|face| face.families.iter().any(|(n, _)| n.eq_ignore_ascii_case(name)))
}

fn preferred_family(db: &fontdb::Database) -> Option<String> {
    let mut names = db
        .faces()
        .filter_map(|face| face.families.first().map(|(name, _)| name.as_str()));
    let first = names.next()?;
    let sans = std::iter::once(first)
        .chain(names)
        .find(|name| name.contains("Sans") && !name.contains("Mono"));
    Some(sans.unwrap_or(first).to_string())
}

/// Parses SVG bytes into a render tree.
pub fn parse_svg(data: &[u8], options: &Options) -> Result<Tree, LoadError> {
    Tree::from_data(data, options).map_err(|e| LoadError::Svg(e.to_string()))
}

/// The pixel size an SVG occupies at 1:1 scale, rounded up.
pub fn intrinsic_size(tree: &Tree) -> (u32, u32) {
    let size = tree.size();
    (
        (size.width().ceil() as u32).max(1),
        (size.height().ceil() as u32).max(1),
    )
}

/// Renders a tree stretched to exactly `width x height` pixels.
///
/// The two axes scale independently, so a 60 x 34.6 tile rendered into
/// 60 x 35 pixels fills the whole pixmap without a transparent seam.
pub fn render_tree(tree: &Tree, width: u32, height: u32) -> Result<Pixmap, LoadError> {
    let mut pixmap = Pixmap::new(width, height)
        .ok_or_else(|| LoadError::Svg(format!("cannot allocate a {width}x{height} pixmap")))?;

    let size = tree.size();
    let transform = Transform::from_scale(
        width as f32 / size.width(),
        height as f32 / size.height(),
    );
    resvg::render(tree, transform, &mut pixmap.as_mut());
    Ok(pixmap)
}

/// Parses and renders SVG markup at its intrinsic size.
pub fn render_svg(data: &[u8], options: &Options) -> Result<Pixmap, LoadError> {
    let tree = parse_svg(data, options)?;
    let (width, height) = intrinsic_size(&tree);
    render_tree(&tree, width, height)
}

// ============================================================================
// Pixel Conversion
// ============================================================================

/// Converts a tiny-skia pixmap to a straight-alpha image.
pub fn pixmap_to_rgba_image(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (out, px) in img.pixels_mut().zip(pixmap.pixels()) {
        let (r, g, b, a) = unpremultiply(px.red(), px.green(), px.blue(), px.alpha());
        out.0 = [r, g, b, a];
    }
    img
}

/// Converts a straight-alpha image into a premultiplied pixmap.
///
/// Returns `None` for an empty image.
pub fn rgba_image_to_pixmap(img: RgbaImage) -> Option<Pixmap> {
    let size = IntSize::from_wh(img.width(), img.height())?;
    let mut data = img.into_raw();
    premultiply_in_place(&mut data);
    Pixmap::from_vec(data, size)
}

/// Unpremultiplies a premultiplied alpha pixel.
pub(crate) fn unpremultiply(r: u8, g: u8, b: u8, a: u8) -> (u8, u8, u8, u8) {
    if a == 0 {
        (0, 0, 0, 0)
    } else {
        let a_f = a as f32 / 255.0;
        (
            (r as f32 / a_f).round().min(255.0) as u8,
            (g as f32 / a_f).round().min(255.0) as u8,
            (b as f32 / a_f).round().min(255.0) as u8,
            a,
        )
    }
}

fn premultiply_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        for c in &mut px[..3] {
            *c = ((*c as u16 * a + 127) / 255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="50"><rect width="100" height="50" fill="#ff0000"/></svg>"##;

    #[test]
    fn renders_at_intrinsic_size() {
        let pixmap = render_svg(SIMPLE_SVG.as_bytes(), &Options::default()).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (100, 50));

        let img = pixmap_to_rgba_image(&pixmap);
        assert_eq!(img.get_pixel(50, 25).0, [255, 0, 0, 255]);
    }

    #[test]
    fn stretches_to_requested_size() {
        let tree = parse_svg(SIMPLE_SVG.as_bytes(), &Options::default()).unwrap();
        let pixmap = render_tree(&tree, 20, 30).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (20, 30));

        let img = pixmap_to_rgba_image(&pixmap);
        assert_eq!(img.get_pixel(19, 29).0, [255, 0, 0, 255]);
    }

    #[test]
    fn fractional_sizes_round_up() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="60" height="34.64"><rect width="60" height="34.64"/></svg>"#;
        let tree = parse_svg(svg.as_bytes(), &Options::default()).unwrap();
        assert_eq!(intrinsic_size(&tree), (60, 35));
    }

    #[test]
    fn malformed_svg_is_a_load_error() {
        let err = render_svg(b"<svg", &Options::default()).unwrap_err();
        assert!(matches!(err, LoadError::Svg(_)));
    }

    #[test]
    fn premultiply_roundtrip_keeps_opaque_pixels() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, image::Rgba([10, 200, 30, 255]));
        img.put_pixel(1, 0, image::Rgba([255, 255, 255, 0]));

        let pixmap = rgba_image_to_pixmap(img).unwrap();
        let back = pixmap_to_rgba_image(&pixmap);
        assert_eq!(back.get_pixel(0, 0).0, [10, 200, 30, 255]);
        assert_eq!(back.get_pixel(1, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn half_alpha_is_premultiplied() {
        let img = RgbaImage::from_pixel(1, 1, image::Rgba([200, 100, 0, 128]));
        let pixmap = rgba_image_to_pixmap(img).unwrap();
        let px = pixmap.pixels()[0];
        assert_eq!((px.red(), px.green(), px.alpha()), (100, 50, 128));
    }

    #[test]
    fn empty_image_has_no_pixmap() {
        assert!(rgba_image_to_pixmap(RgbaImage::new(0, 3)).is_none());
    }

    fn system_fonts() -> Option<fontdb::Database> {
        let mut db = fontdb::Database::new();
        db.load_system_fonts();
        (!db.is_empty()).then_some(db)
    }

    fn lit_pixels(pixmap: &Pixmap) -> usize {
        pixmap.pixels().iter().filter(|p| p.alpha() > 128).count()
    }

    #[test]
    fn generic_families_resolve_to_loaded_faces() {
        let Some(mut db) = system_fonts() else {
            eprintln!("no system fonts, skipping");
            return;
        };
        bind_generic_families(&mut db);

        for generic in [Family::SansSerif, Family::Serif] {
            let query = fontdb::Query {
                families: &[generic],
                ..fontdb::Query::default()
            };
            assert!(db.query(&query).is_some());
        }
    }

    #[test]
    fn empty_database_keeps_defaults() {
        let mut db = fontdb::Database::new();
        bind_generic_families(&mut db);
        assert_eq!(db.family_name(&Family::SansSerif), "Arial");
    }

    #[test]
    fn unknown_family_still_draws_glyphs() {
        let Some(db) = system_fonts() else {
            eprintln!("no system fonts, skipping");
            return;
        };
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg" width="200" height="60"><text x="10" y="45" font-family="No Such Family" font-size="40" fill="#000">Hello</text></svg>"##;
        let pixmap = render_svg(svg.as_bytes(), &svg_options(&Arc::new(db))).unwrap();
        assert!(lit_pixels(&pixmap) > 50);
    }
}
