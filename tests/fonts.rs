use std::path::PathBuf;

use og_renderer::{Compositor, CompositorConfig, Editor, PixelSurface, Platform};
use resvg::usvg::fontdb::Source;

/// Title lines sit around `0.4 * 630 = 252` on a twitter image.
const TITLE_BAND: std::ops::Range<u32> = 200..300;

fn system_compositor() -> Option<Compositor> {
    let compositor = Compositor::new(CompositorConfig::default());
    if compositor.fontdb().is_empty() {
        eprintln!("no system fonts, skipping");
        return None;
    }
    Some(compositor)
}

fn render_title(compositor: &Compositor, title: &str) -> PixelSurface {
    let mut editor = Editor::new();
    editor.set_background("#000000");
    editor.set_opacity(0.01).unwrap();
    editor.set_title(title);
    editor.set_subtitle("");
    compositor
        .render(Platform::Twitter, &editor.snapshot())
        .unwrap()
}

fn lit_in_title_band(surface: &PixelSurface) -> usize {
    let width = surface.size().width;
    TITLE_BAND
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .filter(|&(x, y)| surface.pixel(x, y).is_some_and(|p| p.r > 128))
        .count()
}

#[test]
fn default_config_draws_title_glyphs() {
    let Some(compositor) = system_compositor() else {
        return;
    };

    let with = lit_in_title_band(&render_title(&compositor, "Hello World"));
    let without = lit_in_title_band(&render_title(&compositor, ""));
    assert!(with > without + 500, "with {with}, without {without}");
}

#[test]
fn unknown_family_falls_back_to_a_loaded_face() {
    if system_compositor().is_none() {
        return;
    }

    let compositor =
        Compositor::new(CompositorConfig::default().with_font_family("No Such Family"));
    let lit = lit_in_title_band(&render_title(&compositor, "Hello World"));
    assert!(lit > 500, "lit {lit}");
}

#[test]
fn font_file_from_config_draws_title_glyphs() {
    let Some(system) = system_compositor() else {
        return;
    };
    let font_file: Option<PathBuf> = system
        .fontdb()
        .faces()
        .filter(|face| {
            face.families
                .iter()
                .any(|(name, _)| name.contains("Sans") && !name.contains("Mono"))
        })
        .find_map(|face| match &face.source {
            Source::File(path) => Some(path.clone()),
            Source::SharedFile(path, _) => Some(path.clone()),
            _ => None,
        });
    let Some(font_file) = font_file else {
        eprintln!("no file-backed system font, skipping");
        return;
    };

    let compositor = Compositor::new(CompositorConfig::headless().with_font_path(font_file));
    assert!(!compositor.fontdb().is_empty());

    let lit = lit_in_title_band(&render_title(&compositor, "Hello World"));
    assert!(lit > 500, "lit {lit}");
}
