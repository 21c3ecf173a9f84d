use og_renderer::{
    Compositor, CompositorConfig, Editor, FixedAdvance, Platform, RenderError, SessionProfile,
};

fn compositor() -> Compositor {
    Compositor::new(CompositorConfig::headless()).with_measure(FixedAdvance::default())
}

fn dimensions(bytes: &[u8]) -> (u32, u32) {
    let img = image::load_from_memory(bytes).expect("exported bytes should be a PNG");
    (img.width(), img.height())
}

#[test]
fn twitter_export_is_1200_by_630() {
    let mut editor = Editor::new();
    let artifact = compositor()
        .export(Platform::Twitter, &editor.snapshot())
        .unwrap();

    assert_eq!(artifact.file_name, "og-image-twitter.png");
    assert_eq!(dimensions(&artifact.bytes), (1200, 630));
}

#[test]
fn discord_export_is_1200_by_675() {
    let mut editor = Editor::new();
    let artifact = compositor()
        .export(Platform::Discord, &editor.snapshot())
        .unwrap();
    assert_eq!(dimensions(&artifact.bytes), (1200, 675));
}

#[test]
fn every_platform_exports_at_its_preset_size() {
    let mut editor = Editor::new();
    editor.apply_template_id("purple-haze").unwrap();
    let snapshot = editor.snapshot();
    let c = compositor();

    for platform in Platform::ALL {
        let artifact = c.export(platform, &snapshot).unwrap();
        let profile = platform.profile();
        assert_eq!(dimensions(&artifact.bytes), (profile.width, profile.height));
    }
}

#[test]
fn photo_templates_still_export_without_network() {
    // The corporate template points at remote images; those layers are
    // skipped and the export still succeeds.
    let mut editor = Editor::new();
    editor.apply_template_id("corporate").unwrap();
    let artifact = compositor()
        .export(Platform::Linkedin, &editor.snapshot())
        .unwrap();
    assert_eq!(dimensions(&artifact.bytes), (1200, 627));
}

#[test]
fn repeated_exports_are_identical() {
    let mut editor = Editor::new();
    editor.apply_template_id("midnight").unwrap();
    let snapshot = editor.snapshot();
    let c = compositor();

    let a = c.export(Platform::Facebook, &snapshot).unwrap();
    let b = c.export(Platform::Facebook, &snapshot).unwrap();
    assert_eq!(a.bytes, b.bytes);
}

#[test]
fn saves_into_directory() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = compositor()
        .export(Platform::Discord, &SessionProfile::new().snapshot())
        .unwrap();

    let path = artifact.save(dir.path()).unwrap();
    assert_eq!(path, dir.path().join("og-image-discord.png"));
    assert_eq!(std::fs::read(&path).unwrap(), artifact.bytes);
}

#[test]
fn saving_into_missing_directory_fails() {
    let dir = tempfile::tempdir().unwrap();
    let artifact = compositor()
        .export(Platform::Twitter, &SessionProfile::new().snapshot())
        .unwrap();

    let err = artifact.save(dir.path().join("missing")).unwrap_err();
    assert!(matches!(err, RenderError::Io { .. }));
}
