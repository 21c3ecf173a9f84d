use og_renderer::template;
use og_renderer::{
    Configurable, Editor, EditorError, PatternType, PreviewStyle, SessionProfile, normalize,
    synthesize, wrap, FixedAdvance, FontSpec,
};

#[test]
fn minimal_template_values() {
    let mut editor = Editor::new();
    editor.apply_template_id("minimal").unwrap();

    let pattern = editor.pattern();
    assert_eq!(pattern.pattern_type, PatternType::Grid);
    assert_eq!(pattern.scale, 20);
    assert_eq!(pattern.opacity, 0.1);
    assert_eq!(
        pattern.background,
        "linear-gradient(225deg, #2A2A2A 0%, #121212 100%)"
    );
    assert_eq!(editor.content().title, "Clean & Minimal Design");
}

#[test]
fn three_megabyte_logo_is_rejected() {
    let mut editor = Editor::new();
    let before = editor.content().logo.clone();

    let upload = vec![0xAB; 3 * 1024 * 1024];
    let err = editor.upload_logo(&upload, "image/png").unwrap_err();

    assert!(matches!(err, EditorError::LogoTooLarge { .. }));
    assert_eq!(editor.content().logo, before);
}

#[test]
fn fields_are_independent() {
    let mut editor = Editor::new();
    editor.apply_template_id("fresh").unwrap();
    let template_background = editor.pattern().background.clone();

    editor.set_pattern_type(PatternType::Honeycomb);
    editor.set_pattern_color("#00ff00");
    editor.set_opacity(0.4).unwrap();
    editor.set_scale(12).unwrap();
    assert_eq!(editor.pattern().background, template_background);

    editor.set_background("#101010");
    assert_eq!(editor.pattern().pattern_type, PatternType::Honeycomb);
    assert_eq!(editor.pattern().color, "#00ff00");
    assert_eq!(editor.pattern().opacity, 0.4);
    assert_eq!(editor.pattern().scale, 12);
}

#[test]
fn color_normalization_examples() {
    assert_eq!(normalize(Some("#3B82F6"), 0.1).to_string(), "rgba(59,130,246,0.1)");
    assert_eq!(normalize(None, 0.2).to_string(), "rgba(255,255,255,0.2)");
}

#[test]
fn tile_geometry_examples() {
    let grid = synthesize(PatternType::Grid, Some("#ffffff"), 0.1, 20);
    assert_eq!((grid.width, grid.height), (40.0, 40.0));
    assert_eq!(grid.line_count(), 2);

    let dots = synthesize(PatternType::Dots, Some("#ffffff"), 0.1, 20);
    assert_eq!(dots.circle_count(), 5);
}

#[test]
fn wrap_keeps_short_title_on_one_line() {
    let font = FontSpec::new("sans-serif", 60.0).bold();
    let lines = wrap("Create Beautiful OG Images", 960.0, &font, &FixedAdvance::default());
    assert_eq!(lines, ["Create Beautiful OG Images"]);
}

#[test]
fn wrap_preserves_words_in_order() {
    let text = "one two three four five six seven eight nine ten eleven twelve";
    let font = FontSpec::new("sans-serif", 10.0);
    let lines = wrap(text, 80.0, &font, &FixedAdvance::new(1.0));

    assert!(lines.len() > 1);
    let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
    assert_eq!(rejoined, text.split_whitespace().collect::<Vec<_>>());
}

#[test]
fn profile_json_roundtrip_through_editor() {
    let mut editor = Editor::new();
    editor.apply_template_id("teal-delight").unwrap();
    editor.set_title("Custom");

    let json = editor.export_profile().to_json().unwrap();
    let mut restored = Editor::new();
    restored
        .apply_profile(&SessionProfile::from_json(&json).unwrap())
        .unwrap();

    assert_eq!(restored.export_profile(), editor.export_profile());
    assert_eq!(restored.preview_style(), editor.preview_style());
}

#[test]
fn preview_shows_snapshot_pattern() {
    let mut editor = Editor::new();
    let snapshot = editor.snapshot();
    let style = PreviewStyle::from_snapshot(&snapshot);
    assert!(style.background_image.starts_with(&snapshot.paint.css()));
}

#[test]
fn catalog_is_complete() {
    let templates = template::templates();
    assert_eq!(templates.len(), 23);
    assert_eq!(templates[0].id, "modern");
    assert!(templates.iter().any(|t| t.id == "vibrant-energetic"));
}

#[test]
fn invalid_pattern_inputs_leave_settings_unchanged() {
    let mut editor = Editor::new();
    let before = editor.pattern().clone();

    let err = editor.set_scale(-4).unwrap_err();
    assert!(matches!(err, EditorError::InvalidScale(-4)));
    assert!(matches!(editor.set_scale(i64::from(u32::MAX) + 1), Err(EditorError::InvalidScale(_))));
    assert!(matches!(editor.set_opacity(1.5), Err(EditorError::InvalidOpacity(_))));

    assert_eq!(editor.pattern(), &before);
}
