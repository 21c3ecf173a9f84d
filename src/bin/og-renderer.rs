use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use og_renderer::{
    Compositor, CompositorConfig, Configurable, Editor, PatternType, Platform, SessionProfile,
    TemplateMerge, synthesize_seeded, tile_to_svg,
};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "og-renderer", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the built-in templates.
    Templates {
        /// Print the full templates as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Print one pattern tile as SVG markup or a CSS value.
    Pattern(PatternArgs),
    /// Print the session profile JSON after applying edits.
    Profile(SessionArgs),
    /// Print the CSS for the live preview.
    Preview(SessionArgs),
    /// Render PNG files for one or more platforms.
    Export(ExportArgs),
}

#[derive(Parser, Debug)]
struct PatternArgs {
    #[arg(long = "type", value_enum, default_value_t = PatternType::Grid)]
    pattern_type: PatternType,

    #[arg(long, default_value = "#ffffff")]
    color: String,

    #[arg(long, default_value_t = 0.1)]
    opacity: f64,

    #[arg(long, default_value_t = 20)]
    scale: i64,

    /// Seed for noise tiles. Defaults to a hash of the other settings.
    #[arg(long)]
    seed: Option<u64>,

    /// Print `url("data:...")` instead of SVG markup.
    #[arg(long)]
    css: bool,
}

#[derive(Parser, Debug)]
struct SessionArgs {
    /// Start from a saved profile JSON.
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Apply a built-in template.
    #[arg(long)]
    template: Option<String>,

    /// How a template treats a background given with --background.
    #[arg(long, value_enum, default_value_t = TemplateMerge::ReplaceAll)]
    merge: TemplateMerge,

    #[arg(long = "type", value_enum)]
    pattern_type: Option<PatternType>,

    #[arg(long)]
    color: Option<String>,

    #[arg(long)]
    opacity: Option<f64>,

    #[arg(long)]
    scale: Option<i64>,

    /// Solid color or `linear-gradient(...)` descriptor.
    #[arg(long)]
    background: Option<String>,

    /// Pick a random preset gradient background.
    #[arg(long, conflicts_with = "background")]
    random_background: bool,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    subtitle: Option<String>,

    /// Derive title and subtitle from a website address.
    #[arg(long)]
    url: Option<String>,

    /// Logo image file (PNG, JPEG or SVG, at most 2MB).
    #[arg(long)]
    logo: Option<PathBuf>,

    /// Background photo: a file path or data URI.
    #[arg(long)]
    background_image: Option<String>,
}

#[derive(Parser, Debug)]
struct ExportArgs {
    #[command(flatten)]
    session: SessionArgs,

    /// Target platforms.
    #[arg(long = "platform", value_enum, default_values_t = [Platform::Twitter])]
    platforms: Vec<Platform>,

    /// Export every platform.
    #[arg(long, conflicts_with = "platforms")]
    all: bool,

    /// Output directory.
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Do not load system fonts.
    #[arg(long)]
    no_system_fonts: bool,

    /// Extra font files or directories.
    #[arg(long = "font")]
    fonts: Vec<PathBuf>,

    /// Font family list for title and subtitle.
    #[arg(long)]
    font_family: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Templates { json } => cmd_templates(json),
        Command::Pattern(args) => cmd_pattern(args),
        Command::Profile(args) => cmd_profile(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Export(args) => cmd_export(args),
    }
}

fn cmd_templates(json: bool) -> anyhow::Result<()> {
    let templates = og_renderer::template::templates();
    if json {
        println!("{}", serde_json::to_string_pretty(&templates)?);
        return Ok(());
    }
    for t in templates {
        println!("{:<18} {:<14} {}", t.id, t.name, t.content.title);
    }
    Ok(())
}

fn cmd_pattern(args: PatternArgs) -> anyhow::Result<()> {
    let mut editor = Editor::new();
    editor.set_pattern_type(args.pattern_type);
    editor.set_pattern_color(args.color);
    editor.set_opacity(args.opacity)?;
    editor.set_scale(args.scale)?;
    let settings = editor.pattern();

    let tile = match args.seed {
        Some(seed) => synthesize_seeded(
            settings.pattern_type,
            Some(&settings.color),
            settings.opacity,
            settings.scale,
            seed,
        ),
        None => settings.tile(),
    };

    if args.css {
        println!("{}", og_renderer::encode(&tile).css());
    } else {
        println!("{}", tile_to_svg(&tile));
    }
    Ok(())
}

fn cmd_profile(args: SessionArgs) -> anyhow::Result<()> {
    let editor = build_editor(&args)?;
    println!("{}", editor.export_profile().to_json_pretty()?);
    Ok(())
}

fn cmd_preview(args: SessionArgs) -> anyhow::Result<()> {
    let mut editor = build_editor(&args)?;
    println!("{}", editor.preview_style().to_css());
    Ok(())
}

fn cmd_export(args: ExportArgs) -> anyhow::Result<()> {
    let mut editor = build_editor(&args.session)?;
    let snapshot = editor.snapshot();

    let mut config = CompositorConfig {
        load_system_fonts: !args.no_system_fonts,
        font_paths: args.fonts,
        ..CompositorConfig::default()
    };
    if let Some(family) = args.font_family {
        config = config.with_font_family(family);
    }
    let compositor = Compositor::new(config);

    std::fs::create_dir_all(&args.out)
        .with_context(|| format!("create output dir '{}'", args.out.display()))?;

    let platforms = if args.all {
        Platform::ALL.to_vec()
    } else {
        args.platforms
    };
    for platform in platforms {
        let artifact = compositor
            .export(platform, &snapshot)
            .with_context(|| format!("export {platform}"))?;
        let path = artifact.save(&args.out)?;
        println!("{}", path.display());
    }
    Ok(())
}

fn build_editor(args: &SessionArgs) -> anyhow::Result<Editor> {
    let mut editor = Editor::new().with_merge(args.merge);

    if let Some(path) = &args.profile {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("read profile '{}'", path.display()))?;
        let profile = SessionProfile::from_json(&json)
            .with_context(|| format!("parse profile '{}'", path.display()))?;
        editor.apply_profile(&profile)?;
    }

    // A background given on the command line counts as the user's choice,
    // so it is set before the template and may survive it.
    if let Some(background) = &args.background {
        editor.set_background(background.clone());
    }
    if args.random_background {
        editor.randomize_background();
    }
    if let Some(id) = &args.template {
        editor.apply_template_id(id)?;
    }

    if let Some(pattern_type) = args.pattern_type {
        editor.set_pattern_type(pattern_type);
    }
    if let Some(color) = &args.color {
        editor.set_pattern_color(color.clone());
    }
    if let Some(opacity) = args.opacity {
        editor.set_opacity(opacity)?;
    }
    if let Some(scale) = args.scale {
        editor.set_scale(scale)?;
    }

    if let Some(url) = &args.url {
        editor.apply_url_stub(url)?;
    }
    if let Some(title) = &args.title {
        editor.set_title(title.clone());
    }
    if let Some(subtitle) = &args.subtitle {
        editor.set_subtitle(subtitle.clone());
    }

    if let Some(path) = &args.logo {
        let bytes =
            std::fs::read(path).with_context(|| format!("read logo '{}'", path.display()))?;
        editor
            .upload_logo(&bytes, mime_for(path))
            .with_context(|| format!("upload logo '{}'", path.display()))?;
    }
    if let Some(image) = &args.background_image {
        editor.set_background_image(Some(image.clone()));
    }

    Ok(editor)
}

fn mime_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("svg") => "image/svg+xml",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "application/octet-stream",
    }
}
