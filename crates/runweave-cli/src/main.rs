//! runweave - shape text from the command line
//!
//! Loads a font from a file or the system font database, shapes the given
//! text and prints its runs, metrics and safe-to-break offsets.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use runweave_text::{
    Font, FontDatabase, FontDescription, FontOrientation, FontQuery, LigatureSettings,
    RustybuzzBackend, ShapeResult, TextBuffer, TextDirection, TextShaper,
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Orientation {
    Horizontal,
    Mixed,
    Upright,
    Rotated,
}

impl From<Orientation> for FontOrientation {
    fn from(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Horizontal => FontOrientation::Horizontal,
            Orientation::Mixed => FontOrientation::VerticalMixed,
            Orientation::Upright => FontOrientation::VerticalUpright,
            Orientation::Rotated => FontOrientation::VerticalRotated,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Font file to shape with (overrides --family)
    #[arg(long)]
    font_file: Option<PathBuf>,

    /// Face index inside a font collection
    #[arg(long, default_value_t = 0)]
    face_index: u32,

    /// Font family looked up in the system font database
    #[arg(long, default_value = "sans-serif")]
    family: String,

    /// Font size in pixels
    #[arg(long, default_value_t = 16.0)]
    size: f32,

    /// Shape right-to-left
    #[arg(long)]
    rtl: bool,

    /// Text orientation
    #[arg(long, value_enum, default_value_t = Orientation::Horizontal)]
    orientation: Orientation,

    /// Disable common ligatures
    #[arg(long)]
    no_ligatures: bool,

    /// Enable discretionary ligatures
    #[arg(long)]
    discretionary_ligatures: bool,

    /// Disable kerning
    #[arg(long)]
    no_kerning: bool,

    /// Print every glyph
    #[arg(short, long)]
    verbose: bool,

    /// Text to shape
    text: String,
}

fn load_font(args: &Args, description: FontDescription) -> anyhow::Result<Font> {
    if let Some(path) = &args.font_file {
        let backend = RustybuzzBackend::from_file(path, args.face_index)
            .with_context(|| format!("Unable to load {}", path.display()))?;
        return Ok(Font::new(Arc::new(backend), description));
    }

    let db = FontDatabase::with_system_fonts();
    db.load_font(&FontQuery::new(&[args.family.as_str()]), description)
        .with_context(|| format!("No usable font for family {:?}", args.family))
}

fn print_result(result: &ShapeResult, verbose: bool) {
    println!(
        "{} characters, {} runs, {} glyphs",
        result.num_characters(),
        result.runs().len(),
        result.num_glyphs()
    );
    println!("width: {:.3} (snapped {})", result.width(), result.snapped_width());
    let bounds = result.bounds();
    println!(
        "bounds: x {:.3} y {:.3} w {:.3} h {:.3}",
        bounds.x, bounds.y, bounds.width, bounds.height
    );

    for (i, run) in result.runs().iter().enumerate() {
        println!(
            "run {i}: {}..{} {:?} {:?} (rotate {}), {} glyphs, width {:.3}",
            run.start_index(),
            run.end_index(),
            run.script(),
            run.orientation(),
            run.rotation().degrees(),
            run.glyphs().len(),
            run.width().to_f32()
        );
        if verbose {
            for glyph in run.glyphs() {
                println!(
                    "  gid {:>5} char {:>3} advance {:>8.3}{}",
                    glyph.glyph_id,
                    run.start_index() + glyph.character_index,
                    glyph.advance.to_f32(),
                    if glyph.safe_to_break_before { "" } else { " (unsafe)" }
                );
            }
        }
    }

    println!("safe to break: {:?}", result.safe_to_break_offsets());
    if result.missing_glyph_count() > 0 {
        println!("missing glyphs: {}", result.missing_glyph_count());
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    let description = FontDescription::new(args.size)
        .orientation(args.orientation.into())
        .ligatures(LigatureSettings {
            common: !args.no_ligatures,
            discretionary: args.discretionary_ligatures,
        })
        .kerning(!args.no_kerning);
    let font = load_font(&args, description)?;
    tracing::info!("Shaping with {:?}", font);

    let direction = if args.rtl {
        TextDirection::RightToLeft
    } else {
        TextDirection::LeftToRight
    };
    let text = TextBuffer::from(args.text.as_str());
    let result = TextShaper::new(&text).shape(&font, direction);
    print_result(&result, args.verbose);
    Ok(())
}
