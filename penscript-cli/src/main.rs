use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use penscript::{render_handwriting, GlyphCatalog, LayoutOptions};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "penscript",
    about = "Render text as handwriting-style PDFs",
    version,
    author
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render text to a handwriting PDF
    Render {
        /// Directory of <character>.png glyph images
        #[arg(short, long)]
        glyphs: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Text to render
        #[arg(short, long)]
        text: Option<String>,

        /// Read the text from a file instead
        #[arg(short, long, conflicts_with = "text")]
        input: Option<PathBuf>,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Inspect a glyph directory
    Glyphs {
        /// Directory of <character>.png glyph images
        dir: PathBuf,
    },
}

/// Layout overrides; unset flags keep the documented defaults.
#[derive(Args)]
struct LayoutArgs {
    /// Scale factor for glyph sizes and spacing
    #[arg(long)]
    font_size: Option<f64>,

    /// Horizontal advance for a space, in points
    #[arg(long)]
    space_width: Option<f64>,

    /// Vertical advance between lines, in points
    #[arg(long)]
    line_height: Option<f64>,

    /// Gap after each glyph, in points
    #[arg(long)]
    letter_spacing: Option<f64>,

    /// Left page margin, in points
    #[arg(long)]
    left_margin: Option<f64>,

    /// Right page margin, in points
    #[arg(long)]
    right_margin: Option<f64>,

    /// Top page margin, in points
    #[arg(long)]
    top_margin: Option<f64>,

    /// Bottom page margin, in points
    #[arg(long)]
    bottom_margin: Option<f64>,
}

impl LayoutArgs {
    fn into_options(self) -> LayoutOptions {
        let defaults = LayoutOptions::default();
        LayoutOptions {
            left_margin: self.left_margin.unwrap_or(defaults.left_margin),
            right_margin: self.right_margin.unwrap_or(defaults.right_margin),
            top_margin: self.top_margin.unwrap_or(defaults.top_margin),
            bottom_margin: self.bottom_margin.unwrap_or(defaults.bottom_margin),
            font_size: self.font_size.unwrap_or(defaults.font_size),
            space_width: self.space_width.unwrap_or(defaults.space_width),
            line_height: self.line_height.unwrap_or(defaults.line_height),
            letter_spacing: self.letter_spacing.unwrap_or(defaults.letter_spacing),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Render {
            glyphs,
            output,
            text,
            input,
            layout,
        } => {
            let text = match (text, input) {
                (Some(text), None) => text,
                (None, Some(path)) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                (None, None) => bail!("Provide the text via --text or --input"),
                (Some(_), Some(_)) => unreachable!("clap rejects --text with --input"),
            };

            let catalog = GlyphCatalog::load(&glyphs)
                .with_context(|| format!("Failed to load glyphs from {}", glyphs.display()))?;

            let mut doc = render_handwriting(&text, &catalog, &layout.into_options())?;
            doc.set_title("Handwritten document");
            doc.set_author("penscript CLI");
            doc.save(&output)?;

            println!(
                "✓ Rendered {} page(s) to {}",
                doc.page_count(),
                output.display()
            );
        }

        Commands::Glyphs { dir } => {
            let catalog = GlyphCatalog::load(&dir)
                .with_context(|| format!("Failed to load glyphs from {}", dir.display()))?;

            if catalog.is_empty() {
                println!("No glyphs found in {}", dir.display());
            } else {
                let mut keys: Vec<char> = catalog.keys().collect();
                keys.sort_unstable();

                println!("Glyph directory: {}", dir.display());
                println!("Glyphs: {}", catalog.len());
                println!("Max height: {} px", catalog.max_height());
                println!("Keys: {}", keys.iter().collect::<String>());
            }
        }
    }

    Ok(())
}
