//! # dotqr CLI
//!
//! Command-line front end for stylized QR code generation.
//!
//! ## Usage
//!
//! ```bash
//! # List available styles
//! dotqr styles
//!
//! # Write qrcode-slate-ember.png and qrcode-slate-ember.svg to ./out
//! dotqr generate https://example.com --out-dir out
//!
//! # PNG only, with custom geometry
//! dotqr generate "hello" --format png --config render.json
//!
//! # Restyle an existing QR code image
//! dotqr restyle plain.png --out styled.png
//! ```

use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

use dotqr::{
    GenerationError, GenerationState, Generator, RenderConfig,
    encoder::QrcodeEncoder,
    export::{self, ExportFormat},
    render::{DotRenderer, RasterImage},
    style::{self, StyleRegistry},
};

/// dotqr - Stylized QR code generator
#[derive(Parser, Debug)]
#[command(name = "dotqr")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// List available style presets
    Styles {
        /// Extra presets (JSON array)
        #[arg(long, value_name = "FILE")]
        presets: Option<PathBuf>,
    },

    /// Generate a QR code from text or a URL
    Generate {
        /// Content to encode
        content: String,

        /// Style preset id
        #[arg(long, default_value = style::DEFAULT_STYLE)]
        style: String,

        /// Which files to write
        #[arg(long, value_enum, default_value_t = Format::Both)]
        format: Format,

        /// Output directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,

        /// Render config (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Extra presets (JSON array)
        #[arg(long, value_name = "FILE")]
        presets: Option<PathBuf>,
    },

    /// Apply dot styling to an existing QR code image
    Restyle {
        /// Source image (any format the image crate reads)
        input: PathBuf,

        /// Style preset id
        #[arg(long, default_value = style::DEFAULT_STYLE)]
        style: String,

        /// Output PNG path (defaults to qrcode-<style>.png)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Render config (JSON)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Extra presets (JSON array)
        #[arg(long, value_name = "FILE")]
        presets: Option<PathBuf>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Png,
    Svg,
    Both,
}

impl Format {
    fn includes(self, format: ExportFormat) -> bool {
        match self {
            Format::Both => true,
            Format::Png => format == ExportFormat::Png,
            Format::Svg => format == ExportFormat::Svg,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<(), GenerationError> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Styles { presets } => {
            let registry = load_registry(presets.as_deref())?;
            println!("Available styles:");
            for preset in registry.presets() {
                println!(
                    "  {:<16} {:<16} bg {}  modules {}  accent {}",
                    preset.id,
                    preset.name,
                    preset.background_color,
                    preset.module_color,
                    preset.accent_color
                );
            }
        }

        Commands::Generate {
            content,
            style,
            format,
            out_dir,
            config,
            presets,
        } => {
            let config = load_config(config.as_deref())?;
            let registry = load_registry(presets.as_deref())?;
            let mut generator = Generator::new(QrcodeEncoder)
                .with_registry(registry)
                .with_config(config);

            if format.includes(ExportFormat::Png) {
                if let GenerationState::Failed { error, .. } = generator.generate(&content, &style) {
                    exit_with(error);
                }
                let png = generator.export_png()?;
                write_export(&generator, &out_dir, ExportFormat::Png, &png)?;
            }

            if format.includes(ExportFormat::Svg) {
                if format == Format::Svg {
                    // SVG skips the raster pipeline; only register the input
                    generator.begin(&content, &style);
                    if let Some(error) = generator.error() {
                        exit_with(error);
                    }
                }
                let svg = generator.export_svg()?;
                write_export(&generator, &out_dir, ExportFormat::Svg, svg.as_bytes())?;
            }
        }

        Commands::Restyle {
            input,
            style,
            out,
            config,
            presets,
        } => {
            let config = load_config(config.as_deref())?;
            let registry = load_registry(presets.as_deref())?;
            let preset = registry.lookup(&style)?;

            let bytes = std::fs::read(&input)?;
            let raster = RasterImage::decode(&bytes, config.canvas_size)?;
            let styled = DotRenderer::new(config).render(&raster, preset)?;
            let png = export::to_png(&styled)?;

            let path = match out {
                Some(path) => {
                    std::fs::write(&path, &png)?;
                    path
                }
                None => export::save(Path::new("."), ExportFormat::Png, &preset.id, &png)?,
            };
            println!("Saved to {}", path.display());
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<RenderConfig, GenerationError> {
    match path {
        Some(path) => RenderConfig::from_json_file(path),
        None => Ok(RenderConfig::default()),
    }
}

fn load_registry(path: Option<&Path>) -> Result<StyleRegistry, GenerationError> {
    match path {
        Some(path) => StyleRegistry::with_json(&std::fs::read_to_string(path)?),
        None => Ok(StyleRegistry::builtin().clone()),
    }
}

/// Report a failed generation with its inline message and exit.
fn exit_with(error: &GenerationError) -> ! {
    tracing::debug!(%error, "generation failed");
    eprintln!("Error: {}", error.user_message());
    std::process::exit(1);
}

fn write_export(
    generator: &Generator<QrcodeEncoder>,
    dir: &Path,
    format: ExportFormat,
    bytes: &[u8],
) -> Result<(), GenerationError> {
    let style_id = generator.style_id().unwrap_or(style::DEFAULT_STYLE);
    let path = export::save(dir, format, style_id, bytes)?;
    println!("Saved {} ({}) to {}", format.extension(), format.mime_type(), path.display());
    Ok(())
}
