//! # Export
//!
//! Serializes generated QR codes to files.
//!
//! | Format | Source | Styling | File name |
//! |--------|--------|---------|-----------|
//! | PNG | [`StyledImage`] | dots + accent corners | `qrcode-<style>.png` |
//! | SVG | encoder vector output | two colors only | `qrcode-<style>.svg` |
//!
//! The SVG path deliberately skips the dot styling: it is the encoder's
//! plain vector output with the preset's module and background colors.

use crate::config::RenderConfig;
use crate::encoder::{EncodeOptions, Encoder};
use crate::error::GenerationError;
use crate::render::StyledImage;
use crate::style::StylePreset;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::{ImageEncoder, RgbaImage};
use std::path::{Path, PathBuf};

/// Output file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Png,
    Svg,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Png => "png",
            ExportFormat::Svg => "svg",
        }
    }

    /// MIME type (`image/png`, `image/svg+xml`).
    pub fn mime_type(self) -> String {
        mime_guess::from_ext(self.extension())
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }

    /// Download name for a style, e.g. `qrcode-slate-ember.png`.
    pub fn file_name(self, style_id: &str) -> String {
        format!("qrcode-{}.{}", style_id, self.extension())
    }
}

/// Encode an RGBA image as PNG bytes (best compression, adaptive filter).
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, GenerationError> {
    let mut png_bytes = Vec::new();
    let encoder = PngEncoder::new_with_quality(
        &mut png_bytes,
        CompressionType::Best,
        FilterType::Adaptive,
    );
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e: image::ImageError| GenerationError::Image(e.to_string()))?;

    Ok(png_bytes)
}

/// Stylized bitmap → PNG bytes.
pub fn to_png(image: &StyledImage) -> Result<Vec<u8>, GenerationError> {
    encode_png(image.as_image())
}

/// Content → plain two-color SVG in the preset's colors.
pub fn to_svg<E: Encoder>(
    encoder: &E,
    content: &str,
    config: &RenderConfig,
    style: &StylePreset,
) -> Result<String, GenerationError> {
    if content.trim().is_empty() {
        return Err(GenerationError::empty_export());
    }
    encoder.encode_to_svg(content, &EncodeOptions::for_style(config, style))
}

/// Write `bytes` to `dir/qrcode-<style>.<ext>`, creating `dir` if needed.
pub fn save(
    dir: &Path,
    format: ExportFormat,
    style_id: &str,
    bytes: &[u8],
) -> Result<PathBuf, GenerationError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(format.file_name(style_id));
    std::fs::write(&path, bytes)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "saved export");
    Ok(path)
}
