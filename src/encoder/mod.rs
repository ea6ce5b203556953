//! # QR Encoder Boundary
//!
//! The encoder turns content into either a raster image (PNG bytes) or SVG
//! markup. QR symbol construction itself (Reed-Solomon, masking, module
//! placement) is delegated to the `qrcode` crate; this module only decides
//! how the module matrix is laid onto pixels or paths.
//!
//! ## Raster Geometry
//!
//! ```text
//! symbol = modules + 2 × margin          (in modules)
//! scale  = width / symbol                 (fractional, when width ≥ symbol)
//!        = 4                              (otherwise; image is symbol × 4 px)
//!
//! pixel (row i, col j) inside the scaled margin
//!   → module (⌊(j − margin·scale) / scale⌋, ⌊(i − margin·scale) / scale⌋)
//! ```
//!
//! ## Example
//!
//! ```
//! use dotqr::config::RenderConfig;
//! use dotqr::encoder::{EncodeOptions, Encoder, QrcodeEncoder};
//! use dotqr::style;
//!
//! let preset = style::lookup("slate-ember").unwrap();
//! let options = EncodeOptions::for_style(&RenderConfig::default(), preset);
//! let png = QrcodeEncoder.encode_to_raster("https://example.com", &options).unwrap();
//! assert_eq!(&png[..4], &[0x89, b'P', b'N', b'G']);
//! ```

mod svg;

use crate::config::{MAX_CANVAS, MAX_MARGIN, RenderConfig};
use crate::error::GenerationError;
use crate::export;
use crate::style::{Color, StylePreset};
use image::RgbaImage;
use serde::{Deserialize, Serialize};

pub use svg::to_svg_string;

/// Pixels per module when the requested width cannot fit the symbol.
pub const FALLBACK_SCALE: u32 = 4;

/// QR error correction level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorLevel {
    /// Level L: ~7% error recovery
    L,
    /// Level M: ~15% error recovery (default)
    #[default]
    M,
    /// Level Q: ~25% error recovery
    Q,
    /// Level H: ~30% error recovery
    H,
}

impl From<ErrorLevel> for qrcode::EcLevel {
    fn from(level: ErrorLevel) -> Self {
        match level {
            ErrorLevel::L => qrcode::EcLevel::L,
            ErrorLevel::M => qrcode::EcLevel::M,
            ErrorLevel::Q => qrcode::EcLevel::Q,
            ErrorLevel::H => qrcode::EcLevel::H,
        }
    }
}

/// Parameters for one encoder call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeOptions {
    /// Requested output width in pixels (SVG: width/height attributes)
    pub width: u32,
    /// Quiet zone in modules
    pub margin: u32,
    pub dark: Color,
    pub light: Color,
    pub error_level: ErrorLevel,
}

impl EncodeOptions {
    /// Module color as dark, background as light.
    /// Reject sizes whose pixel or module arithmetic would not fit in `u32`.
    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.width == 0 || self.width > MAX_CANVAS {
            return Err(GenerationError::Config(format!(
                "width must be in 1..={}",
                MAX_CANVAS
            )));
        }
        if self.margin > MAX_MARGIN {
            return Err(GenerationError::Config(format!(
                "margin must be at most {} modules",
                MAX_MARGIN
            )));
        }
        Ok(())
    }

    pub fn for_style(config: &RenderConfig, preset: &StylePreset) -> Self {
        Self {
            width: config.canvas_size,
            margin: config.margin,
            dark: preset.module_color,
            light: preset.background_color,
            error_level: config.error_level,
        }
    }
}

/// Content → QR image capability.
pub trait Encoder {
    /// Render `content` as an encoded (PNG) raster image.
    fn encode_to_raster(
        &self,
        content: &str,
        options: &EncodeOptions,
    ) -> Result<Vec<u8>, GenerationError>;

    /// Render `content` as SVG markup.
    fn encode_to_svg(&self, content: &str, options: &EncodeOptions)
    -> Result<String, GenerationError>;
}

impl<E: Encoder + ?Sized> Encoder for &E {
    fn encode_to_raster(
        &self,
        content: &str,
        options: &EncodeOptions,
    ) -> Result<Vec<u8>, GenerationError> {
        (**self).encode_to_raster(content, options)
    }

    fn encode_to_svg(
        &self,
        content: &str,
        options: &EncodeOptions,
    ) -> Result<String, GenerationError> {
        (**self).encode_to_svg(content, options)
    }
}

/// Square grid of QR modules, row-major, `true` = dark.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleMatrix {
    size: usize,
    dark: Vec<bool>,
}

impl ModuleMatrix {
    /// Encode `content` as bytes at the given error correction level.
    pub fn encode(content: &str, level: ErrorLevel) -> Result<Self, GenerationError> {
        let code = qrcode::QrCode::with_error_correction_level(content.as_bytes(), level.into())
            .map_err(|e| GenerationError::Encoding(format!("QR code generation failed: {}", e)))?;

        let size = code.width();
        let dark = code
            .to_colors()
            .into_iter()
            .map(|c| c == qrcode::Color::Dark)
            .collect();

        Ok(Self { size, dark })
    }

    /// Side length in modules.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn is_dark(&self, x: usize, y: usize) -> bool {
        x < self.size && y < self.size && self.dark[y * self.size + x]
    }

    /// Lay the matrix onto an RGBA image (see module docs for the mapping).
    pub fn rasterize(&self, options: &EncodeOptions) -> RgbaImage {
        let symbol = self.size as u32 + 2 * options.margin;
        let (side, scale) = if options.width >= symbol {
            (options.width, options.width as f64 / symbol as f64)
        } else {
            (symbol * FALLBACK_SCALE, FALLBACK_SCALE as f64)
        };

        let scaled_margin = options.margin as f64 * scale;
        let far_edge = side as f64 - scaled_margin;
        let dark = options.dark.to_rgba();
        let light = options.light.to_rgba();

        RgbaImage::from_fn(side, side, |x, y| {
            let (col, row) = (x as f64, y as f64);
            let inside = row >= scaled_margin
                && col >= scaled_margin
                && row < far_edge
                && col < far_edge;
            if !inside {
                return light;
            }

            let mx = ((col - scaled_margin) / scale).floor() as usize;
            let my = ((row - scaled_margin) / scale).floor() as usize;
            if self.is_dark(mx, my) { dark } else { light }
        })
    }
}

/// Encoder backed by the `qrcode` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct QrcodeEncoder;

impl Encoder for QrcodeEncoder {
    fn encode_to_raster(
        &self,
        content: &str,
        options: &EncodeOptions,
    ) -> Result<Vec<u8>, GenerationError> {
        options.validate()?;
        let matrix = ModuleMatrix::encode(content, options.error_level)?;
        let image = matrix.rasterize(options);
        tracing::debug!(
            modules = matrix.size(),
            side = image.width(),
            "rasterized QR symbol"
        );
        export::encode_png(&image)
    }

    fn encode_to_svg(
        &self,
        content: &str,
        options: &EncodeOptions,
    ) -> Result<String, GenerationError> {
        options.validate()?;
        let matrix = ModuleMatrix::encode(content, options.error_level)?;
        Ok(to_svg_string(&matrix, options))
    }
}
