//! # dotqr - Stylized QR Codes
//!
//! dotqr turns text or URLs into QR codes drawn as colored dots with
//! accent-colored corner blocks. It provides:
//!
//! - **Style presets**: immutable color schemes looked up by id
//! - **Encoding**: `qrcode`-backed raster and SVG output
//! - **Dot rendering**: grid-sampled restyling of the QR raster
//! - **Export**: PNG (stylized) and SVG (plain two-color)
//! - **Generation**: a request-tagged state machine for live previews
//!
//! ## Quick Start
//!
//! ```
//! use dotqr::{
//!     config::RenderConfig,
//!     encoder::QrcodeEncoder,
//!     export::ExportFormat,
//!     generate::Generator,
//! };
//!
//! let mut generator = Generator::new(QrcodeEncoder).with_config(RenderConfig::default());
//! generator.generate("https://example.com", "slate-ember");
//!
//! let png = generator.export_png()?;
//! let svg = generator.export_svg()?;
//!
//! assert_eq!(ExportFormat::Png.file_name("slate-ember"), "qrcode-slate-ember.png");
//! assert!(svg.contains("#e2e8f0"));
//! # let _ = png;
//! # Ok::<(), dotqr::GenerationError>(())
//! ```
//!
//! ## Module Overview
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`style`] | Colors and the preset registry |
//! | [`config`] | Canvas geometry and error correction |
//! | [`encoder`] | QR symbol → PNG raster / SVG markup |
//! | [`render`] | Dot renderer |
//! | [`export`] | PNG/SVG serialization and file naming |
//! | [`generate`] | Generation state machine |
//! | [`error`] | Error types |

pub mod config;
pub mod encoder;
pub mod error;
pub mod export;
pub mod generate;
pub mod render;
pub mod style;

// Re-exports for convenience
pub use config::RenderConfig;
pub use error::GenerationError;
pub use generate::{GenerationState, Generator};
pub use style::{Color, StylePreset};
