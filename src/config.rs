//! # Render Configuration
//!
//! Geometry shared by the encoder call, the dot renderer and the exporter.
//!
//! ## Canonical Geometry
//!
//! | Property | Value |
//! |----------|-------|
//! | Canvas | 400×400 px |
//! | Quiet zone | 2 modules |
//! | Sampling stride | 4 px |
//! | Dot radius | 1.8 px |
//! | Error correction | M (~15%) |
//!
//! ## Usage
//!
//! ```
//! use dotqr::config::RenderConfig;
//!
//! let config = RenderConfig::from_json(r#"{ "stride": 5 }"#).unwrap();
//! assert_eq!(config.stride, 5);
//! assert_eq!(config.canvas_size, 400);
//! ```

use crate::encoder::ErrorLevel;
use crate::error::GenerationError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Canvas side the finder boxes are defined against.
pub const CANONICAL_CANVAS: u32 = 400;

/// Largest accepted canvas side in pixels.
pub const MAX_CANVAS: u32 = 16_384;

/// Largest accepted quiet zone in modules.
pub const MAX_MARGIN: u32 = 64;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output side length in pixels (square)
    pub canvas_size: u32,

    /// Quiet zone in modules, passed to the encoder
    pub margin: u32,

    /// Sampling grid cell size in pixels
    pub stride: u32,

    /// Radius of each module dot in pixels
    pub dot_radius: f32,

    pub error_level: ErrorLevel,
}

impl RenderConfig {
    pub const CANONICAL: Self = Self {
        canvas_size: CANONICAL_CANVAS,
        margin: 2,
        stride: 4,
        dot_radius: 1.8,
        error_level: ErrorLevel::M,
    };

    /// Parse a (possibly partial) JSON object over the canonical defaults.
    pub fn from_json(json: &str) -> Result<Self, GenerationError> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| GenerationError::Config(format!("invalid render config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: &Path) -> Result<Self, GenerationError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> Result<(), GenerationError> {
        if self.canvas_size == 0 || self.canvas_size > MAX_CANVAS {
            return Err(GenerationError::Config(format!(
                "canvas_size must be in 1..={}",
                MAX_CANVAS
            )));
        }
        if self.margin > MAX_MARGIN {
            return Err(GenerationError::Config(format!(
                "margin must be at most {} modules",
                MAX_MARGIN
            )));
        }
        if self.stride == 0 {
            return Err(GenerationError::Config("stride must be positive".into()));
        }
        if !(self.dot_radius.is_finite() && self.dot_radius > 0.0) {
            return Err(GenerationError::Config("dot_radius must be positive".into()));
        }
        Ok(())
    }

    /// Scale factor from the canonical 400 px canvas.
    #[inline]
    pub fn scale(&self) -> f32 {
        self.canvas_size as f32 / CANONICAL_CANVAS as f32
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::CANONICAL
    }
}
