//! # Dot Rendering
//!
//! Turns a plain QR raster into the stylized bitmap used for preview and
//! PNG export.
//!
//! ## Pipeline
//!
//! ```text
//! encoder PNG bytes → RasterImage::decode → DotRenderer::render → StyledImage
//!                          ↓                        ↓
//!                  first channel < 128      sample every k px:
//!                     = dark                  dark in corner box → accent block
//!                                             dark elsewhere     → module dot
//!                                             light              → background
//! ```
//!
//! ## Corner Boxes
//!
//! Accent blocks are placed by three fixed boxes (inclusive bounds, at the
//! canonical 400 px canvas, scaled proportionally otherwise):
//!
//! ```text
//! (24,24)-(96,96)      (304,24)-(376,96)
//! (24,304)-(96,376)
//! ```
//!
//! The boxes do not track the symbol's real finder patterns. For long or
//! very short content the accent may sit off the actual corners; this is a
//! cosmetic approximation.

mod dots;
pub mod geometry;

pub use dots::DotRenderer;

use crate::config::CANONICAL_CANVAS;
use crate::error::GenerationError;
use crate::style::Color;
use image::{RgbaImage, imageops};
use std::borrow::Cow;

/// First-channel value below which a raster pixel counts as dark.
pub const DARK_THRESHOLD: u8 = 128;

/// Square dark/light pixel grid read back from the encoder output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RasterImage {
    side: u32,
    dark: Vec<bool>,
}

impl RasterImage {
    /// Decode encoded image bytes and classify each pixel.
    ///
    /// Images whose side differs from `side` are resampled (nearest
    /// neighbour) to `side × side`.
    pub fn decode(bytes: &[u8], side: u32) -> Result<Self, GenerationError> {
        let image = image::load_from_memory(bytes)
            .map_err(|e| GenerationError::RenderDecode(e.to_string()))?
            .to_rgba8();
        Self::from_rgba(&image, side)
    }

    /// Classify an RGBA image by its first channel.
    pub fn from_rgba(image: &RgbaImage, side: u32) -> Result<Self, GenerationError> {
        if image.width() == 0 || image.height() == 0 {
            return Err(GenerationError::RenderDecode("raster image is empty".into()));
        }

        let image = if image.dimensions() == (side, side) {
            Cow::Borrowed(image)
        } else {
            tracing::warn!(
                width = image.width(),
                height = image.height(),
                side,
                "resampling raster to canvas size"
            );
            Cow::Owned(imageops::resize(
                image,
                side,
                side,
                imageops::FilterType::Nearest,
            ))
        };

        let dark = image.pixels().map(|px| px[0] < DARK_THRESHOLD).collect();
        Ok(Self { side, dark })
    }

    /// Build a raster from a predicate, mainly for tests and tools.
    pub fn from_fn(side: u32, mut is_dark: impl FnMut(u32, u32) -> bool) -> Self {
        let len = side as usize * side as usize;
        let mut dark = Vec::with_capacity(len);
        for y in 0..side {
            for x in 0..side {
                dark.push(is_dark(x, y));
            }
        }
        Self { side, dark }
    }

    #[inline]
    pub fn side(&self) -> u32 {
        self.side
    }

    #[inline]
    pub fn is_dark(&self, x: u32, y: u32) -> bool {
        x < self.side && y < self.side && self.dark[y as usize * self.side as usize + x as usize]
    }
}

/// One of the three accent boxes, inclusive pixel bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FinderRegion {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl FinderRegion {
    /// Top-left, top-right, bottom-left at the 400 px canvas.
    pub const CANONICAL: [FinderRegion; 3] = [
        FinderRegion::new(24.0, 24.0, 96.0, 96.0),
        FinderRegion::new(304.0, 24.0, 376.0, 96.0),
        FinderRegion::new(24.0, 304.0, 96.0, 376.0),
    ];

    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// The three boxes for a canvas of `canvas_size` pixels.
    pub fn for_canvas(canvas_size: u32) -> [FinderRegion; 3] {
        let factor = canvas_size as f32 / CANONICAL_CANVAS as f32;
        Self::CANONICAL.map(|r| r.scaled(factor))
    }

    pub fn scaled(self, factor: f32) -> Self {
        Self::new(
            self.left * factor,
            self.top * factor,
            self.right * factor,
            self.bottom * factor,
        )
    }

    #[inline]
    pub fn contains(&self, x: u32, y: u32) -> bool {
        let (x, y) = (x as f32, y as f32);
        x >= self.left && x <= self.right && y >= self.top && y <= self.bottom
    }
}

/// Final opaque RGBA bitmap produced by one render call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyledImage {
    image: RgbaImage,
}

impl StyledImage {
    pub(crate) fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    #[inline]
    pub fn side(&self) -> u32 {
        self.image.width()
    }

    /// Color at `(x, y)`. Panics when out of bounds, like `RgbaImage`.
    pub fn pixel(&self, x: u32, y: u32) -> Color {
        Color::from(*self.image.get_pixel(x, y))
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}
