use super::geometry::{cell_center, disc_covers, disc_span};
use super::{FinderRegion, RasterImage, StyledImage};
use crate::config::RenderConfig;
use crate::error::GenerationError;
use crate::style::{DotStyle, StylePreset};
use image::{Rgba, RgbaImage};

/// Re-renders a QR raster as dots with accent corner blocks.
///
/// ## Example
///
/// ```
/// use dotqr::config::RenderConfig;
/// use dotqr::render::{DotRenderer, RasterImage};
/// use dotqr::style;
///
/// let raster = RasterImage::from_fn(400, |x, y| (x / 16 + y / 16) % 2 == 0);
/// let styled = DotRenderer::default()
///     .render(&raster, style::lookup("slate-ember").unwrap())
///     .unwrap();
/// assert_eq!(styled.side(), 400);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DotRenderer {
    config: RenderConfig,
}

impl DotRenderer {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Render `raster` under `style` into a fresh bitmap.
    pub fn render(
        &self,
        raster: &RasterImage,
        style: &StylePreset,
    ) -> Result<StyledImage, GenerationError> {
        self.config.validate()?;
        let side = self.config.canvas_size;
        if raster.side() != side {
            return Err(GenerationError::RenderDecode(format!(
                "raster is {0}x{0}, canvas is {1}x{1}",
                raster.side(),
                side
            )));
        }

        let stride = self.config.stride;
        let regions = FinderRegion::for_canvas(side);
        let accent = style.accent_color.to_rgba();
        let module = style.module_color.to_rgba();

        let mut canvas = RgbaImage::from_pixel(side, side, style.background_color.to_rgba());
        let (mut blocks, mut dots) = (0usize, 0usize);

        for y in (0..side).step_by(stride as usize) {
            for x in (0..side).step_by(stride as usize) {
                if !raster.is_dark(x, y) {
                    continue;
                }

                if regions.iter().any(|r| r.contains(x, y)) {
                    fill_cell(&mut canvas, x, y, stride, accent);
                    blocks += 1;
                    continue;
                }

                match style.dot_style {
                    DotStyle::Dots => fill_disc(
                        &mut canvas,
                        cell_center(x, stride),
                        cell_center(y, stride),
                        self.config.dot_radius,
                        module,
                    ),
                    DotStyle::Squares => fill_cell(&mut canvas, x, y, stride, module),
                }
                dots += 1;
            }
        }

        tracing::debug!(style = %style.id, blocks, dots, "rendered styled QR");
        Ok(StyledImage::new(canvas))
    }
}

/// Fill the `stride × stride` cell at `(x, y)`, clipped to the canvas.
fn fill_cell(canvas: &mut RgbaImage, x: u32, y: u32, stride: u32, color: Rgba<u8>) {
    let x_end = (x + stride).min(canvas.width());
    let y_end = (y + stride).min(canvas.height());
    for py in y..y_end {
        for px in x..x_end {
            canvas.put_pixel(px, py, color);
        }
    }
}

fn fill_disc(canvas: &mut RgbaImage, cx: f32, cy: f32, radius: f32, color: Rgba<u8>) {
    let (x0, x1) = disc_span(cx, radius, canvas.width());
    let (y0, y1) = disc_span(cy, radius, canvas.height());
    for py in y0..y1 {
        for px in x0..x1 {
            if disc_covers(px, py, cx, cy, radius) {
                canvas.put_pixel(px, py, color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::style::{self, Color};

    fn slate_ember() -> &'static StylePreset {
        style::lookup("slate-ember").unwrap()
    }

    #[test]
    fn test_all_light_is_background() {
        let raster = RasterImage::from_fn(400, |_, _| false);
        let styled = DotRenderer::default().render(&raster, slate_ember()).unwrap();
        let bg = slate_ember().background_color.to_rgba();
        assert!(styled.as_image().pixels().all(|px| *px == bg));
    }

    #[test]
    fn test_all_dark() {
        let style = slate_ember();
        let raster = RasterImage::from_fn(400, |_, _| true);
        let styled = DotRenderer::default().render(&raster, style).unwrap();

        // Corner box cell is a solid accent block
        for (x, y) in [(24, 24), (27, 27), (96, 96), (99, 99), (304, 24), (24, 376)] {
            assert_eq!(styled.pixel(x, y), style.accent_color, "at ({x}, {y})");
        }
        // Outside: dot in the middle, background at the cell corners
        assert_eq!(styled.pixel(202, 202), style.module_color);
        assert_eq!(styled.pixel(201, 201), style.module_color);
        assert_eq!(styled.pixel(200, 200), style.background_color);
        assert_eq!(styled.pixel(203, 203), style.background_color);
        // Quiet zone cells are dotted too when dark
        assert_eq!(styled.pixel(2, 2), style.module_color);
        assert_eq!(styled.pixel(0, 0), style.background_color);
    }

    #[test]
    fn test_only_sampled_pixel_matters() {
        // Dark everywhere except the cell origins: nothing is drawn
        let raster = RasterImage::from_fn(400, |x, y| x % 4 != 0 || y % 4 != 0);
        let styled = DotRenderer::default().render(&raster, slate_ember()).unwrap();
        let bg = slate_ember().background_color.to_rgba();
        assert!(styled.as_image().pixels().all(|px| *px == bg));
    }

    #[test]
    fn test_squares_style() {
        let mut style = slate_ember().clone();
        style.dot_style = DotStyle::Squares;
        let raster = RasterImage::from_fn(400, |_, _| true);
        let styled = DotRenderer::default().render(&raster, &style).unwrap();
        assert_eq!(styled.pixel(200, 200), style.module_color);
        assert_eq!(styled.pixel(203, 203), style.module_color);
    }

    #[test]
    fn test_custom_geometry() {
        let config = RenderConfig {
            canvas_size: 200,
            stride: 5,
            dot_radius: 2.5,
            ..RenderConfig::default()
        };
        let style = slate_ember();
        let raster = RasterImage::from_fn(200, |_, _| true);
        let styled = DotRenderer::new(config).render(&raster, style).unwrap();

        assert_eq!(styled.side(), 200);
        // Corner boxes shrink to (12,12)-(48,48)
        assert_eq!(styled.pixel(15, 15), style.accent_color);
        assert_eq!(styled.pixel(102, 102), style.module_color);
        assert_eq!(styled.pixel(100, 100), style.background_color);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let raster = RasterImage::from_fn(400, |_, _| true);
        for config in [
            RenderConfig {
                stride: 0,
                ..RenderConfig::default()
            },
            RenderConfig {
                dot_radius: f32::NAN,
                ..RenderConfig::default()
            },
        ] {
            assert!(matches!(
                DotRenderer::new(config).render(&raster, slate_ember()),
                Err(GenerationError::Config(_))
            ));
        }
    }

    #[test]
    fn test_side_mismatch() {
        let raster = RasterImage::from_fn(100, |_, _| true);
        assert!(matches!(
            DotRenderer::default().render(&raster, slate_ember()),
            Err(GenerationError::RenderDecode(_))
        ));
    }

    #[test]
    fn test_fill_disc_clips_at_edges() {
        let mut canvas = RgbaImage::from_pixel(4, 4, Color::BLACK.to_rgba());
        fill_disc(&mut canvas, 0.0, 0.0, 3.0, Color::WHITE.to_rgba());
        assert_eq!(*canvas.get_pixel(0, 0), Color::WHITE.to_rgba());
        assert_eq!(*canvas.get_pixel(3, 3), Color::BLACK.to_rgba());
    }
}
