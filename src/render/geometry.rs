//! Pixel geometry for the dot renderer.

/// Squared Euclidean distance (avoids sqrt for comparisons).
#[inline]
pub fn dist_sq(x: f32, y: f32, cx: f32, cy: f32) -> f32 {
    let dx = x - cx;
    let dy = y - cy;
    dx * dx + dy * dy
}

/// Centre of the grid cell whose top-left corner is `origin`.
#[inline]
pub fn cell_center(origin: u32, stride: u32) -> f32 {
    origin as f32 + stride as f32 / 2.0
}

/// Whether pixel `(px, py)` belongs to the disc of `radius` around `(cx, cy)`.
///
/// A pixel is covered when its centre `(px + 0.5, py + 0.5)` lies inside
/// or on the circle. Hard edge, no anti-aliasing.
#[inline]
pub fn disc_covers(px: u32, py: u32, cx: f32, cy: f32, radius: f32) -> bool {
    dist_sq(px as f32 + 0.5, py as f32 + 0.5, cx, cy) <= radius * radius
}

/// Half-open pixel span `[start, end)` that can touch a disc, clipped to `limit`.
#[inline]
pub fn disc_span(center: f32, radius: f32, limit: u32) -> (u32, u32) {
    let start = (center - radius).floor().max(0.0) as u32;
    let end = ((center + radius).ceil().max(0.0) as u32).min(limit);
    (start.min(end), end)
}
