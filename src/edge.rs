// Edge pass: compare every pixel with its right-and-below neighbor and paint
// the edges a solid color. Non-edge pixels get the sampler's substitute color.
// Visual: the bold cartoon outlines over the stylized frame.

use crate::sampler::DownSampler;
use crate::types::{read_color, write_color, Color};

/// Neighbor used for the gradient test: one step right and one step down,
/// clamped to the pixel itself on the last column/row.
#[inline]
pub fn neighbor(x: usize, y: usize, width: usize, height: usize) -> (usize, usize) {
    let x2 = if x + 1 >= width { x } else { x + 1 };
    let y2 = if y + 1 >= height { y } else { y + 1 };
    (x2, y2)
}

/// Simplified gradient between two colors: sqrt(dR² + dG² + 2·dB), in double
/// precision.
///
/// Blue enters linearly, not squared, so the metric is not symmetric in its
/// arguments and the radicand can go negative. A negative radicand has no
/// metric (`None`), which `is_edge` treats as "not an edge".
#[inline]
pub fn edge_metric(c1: Color, c2: Color) -> Option<f64> {
    let dr = c1.r as i32 - c2.r as i32;
    let dg = c1.g as i32 - c2.g as i32;
    let db = c1.b as i32 - c2.b as i32;
    let radicand = dr * dr + dg * dg + (db + db);
    if radicand < 0 {
        return None;
    }
    Some((radicand as f64).sqrt())
}

/// The threshold is widened to f64 before comparing.
#[inline]
pub fn is_edge(c1: Color, c2: Color, threshold: f32) -> bool {
    edge_metric(c1, c2).is_some_and(|m| m >= threshold as f64)
}

/// Output color for (x, y): the edge color, or the sampler's substitute.
#[inline]
fn toon_pixel(
    source: &[u8],
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    stride: usize,
    threshold: f32,
    edge_color: Color,
    sampler: &mut DownSampler,
) -> Color {
    let current = read_color(source, x, y, stride);
    let sample = sampler.sample_pixel(x, y, current);
    let (x2, y2) = neighbor(x, y, width, height);
    let next = read_color(source, x2, y2, stride);

    if is_edge(current, next, threshold) { edge_color } else { sample }
}

/// Run the edge pass from `source` into a separate `destination`.
///
/// Both buffers are BGRA with the given `stride` and must hold at least
/// `height * stride` bytes. Pixels are visited column by column (outer x,
/// inner y); the order matters for the cell-blur samplers, whose seed pixel
/// is the first one visited in each cell.
pub fn detect(
    source: &[u8],
    destination: &mut [u8],
    width: usize,
    height: usize,
    stride: usize,
    threshold: f32,
    edge_color: Color,
    sampler: &mut DownSampler,
) {
    for x in 0..width {
        for y in 0..height {
            let out =
                toon_pixel(source, x, y, width, height, stride, threshold, edge_color, sampler);
            write_color(destination, x, y, stride, out);
        }
    }
}

/// Same pass with one buffer as both source and destination.
///
/// Safe without a snapshot because of the column-major order: the neighbor
/// (x+1, y+1), or its clamped form, is always visited after (x, y), so it is
/// still the original pixel when read. Any reordering needs `detect` on a copy.
pub fn detect_in_place(
    buffer: &mut [u8],
    width: usize,
    height: usize,
    stride: usize,
    threshold: f32,
    edge_color: Color,
    sampler: &mut DownSampler,
) {
    for x in 0..width {
        for y in 0..height {
            let out =
                toon_pixel(buffer, x, y, width, height, stride, threshold, edge_color, sampler);
            write_color(buffer, x, y, stride, out);
        }
    }
}
