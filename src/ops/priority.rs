// ============================================================================
// Fill-order priority: confidence term x data (isophote) term
// ============================================================================

use glam::DVec2;
use image::{Rgba, RgbaImage};

use super::boundary::Boundary;
use super::confidence::ConfidenceMap;
use super::mask::DamageMask;
use super::window::Window;

/// Largest channel value; normalises the data term.
pub const CHANNEL_MAX: f64 = 255.0;

/// Score for one fill-front pixel.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Priority {
    pub coord: (u32, u32),
    /// Mean known confidence over the patch window.
    pub confidence: f64,
    /// |isophote . normal| / 255.
    pub data: f64,
    /// `confidence * data`, or 0 for a window with no known pixel.
    pub score: f64,
}

/// Score every boundary pixel. The result is index-aligned with `boundary`.
pub fn compute_priorities(
    src: &RgbaImage,
    mask: &DamageMask,
    confidence: &ConfidenceMap,
    boundary: &Boundary,
    radius: u32,
) -> Vec<Priority> {
    let (w, h) = src.dimensions();
    boundary
        .iter()
        .enumerate()
        .map(|(i, &(x, y))| {
            let window = Window::new(x, y, radius, w, h);
            let (sum, known) = confidence.known_sum(&window, mask);
            let area = window.area();
            if area == 0 || known == 0 {
                return Priority {
                    coord: (x, y),
                    confidence: 0.0,
                    data: 0.0,
                    score: 0.0,
                };
            }
            let conf = sum / area as f64;

            let normal = boundary_tangent(boundary, i).perp();
            let isophote = window_gradient(src, mask, &window).perp();
            let data = isophote.dot(normal).abs() / CHANNEL_MAX;

            Priority {
                coord: (x, y),
                confidence: conf,
                data,
                score: conf * data,
            }
        })
        .collect()
}

/// `next - prev` where prev/next are the list neighbours of entry `index`,
/// wrapping at both ends. Scan order is not a traced contour, so this is only
/// a rough tangent where the front is a straight row or column.
pub fn boundary_tangent(boundary: &[(u32, u32)], index: usize) -> DVec2 {
    let n = boundary.len();
    if n == 0 {
        return DVec2::ZERO;
    }
    let prev = boundary[(index + n - 1) % n];
    let next = boundary[(index + 1) % n];
    DVec2::new(
        next.0 as f64 - prev.0 as f64,
        next.1 as f64 - prev.1 as f64,
    )
}

/// Component-wise maximum of the per-pixel gradients over the window's known
/// pixels, starting from zero.
pub fn window_gradient(src: &RgbaImage, mask: &DamageMask, window: &Window) -> DVec2 {
    window
        .coords()
        .filter(|&(x, y)| !mask.is_damaged_at(x, y))
        .map(|(x, y)| pixel_gradient(src, mask, x, y))
        .fold(DVec2::ZERO, DVec2::max)
}

/// Central difference between the nearest known pixels on each side of
/// `(x, y)`, averaged over R, G and B. A side that runs off the grid
/// samples as zero.
pub fn pixel_gradient(src: &RgbaImage, mask: &DamageMask, x: u32, y: u32) -> DVec2 {
    let sample = |dx: i64, dy: i64| nearest_known(src, mask, x, y, dx, dy).unwrap_or(Rgba([0; 4]));
    let (west, east) = (sample(-1, 0), sample(1, 0));
    let (north, south) = (sample(0, -1), sample(0, 1));

    let mut g = DVec2::ZERO;
    for c in 0..3 {
        g.x += east.0[c] as f64 - west.0[c] as f64;
        g.y += south.0[c] as f64 - north.0[c] as f64;
    }
    g / 3.0
}

/// Walk from `(x, y)` in steps of `(dx, dy)` until a known pixel is found.
fn nearest_known(
    src: &RgbaImage,
    mask: &DamageMask,
    x: u32,
    y: u32,
    dx: i64,
    dy: i64,
) -> Option<Rgba<u8>> {
    let (w, h) = (src.width() as i64, src.height() as i64);
    let (mut cx, mut cy) = (x as i64 + dx, y as i64 + dy);
    while cx >= 0 && cy >= 0 && cx < w && cy < h {
        if !mask.is_damaged(cx, cy) {
            return Some(*src.get_pixel(cx as u32, cy as u32));
        }
        cx += dx;
        cy += dy;
    }
    None
}
