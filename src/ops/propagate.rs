use image::RgbaImage;

use super::confidence::ConfidenceMap;
use super::mask::DamageMask;
use super::window::Window;

/// Copy exemplar pixels into every damaged offset of `target`.
///
/// `exemplar` must be an unclipped window of at least the target's radius,
/// so every target offset has a source. Returns the number of pixels written.
/// The mask is left untouched; [`update_confidence`] clears it afterwards.
pub fn propagate(src: &mut RgbaImage, mask: &DamageMask, exemplar: &Window, target: &Window) -> usize {
    let mut copied = 0;
    for (dx, dy) in target.offsets() {
        let (tx, ty) = target.at(dx, dy);
        if !mask.is_damaged(tx, ty) {
            continue;
        }
        let (ex, ey) = exemplar.at(dx, dy);
        let px = *src.get_pixel(ex as u32, ey as u32);
        src.put_pixel(tx as u32, ty as u32, px);
        copied += 1;
    }
    copied
}

/// Give every damaged pixel of `target` the window's current mean confidence
/// and mark it known. Returns `(mean, cleared)`.
///
/// The mean is taken before anything is cleared: known-pixel confidence
/// summed, divided by the full window area.
pub fn update_confidence(
    confidence: &mut ConfidenceMap,
    mask: &mut DamageMask,
    target: &Window,
) -> (f64, usize) {
    let (sum, _) = confidence.known_sum(target, mask);
    let mean = sum / target.area() as f64;

    let mut cleared = 0;
    for (x, y) in target.coords() {
        if mask.is_damaged_at(x, y) {
            confidence.set(x, y, mean);
            mask.set_damaged(x, y, false);
            cleared += 1;
        }
    }
    (mean, cleared)
}
