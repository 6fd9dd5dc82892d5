// ============================================================================
// Target selection and exhaustive exemplar search
// ============================================================================

use image::RgbaImage;

use super::error::InpaintError;
use super::mask::DamageMask;
use super::priority::Priority;
use super::window::Window;

/// Window around the boundary pixel with the LOWEST score.
///
/// Ties go to the earliest entry, i.e. boundary scan order. Note this is
/// the opposite of the usual highest-priority-first fill order.
pub fn select_target(priorities: &[Priority], radius: u32, width: u32, height: u32) -> Option<Window> {
    let mut best: Option<&Priority> = None;
    for p in priorities {
        if best.is_none_or(|b| p.score < b.score) {
            best = Some(p);
        }
    }
    best.map(|p| Window::new(p.coord.0, p.coord.1, radius, width, height))
}

/// No pixel of the window is damaged.
pub fn is_fully_known(mask: &DamageMask, window: &Window) -> bool {
    window.coords().all(|(x, y)| !mask.is_damaged_at(x, y))
}

/// Masked SSD between two windows over RGB.
///
/// Only offsets inside both windows' extents count, and an offset is skipped
/// when either side of it is damaged.
pub fn patch_distance(src: &RgbaImage, mask: &DamageMask, a: &Window, b: &Window) -> u64 {
    let mut ssd = 0u64;
    for (dx, dy) in a.shared_offsets(b) {
        let (ax, ay) = a.at(dx, dy);
        let (bx, by) = b.at(dx, dy);
        if mask.is_damaged(ax, ay) || mask.is_damaged(bx, by) {
            continue;
        }
        let pa = src.get_pixel(ax as u32, ay as u32);
        let pb = src.get_pixel(bx as u32, by as u32);
        for c in 0..3usize {
            let d = pa.0[c] as i64 - pb.0[c] as i64;
            ssd += (d * d) as u64;
        }
    }
    ssd
}

/// Best fully known, unclipped window of `radius` for `target`.
///
/// Candidates are visited row-major over centres in
/// `[radius, width - radius) x [radius, height - radius)`; the first one
/// reaching the minimum distance wins.
pub fn find_exemplar(
    src: &RgbaImage,
    mask: &DamageMask,
    target: &Window,
    radius: u32,
) -> Result<Window, InpaintError> {
    let (w, h) = src.dimensions();
    let mut best: Option<(Window, u64)> = None;

    for y in radius..h.saturating_sub(radius) {
        for x in radius..w.saturating_sub(radius) {
            let candidate = Window::new(x, y, radius, w, h);
            if !is_fully_known(mask, &candidate) {
                continue;
            }
            let d = patch_distance(src, mask, &candidate, target);
            if best.is_none_or(|(_, best_d)| d < best_d) {
                best = Some((candidate, d));
            }
        }
    }

    best.map(|(window, _)| window)
        .ok_or(InpaintError::DegenerateSearch { radius })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mask_with_points, mask_with_rect, solid};
    use image::Rgba;

    fn prio(coord: (u32, u32), score: f64) -> Priority {
        Priority {
            coord,
            confidence: 1.0,
            data: score,
            score,
        }
    }

    #[test]
    fn lowest_score_wins_and_ties_keep_scan_order() {
        let ps = [
            prio((3, 1), 0.4),
            prio((4, 1), 0.1),
            prio((1, 2), 0.1),
            prio((2, 2), 0.9),
        ];
        let target = select_target(&ps, 1, 8, 8).expect("non-empty");
        assert_eq!((target.x, target.y), (4, 1));
        assert!(select_target(&[], 1, 8, 8).is_none());
    }

    #[test]
    fn distance_ignores_damaged_offsets() {
        let mut src = solid(7, 7, [50, 50, 50, 255]);
        src.put_pixel(3, 3, Rgba([255, 0, 0, 255]));
        let mask = mask_with_points(7, 7, &[(3, 3)]);
        let target = Window::new(3, 3, 1, 7, 7);
        let other = Window::new(1, 1, 1, 7, 7);
        assert_eq!(patch_distance(&src, &mask, &target, &other), 0);

        src.put_pixel(0, 0, Rgba([60, 50, 50, 255]));
        // (0,0) pairs with offset (-1,-1) of the target, i.e. (2,2)
        assert_eq!(patch_distance(&src, &mask, &other, &target), 100);
    }

    #[test]
    fn distance_uses_only_the_overlap_of_clipped_windows() {
        let src = solid(6, 6, [0, 0, 0, 255]);
        let mask = DamageMask::new(6, 6);
        let corner = Window::new(0, 0, 2, 6, 6);
        let interior = Window::new(3, 3, 2, 6, 6);
        let mut bright = src.clone();
        // (1,3) is offset (-2,0) of the interior window; the corner has no left extent
        bright.put_pixel(1, 3, Rgba([255, 255, 255, 255]));
        assert_eq!(patch_distance(&bright, &mask, &corner, &interior), 0);
    }

    #[test]
    fn exemplar_is_fully_known_and_best_matching() {
        // dark image with one bright 3x3 block; hole next to another bright area
        let mut src = solid(9, 9, [0, 0, 0, 255]);
        for y in 5..8 {
            for x in 5..8 {
                src.put_pixel(x, y, Rgba([200, 200, 200, 255]));
            }
        }
        for x in 0..3 {
            src.put_pixel(x, 1, Rgba([200, 200, 200, 255]));
            src.put_pixel(x, 0, Rgba([200, 200, 200, 255]));
            src.put_pixel(x, 2, Rgba([200, 200, 200, 255]));
        }
        let mask = mask_with_points(9, 9, &[(1, 1)]);
        let target = Window::new(1, 1, 1, 9, 9);
        let found = find_exemplar(&src, &mask, &target, 1).expect("candidates exist");
        assert!(is_fully_known(&mask, &found));
        assert!(found.is_full(1));
        assert_eq!((found.x, found.y), (6, 6));
    }

    #[test]
    fn exemplar_never_overlaps_damage() {
        let src = solid(6, 6, [10, 10, 10, 255]);
        let mask = mask_with_rect(6, 6, 0, 0, 3, 6);
        let target = Window::new(3, 3, 1, 6, 6);
        let found = find_exemplar(&src, &mask, &target, 1).expect("columns 3..6 are known");
        assert!(is_fully_known(&mask, &found));
        // only centres in column 4 fit; all tie at zero, first row wins
        assert_eq!((found.x, found.y), (4, 1));
    }

    #[test]
    fn fully_damaged_image_is_degenerate() {
        let src = solid(5, 5, [0, 0, 0, 255]);
        let mask = mask_with_rect(5, 5, 0, 0, 5, 5);
        let target = Window::new(0, 0, 1, 5, 5);
        assert_eq!(
            find_exemplar(&src, &mask, &target, 1),
            Err(InpaintError::DegenerateSearch { radius: 1 })
        );
    }

    #[test]
    fn radius_larger_than_image_is_degenerate() {
        let src = solid(4, 4, [0, 0, 0, 255]);
        let mask = DamageMask::new(4, 4);
        let target = Window::new(1, 1, 2, 4, 4);
        assert!(find_exemplar(&src, &mask, &target, 2).is_err());
    }
}
