use super::mask::DamageMask;

/// The fill front, in row-major scan order.
///
/// Order matters: priority scoring treats list neighbours as contour
/// neighbours when estimating the tangent.
pub type Boundary = Vec<(u32, u32)>;

const NEIGHBOURS_4: [(i64, i64); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Damaged, with at least one known 4-neighbour. Off-canvas counts as known,
/// so damage touching the image edge is always on the front.
#[inline]
pub fn is_fill_front(mask: &DamageMask, x: u32, y: u32) -> bool {
    if !mask.is_damaged_at(x, y) {
        return false;
    }
    let (x, y) = (x as i64, y as i64);
    NEIGHBOURS_4
        .iter()
        .any(|&(dx, dy)| !mask.is_damaged(x + dx, y + dy))
}

/// Full-grid scan for the current fill front.
pub fn extract_boundary(mask: &DamageMask) -> Boundary {
    let (w, h) = mask.dimensions();
    (0..h)
        .flat_map(|y| (0..w).map(move |x| (x, y)))
        .filter(|&(x, y)| is_fill_front(mask, x, y))
        .collect()
}
