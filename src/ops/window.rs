/// A rectangular neighbourhood around `(x, y)`, clipped to the grid.
///
/// Each of the four extents is clipped independently, so a window near a
/// corner is not square. Extents never exceed the radius it was built with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Window {
    pub x: u32,
    pub y: u32,
    pub left: u32,
    pub right: u32,
    pub up: u32,
    pub down: u32,
}

impl Window {
    /// `(x, y)` must lie inside the `width` x `height` grid.
    pub fn new(x: u32, y: u32, radius: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            left: radius.min(x),
            right: radius.min(width.saturating_sub(x + 1)),
            up: radius.min(y),
            down: radius.min(height.saturating_sub(y + 1)),
        }
    }

    pub fn width(&self) -> u32 {
        self.left + self.right + 1
    }

    pub fn height(&self) -> u32 {
        self.up + self.down + 1
    }

    pub fn area(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// No clipping happened on any side.
    pub fn is_full(&self, radius: u32) -> bool {
        self.left == radius && self.right == radius && self.up == radius && self.down == radius
    }

    /// Grid coordinates covered by the window, row-major.
    pub fn coords(&self) -> impl Iterator<Item = (u32, u32)> {
        let (x0, x1) = (self.x - self.left, self.x + self.right);
        let (y0, y1) = (self.y - self.up, self.y + self.down);
        (y0..=y1).flat_map(move |y| (x0..=x1).map(move |x| (x, y)))
    }

    /// Offsets from the centre covered by the window, row-major.
    pub fn offsets(&self) -> impl Iterator<Item = (i64, i64)> {
        let (left, right) = (self.left as i64, self.right as i64);
        let (up, down) = (self.up as i64, self.down as i64);
        (-up..=down).flat_map(move |dy| (-left..=right).map(move |dx| (dx, dy)))
    }

    /// Offsets valid in both `self` and `other` (the per-side minimum extents).
    pub fn shared_offsets(&self, other: &Window) -> impl Iterator<Item = (i64, i64)> {
        let left = self.left.min(other.left) as i64;
        let right = self.right.min(other.right) as i64;
        let up = self.up.min(other.up) as i64;
        let down = self.down.min(other.down) as i64;
        (-up..=down).flat_map(move |dy| (-left..=right).map(move |dx| (dx, dy)))
    }

    /// Absolute coordinate of an offset from the centre.
    #[inline]
    pub fn at(&self, dx: i64, dy: i64) -> (i64, i64) {
        (self.x as i64 + dx, self.y as i64 + dy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn interior_window_is_square() {
        let w = Window::new(5, 5, 2, 10, 10);
        assert!(w.is_full(2));
        assert_eq!((w.width(), w.height(), w.area()), (5, 5, 25));
    }

    #[test]
    fn corner_window_clips_each_side_independently() {
        let w = Window::new(0, 9, 3, 10, 10);
        assert_eq!((w.left, w.right, w.up, w.down), (0, 3, 3, 0));
        assert_eq!((w.width(), w.height()), (4, 4));
        assert_eq!(w.area(), 16);
        assert!(!w.is_full(3));

        let w = Window::new(1, 0, 2, 3, 1);
        assert_eq!((w.left, w.right, w.up, w.down), (1, 1, 0, 0));
        assert_eq!(w.area(), 3);
    }

    #[test]
    fn coords_and_offsets_agree() {
        let w = Window::new(1, 1, 1, 4, 3);
        let coords: Vec<_> = w.coords().collect();
        let from_offsets: Vec<_> = w
            .offsets()
            .map(|(dx, dy)| {
                let (x, y) = w.at(dx, dy);
                (x as u32, y as u32)
            })
            .collect();
        assert_eq!(coords.len(), w.area());
        assert_eq!(coords, from_offsets);
        assert_eq!(coords.first(), Some(&(0, 0)));
        assert_eq!(coords.last(), Some(&(2, 2)));
    }

    #[test]
    fn shared_offsets_use_the_tighter_extent_per_side() {
        let edge = Window::new(0, 2, 2, 10, 10);
        let interior = Window::new(5, 5, 2, 10, 10);
        let shared: Vec<_> = edge.shared_offsets(&interior).collect();
        // left clipped to 0, right 2, up 2, down 2
        assert_eq!(shared.len(), 3 * 5);
        assert!(shared.iter().all(|&(dx, _)| dx >= 0));
    }
}
