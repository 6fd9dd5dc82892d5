use super::mask::DamageMask;
use super::window::Window;

/// Dense per-pixel confidence in `[0, 1]`.
///
/// Starts at 1 for known pixels and 0 for damaged ones. Known entries never
/// change afterwards; damaged entries are overwritten once, when the patch
/// covering them is filled.
#[derive(Clone, Debug)]
pub struct ConfidenceMap {
    width: u32,
    values: Vec<f64>,
}

impl ConfidenceMap {
    pub fn from_mask(mask: &DamageMask) -> Self {
        let (width, height) = mask.dimensions();
        let values = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| if mask.is_damaged_at(x, y) { 0.0 } else { 1.0 })
            .collect();
        Self { width, values }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.values[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, value: f64) {
        let idx = self.index(x, y);
        self.values[idx] = value;
    }

    /// Sum of confidence over the window's currently known pixels, and how
    /// many such pixels there were.
    pub fn known_sum(&self, window: &Window, mask: &DamageMask) -> (f64, usize) {
        window
            .coords()
            .filter(|&(x, y)| !mask.is_damaged_at(x, y))
            .fold((0.0, 0), |(sum, n), (x, y)| (sum + self.get(x, y), n + 1))
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::mask_with_points;
    use approx::assert_abs_diff_eq;

    #[test]
    fn initialised_from_damage() {
        let mask = mask_with_points(3, 3, &[(1, 1), (2, 0)]);
        let conf = ConfidenceMap::from_mask(&mask);
        assert_eq!(conf.get(1, 1), 0.0);
        assert_eq!(conf.get(2, 0), 0.0);
        assert_eq!(conf.get(0, 0), 1.0);
        assert_eq!(conf.values().iter().filter(|&&v| v == 1.0).count(), 7);
    }

    #[test]
    fn known_sum_skips_damaged_pixels() {
        let mask = mask_with_points(3, 3, &[(1, 1)]);
        let mut conf = ConfidenceMap::from_mask(&mask);
        conf.set(0, 0, 0.5);
        let (sum, n) = conf.known_sum(&Window::new(1, 1, 1, 3, 3), &mask);
        assert_eq!(n, 8);
        assert_abs_diff_eq!(sum, 7.5);
    }
}
