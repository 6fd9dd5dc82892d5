// ============================================================================
// Damage mask: which pixels of the grid still need synthesizing
// ============================================================================

use image::{GrayImage, Luma, RgbaImage};

/// Per-pixel damage flags, same dimensions as the image being repaired.
///
/// Backed by a `GrayImage` where any non-zero value marks a hole pixel.
/// Every neighbourhood probe goes through [`DamageMask::is_damaged`], which
/// reports off-canvas coordinates as known, so window, boundary and gradient
/// code never needs its own edge checks.
#[derive(Clone, Debug, PartialEq)]
pub struct DamageMask {
    flags: GrayImage,
}

impl DamageMask {
    /// A fully known mask (nothing to repair).
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            flags: GrayImage::new(width, height),
        }
    }

    /// Damaged = alpha channel of the mask image is non-zero.
    pub fn from_alpha(mask: &RgbaImage) -> Self {
        let (w, h) = mask.dimensions();
        let flags = GrayImage::from_fn(w, h, |x, y| {
            if mask.get_pixel(x, y).0[3] != 0 {
                Luma([255u8])
            } else {
                Luma([0u8])
            }
        });
        Self { flags }
    }

    /// Wrap an existing hole mask (>0 = damaged).
    pub fn from_gray(flags: GrayImage) -> Self {
        Self { flags }
    }

    pub fn width(&self) -> u32 {
        self.flags.width()
    }

    pub fn height(&self) -> u32 {
        self.flags.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.flags.dimensions()
    }

    /// `false` for anything outside `[0, width) x [0, height)`.
    #[inline]
    pub fn is_damaged(&self, x: i64, y: i64) -> bool {
        if x < 0 || y < 0 || x >= self.width() as i64 || y >= self.height() as i64 {
            return false;
        }
        self.flags.get_pixel(x as u32, y as u32).0[0] != 0
    }

    #[inline]
    pub fn is_damaged_at(&self, x: u32, y: u32) -> bool {
        self.is_damaged(x as i64, y as i64)
    }

    /// Flag or unflag an in-bounds pixel. Out-of-bounds writes are ignored.
    pub fn set_damaged(&mut self, x: u32, y: u32, damaged: bool) {
        if let Some(px) = self.flags.get_pixel_mut_checked(x, y) {
            *px = Luma([if damaged { 255 } else { 0 }]);
        }
    }

    /// Number of pixels still flagged.
    pub fn damaged_count(&self) -> usize {
        self.flags.as_raw().iter().filter(|&&v| v != 0).count()
    }

    /// `true` once nothing is left to fill.
    pub fn is_clear(&self) -> bool {
        self.flags.as_raw().iter().all(|&v| v == 0)
    }
}
