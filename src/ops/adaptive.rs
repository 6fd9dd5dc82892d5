// ============================================================================
// Adaptive interpolation fill (local mean with coverage thresholds)
// ============================================================================
//
// For each hole pixel, grow a square neighbourhood until it holds enough
// known pixels, then fill with their mean. Neighbourhoods that are almost
// entirely hole fall back to the image-wide mean. Only pixels known in the
// original mask are ever sampled, so the result does not depend on fill order.

use std::cell::OnceCell;

use image::{Rgba, RgbaImage};

use super::error::InpaintError;
use super::exemplar::{InpaintReport, check_dimensions};
use super::mask::DamageMask;
use super::window::Window;

/// Minimum known-pixel percentage, per neighbourhood half-size.
const MU_THRESHOLDS: [u32; 11] = [0, 7, 8, 9, 10, 12, 14, 16, 18, 20, 22];
/// Hole percentage above which an all-hole neighbourhood keeps growing.
const LAMBDA_THRESHOLDS: [u32; 11] = [0, 20, 22, 24, 26, 28, 30, 32, 34, 36, 38];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AdaptiveConfig {
    /// Largest neighbourhood half-size tried before using the global mean.
    pub max_distance: usize,
}

impl Default for AdaptiveConfig {
    fn default() -> Self {
        Self {
            max_distance: MU_THRESHOLDS.len() - 1,
        }
    }
}

struct Coverage {
    /// Percent of the neighbourhood that is known, truncated.
    mu: u32,
    /// Percent of the neighbourhood that is damaged, truncated.
    lambda: u32,
}

pub struct AdaptiveInpainter<'a> {
    src: &'a mut RgbaImage,
    mask: &'a DamageMask,
    max_distance: usize,
    /// Computed on first use, lives for this run only.
    global_mean: OnceCell<Rgba<u8>>,
}

impl<'a> AdaptiveInpainter<'a> {
    pub fn new(
        src: &'a mut RgbaImage,
        mask: &'a DamageMask,
        config: &AdaptiveConfig,
    ) -> Result<Self, InpaintError> {
        check_dimensions(src, mask)?;
        Ok(Self {
            src,
            mask,
            max_distance: config.max_distance.min(MU_THRESHOLDS.len() - 1),
            global_mean: OnceCell::new(),
        })
    }

    pub fn run(mut self) -> InpaintReport {
        let (w, h) = self.src.dimensions();
        log::info!(
            "adaptive inpaint: {}x{} image, {} damaged pixels",
            w,
            h,
            self.mask.damaged_count()
        );
        let mut filled = 0;
        for y in 0..h {
            for x in 0..w {
                if !self.mask.is_damaged_at(x, y) {
                    continue;
                }
                let px = self.interpolate(x, y);
                self.src.put_pixel(x, y, px);
                filled += 1;
            }
        }
        log::info!("adaptive inpaint finished: {} pixels filled", filled);
        InpaintReport {
            passes: usize::from(filled > 0),
            filled_pixels: filled,
        }
    }

    fn interpolate(&self, x: u32, y: u32) -> Rgba<u8> {
        for dis in 1..=self.max_distance {
            let window = self.neighbourhood(x, y, dis);
            let cov = self.coverage(&window);
            if cov.mu != 0 {
                if cov.mu > MU_THRESHOLDS[dis] {
                    return self.local_mean(&window);
                }
            } else if cov.lambda <= LAMBDA_THRESHOLDS[dis] {
                return self.global_mean();
            }
        }
        self.global_mean()
    }

    fn neighbourhood(&self, x: u32, y: u32, dis: usize) -> Window {
        let (w, h) = self.src.dimensions();
        Window::new(x, y, dis as u32, w, h)
    }

    fn coverage(&self, window: &Window) -> Coverage {
        let area = window.area() as f64;
        let damaged = window
            .coords()
            .filter(|&(x, y)| self.mask.is_damaged_at(x, y))
            .count() as f64;
        let known = area - damaged;
        Coverage {
            mu: (known / area * 100.0) as u32,
            lambda: (damaged / area * 100.0) as u32,
        }
    }

    fn local_mean(&self, window: &Window) -> Rgba<u8> {
        mean_of_known(&*self.src, self.mask, window.coords()).unwrap_or(Rgba([0, 0, 0, 255]))
    }

    fn global_mean(&self) -> Rgba<u8> {
        *self.global_mean.get_or_init(|| {
            let (w, h) = self.src.dimensions();
            let all = (0..h).flat_map(|y| (0..w).map(move |x| (x, y)));
            mean_of_known(&*self.src, self.mask, all).unwrap_or(Rgba([0, 0, 0, 255]))
        })
    }
}

/// Integer RGB mean over the known pixels of `coords`; `None` if there are none.
fn mean_of_known(
    src: &RgbaImage,
    mask: &DamageMask,
    coords: impl Iterator<Item = (u32, u32)>,
) -> Option<Rgba<u8>> {
    let mut sum = [0u64; 3];
    let mut n = 0u64;
    for (x, y) in coords {
        if mask.is_damaged_at(x, y) {
            continue;
        }
        let p = src.get_pixel(x, y);
        for c in 0..3 {
            sum[c] += p.0[c] as u64;
        }
        n += 1;
    }
    if n == 0 {
        return None;
    }
    Some(Rgba([
        (sum[0] / n) as u8,
        (sum[1] / n) as u8,
        (sum[2] / n) as u8,
        255,
    ]))
}

/// Fill every damaged pixel of `src` in place with the adaptive method.
pub fn adaptive_inpaint(
    src: &mut RgbaImage,
    mask: &DamageMask,
    config: &AdaptiveConfig,
) -> Result<InpaintReport, InpaintError> {
    Ok(AdaptiveInpainter::new(src, mask, config)?.run())
}
