// ============================================================================
// Exemplar-based inpainting engine
// ============================================================================
//
// Each pass: extract the fill front -> score every front pixel -> pick the
// target window -> search the whole known image for the closest full patch
// -> copy it into the target's damaged pixels -> update confidence and mask.
// The run ends when the front is empty. At least the target's centre pixel
// is cleared per pass, so a run takes at most (damaged pixel count) passes.

use image::RgbaImage;

use super::boundary::extract_boundary;
use super::confidence::ConfidenceMap;
use super::error::InpaintError;
use super::mask::DamageMask;
use super::priority::compute_priorities;
use super::propagate::{propagate, update_confidence};
use super::search::{find_exemplar, select_target};
use super::window::Window;

/// Settings for the exemplar method.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExemplarConfig {
    /// Half-size of a patch; windows are `2r + 1` wide before clipping.
    pub patch_radius: u32,
    /// Optional cap on passes. `None` runs until the region is filled.
    pub max_passes: Option<usize>,
}

impl Default for ExemplarConfig {
    fn default() -> Self {
        Self {
            patch_radius: 4,
            max_passes: None,
        }
    }
}

impl ExemplarConfig {
    pub fn new(patch_radius: u32) -> Self {
        Self {
            patch_radius,
            ..Default::default()
        }
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = Some(max_passes);
        self
    }
}

/// Summary of a finished run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InpaintReport {
    pub passes: usize,
    pub filled_pixels: usize,
}

/// Result of a single [`ExemplarInpainter::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PassOutcome {
    /// One target window was filled from `exemplar`.
    Filled {
        target: Window,
        exemplar: Window,
        filled: usize,
    },
    /// The front was empty; nothing left to do.
    Done,
}

/// Owns the mutable state of one run: the image (borrowed), the live mask
/// and the confidence field.
pub struct ExemplarInpainter<'a> {
    src: &'a mut RgbaImage,
    mask: DamageMask,
    confidence: ConfidenceMap,
    config: ExemplarConfig,
    passes: usize,
    filled: usize,
}

impl<'a> ExemplarInpainter<'a> {
    /// Checks preconditions; on error `src` is untouched.
    pub fn new(
        src: &'a mut RgbaImage,
        mask: DamageMask,
        config: ExemplarConfig,
    ) -> Result<Self, InpaintError> {
        check_dimensions(src, &mask)?;
        if config.patch_radius == 0 {
            return Err(InpaintError::InvalidRadius);
        }
        let confidence = ConfidenceMap::from_mask(&mask);
        Ok(Self {
            src,
            mask,
            confidence,
            config,
            passes: 0,
            filled: 0,
        })
    }

    pub fn image(&self) -> &RgbaImage {
        &*self.src
    }

    pub fn mask(&self) -> &DamageMask {
        &self.mask
    }

    pub fn confidence(&self) -> &ConfidenceMap {
        &self.confidence
    }

    pub fn report(&self) -> InpaintReport {
        InpaintReport {
            passes: self.passes,
            filled_pixels: self.filled,
        }
    }

    /// Run one pass of the fill loop.
    pub fn step(&mut self) -> Result<PassOutcome, InpaintError> {
        let boundary = extract_boundary(&self.mask);
        log::debug!(
            "pass {} - boundary size {}",
            self.passes + 1,
            boundary.len()
        );
        if boundary.is_empty() {
            return Ok(PassOutcome::Done);
        }

        let radius = self.config.patch_radius;
        let (w, h) = self.src.dimensions();
        let priorities =
            compute_priorities(&*self.src, &self.mask, &self.confidence, &boundary, radius);
        let Some(target) = select_target(&priorities, radius, w, h) else {
            return Ok(PassOutcome::Done);
        };
        let exemplar = find_exemplar(&*self.src, &self.mask, &target, radius)?;

        propagate(&mut *self.src, &self.mask, &exemplar, &target);
        let (_, filled) = update_confidence(&mut self.confidence, &mut self.mask, &target);

        self.passes += 1;
        self.filled += filled;
        Ok(PassOutcome::Filled {
            target,
            exemplar,
            filled,
        })
    }

    /// Loop until the front is empty, a search degenerates, or the pass cap
    /// is reached.
    pub fn run(mut self) -> Result<InpaintReport, InpaintError> {
        let damaged = self.mask.damaged_count();
        log::info!(
            "exemplar inpaint: {}x{} image, {} damaged pixels, patch radius {}",
            self.src.width(),
            self.src.height(),
            damaged,
            self.config.patch_radius
        );

        loop {
            if let Some(limit) = self.config.max_passes
                && self.passes >= limit
                && !self.mask.is_clear()
            {
                let remaining = self.mask.damaged_count();
                log::warn!("pass limit {} reached, {} pixels unfilled", limit, remaining);
                return Err(InpaintError::PassLimit { limit, remaining });
            }
            match self.step() {
                Ok(PassOutcome::Done) => break,
                Ok(PassOutcome::Filled { .. }) => {}
                Err(e) => {
                    log::error!("exemplar inpaint stopped after {} passes: {}", self.passes, e);
                    return Err(e);
                }
            }
        }

        let report = self.report();
        log::info!(
            "exemplar inpaint finished: {} passes, {} pixels filled",
            report.passes,
            report.filled_pixels
        );
        Ok(report)
    }
}

pub(crate) fn check_dimensions(src: &RgbaImage, mask: &DamageMask) -> Result<(), InpaintError> {
    let (sw, sh) = src.dimensions();
    let (mw, mh) = mask.dimensions();
    if (sw, sh) != (mw, mh) {
        return Err(InpaintError::DimensionMismatch {
            source_width: sw,
            source_height: sh,
            mask_width: mw,
            mask_height: mh,
        });
    }
    Ok(())
}

/// Fill every damaged pixel of `src` in place.
///
/// On a fatal error `src` holds whatever was propagated before it.
pub fn exemplar_inpaint(
    src: &mut RgbaImage,
    mask: DamageMask,
    config: &ExemplarConfig,
) -> Result<InpaintReport, InpaintError> {
    ExemplarInpainter::new(src, mask, *config)?.run()
}
