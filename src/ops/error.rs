use thiserror::Error;

/// Errors that stop an inpainting run.
///
/// Zero-area or zero-valid windows during priority scoring are not errors;
/// they score 0 and the run continues.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InpaintError {
    /// Source and mask grids differ in size. Nothing was touched.
    #[error(
        "source image is {source_width}x{source_height} but mask is {mask_width}x{mask_height}; \
         they must have the same dimensions"
    )]
    DimensionMismatch {
        source_width: u32,
        source_height: u32,
        mask_width: u32,
        mask_height: u32,
    },

    /// No fully undamaged window of the patch radius exists anywhere in the image.
    #[error("no undamaged patch of radius {radius} exists in the image")]
    DegenerateSearch { radius: u32 },

    #[error("patch radius must be at least 1")]
    InvalidRadius,

    /// The caller's pass cap was hit before the damaged region emptied.
    #[error("stopped after {limit} passes with {remaining} damaged pixels left")]
    PassLimit { limit: usize, remaining: usize },
}

impl InpaintError {
    /// `true` for errors raised before any pixel was modified.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            InpaintError::DimensionMismatch { .. } | InpaintError::InvalidRadius
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_sizes() {
        let err = InpaintError::DimensionMismatch {
            source_width: 10,
            source_height: 10,
            mask_width: 8,
            mask_height: 8,
        };
        assert_eq!(
            err.to_string(),
            "source image is 10x10 but mask is 8x8; they must have the same dimensions"
        );
        assert!(err.is_precondition());

        let err = InpaintError::DegenerateSearch { radius: 2 };
        assert_eq!(
            err.to_string(),
            "no undamaged patch of radius 2 exists in the image"
        );
        assert!(!err.is_precondition());
    }
}
