//! Image inpainting: fill a damaged region of an RGBA image from its
//! undamaged surroundings.
//!
//! Two algorithms live under [`ops`]: exemplar-based patch propagation
//! ([`ops::exemplar_inpaint`]) and adaptive local-mean interpolation
//! ([`ops::adaptive_inpaint`]). [`io`] and [`cli`] wrap them into the
//! `inpainter` command-line tool.

pub mod cli;
pub mod io;
pub mod logger;
pub mod ops;

#[cfg(test)]
mod test_utils;

pub use ops::{
    AdaptiveConfig, DamageMask, ExemplarConfig, InpaintError, InpaintReport, adaptive_inpaint,
    exemplar_inpaint,
};
