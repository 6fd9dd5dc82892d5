pub mod adaptive;
pub mod boundary;
pub mod confidence;
pub mod error;
pub mod exemplar;
pub mod mask;
pub mod priority;
pub mod propagate;
pub mod search;
pub mod window;

pub use adaptive::{AdaptiveConfig, adaptive_inpaint};
pub use error::InpaintError;
pub use exemplar::{ExemplarConfig, ExemplarInpainter, InpaintReport, PassOutcome, exemplar_inpaint};
pub use mask::DamageMask;
pub use window::Window;
