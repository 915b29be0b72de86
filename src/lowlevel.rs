//! Low-level building blocks for custom matching pipelines.
//!
//! Most users should prefer [`crate::Matcher`]; these items expose the
//! template plan, kernels and response surface for callers that want to reuse
//! one surface across several queries or plug in their own peak selection.

pub use crate::confidence::color_confidence;
#[cfg(feature = "rayon")]
pub use crate::kernel::rayon::ZnccRayon;
pub use crate::kernel::scalar::ZnccScalar;
pub use crate::kernel::Kernel;
pub use crate::search::response::{Peak, ResponseSurface};
pub use crate::template::TemplatePlan;
