//! Template statistics shared by the correlation kernels.

mod plan;

pub(crate) use plan::FLAT_VARIANCE;
pub use plan::TemplatePlan;
