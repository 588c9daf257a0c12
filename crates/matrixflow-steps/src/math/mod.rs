//! Small numeric kernels used by the workflow steps.
//!
//! These are intentionally focused helpers, not a linear-algebra layer:
//! `invert` is the one matrix routine the pipeline needs, and
//! `max_sort_cumsum` is the reduction applied by the cumulative-sum step.
pub mod linalg;
pub mod reduce;

pub use linalg::invert;
pub use reduce::max_sort_cumsum;
