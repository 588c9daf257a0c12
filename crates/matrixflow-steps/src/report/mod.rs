//! HTML reporting: chart builders plus a small report page builder.
pub mod plots;
pub mod report;

pub use report::{Report, ReportSection};
