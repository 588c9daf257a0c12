//! matrixflow-steps: building blocks of the example step workflow.
//!
//! This crate provides the workflow steps (generate random matrices, invert
//! them, reduce them to cumulative-sum vectors, plot the vectors, plus
//! parallel mapped variants of the data steps), the staging-directory and
//! manifest plumbing the steps share, small math and CSV helpers, and
//! reporting/plotting helpers used by the CLI and examples.
//!
//! The design favors small, testable modules without native dependencies:
//! matrices are plain `ndarray` arrays, staged files are CSV, and charts are
//! self-contained HTML.
pub mod config;
pub mod error;
pub mod io;
pub mod manifest;
pub mod math;
pub mod report;
pub mod staging;
pub mod steps;
pub mod workflow;
