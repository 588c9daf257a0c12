//! Library side of the `matrixflow` binary: argument-to-options conversion.
pub mod options;
