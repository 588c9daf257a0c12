//! CSV persistence for staged matrices and vectors.

pub mod array_csv;

pub use array_csv::{read_matrix_csv, read_vector_csv, write_matrix_csv, write_vector_csv};
