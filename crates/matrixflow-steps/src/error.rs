use std::error::Error;
use std::fmt;

/// Custom error type for linear-algebra kernel failures
#[derive(Debug)]
pub enum LinAlgError {
    NotSquare { rows: usize, cols: usize },
    Singular { pivot: f64 },
}

impl fmt::Display for LinAlgError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            LinAlgError::NotSquare { rows, cols } => {
                write!(f, "Matrix must be square, got {} x {}", rows, cols)
            }
            LinAlgError::Singular { pivot } => {
                write!(
                    f,
                    "Matrix is singular to working precision (best pivot {:e})",
                    pivot
                )
            }
        }
    }
}

impl Error for LinAlgError {}
