use ndarray::Array2;

use crate::error::LinAlgError;

/// Pivots with magnitude at or below this are treated as zero.
const PIVOT_EPS: f64 = 1e-12;

/// Invert a square matrix by Gauss-Jordan elimination with partial pivoting.
///
/// # Arguments
///
/// * `a` - The matrix to invert, shape (n, n).
///
/// # Returns
///
/// The inverse of `a`, or a `LinAlgError` when `a` is not square or is
/// singular to working precision. Singularity is reported instead of
/// letting near-zero pivots poison the result with huge or NaN entries.
pub fn invert(a: &Array2<f64>) -> Result<Array2<f64>, LinAlgError> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(LinAlgError::NotSquare { rows, cols });
    }
    let n = rows;

    // Reduce a working copy of `a` to the identity while applying the same
    // row operations to `inv`, which ends up holding the inverse.
    let mut work = a.clone();
    let mut inv = Array2::<f64>::eye(n);

    for col in 0..n {
        // Partial pivoting: bring the largest remaining entry of this
        // column onto the diagonal.
        let mut pivot_row = col;
        let mut pivot_val = work[[col, col]].abs();
        for row in col + 1..n {
            let candidate = work[[row, col]].abs();
            if candidate > pivot_val {
                pivot_row = row;
                pivot_val = candidate;
            }
        }
        if !(pivot_val > PIVOT_EPS) {
            return Err(LinAlgError::Singular { pivot: pivot_val });
        }
        if pivot_row != col {
            swap_rows(&mut work, col, pivot_row);
            swap_rows(&mut inv, col, pivot_row);
        }

        let pivot = work[[col, col]];
        for j in 0..n {
            work[[col, j]] /= pivot;
            inv[[col, j]] /= pivot;
        }

        for row in 0..n {
            if row == col {
                continue;
            }
            let factor = work[[row, col]];
            if factor == 0.0 {
                continue;
            }
            for j in 0..n {
                work[[row, j]] -= factor * work[[col, j]];
                inv[[row, j]] -= factor * inv[[col, j]];
            }
        }
    }

    Ok(inv)
}

fn swap_rows(m: &mut Array2<f64>, a: usize, b: usize) {
    for j in 0..m.ncols() {
        m.swap([a, j], [b, j]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn inverts_identity() {
        let eye = Array2::<f64>::eye(4);
        let inv = invert(&eye).unwrap();
        assert_eq!(inv, eye);
    }

    #[test]
    fn inverts_known_2x2() {
        let a = array![[4.0, 7.0], [2.0, 6.0]];
        let inv = invert(&a).unwrap();
        let expected = array![[0.6, -0.7], [-0.2, 0.4]];
        for (value, want) in inv.iter().zip(expected.iter()) {
            assert!((value - want).abs() < 1e-12, "got {} want {}", value, want);
        }
    }

    #[test]
    fn inverts_diagonal_exactly() {
        let a = array![[2.0, 0.0, 0.0], [0.0, 4.0, 0.0], [0.0, 0.0, 8.0]];
        let inv = invert(&a).unwrap();
        let expected = array![[0.5, 0.0, 0.0], [0.0, 0.25, 0.0], [0.0, 0.0, 0.125]];
        assert_eq!(inv, expected);
    }

    #[test]
    fn pivoting_handles_zero_diagonal() {
        // Requires a row swap on the first column.
        let a = array![[0.0, 1.0], [1.0, 0.0]];
        let inv = invert(&a).unwrap();
        assert_eq!(inv, a);
    }

    #[test]
    fn product_with_inverse_is_identity() {
        let a = array![[2.0, 1.0, 0.0], [1.0, 3.0, 1.0], [0.0, 1.0, 4.0]];
        let inv = invert(&a).unwrap();
        let product = a.dot(&inv);
        let eye = Array2::<f64>::eye(3);
        for (value, want) in product.iter().zip(eye.iter()) {
            assert!((value - want).abs() < 1e-10, "got {} want {}", value, want);
        }
    }

    #[test]
    fn singular_matrix_errors() {
        let a = array![[1.0, 2.0], [2.0, 4.0]];
        match invert(&a) {
            Err(LinAlgError::Singular { pivot }) => assert!(pivot.abs() <= 1e-12),
            other => panic!("expected Singular, got {:?}", other),
        }
    }

    #[test]
    fn non_square_errors() {
        let a = Array2::<f64>::zeros((2, 3));
        match invert(&a) {
            Err(LinAlgError::NotSquare { rows, cols }) => {
                assert_eq!((rows, cols), (2, 3));
            }
            other => panic!("expected NotSquare, got {:?}", other),
        }
    }

    #[test]
    fn empty_matrix_is_its_own_inverse() {
        let a = Array2::<f64>::zeros((0, 0));
        let inv = invert(&a).unwrap();
        assert_eq!(inv.dim(), (0, 0));
    }
}
