use ndarray::{Array1, Array2, Axis};

/// Reduce a matrix to the cumulative sum of its sorted per-column maxima.
///
/// This is the kernel of the cumulative-sum step: take the maximum of each
/// column (axis 0), sort the maxima ascending, then accumulate a running
/// sum. The output length equals the column count of the input.
pub fn max_sort_cumsum(matrix: &Array2<f64>) -> Array1<f64> {
    let mut maxima = matrix
        .fold_axis(Axis(0), f64::NEG_INFINITY, |acc, &value| acc.max(value))
        .to_vec();

    maxima.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    maxima
        .iter()
        .scan(0.0, |acc, &value| {
            *acc += value;
            Some(*acc)
        })
        .collect::<Array1<f64>>()
}
