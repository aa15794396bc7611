//! Gaussian-kernel similarity matrix

use ndarray::ArrayView2;

use crate::data::ensure_points;
use crate::error::Result;
use crate::linalg::{squared_distance, Matrix};

/// Build the pairwise similarity matrix `A` of a point set
///
/// `A[i][j] = exp(-||p_i - p_j||^2 / 2)` for `i != j` and `A[i][i] = 0`.
/// Only the upper triangle is computed; the lower triangle is its mirror, so
/// the result is exactly symmetric.
pub fn similarity_matrix(points: ArrayView2<f64>) -> Result<Matrix> {
    ensure_points(points)?;

    let n = points.nrows();
    let mut a = Matrix::zeros((n, n));

    for i in 0..n {
        for j in (i + 1)..n {
            let dist_sq = squared_distance(points.row(i), points.row(j))?;
            let value = (-dist_sq / 2.0).exp();
            a[[i, j]] = value;
            a[[j, i]] = value;
        }
    }

    log::debug!("Built {}x{} similarity matrix", n, n);

    Ok(a)
}
