//! Diagonal degree matrix

use ndarray::ArrayView2;

use crate::error::{Error, Result};
use crate::graph::similarity::similarity_matrix;
use crate::linalg::Matrix;

/// Build the degree matrix `D` of a point set
///
/// Computes the similarity matrix first; see [`degree_from_similarity`].
pub fn degree_matrix(points: ArrayView2<f64>) -> Result<Matrix> {
    let a = similarity_matrix(points)?;
    degree_from_similarity(a.view())
}

/// Build the degree matrix from an existing similarity matrix
///
/// `D[i][i]` is the left-to-right sum of row `i` of `a`; every off-diagonal
/// entry is exactly zero.
pub fn degree_from_similarity(a: ArrayView2<f64>) -> Result<Matrix> {
    let (rows, cols) = a.dim();
    if rows != cols {
        return Err(Error::ShapeMismatch {
            operation: "degree_from_similarity",
            left: (rows, cols),
            right: (cols, rows),
        });
    }

    let mut d = Matrix::zeros((rows, rows));
    for (i, row) in a.outer_iter().enumerate() {
        let mut sum = 0.0;
        for &value in row.iter() {
            sum += value;
        }
        d[[i, i]] = sum;
    }

    Ok(d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_degree_is_row_sum() {
        let a = array![[0.0, 0.5, 0.25], [0.5, 0.0, 1.0], [0.25, 1.0, 0.0]];
        let d = degree_from_similarity(a.view()).unwrap();
        assert_eq!(d[[0, 0]], 0.75);
        assert_eq!(d[[1, 1]], 1.5);
        assert_eq!(d[[2, 2]], 1.25);
        assert_eq!(d[[0, 1]], 0.0);
        assert_eq!(d[[2, 0]], 0.0);
    }

    #[test]
    fn test_degree_of_points_matches_similarity_rows() {
        let points = array![[0.0, 0.0], [0.0, 1.0], [3.0, 3.0]];
        let a = similarity_matrix(points.view()).unwrap();
        let d = degree_matrix(points.view()).unwrap();
        for i in 0..3 {
            assert_eq!(d[[i, i]], a.row(i).iter().fold(0.0, |acc, v| acc + v));
        }
    }

    #[test]
    fn test_non_square_rejected() {
        let a = Matrix::zeros((2, 3));
        assert!(matches!(
            degree_from_similarity(a.view()),
            Err(Error::ShapeMismatch { .. })
        ));
    }
}
