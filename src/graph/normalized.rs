//! Degree-normalized similarity matrix

use ndarray::ArrayView2;

use crate::error::{Error, Result};
use crate::graph::degree::degree_from_similarity;
use crate::graph::similarity::similarity_matrix;
use crate::linalg::Matrix;

/// Build the normalized similarity matrix `W = D^-1/2 A D^-1/2` of a point set
pub fn normalized_similarity(points: ArrayView2<f64>) -> Result<Matrix> {
    let a = similarity_matrix(points)?;
    let d = degree_from_similarity(a.view())?;
    normalize(a.view(), d.view())
}

/// Normalize a similarity matrix by its degree matrix
///
/// `W[i][j] = A[i][j] / sqrt(D[i][i] * D[j][j])`. Fails with
/// [`Error::SingularDegree`] for the first row whose degree is not positive.
pub fn normalize(a: ArrayView2<f64>, d: ArrayView2<f64>) -> Result<Matrix> {
    let n = a.nrows();
    if a.ncols() != n || d.dim() != a.dim() {
        return Err(Error::ShapeMismatch {
            operation: "normalize",
            left: a.dim(),
            right: d.dim(),
        });
    }

    for i in 0..n {
        let degree = d[[i, i]];
        if !(degree > 0.0) {
            log::debug!("Point {} is isolated (degree {})", i, degree);
            return Err(Error::SingularDegree { index: i });
        }
    }

    let mut w = Matrix::zeros((n, n));
    for i in 0..n {
        for j in 0..n {
            w[[i, j]] = a[[i, j]] / (d[[i, i]] * d[[j, j]]).sqrt();
        }
    }

    Ok(w)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_two_points_normalize_to_one() {
        // Each point's only neighbour is the other, so A[0][1] == D[0][0] == D[1][1].
        let points = array![[0.0], [1.0]];
        let w = normalized_similarity(points.view()).unwrap();
        assert!((w[[0, 1]] - 1.0).abs() < 1e-12);
        assert!((w[[1, 0]] - 1.0).abs() < 1e-12);
        assert_eq!(w[[0, 0]], 0.0);
    }

    #[test]
    fn test_entries_match_formula() {
        let a = array![[0.0, 0.5, 0.25], [0.5, 0.0, 1.0], [0.25, 1.0, 0.0]];
        let d = degree_from_similarity(a.view()).unwrap();
        let w = normalize(a.view(), d.view()).unwrap();
        for i in 0..3 {
            for j in 0..3 {
                let expected = a[[i, j]] / (d[[i, i]] * d[[j, j]]).sqrt();
                assert!((w[[i, j]] - expected).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn test_single_point_is_singular() {
        let points = array![[4.0, 2.0]];
        assert!(matches!(
            normalized_similarity(points.view()),
            Err(Error::SingularDegree { index: 0 })
        ));
    }

    #[test]
    fn test_isolated_point_is_singular() {
        // exp(-1e6 / 2) underflows to exactly zero.
        let points = array![[0.0], [0.5], [1000.0]];
        assert!(matches!(
            normalized_similarity(points.view()),
            Err(Error::SingularDegree { index: 2 })
        ));
    }
}
