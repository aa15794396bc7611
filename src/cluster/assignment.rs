//! Hard cluster labels from centroids or from a factor matrix

use ndarray::{ArrayView1, ArrayView2};

use crate::error::{Error, Result};
use crate::linalg::distance;

/// Index of the centroid closest to `point`
///
/// Centroids are scanned in index order and the running best is replaced
/// only on a strictly smaller distance, so ties go to the lowest index.
pub fn nearest_centroid(point: ArrayView1<f64>, centroids: ArrayView2<f64>) -> Result<usize> {
    if centroids.nrows() == 0 {
        return Err(Error::EmptyInput);
    }

    let mut closest = 0;
    let mut closest_dist = f64::INFINITY;
    for (idx, centroid) in centroids.outer_iter().enumerate() {
        let dist = distance(point, centroid)?;
        if dist < closest_dist {
            closest = idx;
            closest_dist = dist;
        }
    }
    Ok(closest)
}

/// Label every point with the index of its nearest centroid
pub fn assign_to_centroids(
    points: ArrayView2<f64>,
    centroids: ArrayView2<f64>,
) -> Result<Vec<usize>> {
    points
        .outer_iter()
        .map(|point| nearest_centroid(point, centroids))
        .collect()
}

/// Label every row of `h` with the column of its largest entry
///
/// The first maximum in a left-to-right scan wins.
pub fn assign_from_factor(h: ArrayView2<f64>) -> Vec<usize> {
    h.outer_iter()
        .map(|row| {
            let mut best = 0;
            let mut best_value = f64::NEG_INFINITY;
            for (col, &value) in row.iter().enumerate() {
                if value > best_value {
                    best = col;
                    best_value = value;
                }
            }
            best
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_nearest_centroid_prefers_lowest_index_on_tie() {
        let centroids = array![[-1.0, 0.0], [1.0, 0.0]];
        let point = array![0.0, 0.0];
        assert_eq!(nearest_centroid(point.view(), centroids.view()).unwrap(), 0);
    }

    #[test]
    fn test_assign_to_centroids() {
        let points = array![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
        let centroids = array![[0.0, 0.5], [10.0, 0.5]];
        let labels = assign_to_centroids(points.view(), centroids.view()).unwrap();
        assert_eq!(labels, vec![0, 0, 1, 1]);
    }

    #[test]
    fn test_assign_to_centroids_dimension_mismatch() {
        let points = array![[0.0, 0.0]];
        let centroids = array![[0.0, 0.0, 0.0]];
        assert!(matches!(
            assign_to_centroids(points.view(), centroids.view()),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_assign_from_factor_takes_first_maximum() {
        let h = array![[0.1, 0.9, 0.2], [0.5, 0.5, 0.1], [0.0, 0.0, 0.0], [0.2, 0.3, 0.7]];
        assert_eq!(assign_from_factor(h.view()), vec![1, 0, 0, 2]);
    }
}
