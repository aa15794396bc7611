//! Lloyd's K-means over raw points
//!
//! Initial centroids are the first `k` points in input order, so a run is
//! fully deterministic. Each round assigns every point to its nearest
//! centroid and moves each centroid to the mean of its members. The loop
//! stops once no centroid moves by `epsilon` or more, or after `max_iter`
//! rounds.

use ndarray::{s, Array1, ArrayView2};

use crate::cluster::assignment::nearest_centroid;
use crate::config::{EmptyClusterPolicy, KMeansConfig};
use crate::data::ensure_points;
use crate::error::{Error, Result};
use crate::linalg::{distance, Matrix};

/// Result of a K-means run
#[derive(Debug, Clone)]
pub struct KMeansFit {
    /// Final centroids, one per row, in cluster-index order
    pub centroids: Matrix,

    /// Number of assignment/update rounds performed
    pub iterations: usize,

    /// Whether the movement threshold was met before the iteration cap
    pub converged: bool,
}

/// Run K-means seeded with the first `config.k` points
pub fn kmeans(points: ArrayView2<f64>, config: &KMeansConfig) -> Result<KMeansFit> {
    ensure_points(points)?;
    config.validate()?;

    let n = points.nrows();
    if config.k > n {
        return Err(Error::InvalidClusterCount {
            requested: config.k,
            n_items: n,
        });
    }

    let initial = points.slice(s![..config.k, ..]).to_owned();
    lloyd(points, initial, config)
}

/// Run K-means from caller-supplied initial centroids
///
/// `initial` must have `config.k` rows of the same dimensionality as the points.
pub fn kmeans_from(
    points: ArrayView2<f64>,
    initial: Matrix,
    config: &KMeansConfig,
) -> Result<KMeansFit> {
    ensure_points(points)?;
    config.validate()?;

    if initial.dim() != (config.k, points.ncols()) {
        return Err(Error::ShapeMismatch {
            operation: "kmeans_from",
            left: (config.k, points.ncols()),
            right: initial.dim(),
        });
    }
    if initial.iter().any(|v| !v.is_finite()) {
        return Err(Error::invalid("initial", "centroid coordinates must be finite"));
    }

    lloyd(points, initial, config)
}

fn lloyd(points: ArrayView2<f64>, mut centroids: Matrix, config: &KMeansConfig) -> Result<KMeansFit> {
    let d = points.ncols();
    let k = centroids.nrows();

    log::info!(
        "Running K-means on {} points (k={}, max_iter={}, epsilon={})",
        points.nrows(),
        k,
        config.max_iter,
        config.epsilon
    );

    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;

        let mut sums = Matrix::zeros((k, d));
        let mut counts = vec![0usize; k];

        for point in points.outer_iter() {
            let cluster = nearest_centroid(point, centroids.view())?;
            let mut sum = sums.row_mut(cluster);
            for (acc, &x) in sum.iter_mut().zip(point.iter()) {
                *acc += x;
            }
            counts[cluster] += 1;
        }

        let mut max_shift: f64 = 0.0;
        for cluster in 0..k {
            if counts[cluster] == 0 {
                match config.empty_cluster {
                    EmptyClusterPolicy::KeepPrevious => {
                        log::debug!(
                            "Iteration {}: cluster {} is empty, keeping previous centroid",
                            iterations,
                            cluster
                        );
                        continue;
                    }
                    EmptyClusterPolicy::Fail => {
                        return Err(Error::EmptyCluster { cluster });
                    }
                }
            }

            let count = counts[cluster] as f64;
            let updated: Array1<f64> = sums.row(cluster).mapv(|sum| sum / count);
            let shift = distance(updated.view(), centroids.row(cluster))?;
            max_shift = max_shift.max(shift);
            centroids.row_mut(cluster).assign(&updated);
        }

        log::debug!("Iteration {}: max centroid shift {:.6}", iterations, max_shift);

        if max_shift < config.epsilon {
            converged = true;
            break;
        }
    }

    if converged {
        log::info!("K-means converged after {} iterations", iterations);
    } else {
        log::warn!("K-means reached the iteration cap ({}) without converging", iterations);
    }

    Ok(KMeansFit {
        centroids,
        iterations,
        converged,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::assignment::assign_to_centroids;
    use ndarray::array;

    fn four_points() -> Matrix {
        array![[0.0, 0.0], [10.0, 0.0], [0.0, 1.0], [10.0, 1.0]]
    }

    #[test]
    fn test_two_separated_pairs() {
        let points = four_points();
        let fit = kmeans(points.view(), &KMeansConfig::new(2)).unwrap();

        assert!(fit.converged);
        assert_eq!(fit.iterations, 2);
        assert_eq!(fit.centroids, array![[0.0, 0.5], [10.0, 0.5]]);

        let labels = assign_to_centroids(points.view(), fit.centroids.view()).unwrap();
        assert_eq!(labels, vec![0, 1, 0, 1]);
    }

    #[test]
    fn test_seeding_from_one_side_settles_in_local_optimum() {
        // With (0,0) and (0,1) as seeds the split is horizontal and Lloyd's
        // iterations never leave it.
        let points = array![[0.0, 0.0], [0.0, 1.0], [10.0, 0.0], [10.0, 1.0]];
        let fit = kmeans(points.view(), &KMeansConfig::new(2)).unwrap();

        assert!(fit.converged);
        assert_eq!(fit.centroids, array![[5.0, 0.0], [5.0, 1.0]]);
    }

    #[test]
    fn test_identical_points_single_cluster() {
        let points = array![[3.25], [3.25], [3.25]];
        let fit = kmeans(points.view(), &KMeansConfig::new(1)).unwrap();
        assert_eq!(fit.centroids, array![[3.25]]);
        assert_eq!(fit.iterations, 1);
        assert!(fit.converged);
    }

    #[test]
    fn test_k_larger_than_n_rejected() {
        let points = array![[0.0], [1.0]];
        assert!(matches!(
            kmeans(points.view(), &KMeansConfig::new(3)),
            Err(Error::InvalidClusterCount {
                requested: 3,
                n_items: 2
            })
        ));
    }

    #[test]
    fn test_empty_cluster_keeps_previous_centroid() {
        // Both initial centroids sit at 0, so every point ties onto cluster 0
        // and cluster 1 starts out empty.
        let points = array![[0.0], [0.0], [10.0]];
        let fit = kmeans(points.view(), &KMeansConfig::new(2)).unwrap();

        assert!(fit.centroids.iter().all(|v| v.is_finite()));
        assert!(fit.converged);
        assert_eq!(fit.centroids, array![[10.0], [0.0]]);
    }

    #[test]
    fn test_empty_cluster_fail_policy() {
        let points = array![[0.0], [0.0], [10.0]];
        let config = KMeansConfig::new(2).with_empty_cluster(EmptyClusterPolicy::Fail);
        assert!(matches!(
            kmeans(points.view(), &config),
            Err(Error::EmptyCluster { cluster: 1 })
        ));
    }

    #[test]
    fn test_iteration_cap_is_respected() {
        let points = array![[0.0], [1.0], [2.0], [9.0], [10.0], [30.0]];
        let config = KMeansConfig::new(2).with_max_iter(1);
        let fit = kmeans(points.view(), &config).unwrap();
        assert_eq!(fit.iterations, 1);
        assert!(!fit.converged);
    }

    #[test]
    fn test_converged_centroids_are_a_fixed_point() {
        let points = array![
            [1.0, 1.0],
            [1.5, 2.0],
            [3.0, 4.0],
            [5.0, 7.0],
            [3.5, 5.0],
            [4.5, 5.0],
            [3.5, 4.5]
        ];
        let config = KMeansConfig::new(2);
        let fit = kmeans(points.view(), &config).unwrap();
        assert!(fit.converged);

        let again = kmeans_from(
            points.view(),
            fit.centroids.clone(),
            &config.clone().with_max_iter(1),
        )
        .unwrap();
        for (before, after) in fit.centroids.outer_iter().zip(again.centroids.outer_iter()) {
            assert!(distance(before, after).unwrap() < config.epsilon);
        }
    }

    #[test]
    fn test_kmeans_from_checks_shapes() {
        let points = four_points();
        let config = KMeansConfig::new(2);
        assert!(matches!(
            kmeans_from(points.view(), Matrix::zeros((3, 2)), &config),
            Err(Error::ShapeMismatch {
                left: (2, 2),
                right: (3, 2),
                ..
            })
        ));
        assert!(matches!(
            kmeans_from(points.view(), Matrix::zeros((2, 3)), &config),
            Err(Error::ShapeMismatch {
                left: (2, 2),
                right: (2, 3),
                ..
            })
        ));
    }

    #[test]
    fn test_kmeans_from_rejects_non_finite_centroids() {
        let points = four_points();
        let config = KMeansConfig::new(2);
        for bad in [f64::NAN, f64::INFINITY] {
            let initial = array![[0.0, 0.0], [bad, 1.0]];
            assert!(matches!(
                kmeans_from(points.view(), initial, &config),
                Err(Error::InvalidParameter { name: "initial", .. })
            ));
        }
    }
}
