//! Cluster quality metrics

use std::collections::BTreeMap;

use ndarray::ArrayView2;

use crate::cluster::Cluster;
use crate::data::ensure_points;
use crate::error::{Error, Result};
use crate::linalg::distance;

/// Score reported when the labels describe fewer than two clusters
pub const SINGLE_CLUSTER_SCORE: f64 = -1.0;

/// Mean silhouette coefficient of a labelling, using Euclidean distance
///
/// For point `i` with mean intra-cluster distance `a` and smallest mean
/// distance to another cluster `b`, the coefficient is `(b - a) / max(a, b)`.
/// Points alone in their cluster score 0. Returns [`SINGLE_CLUSTER_SCORE`]
/// when fewer than two distinct labels are present.
pub fn silhouette_score(points: ArrayView2<f64>, labels: &[usize]) -> Result<f64> {
    ensure_points(points)?;
    let n = points.nrows();
    if labels.len() != n {
        return Err(Error::DimensionMismatch {
            expected: n,
            found: labels.len(),
        });
    }

    let clusters = group_labels(labels);
    if clusters.len() < 2 {
        log::debug!("Silhouette undefined for a single cluster");
        return Ok(SINGLE_CLUSTER_SCORE);
    }

    // Position of each point's cluster in `clusters`
    let slot: BTreeMap<usize, usize> = clusters
        .iter()
        .enumerate()
        .map(|(pos, cluster)| (cluster.id, pos))
        .collect();
    let positions: Vec<usize> = labels.iter().map(|label| slot[label]).collect();

    let mut coefficients = Vec::with_capacity(n);
    let mut dist_sums = vec![0.0; clusters.len()];

    for i in 0..n {
        let own = positions[i];
        if clusters[own].size == 1 {
            coefficients.push(0.0);
            continue;
        }

        dist_sums.iter_mut().for_each(|s| *s = 0.0);
        for j in 0..n {
            if i != j {
                dist_sums[positions[j]] += distance(points.row(i), points.row(j))?;
            }
        }

        let a = dist_sums[own] / (clusters[own].size - 1) as f64;
        let mut b = f64::INFINITY;
        for (pos, cluster) in clusters.iter().enumerate() {
            if pos != own {
                b = b.min(dist_sums[pos] / cluster.size as f64);
            }
        }

        let scale = a.max(b);
        coefficients.push(if scale > 0.0 { (b - a) / scale } else { 0.0 });
    }

    Ok(statrs::statistics::Statistics::mean(&coefficients))
}

/// Group point indices by label, ordered by label value
pub fn group_labels(labels: &[usize]) -> Vec<Cluster> {
    let mut members: BTreeMap<usize, Vec<usize>> = BTreeMap::new();
    for (idx, &label) in labels.iter().enumerate() {
        members.entry(label).or_default().push(idx);
    }

    members
        .into_iter()
        .map(|(id, members)| Cluster {
            id,
            size: members.len(),
            members,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_single_cluster_returns_sentinel() {
        let points = array![[1.0], [1.0], [1.0]];
        assert_eq!(
            silhouette_score(points.view(), &[0, 0, 0]).unwrap(),
            SINGLE_CLUSTER_SCORE
        );
    }

    #[test]
    fn test_hand_computed_score() {
        // Cluster 0 = {0, 1}, cluster 1 = {4}
        // s(0): a = 1, b = 4 -> 0.75
        // s(1): a = 1, b = 3 -> 2/3
        // s(2): singleton -> 0
        let points = array![[0.0], [1.0], [4.0]];
        let score = silhouette_score(points.view(), &[0, 0, 1]).unwrap();
        let expected = (0.75 + 2.0 / 3.0 + 0.0) / 3.0;
        assert!((score - expected).abs() < 1e-12);
    }

    #[test]
    fn test_well_separated_clusters_score_near_one() {
        let points = array![[0.0, 0.0], [0.0, 0.1], [50.0, 50.0], [50.0, 50.1]];
        let score = silhouette_score(points.view(), &[0, 0, 1, 1]).unwrap();
        assert!(score > 0.99);
        assert!(score <= 1.0);
    }

    #[test]
    fn test_sparse_label_values() {
        let points = array![[0.0], [1.0], [4.0]];
        let dense = silhouette_score(points.view(), &[0, 0, 1]).unwrap();
        let sparse = silhouette_score(points.view(), &[3, 3, 7]).unwrap();
        assert_eq!(dense, sparse);
    }

    #[test]
    fn test_extreme_label_values() {
        let points = array![[0.0], [1.0], [4.0]];
        let dense = silhouette_score(points.view(), &[0, 0, 1]).unwrap();
        assert_eq!(silhouette_score(points.view(), &[0, 0, usize::MAX]).unwrap(), dense);
        assert_eq!(silhouette_score(points.view(), &[1 << 40, 1 << 40, 5]).unwrap(), dense);

        let clusters = group_labels(&[usize::MAX, 2, usize::MAX]);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters[0].id, 2);
        assert_eq!(clusters[1].id, usize::MAX);
        assert_eq!(clusters[1].members, vec![0, 2]);
    }

    #[test]
    fn test_label_length_mismatch() {
        let points = array![[0.0], [1.0]];
        assert!(matches!(
            silhouette_score(points.view(), &[0]),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn test_group_labels() {
        let clusters = group_labels(&[1, 0, 1, 3]);
        assert_eq!(clusters.len(), 3);
        assert_eq!(clusters[0].id, 0);
        assert_eq!(clusters[0].members, vec![1]);
        assert_eq!(clusters[1].id, 1);
        assert_eq!(clusters[1].members, vec![0, 2]);
        assert_eq!(clusters[1].size, 2);
        assert_eq!(clusters[2].id, 3);
        assert!(group_labels(&[]).is_empty());
    }
}
