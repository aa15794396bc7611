//! Clustering algorithms and cluster analysis

pub mod assignment;
pub mod kmeans;
pub mod metrics;
pub mod symnmf;

use serde::{Deserialize, Serialize};

pub use assignment::{assign_from_factor, assign_to_centroids, nearest_centroid};
pub use kmeans::{kmeans, kmeans_from, KMeansFit};
pub use metrics::{group_labels, silhouette_score, SINGLE_CLUSTER_SCORE};
pub use symnmf::{factorize, factorize_with_rng, initialize_h, SymNmfFit};

/// Points sharing one label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cluster {
    /// Label value
    pub id: usize,

    /// Row indices of the member points, ascending
    pub members: Vec<usize>,

    /// Number of members
    pub size: usize,
}
