//! Configuration for the clustering algorithms

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default iteration cap shared by K-means and SymNMF
pub const DEFAULT_MAX_ITER: usize = 300;

/// Default per-centroid movement threshold for K-means
pub const DEFAULT_KMEANS_EPSILON: f64 = 1e-3;

/// Default squared Frobenius threshold for SymNMF convergence
pub const DEFAULT_SYMNMF_TOLERANCE: f64 = 1e-4;

/// Value substituted for an exactly-zero update denominator
pub const DEFAULT_DENOMINATOR_GUARD: f64 = 1e-9;

/// Default seed for the H initialization RNG
pub const DEFAULT_SEED: u64 = 1234;

/// What K-means does when a centroid ends an assignment step with no members
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EmptyClusterPolicy {
    /// Keep the centroid where it was for this iteration
    #[default]
    KeepPrevious,

    /// Abort with [`Error::EmptyCluster`]
    Fail,
}

/// Parameters for Lloyd's K-means
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KMeansConfig {
    /// Number of clusters
    pub k: usize,

    /// Maximum number of assignment/update rounds
    pub max_iter: usize,

    /// Convergence threshold on each centroid's movement
    pub epsilon: f64,

    /// Handling of centroids that lose all their points
    pub empty_cluster: EmptyClusterPolicy,
}

impl Default for KMeansConfig {
    fn default() -> Self {
        Self {
            k: 2,
            max_iter: DEFAULT_MAX_ITER,
            epsilon: DEFAULT_KMEANS_EPSILON,
            empty_cluster: EmptyClusterPolicy::default(),
        }
    }
}

impl KMeansConfig {
    /// Create a configuration for `k` clusters with default limits
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    /// Set the iteration cap
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the movement threshold
    pub fn with_epsilon(mut self, epsilon: f64) -> Self {
        self.epsilon = epsilon;
        self
    }

    /// Set the empty-cluster policy
    pub fn with_empty_cluster(mut self, policy: EmptyClusterPolicy) -> Self {
        self.empty_cluster = policy;
        self
    }

    /// Check parameters that do not depend on the dataset
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::invalid("k", "must be at least 1"));
        }
        if self.max_iter == 0 {
            return Err(Error::invalid("max_iter", "must be at least 1"));
        }
        if !(self.epsilon.is_finite() && self.epsilon > 0.0) {
            return Err(Error::invalid("epsilon", "must be finite and positive"));
        }
        Ok(())
    }
}

/// Parameters for the SymNMF multiplicative-update engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SymNmfConfig {
    /// Number of factor columns (clusters)
    pub k: usize,

    /// Maximum number of updates
    pub max_iter: usize,

    /// Convergence threshold on `||H_new - H_old||_F^2`
    pub tolerance: f64,

    /// Step damping: `H <- H * (1 - beta + beta * ratio)`; 1.0 is the undamped rule
    pub beta: f64,

    /// Replacement for an update denominator that is exactly zero
    pub denominator_guard: f64,
}

impl Default for SymNmfConfig {
    fn default() -> Self {
        Self {
            k: 2,
            max_iter: DEFAULT_MAX_ITER,
            tolerance: DEFAULT_SYMNMF_TOLERANCE,
            beta: 1.0,
            denominator_guard: DEFAULT_DENOMINATOR_GUARD,
        }
    }
}

impl SymNmfConfig {
    /// Create a configuration for `k` factor columns with default limits
    pub fn new(k: usize) -> Self {
        Self {
            k,
            ..Self::default()
        }
    }

    /// Set the iteration cap
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.max_iter = max_iter;
        self
    }

    /// Set the convergence threshold
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the damping factor
    pub fn with_beta(mut self, beta: f64) -> Self {
        self.beta = beta;
        self
    }

    /// Check parameters that do not depend on the input matrix
    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::invalid("k", "must be at least 1"));
        }
        if self.max_iter == 0 {
            return Err(Error::invalid("max_iter", "must be at least 1"));
        }
        if !(self.tolerance.is_finite() && self.tolerance > 0.0) {
            return Err(Error::invalid("tolerance", "must be finite and positive"));
        }
        if !(self.beta > 0.0 && self.beta <= 1.0) {
            return Err(Error::invalid("beta", "must lie in (0, 1]"));
        }
        if !(self.denominator_guard.is_finite() && self.denominator_guard > 0.0) {
            return Err(Error::invalid(
                "denominator_guard",
                "must be finite and positive",
            ));
        }
        Ok(())
    }
}

/// Settings for one side-by-side K-means vs SymNMF run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    /// K-means settings
    pub kmeans: KMeansConfig,

    /// SymNMF settings
    pub symnmf: SymNmfConfig,

    /// Seed for the H initialization RNG
    pub seed: u64,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self::new(2)
    }
}

impl AnalysisConfig {
    /// Both algorithms with `k` clusters and default limits
    pub fn new(k: usize) -> Self {
        Self {
            kmeans: KMeansConfig::new(k),
            symnmf: SymNmfConfig::new(k),
            seed: DEFAULT_SEED,
        }
    }

    /// Override the iteration cap of both algorithms
    pub fn with_max_iter(mut self, max_iter: usize) -> Self {
        self.kmeans.max_iter = max_iter;
        self.symnmf.max_iter = max_iter;
        self
    }

    /// Override the RNG seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
