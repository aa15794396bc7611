//! End-to-end pipelines: matrix goals and the K-means vs SymNMF comparison

use std::fmt;
use std::str::FromStr;

use ndarray::ArrayView2;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::cluster::{
    assign_from_factor, assign_to_centroids, factorize_with_rng, group_labels, kmeans,
    silhouette_score, Cluster,
};
use crate::config::{AnalysisConfig, SymNmfConfig};
use crate::error::{Error, Result};
use crate::graph::{degree_from_similarity, normalize, similarity_matrix};
use crate::linalg::Matrix;

/// Matrix produced by the `symnmf` entry point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Goal {
    /// Factor matrix `H`
    Symnmf,
    /// Similarity matrix `A`
    Sym,
    /// Degree matrix `D`
    Ddg,
    /// Normalized similarity matrix `W`
    Norm,
}

impl Goal {
    /// Name used on the command line
    pub fn as_str(&self) -> &'static str {
        match self {
            Goal::Symnmf => "symnmf",
            Goal::Sym => "sym",
            Goal::Ddg => "ddg",
            Goal::Norm => "norm",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Goal {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "symnmf" => Ok(Goal::Symnmf),
            "sym" => Ok(Goal::Sym),
            "ddg" => Ok(Goal::Ddg),
            "norm" => Ok(Goal::Norm),
            other => Err(Error::invalid(
                "goal",
                format!("unknown goal {:?}, expected symnmf, sym, ddg or norm", other),
            )),
        }
    }
}

/// Compute the matrix named by `goal`
///
/// Only [`Goal::Symnmf`] uses `config` and `seed`.
pub fn compute_goal(
    points: ArrayView2<f64>,
    goal: Goal,
    config: &SymNmfConfig,
    seed: u64,
) -> Result<Matrix> {
    log::info!("Computing {} for {} points", goal, points.nrows());

    let a = similarity_matrix(points)?;
    if goal == Goal::Sym {
        return Ok(a);
    }

    let d = degree_from_similarity(a.view())?;
    if goal == Goal::Ddg {
        return Ok(d);
    }

    let w = normalize(a.view(), d.view())?;
    if goal == Goal::Norm {
        return Ok(w);
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let fit = factorize_with_rng(w.view(), config, &mut rng)?;
    Ok(fit.h)
}

/// Outcome of one clustering algorithm in a comparison run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlgorithmReport {
    /// Silhouette score of `labels`
    pub score: f64,

    /// One label per input point, in input order
    pub labels: Vec<usize>,

    /// Members grouped by label
    pub clusters: Vec<Cluster>,

    /// Iterations the algorithm ran
    pub iterations: usize,

    /// Whether it stopped on its convergence test rather than the cap
    pub converged: bool,
}

impl AlgorithmReport {
    fn new(points: ArrayView2<f64>, labels: Vec<usize>, iterations: usize, converged: bool) -> Result<Self> {
        let score = silhouette_score(points, &labels)?;
        let clusters = group_labels(&labels);
        Ok(Self {
            score,
            labels,
            clusters,
            iterations,
            converged,
        })
    }
}

/// Side-by-side result of K-means and SymNMF on one point set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Settings the run used
    pub config: AnalysisConfig,

    /// Number of input points
    pub n_points: usize,

    /// Coordinates per point
    pub dimension: usize,

    /// SymNMF labelling and score
    pub nmf: AlgorithmReport,

    /// K-means labelling and score
    pub kmeans: AlgorithmReport,
}

/// Cluster `points` with both algorithms and score each labelling
pub fn run_analysis(points: ArrayView2<f64>, config: &AnalysisConfig) -> Result<AnalysisReport> {
    log::info!(
        "Starting analysis of {} points (k={}, seed={})",
        points.nrows(),
        config.kmeans.k,
        config.seed
    );

    // 1. K-means
    let km = kmeans(points, &config.kmeans)?;
    let km_labels = assign_to_centroids(points, km.centroids.view())?;

    // 2. SymNMF
    let a = similarity_matrix(points)?;
    let d = degree_from_similarity(a.view())?;
    let w = normalize(a.view(), d.view())?;
    let mut rng = StdRng::seed_from_u64(config.seed);
    let nmf = factorize_with_rng(w.view(), &config.symnmf, &mut rng)?;
    let nmf_labels = assign_from_factor(nmf.h.view());

    // 3. Scores
    let kmeans_report = AlgorithmReport::new(points, km_labels, km.iterations, km.converged)?;
    let nmf_report = AlgorithmReport::new(points, nmf_labels, nmf.iterations, nmf.converged)?;

    log::info!(
        "Scores: nmf {:.4}, kmeans {:.4}",
        nmf_report.score,
        kmeans_report.score
    );

    Ok(AnalysisReport {
        config: config.clone(),
        n_points: points.nrows(),
        dimension: points.ncols(),
        nmf: nmf_report,
        kmeans: kmeans_report,
    })
}
