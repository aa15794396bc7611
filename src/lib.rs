//! Core library for comparing K-means and SymNMF clusterings of a point set

pub mod analysis;
pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod linalg;
pub mod storage;

pub use analysis::{compute_goal, run_analysis, AnalysisReport, Goal};
pub use config::{AnalysisConfig, EmptyClusterPolicy, KMeansConfig, SymNmfConfig};
pub use data::{read_points, PointSet};
pub use error::{Error, Result};
pub use linalg::Matrix;
