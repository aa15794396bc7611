//! Error types for the clustering engine

use thiserror::Error;

/// Errors returned by the numeric core and its boundary collaborators
#[derive(Debug, Error)]
pub enum Error {
    /// Input contains no points
    #[error("empty input")]
    EmptyInput,

    /// A parameter is outside its valid range
    #[error("invalid parameter {name}: {message}")]
    InvalidParameter {
        /// Parameter name
        name: &'static str,
        /// Human-readable explanation
        message: String,
    },

    /// Requested cluster count is incompatible with the dataset
    #[error("invalid cluster count: requested {requested}, but dataset has {n_items} items")]
    InvalidClusterCount {
        /// Requested number of clusters
        requested: usize,
        /// Number of items in the dataset
        n_items: usize,
    },

    /// Two vectors have different lengths
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected dimensionality
        expected: usize,
        /// Found dimensionality
        found: usize,
    },

    /// Two matrices have incompatible shapes for the requested operation
    #[error("shape mismatch in {operation}: {left:?} vs {right:?}")]
    ShapeMismatch {
        /// Operation that rejected the operands
        operation: &'static str,
        /// Shape of the left operand
        left: (usize, usize),
        /// Shape of the right operand
        right: (usize, usize),
    },

    /// A K-means centroid received no points
    #[error("cluster {cluster} has no members")]
    EmptyCluster {
        /// Index of the empty cluster
        cluster: usize,
    },

    /// A point has zero degree, so the similarity matrix cannot be normalized
    #[error("point {index} has zero degree")]
    SingularDegree {
        /// Row index of the isolated point
        index: usize,
    },

    /// The factorization produced non-finite values
    #[error("factorization diverged at iteration {iteration}")]
    ComputationError {
        /// Iteration (1-based) at which the non-finite value appeared
        iteration: usize,
    },

    /// Malformed point file content
    #[error("format error on line {line}: {message}")]
    Format {
        /// Line number (1-based) in the input
        line: usize,
        /// What was wrong with the line
        message: String,
    },

    /// Underlying I/O failure
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Report serialization failure
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type used by this crate
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Shorthand for building an [`Error::InvalidParameter`]
    pub(crate) fn invalid(name: &'static str, message: impl Into<String>) -> Self {
        Error::InvalidParameter {
            name,
            message: message.into(),
        }
    }
}
