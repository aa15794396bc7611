//! Similarity graph construction: affinity, degree and normalized matrices

pub mod degree;
pub mod normalized;
pub mod similarity;

pub use degree::{degree_from_similarity, degree_matrix};
pub use normalized::{normalize, normalized_similarity};
pub use similarity::similarity_matrix;
