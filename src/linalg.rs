//! Vector and dense matrix primitives
//!
//! Every accumulation runs left-to-right over the inner index so results are
//! bit-identical across runs for identical inputs. Means elsewhere in the crate
//! go through `statrs` (`Statistics::mean`), which uses a running-mean update
//! instead of a plain sum; that update is equally deterministic.

use ndarray::{Array2, ArrayView1, ArrayView2};

use crate::error::{Error, Result};

/// Dense row-major matrix of doubles
pub type Matrix = Array2<f64>;

/// Squared Euclidean distance between two vectors
pub fn squared_distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        });
    }

    let mut sum = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let diff = x - y;
        sum += diff * diff;
    }
    Ok(sum)
}

/// Euclidean distance between two vectors
pub fn distance(a: ArrayView1<f64>, b: ArrayView1<f64>) -> Result<f64> {
    squared_distance(a, b).map(f64::sqrt)
}

/// Standard matrix product `a · b`
pub fn matmul(a: ArrayView2<f64>, b: ArrayView2<f64>) -> Result<Matrix> {
    let (rows, inner) = a.dim();
    let (b_rows, cols) = b.dim();
    if inner != b_rows {
        return Err(Error::ShapeMismatch {
            operation: "matmul",
            left: a.dim(),
            right: b.dim(),
        });
    }

    let mut out = Matrix::zeros((rows, cols));
    for i in 0..rows {
        for j in 0..cols {
            let mut acc = 0.0;
            for t in 0..inner {
                acc += a[[i, t]] * b[[t, j]];
            }
            out[[i, j]] = acc;
        }
    }
    Ok(out)
}

/// Element-wise product of two equally shaped matrices
pub fn hadamard(a: ArrayView2<f64>, b: ArrayView2<f64>) -> Result<Matrix> {
    ensure_same_shape("hadamard", a, b)?;
    Ok(&a * &b)
}

/// Owned transpose
pub fn transpose(a: ArrayView2<f64>) -> Matrix {
    a.t().to_owned()
}

/// Squared Frobenius norm of `a - b`
pub fn frobenius_norm_sq_diff(a: ArrayView2<f64>, b: ArrayView2<f64>) -> Result<f64> {
    ensure_same_shape("frobenius_norm_sq_diff", a, b)?;

    let mut norm = 0.0;
    for (x, y) in a.iter().zip(b.iter()) {
        let diff = x - y;
        norm += diff * diff;
    }
    Ok(norm)
}

fn ensure_same_shape(
    operation: &'static str,
    a: ArrayView2<f64>,
    b: ArrayView2<f64>,
) -> Result<()> {
    if a.dim() != b.dim() {
        return Err(Error::ShapeMismatch {
            operation,
            left: a.dim(),
            right: b.dim(),
        });
    }
    Ok(())
}
