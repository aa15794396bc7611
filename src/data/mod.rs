//! Point data loading and validation

pub mod points;

use ndarray::{Array2, ArrayView2};

use crate::error::{Error, Result};

pub use points::{parse_points, read_points};

/// A set of `n` points in `d` dimensions, one point per row
pub type PointSet = Array2<f64>;

/// Reject point sets the numeric core cannot work with
pub(crate) fn ensure_points(points: ArrayView2<f64>) -> Result<()> {
    if points.nrows() == 0 {
        return Err(Error::EmptyInput);
    }
    if points.ncols() == 0 {
        return Err(Error::invalid("points", "points must have at least one coordinate"));
    }
    if points.iter().any(|v| !v.is_finite()) {
        return Err(Error::invalid("points", "coordinates must be finite"));
    }
    Ok(())
}
