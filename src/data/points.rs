//! Point file handling
//!
//! A point file holds one point per line as comma-separated decimal numbers.
//! Blank lines are skipped; every other line must have the same number of
//! values as the first one.

use std::fs;
use std::path::Path;

use crate::data::PointSet;
use crate::error::{Error, Result};

/// Read a point set from a comma-separated file
pub fn read_points<P: AsRef<Path>>(path: P) -> Result<PointSet> {
    let path = path.as_ref();
    log::info!("Reading points from {}", path.display());

    let content = fs::read_to_string(path)?;
    let points = parse_points(&content)?;

    log::info!(
        "Loaded {} points of dimension {}",
        points.nrows(),
        points.ncols()
    );

    Ok(points)
}

/// Parse a point set from comma-separated text
pub fn parse_points(content: &str) -> Result<PointSet> {
    let mut values: Vec<f64> = Vec::new();
    let mut dimension: Option<usize> = None;
    let mut rows = 0;

    for (idx, raw_line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        let row = parse_row(line, line_no)?;

        match dimension {
            None => dimension = Some(row.len()),
            Some(d) if d != row.len() => {
                return Err(Error::Format {
                    line: line_no,
                    message: format!("expected {} values, found {}", d, row.len()),
                });
            }
            Some(_) => {}
        }

        values.extend(row);
        rows += 1;
    }

    let dimension = dimension.ok_or(Error::EmptyInput)?;

    PointSet::from_shape_vec((rows, dimension), values)
        .map_err(|e| Error::invalid("points", e.to_string()))
}

fn parse_row(line: &str, line_no: usize) -> Result<Vec<f64>> {
    line.split(',')
        .map(|token| {
            let token = token.trim();
            let value: f64 = token.parse().map_err(|_| Error::Format {
                line: line_no,
                message: format!("invalid number {:?}", token),
            })?;
            if !value.is_finite() {
                return Err(Error::Format {
                    line: line_no,
                    message: format!("non-finite value {:?}", token),
                });
            }
            Ok(value)
        })
        .collect()
}
