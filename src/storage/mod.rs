//! Result presentation and persistence

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use itertools::Itertools;
use ndarray::ArrayView2;
use serde_json::to_string_pretty;

use crate::analysis::AnalysisReport;
use crate::error::Result;

/// Format a matrix as comma-separated rows with 4 decimal places
pub fn format_matrix(matrix: ArrayView2<f64>) -> String {
    let mut out = String::new();
    for row in matrix.outer_iter() {
        out.push_str(&row.iter().map(|v| format!("{:.4}", v)).join(","));
        out.push('\n');
    }
    out
}

/// Format the two comparison scores, SymNMF first
pub fn format_scores(report: &AnalysisReport) -> String {
    format!(
        "nmf: {:.4}\nkmeans: {:.4}\n",
        report.nmf.score, report.kmeans.score
    )
}

/// Save an analysis report as pretty-printed JSON
pub fn save_report<P: AsRef<Path>>(report: &AnalysisReport, path: P) -> Result<()> {
    let path = path.as_ref();
    log::info!("Saving analysis report to {}", path.display());

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }

    let mut file = File::create(path)?;
    file.write_all(to_string_pretty(report)?.as_bytes())?;

    Ok(())
}
