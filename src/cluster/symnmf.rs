//! Symmetric non-negative matrix factorization
//!
//! Finds a non-negative `n x k` matrix `H` with `H Hᵀ ≈ W` for a symmetric,
//! non-negative `W` using the multiplicative update
//!
//! ```text
//! H_ij <- H_ij * (1 - β + β * (W H)_ij / (H Hᵀ H)_ij)
//! ```
//!
//! With `β = 1` this is the plain ratio update. Every factor in the product
//! is non-negative, so `H` stays non-negative for any non-negative start.
//!
//! Randomness only enters through [`initialize_h`], which takes the RNG as a
//! parameter.

use ndarray::{ArrayView2, Zip};
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use statrs::statistics::Statistics;

use crate::config::SymNmfConfig;
use crate::error::{Error, Result};
use crate::linalg::{frobenius_norm_sq_diff, hadamard, matmul, transpose, Matrix};

/// Result of a SymNMF run
#[derive(Debug, Clone)]
pub struct SymNmfFit {
    /// Non-negative factor, `n x k`
    pub h: Matrix,

    /// Number of updates performed
    pub iterations: usize,

    /// Whether the tolerance was met before the iteration cap
    pub converged: bool,
}

/// Draw an initial `n x k` factor for `w`
///
/// Entries are uniform on `[0, 2 * sqrt(m / k))` where `m` is the mean entry
/// of `w`. Samples are drawn in row-major order.
pub fn initialize_h<R: Rng + ?Sized>(w: ArrayView2<f64>, k: usize, rng: &mut R) -> Result<Matrix> {
    check_target(w)?;
    check_rank(w.nrows(), k)?;

    let m = w.iter().mean();
    let upper = 2.0 * (m / k as f64).sqrt();
    if !(upper.is_finite() && upper > 0.0) {
        return Err(Error::invalid(
            "w",
            format!("mean entry {} gives an empty initialization range", m),
        ));
    }

    log::debug!("Initializing H ({}x{}) uniformly on [0, {:.6})", w.nrows(), k, upper);

    let uniform = Uniform::new(0.0, upper);
    let mut h = Matrix::zeros((w.nrows(), k));
    for value in h.iter_mut() {
        *value = uniform.sample(rng);
    }
    Ok(h)
}

/// Initialize `H` from `rng` and factorize `w`
pub fn factorize_with_rng<R: Rng + ?Sized>(
    w: ArrayView2<f64>,
    config: &SymNmfConfig,
    rng: &mut R,
) -> Result<SymNmfFit> {
    config.validate()?;
    let h = initialize_h(w, config.k, rng)?;
    factorize(w, h, config)
}

/// Factorize `w` starting from `initial_h`
pub fn factorize(w: ArrayView2<f64>, initial_h: Matrix, config: &SymNmfConfig) -> Result<SymNmfFit> {
    config.validate()?;
    check_target(w)?;
    check_rank(w.nrows(), config.k)?;

    let n = w.nrows();
    if initial_h.dim() != (n, config.k) {
        return Err(Error::ShapeMismatch {
            operation: "factorize",
            left: (n, config.k),
            right: initial_h.dim(),
        });
    }
    if initial_h.iter().any(|v| !(v.is_finite() && *v >= 0.0)) {
        return Err(Error::invalid("initial_h", "entries must be finite and non-negative"));
    }
    // The update is multiplicative, so a zero row never recovers
    if let Some(row) = first_zero_row(initial_h.view()) {
        return Err(Error::invalid(
            "initial_h",
            format!("row {} has no positive entry", row),
        ));
    }

    log::info!(
        "Running SymNMF on {}x{} matrix (k={}, max_iter={}, tolerance={})",
        n,
        n,
        config.k,
        config.max_iter,
        config.tolerance
    );

    let mut h = initial_h;
    let mut iterations = 0;
    let mut converged = false;

    while iterations < config.max_iter {
        iterations += 1;

        let h_new = update(w, h.view(), config)?;
        if h_new.iter().any(|v| !v.is_finite()) {
            log::error!("Non-finite entry in H at iteration {}", iterations);
            return Err(Error::ComputationError {
                iteration: iterations,
            });
        }

        let delta = frobenius_norm_sq_diff(h_new.view(), h.view())?;
        log::debug!("Iteration {}: ||H_new - H||^2 = {:.3e}", iterations, delta);

        h = h_new;
        if delta < config.tolerance {
            converged = true;
            break;
        }
    }

    if let Some(row) = first_zero_row(h.view()) {
        log::error!("Row {} of H collapsed to zero by iteration {}", row, iterations);
        return Err(Error::ComputationError {
            iteration: iterations,
        });
    }

    if converged {
        log::info!("SymNMF converged after {} iterations", iterations);
    } else {
        log::warn!("SymNMF reached the iteration cap ({}) without converging", iterations);
    }

    Ok(SymNmfFit {
        h,
        iterations,
        converged,
    })
}

/// One multiplicative update step
fn update(w: ArrayView2<f64>, h: ArrayView2<f64>, config: &SymNmfConfig) -> Result<Matrix> {
    let wh = matmul(w, h)?;
    let ht = transpose(h);
    let hht = matmul(h, ht.view())?;
    let hhth = matmul(hht.view(), h)?;

    let beta = config.beta;
    let guard = config.denominator_guard;

    let mut step = Matrix::zeros(h.dim());
    Zip::from(&mut step)
        .and(&wh)
        .and(&hhth)
        .for_each(|out, &numerator, &denominator| {
            let denominator = if denominator == 0.0 { guard } else { denominator };
            *out = 1.0 - beta + beta * (numerator / denominator);
        });

    hadamard(h, step.view())
}

fn first_zero_row(h: ArrayView2<f64>) -> Option<usize> {
    h.outer_iter().position(|row| !(row.sum() > 0.0))
}

fn check_target(w: ArrayView2<f64>) -> Result<()> {
    let (rows, cols) = w.dim();
    if rows != cols {
        return Err(Error::ShapeMismatch {
            operation: "symnmf",
            left: (rows, cols),
            right: (cols, rows),
        });
    }
    if rows == 0 {
        return Err(Error::EmptyInput);
    }
    if w.iter().any(|v| !(v.is_finite() && *v >= 0.0)) {
        return Err(Error::invalid("w", "entries must be finite and non-negative"));
    }
    Ok(())
}

fn check_rank(n: usize, k: usize) -> Result<()> {
    if k == 0 || k > n {
        return Err(Error::InvalidClusterCount {
            requested: k,
            n_items: n,
        });
    }
    Ok(())
}
