//! Symmetric eigendecomposition by the cyclic Jacobi method.
//!
//! Repeatedly applies plane (Givens) rotations that annihilate one
//! off-diagonal entry at a time, visiting the pairs (p, q), p < q, in
//! row-major order. The product of the rotations converges to the
//! eigenvector matrix and the working copy to diag(eigenvalues).
//!
//! Rotation parameters follow the stable form in Numerical Recipes
//! (`jacobi`): threshold skipping during the first three sweeps and
//! flushing of negligible entries after the fourth.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dense::DenseMatrix;
use crate::error::{LinalgError, Result};
use crate::symmetric::SymmetricMatrix;

/// Convergence tolerance on `sum_{i != j} a_ij^2`.
pub const DEFAULT_TOLERANCE: f64 = 1e-24;

/// Sweep cap. Well-conditioned inputs converge in well under 10 sweeps.
pub const DEFAULT_MAX_SWEEPS: usize = 100;

/// Number of initial sweeps that skip small entries.
const THRESHOLD_SWEEPS: usize = 3;

/// Sweeps after which entries negligible against the diagonal are zeroed.
const FLUSH_AFTER_SWEEPS: usize = 4;

/// Cyclic Jacobi solver for real symmetric matrices.
#[derive(Debug, Clone, Copy)]
pub struct SymmetricEigenSolver {
    /// Convergence tolerance on the sum of squared off-diagonal entries.
    pub tol: f64,
    /// Maximum number of full sweeps.
    pub max_sweeps: usize,
}

impl Default for SymmetricEigenSolver {
    fn default() -> Self {
        Self {
            tol: DEFAULT_TOLERANCE,
            max_sweeps: DEFAULT_MAX_SWEEPS,
        }
    }
}

/// One eigenvalue with its unit-norm eigenvector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EigenPair {
    pub eigenvalue: f64,
    pub eigenvector: Vec<f64>,
}

/// Result of a symmetric eigendecomposition.
///
/// Pairs are kept in solver-native order unless reordered explicitly with
/// [`SymmetricEigen::sorted_descending`] or [`SymmetricEigen::sorted_ascending`].
#[derive(Debug, Clone)]
pub struct SymmetricEigen {
    eigenvalues: Vec<f64>,
    /// Eigenvectors as columns: column i belongs to eigenvalue i.
    eigenvectors: DenseMatrix,
    sweeps: usize,
    off_diagonal: f64,
}

impl SymmetricEigenSolver {
    pub fn new(tol: f64, max_sweeps: usize) -> Self {
        Self { tol, max_sweeps }
    }

    /// Validate `a` as symmetric and decompose it.
    ///
    /// Fails with `InvalidInput` for non-square, empty, non-finite or
    /// asymmetric input and with `ConvergenceFailure` when `max_sweeps`
    /// sweeps do not bring the off-diagonal mass under `tol`.
    pub fn decompose(&self, a: &DenseMatrix) -> Result<SymmetricEigen> {
        let sym = SymmetricMatrix::new(a.clone())?;
        self.decompose_symmetric(&sym)
    }

    /// Eigenvalues only, in solver-native order.
    pub fn eigenvalues_only(&self, a: &DenseMatrix) -> Result<Vec<f64>> {
        Ok(self.decompose(a)?.eigenvalues)
    }

    /// Decompose an already validated symmetric matrix.
    pub fn decompose_symmetric(&self, a: &SymmetricMatrix) -> Result<SymmetricEigen> {
        let n = a.dim();

        if n == 1 {
            return Ok(SymmetricEigen {
                eigenvalues: vec![a.get(0, 0)],
                eigenvectors: DenseMatrix::identity(1),
                sweeps: 0,
                off_diagonal: 0.0,
            });
        }

        // Row-major working copy and rotation accumulator
        let mut w = vec![0.0; n * n];
        for i in 0..n {
            for j in 0..n {
                w[i * n + j] = a.get(i, j);
            }
        }
        let mut v = vec![0.0; n * n];
        for i in 0..n {
            v[i * n + i] = 1.0;
        }

        let mut sweeps = 0;
        loop {
            let off = off_diagonal_sq(&w, n);
            if off < self.tol || off == 0.0 {
                debug!(
                    "Jacobi converged for {}x{} matrix after {} sweeps (off-diagonal: {:.2e})",
                    n,
                    n,
                    sweeps,
                    off.sqrt()
                );
                let eigenvalues = (0..n).map(|i| w[i * n + i]).collect();
                return Ok(SymmetricEigen {
                    eigenvalues,
                    eigenvectors: DenseMatrix::from_row_major(n, n, &v),
                    sweeps,
                    off_diagonal: off.sqrt(),
                });
            }
            if sweeps >= self.max_sweeps {
                return Err(LinalgError::ConvergenceFailure {
                    sweeps,
                    off_diagonal: off.sqrt(),
                });
            }

            let threshold = if sweeps < THRESHOLD_SWEEPS {
                let sum_abs: f64 = (0..n)
                    .flat_map(|p| ((p + 1)..n).map(move |q| (p, q)))
                    .map(|(p, q)| w[p * n + q].abs())
                    .sum();
                0.2 * sum_abs / (n * n) as f64
            } else {
                0.0
            };

            for p in 0..n - 1 {
                for q in (p + 1)..n {
                    let apq = w[p * n + q];
                    let g = 100.0 * apq.abs();
                    let app = w[p * n + p].abs();
                    let aqq = w[q * n + q].abs();

                    if sweeps >= FLUSH_AFTER_SWEEPS && app + g == app && aqq + g == aqq {
                        w[p * n + q] = 0.0;
                        w[q * n + p] = 0.0;
                        continue;
                    }
                    if apq == 0.0 || apq.abs() < threshold {
                        continue;
                    }
                    rotate(&mut w, &mut v, n, p, q);
                }
            }
            sweeps += 1;
        }
    }
}

/// Decompose a symmetric matrix with an explicit tolerance and sweep cap.
pub fn symmetric_eigen(a: &DenseMatrix, tol: f64, max_sweeps: usize) -> Result<SymmetricEigen> {
    SymmetricEigenSolver::new(tol, max_sweeps).decompose(a)
}

/// Sum of squared off-diagonal entries of a row-major n x n buffer.
fn off_diagonal_sq(w: &[f64], n: usize) -> f64 {
    let mut sum = 0.0;
    for p in 0..n {
        for q in (p + 1)..n {
            let x = w[p * n + q];
            sum += x * x;
        }
    }
    2.0 * sum
}

/// Zero `w[p][q]` (and `w[q][p]`) with one rotation, updating `v`'s columns.
fn rotate(w: &mut [f64], v: &mut [f64], n: usize, p: usize, q: usize) {
    let apq = w[p * n + q];
    let app = w[p * n + p];
    let aqq = w[q * n + q];
    let h = aqq - app;

    // t = tan(phi), the smaller root of t^2 + 2 t theta - 1 = 0
    let t = if h.abs() + 100.0 * apq.abs() == h.abs() {
        apq / h
    } else {
        let theta = 0.5 * h / apq;
        let t = 1.0 / (theta.abs() + (1.0 + theta * theta).sqrt());
        if theta < 0.0 {
            -t
        } else {
            t
        }
    };
    let c = 1.0 / (1.0 + t * t).sqrt();
    let s = t * c;
    let tau = s / (1.0 + c);

    w[p * n + p] = app - t * apq;
    w[q * n + q] = aqq + t * apq;
    w[p * n + q] = 0.0;
    w[q * n + p] = 0.0;

    for k in 0..n {
        if k == p || k == q {
            continue;
        }
        let akp = w[k * n + p];
        let akq = w[k * n + q];
        let new_kp = akp - s * (akq + akp * tau);
        let new_kq = akq + s * (akp - akq * tau);
        w[k * n + p] = new_kp;
        w[p * n + k] = new_kp;
        w[k * n + q] = new_kq;
        w[q * n + k] = new_kq;
    }

    for k in 0..n {
        let vkp = v[k * n + p];
        let vkq = v[k * n + q];
        v[k * n + p] = vkp - s * (vkq + vkp * tau);
        v[k * n + q] = vkq + s * (vkp - vkq * tau);
    }
}

impl SymmetricEigen {
    /// Eigenvalues in the current pair order.
    pub fn eigenvalues(&self) -> &[f64] {
        &self.eigenvalues
    }

    /// Eigenvector matrix; column i belongs to `eigenvalues()[i]`.
    pub fn eigenvectors(&self) -> &DenseMatrix {
        &self.eigenvectors
    }

    /// The i-th eigenvector.
    pub fn eigenvector(&self, i: usize) -> Vec<f64> {
        self.eigenvectors.col(i)
    }

    pub fn len(&self) -> usize {
        self.eigenvalues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.eigenvalues.is_empty()
    }

    /// Number of Jacobi sweeps performed.
    pub fn sweeps(&self) -> usize {
        self.sweeps
    }

    /// Frobenius norm of the off-diagonal part at convergence.
    pub fn off_diagonal(&self) -> f64 {
        self.off_diagonal
    }

    pub fn pairs(&self) -> Vec<EigenPair> {
        self.iter()
            .map(|(eigenvalue, eigenvector)| EigenPair {
                eigenvalue,
                eigenvector,
            })
            .collect()
    }

    /// Iterate over (eigenvalue, eigenvector) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (f64, Vec<f64>)> + '_ {
        self.eigenvalues
            .iter()
            .enumerate()
            .map(move |(i, &value)| (value, self.eigenvector(i)))
    }

    /// Pairs sorted by eigenvalue, largest first. Ties keep solver order.
    pub fn sorted_descending(&self) -> SymmetricEigen {
        let mut indices: Vec<usize> = (0..self.len()).collect();
        indices.sort_by(|&i, &j| self.eigenvalues[j].total_cmp(&self.eigenvalues[i]));
        self.reordered(&indices)
    }

    /// Pairs sorted by eigenvalue, smallest first. Ties keep solver order.
    pub fn sorted_ascending(&self) -> SymmetricEigen {
        let mut indices: Vec<usize> = (0..self.len()).collect();
        indices.sort_by(|&i, &j| self.eigenvalues[i].total_cmp(&self.eigenvalues[j]));
        self.reordered(&indices)
    }

    fn reordered(&self, indices: &[usize]) -> SymmetricEigen {
        let n = self.eigenvectors.nrows();
        let mut eigenvectors = DenseMatrix::zeros(n, indices.len());
        for (new_col, &old_col) in indices.iter().enumerate() {
            eigenvectors.set_col(new_col, &self.eigenvectors.col(old_col));
        }
        SymmetricEigen {
            eigenvalues: indices.iter().map(|&i| self.eigenvalues[i]).collect(),
            eigenvectors,
            sweeps: self.sweeps,
            off_diagonal: self.off_diagonal,
        }
    }

    /// Rebuild `V * diag(lambda) * V'`.
    pub fn reconstruct(&self) -> DenseMatrix {
        let n = self.eigenvectors.nrows();
        let mut out = DenseMatrix::zeros(n, n);
        for (k, &lambda) in self.eigenvalues.iter().enumerate() {
            for i in 0..n {
                let vik = self.eigenvectors.get(i, k) * lambda;
                for j in 0..n {
                    out.set(i, j, out.get(i, j) + vik * self.eigenvectors.get(j, k));
                }
            }
        }
        out
    }

    /// Largest residual `||A v_i - lambda_i v_i||` over all pairs.
    pub fn max_residual(&self, a: &DenseMatrix) -> Result<f64> {
        let mut worst = 0.0_f64;
        for (lambda, vec) in self.iter() {
            let av = a.mat_vec(&vec)?;
            let r: f64 = av
                .iter()
                .zip(vec.iter())
                .map(|(x, y)| (x - lambda * y).powi(2))
                .sum::<f64>()
                .sqrt();
            worst = worst.max(r);
        }
        Ok(worst)
    }
}
