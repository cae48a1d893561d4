//! PCA fitting.
//!
//! Given X (n samples x p features):
//!   X_std[i,j] = (X[i,j] - mean_j) / sd_j        (population sd)
//!   C = X_std' X_std / (n - 1)
//!   C = V diag(lambda) V'                         (cyclic Jacobi)
//! then the pairs are ordered and sign-normalized per [`PcaConfig`],
//! loadings = V' (components as rows) and scores = X_std V.

use tracing::{debug, info};

use pcakit_linalg::{DenseMatrix, LinalgError, SymmetricEigenSolver};

use super::config::PcaConfig;
use super::normalize::{apply_sign_convention, order_components};
use crate::model::PcaModel;
use crate::Result;

/// Column-standardized data together with the statistics used.
#[derive(Debug, Clone)]
pub struct Standardized {
    pub data: DenseMatrix,
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

/// Standardize each column to zero mean and unit population variance.
///
/// Fails with `DegenerateInput` if a column is constant.
pub fn standardize(x: &DenseMatrix) -> Result<Standardized> {
    let mean = x.column_means();
    let scale = x.column_std()?;
    let mut data = DenseMatrix::zeros(x.nrows(), x.ncols());
    for j in 0..x.ncols() {
        for i in 0..x.nrows() {
            data.set(i, j, (x.get(i, j) - mean[j]) / scale[j]);
        }
    }
    Ok(Standardized { data, mean, scale })
}

/// Output of [`fit_transform`].
#[derive(Debug, Clone)]
pub struct PcaResult {
    /// Principal axes as rows (k x p), in final order.
    pub loadings: DenseMatrix,
    /// Eigenvalue of each kept component (variance along the axis).
    pub eigenvalues: Vec<f64>,
    /// Projected data (n x k).
    pub scores: DenseMatrix,
    /// Fraction of total variance per kept component.
    pub explained_variance_ratio: Vec<f64>,
    /// Sum of all eigenvalues (= trace of the covariance).
    pub total_variance: f64,
    /// Column means subtracted before projection (zeros when not standardizing).
    pub mean: Vec<f64>,
    /// Column scales divided out before projection (ones when not standardizing).
    pub scale: Vec<f64>,
    /// Covariance matrix that was decomposed.
    pub covariance: DenseMatrix,
}

impl PcaResult {
    pub fn n_components(&self) -> usize {
        self.eigenvalues.len()
    }

    /// The i-th principal axis.
    pub fn component(&self, i: usize) -> Vec<f64> {
        self.loadings.row(i)
    }
}

/// Run the full PCA pipeline on `x`. `x` is never modified.
pub fn fit_transform(x: &DenseMatrix, config: &PcaConfig) -> Result<PcaResult> {
    let n = x.nrows();
    let p = x.ncols();
    if p == 0 {
        return Err(LinalgError::InvalidInput("dataset has no features".to_string()));
    }
    if n < 2 {
        return Err(LinalgError::InsufficientSamples { required: 2, got: n });
    }
    if let Some((i, j)) = first_non_finite(x) {
        return Err(LinalgError::InvalidInput(format!(
            "non-finite value {} at row {}, column {}",
            x.get(i, j),
            i,
            j
        )));
    }
    let k = match config.n_components {
        Some(k) if k == 0 || k > p => {
            return Err(LinalgError::InvalidInput(format!(
                "n_components must be in 1..={}, got {}",
                p, k
            )));
        }
        Some(k) => k,
        None => p,
    };

    info!("Fitting PCA: {} samples x {} features", n, p);

    let standardized = if config.standardize {
        let s = standardize(x)?;
        debug!("Column means: {:?}", s.mean);
        debug!("Column std: {:?}", s.scale);
        s
    } else {
        Standardized {
            data: x.clone(),
            mean: vec![0.0; p],
            scale: vec![1.0; p],
        }
    };

    let covariance = standardized.data.covariance()?;
    let eigen = SymmetricEigenSolver::new(config.tol, config.max_sweeps)
        .decompose_symmetric(&covariance)?;
    debug!("Eigensolver finished in {} sweeps", eigen.sweeps());

    let total_variance: f64 = eigen.eigenvalues().iter().sum();

    let pairs = order_components(eigen.pairs(), config.component_order);
    let mut pairs = apply_sign_convention(pairs, config.sign_convention);
    pairs.truncate(k);

    let mut loadings = DenseMatrix::zeros(k, p);
    for (i, pair) in pairs.iter().enumerate() {
        loadings.set_row(i, &pair.eigenvector);
    }
    let eigenvalues: Vec<f64> = pairs.iter().map(|pair| pair.eigenvalue).collect();
    let explained_variance_ratio = eigenvalues
        .iter()
        .map(|&lambda| {
            if total_variance != 0.0 {
                lambda / total_variance
            } else {
                0.0
            }
        })
        .collect();

    let scores = standardized.data.mat_mul(&loadings.transpose())?;

    info!(
        "PCA kept {} of {} components, leading eigenvalue {:.6}",
        k,
        p,
        eigenvalues.first().copied().unwrap_or(0.0)
    );

    Ok(PcaResult {
        loadings,
        eigenvalues,
        scores,
        explained_variance_ratio,
        total_variance,
        mean: standardized.mean,
        scale: standardized.scale,
        covariance: covariance.into_dense(),
    })
}

fn first_non_finite(x: &DenseMatrix) -> Option<(usize, usize)> {
    (0..x.nrows())
        .flat_map(|i| (0..x.ncols()).map(move |j| (i, j)))
        .find(|&(i, j)| !x.get(i, j).is_finite())
}

/// PCA front end holding a configuration.
#[derive(Debug, Clone, Default)]
pub struct PcaEngine {
    config: PcaConfig,
}

impl PcaEngine {
    pub fn new(config: PcaConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PcaConfig {
        &self.config
    }

    pub fn fit_transform(&self, x: &DenseMatrix) -> Result<PcaResult> {
        fit_transform(x, &self.config)
    }

    /// Fit and keep only what is needed to project new data.
    pub fn fit(&self, x: &DenseMatrix) -> Result<PcaModel> {
        let result = self.fit_transform(x)?;
        Ok(PcaModel::from_result(&result, &self.config, Vec::new()))
    }
}
