//! PcaModel: a fitted PCA, used to project new samples.
//!
//! Contains everything needed to map data into component space and back:
//! - Column means and scales applied before projection
//! - Loadings (components as rows)
//! - Eigenvalues and explained variance ratios
//! - The configuration the model was fitted with

use serde::{Deserialize, Serialize};

use pcakit_linalg::{DenseMatrix, LinalgError};

use crate::pca::{PcaConfig, PcaResult};
use crate::Result;

/// The fitted model, serialized to .pca.model files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PcaModel {
    /// Magic bytes for validation.
    pub magic: [u8; 4],
    /// Version number for forward compatibility.
    pub version: u32,
    /// Number of input features (p).
    pub n_features: usize,
    /// Number of kept components (k).
    pub n_components: usize,
    /// Feature names, if the dataset had a header (empty otherwise).
    pub feature_names: Vec<String>,
    /// Per-feature mean subtracted before projection.
    pub mean: Vec<f64>,
    /// Per-feature scale divided out before projection.
    pub scale: Vec<f64>,
    /// Component eigenvalues, in component order.
    pub eigenvalues: Vec<f64>,
    pub explained_variance_ratio: Vec<f64>,
    /// Loadings as flat row-major (k x p).
    pub loadings_flat: Vec<f64>,
    /// Configuration used for fitting.
    pub config: PcaConfig,
}

impl PcaModel {
    /// Magic bytes: "PCAM" (PCA Model).
    pub const MAGIC: [u8; 4] = [b'P', b'C', b'A', b'M'];
    /// Current model version.
    pub const VERSION: u32 = 1;

    pub fn from_result(result: &PcaResult, config: &PcaConfig, feature_names: Vec<String>) -> Self {
        let k = result.loadings.nrows();
        let p = result.loadings.ncols();
        let mut loadings_flat = Vec::with_capacity(k * p);
        for i in 0..k {
            loadings_flat.extend(result.loadings.row(i));
        }
        Self {
            magic: Self::MAGIC,
            version: Self::VERSION,
            n_features: p,
            n_components: k,
            feature_names,
            mean: result.mean.clone(),
            scale: result.scale.clone(),
            eigenvalues: result.eigenvalues.clone(),
            explained_variance_ratio: result.explained_variance_ratio.clone(),
            loadings_flat,
            config: config.clone(),
        }
    }

    /// Loadings as a k x p matrix.
    pub fn loadings(&self) -> DenseMatrix {
        DenseMatrix::from_row_major(self.n_components, self.n_features, &self.loadings_flat)
    }

    /// Project samples (rows of `x`) onto the components.
    pub fn transform(&self, x: &DenseMatrix) -> Result<DenseMatrix> {
        if x.ncols() != self.n_features {
            return Err(LinalgError::DimensionMismatch {
                expected: self.n_features,
                got: x.ncols(),
            });
        }
        let mut centered = DenseMatrix::zeros(x.nrows(), x.ncols());
        for j in 0..x.ncols() {
            for i in 0..x.nrows() {
                centered.set(i, j, (x.get(i, j) - self.mean[j]) / self.scale[j]);
            }
        }
        centered.mat_mul(&self.loadings().transpose())
    }

    /// Map scores back to the original feature space.
    ///
    /// Exact (up to rounding) when all components were kept.
    pub fn inverse_transform(&self, scores: &DenseMatrix) -> Result<DenseMatrix> {
        if scores.ncols() != self.n_components {
            return Err(LinalgError::DimensionMismatch {
                expected: self.n_components,
                got: scores.ncols(),
            });
        }
        let mut x = scores.mat_mul(&self.loadings())?;
        for j in 0..x.ncols() {
            for i in 0..x.nrows() {
                x.set(i, j, x.get(i, j) * self.scale[j] + self.mean[j]);
            }
        }
        Ok(x)
    }
}
