//! pcakit-core: Principal component analysis for pcakit
//!
//! Implements the PCA pipeline on top of the Jacobi eigensolver in
//! `pcakit-linalg`: standardization, covariance, eigendecomposition,
//! deterministic component ordering and sign normalization, plus
//! fitted models that can be saved, loaded and applied to new data.

pub mod model;
pub mod pca;

pub use pcakit_linalg::LinalgError as PcaError;

/// Result type of the PCA pipeline. Failures are the linear algebra
/// error kinds, propagated unchanged.
pub type Result<T> = std::result::Result<T, PcaError>;
