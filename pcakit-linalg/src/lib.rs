//! pcakit-linalg: Linear algebra for pcakit
//!
//! Provides the dense matrix type with the column statistics and
//! covariance used by PCA, validated symmetric matrices, and the
//! cyclic Jacobi eigensolver.

pub mod dense;
pub mod eigen;
pub mod error;
pub mod symmetric;

pub use dense::DenseMatrix;
pub use eigen::{symmetric_eigen, EigenPair, SymmetricEigen, SymmetricEigenSolver};
pub use error::LinalgError;
pub use symmetric::SymmetricMatrix;
