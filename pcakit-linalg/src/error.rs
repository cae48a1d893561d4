//! Error kinds shared by the matrix operations, the eigensolver and PCA.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum LinalgError {
    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Degenerate input: column {column} has zero variance")]
    DegenerateInput { column: usize },

    #[error("Insufficient samples: need at least {required} rows, got {got}")]
    InsufficientSamples { required: usize, got: usize },

    #[error(
        "Jacobi iteration failed to converge after {sweeps} sweeps (off-diagonal: {off_diagonal:.2e})"
    )]
    ConvergenceFailure { sweeps: usize, off_diagonal: f64 },
}

pub type Result<T> = std::result::Result<T, LinalgError>;
