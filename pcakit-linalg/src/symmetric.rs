//! Validated symmetric matrices.
//!
//! The eigensolver only accepts square matrices with `M[i][j] == M[j][i]`
//! up to a small slack. Accepted matrices are symmetrized as `(M + M') / 2`
//! so rounding asymmetry never leaks into the rotations.

use crate::dense::DenseMatrix;
use crate::error::{LinalgError, Result};

/// Default symmetry slack, relative to `max(1, max|M|)`.
pub const DEFAULT_SYMMETRY_SLACK: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct SymmetricMatrix {
    inner: DenseMatrix,
}

impl SymmetricMatrix {
    /// Validate and symmetrize `m` using [`DEFAULT_SYMMETRY_SLACK`].
    pub fn new(m: DenseMatrix) -> Result<Self> {
        Self::with_slack(m, DEFAULT_SYMMETRY_SLACK)
    }

    /// Validate and symmetrize `m`, tolerating `|M[i][j] - M[j][i]|` up to
    /// `slack * max(1, max|M|)`.
    pub fn with_slack(m: DenseMatrix, slack: f64) -> Result<Self> {
        if !m.is_square() {
            return Err(LinalgError::InvalidInput(format!(
                "matrix must be square, got {}x{}",
                m.nrows(),
                m.ncols()
            )));
        }
        let n = m.nrows();
        if n == 0 {
            return Err(LinalgError::InvalidInput(
                "matrix must not be empty".to_string(),
            ));
        }

        for i in 0..n {
            for j in 0..n {
                let v = m.get(i, j);
                if !v.is_finite() {
                    return Err(LinalgError::InvalidInput(format!(
                        "non-finite entry {} at ({}, {})",
                        v, i, j
                    )));
                }
            }
        }

        let limit = slack * m.max_abs().max(1.0);
        let mut worst = (0, 0, 0.0_f64);
        for i in 0..n {
            for j in (i + 1)..n {
                let diff = (m.get(i, j) - m.get(j, i)).abs();
                if diff > worst.2 {
                    worst = (i, j, diff);
                }
            }
        }
        if worst.2 > limit {
            return Err(LinalgError::InvalidInput(format!(
                "matrix is not symmetric: |M[{i}][{j}] - M[{j}][{i}]| = {:.3e} exceeds {:.3e}",
                worst.2,
                limit,
                i = worst.0,
                j = worst.1,
            )));
        }

        let mut inner = m;
        for i in 0..n {
            for j in (i + 1)..n {
                let avg = 0.5 * (inner.get(i, j) + inner.get(j, i));
                inner.set(i, j, avg);
                inner.set(j, i, avg);
            }
        }
        Ok(Self { inner })
    }

    /// Wrap a matrix that is symmetric by construction.
    pub(crate) fn from_covariance(inner: DenseMatrix) -> Self {
        debug_assert!(inner.is_square());
        Self { inner }
    }

    /// Number of rows (== number of columns).
    pub fn dim(&self) -> usize {
        self.inner.nrows()
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.inner.get(row, col)
    }

    pub fn as_dense(&self) -> &DenseMatrix {
        &self.inner
    }

    pub fn into_dense(self) -> DenseMatrix {
        self.inner
    }
}

impl TryFrom<DenseMatrix> for SymmetricMatrix {
    type Error = LinalgError;

    fn try_from(m: DenseMatrix) -> Result<Self> {
        Self::new(m)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_symmetric() {
        let m = DenseMatrix::from_row_major(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let s = SymmetricMatrix::new(m.clone()).unwrap();
        assert_eq!(s.dim(), 2);
        assert_eq!(s.as_dense(), &m);
    }

    #[test]
    fn test_symmetrizes_within_slack() {
        let m = DenseMatrix::from_row_major(2, 2, &[2.0, 1.0 + 1e-12, 1.0, 3.0]);
        let s = SymmetricMatrix::new(m).unwrap();
        assert_eq!(s.get(0, 1), s.get(1, 0));
    }

    #[test]
    fn test_rejects_non_square() {
        let m = DenseMatrix::zeros(2, 3);
        assert!(matches!(
            SymmetricMatrix::new(m),
            Err(LinalgError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_empty() {
        assert!(matches!(
            SymmetricMatrix::new(DenseMatrix::zeros(0, 0)),
            Err(LinalgError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_rejects_asymmetric() {
        let m = DenseMatrix::from_row_major(2, 2, &[1.0, 2.0, 2.5, 1.0]);
        let err = SymmetricMatrix::new(m).unwrap_err();
        match err {
            LinalgError::InvalidInput(msg) => assert!(msg.contains("not symmetric"), "{}", msg),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_nan() {
        let m = DenseMatrix::from_row_major(2, 2, &[1.0, f64::NAN, f64::NAN, 1.0]);
        assert!(matches!(
            SymmetricMatrix::new(m),
            Err(LinalgError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_custom_slack() {
        let m = DenseMatrix::from_row_major(2, 2, &[1.0, 2.0, 2.001, 1.0]);
        assert!(SymmetricMatrix::new(m.clone()).is_err());
        let s = SymmetricMatrix::with_slack(m, 1e-2).unwrap();
        assert!((s.get(0, 1) - 2.0005).abs() < 1e-12);
    }
}
