//! Dense matrix operations backed by faer.
//!
//! Wraps faer's `Mat<f64>` with the handful of operations the
//! eigensolver and the PCA pipeline need: products, transposes,
//! column statistics and the sample covariance.
//!
//! Elements are addressed `(row, col)` and every constructor that takes
//! flat or nested data expects it row-major.

use faer::Mat;

use crate::error::{LinalgError, Result};
use crate::symmetric::SymmetricMatrix;

/// A standard deviation at or below this (relative to the column mean)
/// is treated as zero variance.
pub const ZERO_VARIANCE_EPS: f64 = 1e-12;

/// A dense matrix wrapper around faer's `Mat<f64>`.
#[derive(Debug, Clone)]
pub struct DenseMatrix {
    inner: Mat<f64>,
}

impl DenseMatrix {
    /// Create a new dense matrix filled with zeros.
    pub fn zeros(nrows: usize, ncols: usize) -> Self {
        Self {
            inner: Mat::zeros(nrows, ncols),
        }
    }

    /// Create a dense matrix from a flat vec (column-major order).
    pub fn from_col_major(nrows: usize, ncols: usize, data: Vec<f64>) -> Self {
        assert_eq!(data.len(), nrows * ncols);
        let inner = Mat::from_fn(nrows, ncols, |i, j| data[j * nrows + i]);
        Self { inner }
    }

    /// Create a dense matrix from a flat slice (row-major order).
    pub fn from_row_major(nrows: usize, ncols: usize, data: &[f64]) -> Self {
        assert_eq!(data.len(), nrows * ncols);
        let inner = Mat::from_fn(nrows, ncols, |i, j| data[i * ncols + j]);
        Self { inner }
    }

    /// Create a dense matrix from nested rows.
    ///
    /// Every row must have the length of the first one. An empty slice
    /// yields a 0 x 0 matrix.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self> {
        let nrows = rows.len();
        let ncols = rows.first().map_or(0, |r| r.as_ref().len());
        for row in rows {
            let len = row.as_ref().len();
            if len != ncols {
                return Err(LinalgError::DimensionMismatch {
                    expected: ncols,
                    got: len,
                });
            }
        }
        let inner = Mat::from_fn(nrows, ncols, |i, j| rows[i].as_ref()[j]);
        Ok(Self { inner })
    }

    /// Create an identity matrix of size n x n.
    pub fn identity(n: usize) -> Self {
        let inner = Mat::from_fn(n, n, |i, j| if i == j { 1.0 } else { 0.0 });
        Self { inner }
    }

    /// Create a diagonal matrix from a vector.
    pub fn from_diag(diag: &[f64]) -> Self {
        let n = diag.len();
        let inner = Mat::from_fn(n, n, |i, j| if i == j { diag[i] } else { 0.0 });
        Self { inner }
    }

    /// Number of rows.
    pub fn nrows(&self) -> usize {
        self.inner.nrows()
    }

    /// Number of columns.
    pub fn ncols(&self) -> usize {
        self.inner.ncols()
    }

    pub fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }

    pub fn is_empty(&self) -> bool {
        self.nrows() == 0 || self.ncols() == 0
    }

    /// Get element at (row, col).
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.inner.read(row, col)
    }

    /// Set element at (row, col).
    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        self.inner.write(row, col, value);
    }

    /// Get a reference to the underlying faer matrix.
    pub fn as_faer(&self) -> &Mat<f64> {
        &self.inner
    }

    /// Matrix-vector product: self * v.
    pub fn mat_vec(&self, v: &[f64]) -> Result<Vec<f64>> {
        if self.ncols() != v.len() {
            return Err(LinalgError::DimensionMismatch {
                expected: self.ncols(),
                got: v.len(),
            });
        }
        let n = self.nrows();
        let mut result = vec![0.0; n];
        for (j, &vj) in v.iter().enumerate() {
            for (i, r) in result.iter_mut().enumerate() {
                *r += self.inner.read(i, j) * vj;
            }
        }
        Ok(result)
    }

    /// Matrix-matrix product: self * other.
    pub fn mat_mul(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        if self.ncols() != other.nrows() {
            return Err(LinalgError::DimensionMismatch {
                expected: self.ncols(),
                got: other.nrows(),
            });
        }
        let result = &self.inner * &other.inner;
        Ok(DenseMatrix { inner: result })
    }

    /// Transpose.
    pub fn transpose(&self) -> DenseMatrix {
        let inner = self.inner.transpose().to_owned();
        DenseMatrix { inner }
    }

    /// Extract column as a Vec<f64>.
    pub fn col(&self, j: usize) -> Vec<f64> {
        (0..self.nrows()).map(|i| self.inner.read(i, j)).collect()
    }

    /// Extract row as a Vec<f64>.
    pub fn row(&self, i: usize) -> Vec<f64> {
        (0..self.ncols()).map(|j| self.inner.read(i, j)).collect()
    }

    /// All rows, row-major.
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.nrows()).map(|i| self.row(i)).collect()
    }

    /// Set an entire column from a slice.
    pub fn set_col(&mut self, j: usize, data: &[f64]) {
        assert_eq!(data.len(), self.nrows());
        for (i, &x) in data.iter().enumerate() {
            self.inner.write(i, j, x);
        }
    }

    /// Set an entire row from a slice.
    pub fn set_row(&mut self, i: usize, data: &[f64]) {
        assert_eq!(data.len(), self.ncols());
        for (j, &x) in data.iter().enumerate() {
            self.inner.write(i, j, x);
        }
    }

    /// Element-wise subtraction: self - other.
    pub fn sub(&self, other: &DenseMatrix) -> Result<DenseMatrix> {
        if self.nrows() != other.nrows() {
            return Err(LinalgError::DimensionMismatch {
                expected: self.nrows(),
                got: other.nrows(),
            });
        }
        if self.ncols() != other.ncols() {
            return Err(LinalgError::DimensionMismatch {
                expected: self.ncols(),
                got: other.ncols(),
            });
        }
        let inner = Mat::from_fn(self.nrows(), self.ncols(), |i, j| {
            self.inner.read(i, j) - other.inner.read(i, j)
        });
        Ok(DenseMatrix { inner })
    }

    /// Scalar multiplication.
    pub fn scale(&self, s: f64) -> DenseMatrix {
        let inner = Mat::from_fn(self.nrows(), self.ncols(), |i, j| {
            self.inner.read(i, j) * s
        });
        DenseMatrix { inner }
    }

    /// Diagonal of a (possibly rectangular) matrix.
    pub fn diag(&self) -> Vec<f64> {
        let n = self.nrows().min(self.ncols());
        (0..n).map(|i| self.inner.read(i, i)).collect()
    }

    /// Sum of the diagonal.
    pub fn trace(&self) -> f64 {
        self.diag().iter().sum()
    }

    /// Frobenius norm.
    pub fn frobenius_norm(&self) -> f64 {
        let mut sum = 0.0;
        for j in 0..self.ncols() {
            for i in 0..self.nrows() {
                let v = self.inner.read(i, j);
                sum += v * v;
            }
        }
        sum.sqrt()
    }

    /// Largest absolute entry (0 for an empty matrix).
    pub fn max_abs(&self) -> f64 {
        let mut max = 0.0_f64;
        for j in 0..self.ncols() {
            for i in 0..self.nrows() {
                max = max.max(self.inner.read(i, j).abs());
            }
        }
        max
    }

    /// Dot product of two vectors.
    pub fn dot(a: &[f64], b: &[f64]) -> f64 {
        assert_eq!(a.len(), b.len());
        a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
    }

    /// Euclidean norm of a vector.
    pub fn norm(v: &[f64]) -> f64 {
        Self::dot(v, v).sqrt()
    }

    /// Arithmetic mean of each column.
    pub fn column_means(&self) -> Vec<f64> {
        let n = self.nrows();
        if n == 0 {
            return vec![0.0; self.ncols()];
        }
        (0..self.ncols())
            .map(|j| {
                let sum: f64 = (0..n).map(|i| self.inner.read(i, j)).sum();
                sum / n as f64
            })
            .collect()
    }

    /// Population standard deviation (divisor n) of each column.
    ///
    /// Fails with `DegenerateInput` on the first column whose spread is
    /// zero, since standardizing it would divide by zero.
    pub fn column_std(&self) -> Result<Vec<f64>> {
        let n = self.nrows();
        if n == 0 {
            return Err(LinalgError::InsufficientSamples {
                required: 1,
                got: 0,
            });
        }
        let means = self.column_means();
        let mut stds = Vec::with_capacity(self.ncols());
        for (j, &mean) in means.iter().enumerate() {
            let ss: f64 = (0..n)
                .map(|i| {
                    let d = self.inner.read(i, j) - mean;
                    d * d
                })
                .sum();
            let sd = (ss / n as f64).sqrt();
            if sd.is_nan() || sd <= ZERO_VARIANCE_EPS * mean.abs().max(1.0) {
                return Err(LinalgError::DegenerateInput { column: j });
            }
            stds.push(sd);
        }
        Ok(stds)
    }

    /// Sample covariance `(X' * X) / (n - 1)` of already-centered data.
    ///
    /// Only the upper triangle is accumulated; the lower one is mirrored,
    /// so the result is exactly symmetric.
    pub fn covariance(&self) -> Result<SymmetricMatrix> {
        let n = self.nrows();
        if n < 2 {
            return Err(LinalgError::InsufficientSamples { required: 2, got: n });
        }
        let p = self.ncols();
        let divisor = (n - 1) as f64;
        let mut cov = DenseMatrix::zeros(p, p);
        for j in 0..p {
            for k in j..p {
                let mut s = 0.0;
                for i in 0..n {
                    s += self.inner.read(i, j) * self.inner.read(i, k);
                }
                let v = s / divisor;
                cov.set(j, k, v);
                if j != k {
                    cov.set(k, j, v);
                }
            }
        }
        Ok(SymmetricMatrix::from_covariance(cov))
    }
}

impl PartialEq for DenseMatrix {
    fn eq(&self, other: &Self) -> bool {
        self.nrows() == other.nrows()
            && self.ncols() == other.ncols()
            && (0..self.nrows())
                .all(|i| (0..self.ncols()).all(|j| self.get(i, j) == other.get(i, j)))
    }
}

impl std::fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.nrows() {
            for j in 0..self.ncols() {
                if j > 0 {
                    write!(f, "\t")?;
                }
                write!(f, "{:.6}", self.inner.read(i, j))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
