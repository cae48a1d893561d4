//! Property-based tests using proptest.
//!
//! These tests verify invariants that must hold for all valid inputs,
//! rather than checking specific numerical values. They complement
//! the unit tests and integration tests by exploring the input space
//! more broadly, catching edge cases in:
//!   - Eigenpair residuals and orthonormality
//!   - Trace and determinant identities
//!   - PCA determinism and reconstruction

use proptest::prelude::*;

use pcakit_core::pca::{fit_transform, PcaConfig, PcaEngine};
use pcakit_linalg::{DenseMatrix, SymmetricEigenSolver};

// ---------------------------------------------------------------------------
// Strategy helpers (used implicitly by proptest macros below)
// ---------------------------------------------------------------------------

/// Random symmetric n x n matrix with entries in [-10, 10).
fn random_symmetric(n: usize, seed: u64) -> DenseMatrix {
    use rand::Rng;
    use rand::SeedableRng;
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);

    let mut a = DenseMatrix::zeros(n, n);
    for i in 0..n {
        for j in i..n {
            let x = rng.gen_range(-10.0..10.0);
            a.set(i, j, x);
            a.set(j, i, x);
        }
    }
    a
}

/// Random n x p data matrix with per-column offsets and scales.
fn random_data(n: usize, p: usize, seed: u64) -> DenseMatrix {
    use rand::Rng;
    use rand::SeedableRng;
    let mut rng = rand_chacha::ChaCha8Rng::seed_from_u64(seed);

    let offsets: Vec<f64> = (0..p).map(|_| rng.gen_range(-50.0..50.0)).collect();
    let scales: Vec<f64> = (0..p).map(|_| rng.gen_range(0.1..20.0)).collect();
    let mut x = DenseMatrix::zeros(n, p);
    for i in 0..n {
        for j in 0..p {
            x.set(i, j, offsets[j] + scales[j] * rng.gen_range(-1.0..1.0));
        }
    }
    x
}

/// Determinant by Gaussian elimination with partial pivoting.
fn determinant(a: &DenseMatrix) -> f64 {
    let n = a.nrows();
    let mut m = a.to_rows();
    let mut det = 1.0;
    for k in 0..n {
        let pivot = (k..n)
            .max_by(|&i, &j| m[i][k].abs().total_cmp(&m[j][k].abs()))
            .unwrap();
        if m[pivot][k] == 0.0 {
            return 0.0;
        }
        if pivot != k {
            m.swap(pivot, k);
            det = -det;
        }
        det *= m[k][k];
        for i in (k + 1)..n {
            let factor = m[i][k] / m[k][k];
            for j in k..n {
                m[i][j] -= factor * m[k][j];
            }
        }
    }
    det
}

// ---------------------------------------------------------------------------
// 1. Every eigenpair satisfies A v = lambda v
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_eigenpair_residual(
        n in 1usize..12,
        seed in 0u64..10_000,
    ) {
        let a = random_symmetric(n, seed);
        let eigen = SymmetricEigenSolver::default().decompose(&a).unwrap();
        let residual = eigen.max_residual(&a).unwrap();
        let scale = a.frobenius_norm().max(1.0);
        prop_assert!(residual < 1e-10 * scale,
            "residual {} too large for n={} (norm {})", residual, n, scale);
    }
}

// ---------------------------------------------------------------------------
// 2. Eigenvectors are orthonormal
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_eigenvectors_orthonormal(
        n in 1usize..12,
        seed in 0u64..10_000,
    ) {
        let a = random_symmetric(n, seed);
        let eigen = SymmetricEigenSolver::default().decompose(&a).unwrap();

        for i in 0..n {
            let vi = eigen.eigenvector(i);
            let norm: f64 = vi.iter().map(|x| x * x).sum::<f64>().sqrt();
            prop_assert!((norm - 1.0).abs() < 1e-12, "|v{}| = {}", i, norm);
            for j in (i + 1)..n {
                let vj = eigen.eigenvector(j);
                let dot: f64 = vi.iter().zip(&vj).map(|(x, y)| x * y).sum();
                prop_assert!(dot.abs() < 1e-12, "v{} . v{} = {}", i, j, dot);
            }
        }
    }
}

// ---------------------------------------------------------------------------
// 3. Sum of eigenvalues equals the trace, product equals the determinant
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_trace_and_determinant(
        n in 1usize..6,
        seed in 0u64..10_000,
    ) {
        let a = random_symmetric(n, seed);
        let eigen = SymmetricEigenSolver::default().decompose(&a).unwrap();
        let scale = a.frobenius_norm().max(1.0);

        let sum: f64 = eigen.eigenvalues().iter().sum();
        prop_assert!((sum - a.trace()).abs() < 1e-10 * scale,
            "sum {} vs trace {}", sum, a.trace());

        let product: f64 = eigen.eigenvalues().iter().product();
        let det = determinant(&a);
        prop_assert!((product - det).abs() < 1e-9 * scale.powi(n as i32),
            "product {} vs det {}", product, det);
    }
}

// ---------------------------------------------------------------------------
// 4. Diagonal matrices come back unchanged with basis eigenvectors
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_diagonal_is_fixed_point(
        diag in prop::collection::vec(-100.0f64..100.0, 1..10),
    ) {
        let a = DenseMatrix::from_diag(&diag);
        let eigen = SymmetricEigenSolver::default().decompose(&a).unwrap();
        prop_assert_eq!(eigen.eigenvalues(), &diag[..]);
        prop_assert_eq!(eigen.eigenvectors(), &DenseMatrix::identity(diag.len()));
    }
}

// ---------------------------------------------------------------------------
// 5. Reconstruction V diag(lambda) V' recovers A
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_reconstruction(
        n in 2usize..10,
        seed in 0u64..10_000,
    ) {
        let a = random_symmetric(n, seed);
        let eigen = SymmetricEigenSolver::default().decompose(&a).unwrap();
        let err = eigen.reconstruct().sub(&a).unwrap().max_abs();
        prop_assert!(err < 1e-10 * a.frobenius_norm().max(1.0), "reconstruction error {}", err);
    }
}

// ---------------------------------------------------------------------------
// 6. PCA is deterministic
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn prop_pca_idempotent(
        n in 5usize..40,
        p in 2usize..6,
        seed in 0u64..10_000,
    ) {
        let x = random_data(n, p, seed);
        let first = fit_transform(&x, &PcaConfig::default()).unwrap();
        let second = fit_transform(&x, &PcaConfig::default()).unwrap();
        prop_assert_eq!(first.eigenvalues, second.eigenvalues);
        prop_assert_eq!(first.loadings, second.loadings);
        prop_assert_eq!(first.scores, second.scores);
    }
}

// ---------------------------------------------------------------------------
// 7. PCA ordering and sign convention
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn prop_pca_normalized(
        n in 5usize..40,
        p in 2usize..6,
        seed in 0u64..10_000,
    ) {
        let x = random_data(n, p, seed);
        let result = fit_transform(&x, &PcaConfig::default()).unwrap();

        for w in result.eigenvalues.windows(2) {
            prop_assert!(w[0] >= w[1], "eigenvalues not descending: {:?}", result.eigenvalues);
        }
        for k in 0..result.n_components() {
            let c = result.component(k);
            let idx = (0..p)
                .max_by(|&a, &b| c[a].abs().total_cmp(&c[b].abs()))
                .unwrap();
            prop_assert!(c[idx] >= 0.0, "component {} has negative dominant entry: {:?}", k, c);
        }
    }
}

// ---------------------------------------------------------------------------
// 8. Projecting and reconstructing with all components recovers the data
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(ProptestConfig::with_cases(30))]

    #[test]
    fn prop_pca_roundtrip(
        n in 5usize..40,
        p in 2usize..6,
        seed in 0u64..10_000,
        standardize in any::<bool>(),
    ) {
        let x = random_data(n, p, seed);
        let engine = PcaEngine::new(PcaConfig {
            standardize,
            ..PcaConfig::default()
        });
        let model = engine.fit(&x).unwrap();
        let restored = model.inverse_transform(&model.transform(&x).unwrap()).unwrap();
        let err = restored.sub(&x).unwrap().max_abs();
        prop_assert!(err < 1e-9 * x.max_abs().max(1.0), "round-trip error {}", err);
    }
}
