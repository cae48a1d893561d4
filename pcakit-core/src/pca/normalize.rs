//! Deterministic ordering and sign normalization of eigenpairs.

use pcakit_linalg::EigenPair;

use super::config::{ComponentOrder, SignConvention};

/// Reorder pairs according to `order`.
///
/// `DescendingEigenvalue` is a stable sort, so equal eigenvalues keep
/// their solver order.
pub fn order_components(mut pairs: Vec<EigenPair>, order: ComponentOrder) -> Vec<EigenPair> {
    match order {
        ComponentOrder::DescendingEigenvalue => {
            pairs.sort_by(|a, b| b.eigenvalue.total_cmp(&a.eigenvalue));
            pairs
        }
        ComponentOrder::SolverNative => pairs,
    }
}

/// Apply `convention` to every eigenvector.
pub fn apply_sign_convention(mut pairs: Vec<EigenPair>, convention: SignConvention) -> Vec<EigenPair> {
    if convention == SignConvention::LargestAbsolutePositive {
        for pair in &mut pairs {
            make_largest_abs_positive(&mut pair.eigenvector);
        }
    }
    pairs
}

/// Negate `v` if its largest-magnitude entry (first one on ties) is negative.
pub fn make_largest_abs_positive(v: &mut [f64]) {
    let mut idx = 0;
    let mut max = f64::NEG_INFINITY;
    for (i, x) in v.iter().enumerate() {
        if x.abs() > max {
            max = x.abs();
            idx = i;
        }
    }
    if v.get(idx).is_some_and(|&x| x < 0.0) {
        for x in v.iter_mut() {
            *x = -*x;
        }
    }
}
