//! PCA configuration.

use serde::{Deserialize, Serialize};

use pcakit_linalg::eigen::{DEFAULT_MAX_SWEEPS, DEFAULT_TOLERANCE};

/// How to resolve the +/- ambiguity of each eigenvector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SignConvention {
    /// Flip each vector so its largest-magnitude entry is positive.
    #[default]
    LargestAbsolutePositive,
    /// Keep the solver's signs.
    None,
}

/// Order of the principal components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ComponentOrder {
    /// Largest eigenvalue first; ties keep solver order.
    #[default]
    DescendingEigenvalue,
    /// Whatever order the Jacobi sweeps left the diagonal in.
    SolverNative,
}

/// Configuration for [`crate::pca::PcaEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PcaConfig {
    /// Center and scale each column to unit population variance first.
    pub standardize: bool,
    pub sign_convention: SignConvention,
    pub component_order: ComponentOrder,
    /// Eigensolver tolerance on the sum of squared off-diagonal entries.
    pub tol: f64,
    /// Eigensolver sweep cap.
    pub max_sweeps: usize,
    /// Keep only the first k components (after ordering). `None` keeps all.
    pub n_components: Option<usize>,
}

impl Default for PcaConfig {
    fn default() -> Self {
        Self {
            standardize: true,
            sign_convention: SignConvention::default(),
            component_order: ComponentOrder::default(),
            tol: DEFAULT_TOLERANCE,
            max_sweeps: DEFAULT_MAX_SWEEPS,
            n_components: None,
        }
    }
}
