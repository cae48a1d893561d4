//! Principal component analysis.
//!
//! Standardize -> covariance -> symmetric eigendecomposition ->
//! ordering and sign normalization of the components. The ordering
//! and sign policies are configurable so raw solver output can be
//! inspected as well as the canonical form used for fixtures.

pub mod config;
pub mod engine;
pub mod normalize;

pub use config::{ComponentOrder, PcaConfig, SignConvention};
pub use engine::{fit_transform, standardize, PcaEngine, PcaResult, Standardized};
pub use normalize::{apply_sign_convention, order_components};
