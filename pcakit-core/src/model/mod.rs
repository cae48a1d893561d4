//! Fitted PCA models and their on-disk format.

pub mod pca_model;
pub mod serialization;

pub use pca_model::PcaModel;
