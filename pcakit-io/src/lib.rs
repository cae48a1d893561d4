//! pcakit-io: dataset and matrix file I/O for pcakit.
//!
//! Reads delimited sample tables and square matrix fixtures, and writes
//! matrices and eigenpairs back out.

pub mod dataset;
pub mod matrix_file;

pub use dataset::{parse_dataset, parse_dataset_str, Dataset, DatasetOptions};
pub use matrix_file::{read_matrix, write_eigenpairs_json, write_matrix};
