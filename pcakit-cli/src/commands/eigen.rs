//! Eigendecomposition of symmetric matrix files.
//!
//! pcakit eigen --matrix-file cov.json [--matrix-file diag.txt ...] --order descending

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::Args;
use rayon::prelude::*;
use tracing::info;

use pcakit_core::pca::{apply_sign_convention, SignConvention};
use pcakit_io::matrix_file::{read_matrix, write_eigenpairs_json};
use pcakit_linalg::eigen::{DEFAULT_MAX_SWEEPS, DEFAULT_TOLERANCE};
use pcakit_linalg::{EigenPair, SymmetricEigenSolver};

use super::{format_vector, parse_sign_convention};

#[derive(Args)]
pub struct EigenArgs {
    /// Matrix file (.json array of rows, or whitespace/comma separated text); repeatable
    #[arg(long, required = true)]
    matrix_file: Vec<String>,

    /// Convergence tolerance on the sum of squared off-diagonal entries
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tol: f64,

    /// Maximum number of Jacobi sweeps
    #[arg(long, default_value_t = DEFAULT_MAX_SWEEPS)]
    max_sweeps: usize,

    /// Eigenpair order: native, descending, or ascending
    #[arg(long, default_value = "native")]
    order: String,

    /// Eigenvector sign convention: none or largest-abs-positive
    #[arg(long, default_value = "none")]
    sign_convention: String,

    /// JSON output per matrix file, in the same order; repeatable
    #[arg(long)]
    output_json: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PairOrder {
    Native,
    Descending,
    Ascending,
}

fn parse_order(s: &str) -> Result<PairOrder> {
    match s {
        "native" => Ok(PairOrder::Native),
        "descending" => Ok(PairOrder::Descending),
        "ascending" => Ok(PairOrder::Ascending),
        other => bail!(
            "Unknown order '{}' (expected native, descending, or ascending)",
            other
        ),
    }
}

struct Decomposed {
    pairs: Vec<EigenPair>,
    sweeps: usize,
    residual: f64,
}

fn decompose_file(
    path: &Path,
    solver: &SymmetricEigenSolver,
    order: PairOrder,
    sign: SignConvention,
) -> Result<Decomposed> {
    let a = read_matrix(path)?;
    let eigen = solver
        .decompose(&a)
        .with_context(|| format!("Eigendecomposition failed for {}", path.display()))?;
    let residual = eigen.max_residual(&a)?;
    let eigen = match order {
        PairOrder::Native => eigen,
        PairOrder::Descending => eigen.sorted_descending(),
        PairOrder::Ascending => eigen.sorted_ascending(),
    };
    Ok(Decomposed {
        pairs: apply_sign_convention(eigen.pairs(), sign),
        sweeps: eigen.sweeps(),
        residual,
    })
}

pub fn run(args: EigenArgs) -> Result<()> {
    let order = parse_order(&args.order)?;
    let sign = parse_sign_convention(&args.sign_convention)?;
    if !args.output_json.is_empty() && args.output_json.len() != args.matrix_file.len() {
        bail!(
            "Got {} --output-json paths for {} --matrix-file inputs",
            args.output_json.len(),
            args.matrix_file.len()
        );
    }

    let solver = SymmetricEigenSolver::new(args.tol, args.max_sweeps);
    let paths: Vec<PathBuf> = args.matrix_file.iter().map(PathBuf::from).collect();

    info!("Decomposing {} matrix files", paths.len());

    // Collect keeps argument order regardless of scheduling
    let results: Vec<Result<Decomposed>> = paths
        .par_iter()
        .map(|path| decompose_file(path, &solver, order, sign))
        .collect();

    for (i, (path, result)) in paths.iter().zip(results).enumerate() {
        let decomposed = result?;
        info!(
            "{}: {} eigenpairs in {} sweeps, max residual {:.3e}",
            path.display(),
            decomposed.pairs.len(),
            decomposed.sweeps,
            decomposed.residual
        );

        if paths.len() > 1 {
            println!("# {}", path.display());
        }
        for pair in &decomposed.pairs {
            println!(
                "Eigenvalue {:.8} corresponds to Eigenvector {}",
                pair.eigenvalue,
                format_vector(&pair.eigenvector)
            );
        }

        if let Some(out) = args.output_json.get(i) {
            write_eigenpairs_json(&decomposed.pairs, Path::new(out))?;
            info!("Eigenpairs written to {}", out);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decompose_file_descending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.txt");
        std::fs::write(&path, "1 0\n0 2\n").unwrap();

        let solver = SymmetricEigenSolver::default();
        let d = decompose_file(&path, &solver, PairOrder::Descending, SignConvention::None).unwrap();
        assert_eq!(d.pairs[0].eigenvalue, 2.0);
        assert_eq!(d.pairs[0].eigenvector, vec![0.0, 1.0]);
        assert_eq!(d.pairs[1].eigenvalue, 1.0);
        assert_eq!(d.sweeps, 0);
    }

    #[test]
    fn test_decompose_file_rejects_asymmetric() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        std::fs::write(&path, "[[1, 2], [0, 1]]").unwrap();

        let solver = SymmetricEigenSolver::default();
        assert!(decompose_file(&path, &solver, PairOrder::Native, SignConvention::None).is_err());
    }

    #[test]
    fn test_parse_order() {
        assert_eq!(parse_order("ascending").unwrap(), PairOrder::Ascending);
        assert!(parse_order("random").is_err());
    }
}
