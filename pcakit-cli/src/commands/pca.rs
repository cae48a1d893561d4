//! PCA on a numeric dataset.
//!
//! pcakit pca --data-file iris.csv --skip-column species --model-out iris.pca.model

use std::path::Path;

use anyhow::Result;
use clap::Args;
use tracing::{debug, info};

use pcakit_core::model::serialization::{model_summary, save_model, save_model_json};
use pcakit_core::model::PcaModel;
use pcakit_core::pca::{PcaConfig, PcaEngine, PcaResult};
use pcakit_io::dataset::{parse_dataset, DatasetOptions};
use pcakit_io::matrix_file::write_matrix;
use pcakit_linalg::eigen::{DEFAULT_MAX_SWEEPS, DEFAULT_TOLERANCE};

use super::{format_vector, parse_component_order, parse_sign_convention};

#[derive(Args)]
pub struct PcaArgs {
    /// Dataset file (comma, tab or whitespace separated)
    #[arg(long)]
    data_file: String,

    /// Column to drop before analysis, by header name or 0-based index; repeatable
    #[arg(long)]
    skip_column: Vec<String>,

    /// Use the raw columns instead of standardizing them
    #[arg(long)]
    no_standardize: bool,

    /// Component order: descending or native
    #[arg(long, default_value = "descending")]
    order: String,

    /// Eigenvector sign convention: largest-abs-positive or none
    #[arg(long, default_value = "largest-abs-positive")]
    sign_convention: String,

    /// Keep only the first K components
    #[arg(long)]
    n_components: Option<usize>,

    /// Convergence tolerance on the sum of squared off-diagonal entries
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tol: f64,

    /// Maximum number of Jacobi sweeps
    #[arg(long, default_value_t = DEFAULT_MAX_SWEEPS)]
    max_sweeps: usize,

    /// Save the fitted model here (a .json sidecar is written next to it)
    #[arg(long)]
    model_out: Option<String>,

    /// Write the projected samples here
    #[arg(long)]
    scores_out: Option<String>,
}

impl PcaArgs {
    fn config(&self) -> Result<PcaConfig> {
        Ok(PcaConfig {
            standardize: !self.no_standardize,
            sign_convention: parse_sign_convention(&self.sign_convention)?,
            component_order: parse_component_order(&self.order)?,
            tol: self.tol,
            max_sweeps: self.max_sweeps,
            n_components: self.n_components,
        })
    }
}

pub fn run(args: PcaArgs) -> Result<()> {
    let config = args.config()?;
    debug!("PCA config: {}", serde_json::to_string(&config)?);

    let options = DatasetOptions {
        skip_columns: args.skip_column.clone(),
        ..DatasetOptions::default()
    };
    let dataset = parse_dataset(Path::new(&args.data_file), &options)?;

    let engine = PcaEngine::new(config.clone());
    let result = engine.fit_transform(&dataset.data)?;

    print_result(&result, &dataset.feature_names);

    if let Some(ref out) = args.model_out {
        let model = PcaModel::from_result(&result, &config, dataset.feature_names.clone());
        let path = Path::new(out);
        save_model(&model, path)?;
        let sidecar = format!("{}.json", out);
        save_model_json(&model, Path::new(&sidecar))?;
        info!("Model written to {} (sidecar {})", out, sidecar);
        debug!("{}", model_summary(&model));
    }

    if let Some(ref out) = args.scores_out {
        write_matrix(&result.scores, Path::new(out))?;
        info!(
            "Scores ({} x {}) written to {}",
            result.scores.nrows(),
            result.scores.ncols(),
            out
        );
    }

    Ok(())
}

fn print_result(result: &PcaResult, feature_names: &[String]) {
    println!("Features: {}", feature_names.join(", "));
    println!("Covariance matrix:");
    print!("{}", result.covariance);
    println!("Eigenvalues: {}", format_vector(&result.eigenvalues));
    println!(
        "Explained variance ratio: {}",
        format_vector(&result.explained_variance_ratio)
    );
    for (i, lambda) in result.eigenvalues.iter().enumerate() {
        println!(
            "Eigenvalue {:.8} corresponds to Eigenvector {}",
            lambda,
            format_vector(&result.component(i))
        );
    }
}
