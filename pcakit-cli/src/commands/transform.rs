//! Project a dataset with a saved PCA model.
//!
//! pcakit transform --model-file iris.pca.model --data-file new.csv --output scores.txt

use std::path::Path;

use anyhow::{bail, Result};
use clap::Args;
use tracing::{info, warn};

use pcakit_core::model::serialization::load_model;
use pcakit_io::dataset::{parse_dataset, DatasetOptions};
use pcakit_io::matrix_file::write_matrix;

#[derive(Args)]
pub struct TransformArgs {
    /// Model file written by `pcakit pca --model-out`
    #[arg(long)]
    model_file: String,

    /// Dataset file with the same feature columns as the fitted data
    #[arg(long)]
    data_file: String,

    /// Column to drop before projecting, by header name or 0-based index; repeatable
    #[arg(long)]
    skip_column: Vec<String>,

    /// Output file for the projected samples
    #[arg(long)]
    output: String,
}

pub fn run(args: TransformArgs) -> Result<()> {
    let model = load_model(Path::new(&args.model_file))?;
    info!(
        "Loaded model {}: {} features -> {} components",
        args.model_file, model.n_features, model.n_components
    );

    let options = DatasetOptions {
        skip_columns: args.skip_column.clone(),
        ..DatasetOptions::default()
    };
    let dataset = parse_dataset(Path::new(&args.data_file), &options)?;

    if dataset.n_features() != model.n_features {
        bail!(
            "Dataset has {} features but the model was fitted on {}",
            dataset.n_features(),
            model.n_features
        );
    }
    if !model.feature_names.is_empty() && model.feature_names != dataset.feature_names {
        warn!(
            "Feature names differ from the fitted model: {:?} vs {:?}",
            dataset.feature_names, model.feature_names
        );
    }

    let scores = model.transform(&dataset.data)?;
    write_matrix(&scores, Path::new(&args.output))?;
    info!(
        "Projected {} samples onto {} components, written to {}",
        scores.nrows(),
        scores.ncols(),
        args.output
    );

    Ok(())
}
