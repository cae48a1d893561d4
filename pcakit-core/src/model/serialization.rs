//! Model serialization and deserialization.
//!
//! Uses bincode for fast, compact binary serialization.
//! Format: magic bytes (PCAM) + version (u32) + bincode payload.
//! Optional JSON sidecar for human inspection.

use anyhow::{bail, Context, Result};
use std::path::Path;

use super::pca_model::PcaModel;

/// Save a model to a binary file (.pca.model).
pub fn save_model(model: &PcaModel, path: &Path) -> Result<()> {
    let encoded = bincode::serialize(model)?;
    std::fs::write(path, &encoded)
        .with_context(|| format!("Failed to write model file: {}", path.display()))?;
    Ok(())
}

/// Load a model from a binary file (.pca.model).
pub fn load_model(path: &Path) -> Result<PcaModel> {
    let data = std::fs::read(path)
        .with_context(|| format!("Failed to read model file: {}", path.display()))?;
    let model: PcaModel = bincode::deserialize(&data)?;

    // Validate magic bytes
    if model.magic != PcaModel::MAGIC {
        bail!(
            "Invalid model file: expected magic bytes {:?}, got {:?}",
            PcaModel::MAGIC,
            model.magic
        );
    }
    if model.version > PcaModel::VERSION {
        bail!(
            "Model file version {} is newer than supported version {}",
            model.version,
            PcaModel::VERSION
        );
    }
    if model.mean.len() != model.n_features || model.scale.len() != model.n_features {
        bail!(
            "Corrupt model file: {} means and {} scales for {} features",
            model.mean.len(),
            model.scale.len(),
            model.n_features
        );
    }
    if model.eigenvalues.len() != model.n_components
        || model.explained_variance_ratio.len() != model.n_components
    {
        bail!(
            "Corrupt model file: {} eigenvalues and {} variance ratios for {} components",
            model.eigenvalues.len(),
            model.explained_variance_ratio.len(),
            model.n_components
        );
    }
    if model.loadings_flat.len() != model.n_components * model.n_features {
        bail!(
            "Corrupt model file: {} loadings for {} x {} components",
            model.loadings_flat.len(),
            model.n_components,
            model.n_features
        );
    }

    Ok(model)
}

/// Save a JSON sidecar for debugging (.pca.model.json).
pub fn save_model_json(model: &PcaModel, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(model)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Summary of a model (for display).
pub fn model_summary(model: &PcaModel) -> String {
    let ratios: Vec<String> = model
        .explained_variance_ratio
        .iter()
        .map(|r| format!("{:.4}", r))
        .collect();
    format!(
        "PCA Model v{}\n\
         Features: {}\n\
         Components: {}\n\
         Eigenvalues: {:?}\n\
         Explained variance ratio: [{}]\n\
         Standardized: {}\n\
         Sign convention: {:?}\n\
         Component order: {:?}",
        model.version,
        model.n_features,
        model.n_components,
        model.eigenvalues,
        ratios.join(", "),
        if model.config.standardize { "yes" } else { "no" },
        model.config.sign_convention,
        model.config.component_order,
    )
}
