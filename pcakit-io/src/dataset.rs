//! Delimited numeric dataset parser.
//!
//! Reads comma, tab or whitespace separated tables of samples x features
//! (e.g. the iris measurements), with an optional header row and optional
//! label columns that are dropped before analysis.

use std::path::Path;

use anyhow::{anyhow, bail, Context, Result};
use tracing::info;

use pcakit_linalg::DenseMatrix;

/// Options for [`parse_dataset`].
#[derive(Debug, Clone, Default)]
pub struct DatasetOptions {
    /// Column delimiter. `None` auto-detects comma, then tab, then whitespace.
    pub delimiter: Option<char>,
    /// Whether the first line is a header. `None` treats it as a header
    /// when none of its fields parse as numbers.
    pub has_header: Option<bool>,
    /// Columns to drop, by header name or by 0-based index.
    pub skip_columns: Vec<String>,
}

/// Parsed dataset: one row per sample, one column per feature.
#[derive(Debug, Clone)]
pub struct Dataset {
    /// Names of the kept columns (`col{index}` when there is no header).
    pub feature_names: Vec<String>,
    pub data: DenseMatrix,
}

impl Dataset {
    pub fn n_samples(&self) -> usize {
        self.data.nrows()
    }

    pub fn n_features(&self) -> usize {
        self.data.ncols()
    }
}

/// Parse a dataset file.
pub fn parse_dataset(path: &Path, options: &DatasetOptions) -> Result<Dataset> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file: {}", path.display()))?;
    let dataset = parse_dataset_str(&contents, options)
        .with_context(|| format!("Failed to parse dataset file: {}", path.display()))?;
    info!(
        "Loaded dataset {}: {} samples x {} features",
        path.display(),
        dataset.n_samples(),
        dataset.n_features()
    );
    Ok(dataset)
}

/// Parse dataset contents already in memory.
pub fn parse_dataset_str(contents: &str, options: &DatasetOptions) -> Result<Dataset> {
    let mut lines = contents
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with('#'));

    let (first_num, first_line) = lines.next().ok_or_else(|| anyhow!("Empty dataset"))?;

    // Detect delimiter
    let delim = options.delimiter.or_else(|| {
        if first_line.contains(',') {
            Some(',')
        } else if first_line.contains('\t') {
            Some('\t')
        } else {
            None
        }
    });

    let first_fields = split_fields(first_line, delim);
    let n_cols = first_fields.len();

    let has_header = options
        .has_header
        .unwrap_or_else(|| first_fields.iter().all(|f| f.parse::<f64>().is_err()));

    let headers: Vec<String> = if has_header {
        first_fields.iter().map(|s| s.to_string()).collect()
    } else {
        (0..n_cols).map(|j| format!("col{}", j)).collect()
    };

    let mut skipped = vec![false; n_cols];
    for name in &options.skip_columns {
        let idx = headers
            .iter()
            .position(|h| h == name)
            .or_else(|| name.parse::<usize>().ok().filter(|&i| i < n_cols))
            .ok_or_else(|| anyhow!("Column '{}' not found in dataset", name))?;
        skipped[idx] = true;
    }
    let kept: Vec<usize> = (0..n_cols).filter(|&j| !skipped[j]).collect();

    let mut rows: Vec<Vec<f64>> = Vec::new();
    let data_lines = if has_header {
        None
    } else {
        Some((first_num, first_line))
    };

    for (line_num, line) in data_lines.into_iter().chain(lines) {
        let fields = split_fields(line, delim);
        if fields.len() != n_cols {
            bail!(
                "Line {} has {} fields (expected {})",
                line_num,
                fields.len(),
                n_cols
            );
        }
        let mut row = Vec::with_capacity(kept.len());
        for &j in &kept {
            let value = parse_value(fields[j]);
            if value.is_nan() {
                bail!(
                    "Line {}: missing or non-numeric value '{}' in column '{}'",
                    line_num,
                    fields[j],
                    headers[j]
                );
            }
            row.push(value);
        }
        rows.push(row);
    }

    if rows.is_empty() {
        bail!("Dataset has no data rows");
    }
    let data = DenseMatrix::from_rows(&rows)?;
    Ok(Dataset {
        feature_names: kept.iter().map(|&j| headers[j].clone()).collect(),
        data,
    })
}

fn split_fields(line: &str, delim: Option<char>) -> Vec<&str> {
    match delim {
        Some(d) => line.split(d).map(|s| s.trim()).collect(),
        None => line.split_whitespace().collect(),
    }
}

/// Parse a string value to f64, treating NA/missing as NaN.
fn parse_value(s: &str) -> f64 {
    match s {
        "NA" | "na" | "Na" | "." | "" | "-" | "NaN" | "nan" => f64::NAN,
        _ => s.parse().unwrap_or(f64::NAN),
    }
}
