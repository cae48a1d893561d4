//! Matrix fixture reader/writer.
//!
//! Two on-disk forms are understood:
//! - `.json`: an array of rows, each an array of numbers
//! - anything else: one row per line, fields separated by commas or
//!   whitespace; lines starting with '#' or '%' are comments

use std::path::Path;

use anyhow::{bail, Context, Result};

use pcakit_linalg::{DenseMatrix, EigenPair};

/// Read a matrix from a JSON or plain-text file.
pub fn read_matrix(path: &Path) -> Result<DenseMatrix> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read matrix file: {}", path.display()))?;

    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

    let rows = if is_json {
        serde_json::from_str::<Vec<Vec<f64>>>(&contents)
            .with_context(|| format!("Invalid JSON matrix: {}", path.display()))?
    } else {
        parse_text_rows(&contents)
            .with_context(|| format!("Invalid matrix file: {}", path.display()))?
    };

    DenseMatrix::from_rows(&rows)
        .with_context(|| format!("Ragged matrix in {}", path.display()))
}

/// Parse whitespace or comma separated rows.
pub fn parse_text_rows(contents: &str) -> Result<Vec<Vec<f64>>> {
    let mut rows = Vec::new();
    for (line_num, line) in contents.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
            continue;
        }
        let row = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|s| !s.is_empty())
            .map(|s| {
                s.parse::<f64>()
                    .with_context(|| format!("Line {}: invalid number '{}'", line_num + 1, s))
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }
    if rows.is_empty() {
        bail!("Matrix file contains no rows");
    }
    Ok(rows)
}

/// Write a matrix as tab-separated rows with round-trip precision.
pub fn write_matrix(m: &DenseMatrix, path: &Path) -> Result<()> {
    use std::io::Write;
    let mut f = std::io::BufWriter::new(
        std::fs::File::create(path)
            .with_context(|| format!("Failed to create {}", path.display()))?,
    );

    for i in 0..m.nrows() {
        let row: Vec<String> = (0..m.ncols()).map(|j| format!("{}", m.get(i, j))).collect();
        writeln!(f, "{}", row.join("\t"))?;
    }
    f.flush()?;

    Ok(())
}

/// Write eigenpairs as a JSON array of `{eigenvalue, eigenvector}` objects.
pub fn write_eigenpairs_json(pairs: &[EigenPair], path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(pairs)?;
    std::fs::write(path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_text_rows() {
        let rows = parse_text_rows("# 2x2\n1 0\n0, 2\n").unwrap();
        assert_eq!(rows, vec![vec![1.0, 0.0], vec![0.0, 2.0]]);
    }

    #[test]
    fn test_parse_text_rows_invalid() {
        let err = parse_text_rows("1 2\n3 x\n").unwrap_err();
        assert!(err.to_string().contains("Line 2"), "{}", err);
    }

    #[test]
    fn test_read_json_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        std::fs::write(&path, "[[1.00671141, -0.11835884], [-0.11835884, 1.00671141]]").unwrap();
        let m = read_matrix(&path).unwrap();
        assert_eq!(m.nrows(), 2);
        assert_eq!(m.get(0, 1), -0.11835884);
    }

    #[test]
    fn test_read_ragged_json_matrix() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.json");
        std::fs::write(&path, "[[1, 2], [3]]").unwrap();
        assert!(read_matrix(&path).is_err());
    }

    #[test]
    fn test_write_read_text() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.txt");
        let m = DenseMatrix::from_rows(&[vec![0.1, -2.5e-8], vec![3.0, 1.0 / 3.0]]).unwrap();
        write_matrix(&m, &path).unwrap();
        assert_eq!(read_matrix(&path).unwrap(), m);
    }

    #[test]
    fn test_write_eigenpairs_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pairs.json");
        let pairs = vec![EigenPair {
            eigenvalue: 2.0,
            eigenvector: vec![0.0, 1.0],
        }];
        write_eigenpairs_json(&pairs, &path).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        let back: Vec<EigenPair> = serde_json::from_str(&text).unwrap();
        assert_eq!(back, pairs);
    }
}
