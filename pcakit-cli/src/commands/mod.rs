pub mod eigen;
pub mod pca;
pub mod transform;

use anyhow::{bail, Result};

use pcakit_core::pca::{ComponentOrder, SignConvention};

/// Parse a `--sign-convention` value.
pub fn parse_sign_convention(s: &str) -> Result<SignConvention> {
    match s {
        "largest-abs-positive" | "largest-absolute-positive" => {
            Ok(SignConvention::LargestAbsolutePositive)
        }
        "none" => Ok(SignConvention::None),
        other => bail!(
            "Unknown sign convention '{}' (expected largest-abs-positive or none)",
            other
        ),
    }
}

/// Parse a PCA `--order` value.
pub fn parse_component_order(s: &str) -> Result<ComponentOrder> {
    match s {
        "descending" => Ok(ComponentOrder::DescendingEigenvalue),
        "native" => Ok(ComponentOrder::SolverNative),
        other => bail!("Unknown component order '{}' (expected descending or native)", other),
    }
}

/// Format a vector the way the fixture scripts print it.
pub fn format_vector(v: &[f64]) -> String {
    let parts: Vec<String> = v.iter().map(|x| format!("{:.8}", x)).collect();
    format!("[{}]", parts.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options() {
        assert_eq!(
            parse_sign_convention("largest-abs-positive").unwrap(),
            SignConvention::LargestAbsolutePositive
        );
        assert_eq!(parse_sign_convention("none").unwrap(), SignConvention::None);
        assert!(parse_sign_convention("flip").is_err());
        assert_eq!(
            parse_component_order("native").unwrap(),
            ComponentOrder::SolverNative
        );
        assert!(parse_component_order("ascending").is_err());
    }

    #[test]
    fn test_format_vector() {
        assert_eq!(format_vector(&[1.0, -0.5]), "[1.00000000, -0.50000000]");
    }
}
