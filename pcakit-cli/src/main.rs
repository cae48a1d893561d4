//! pcakit: symmetric eigendecomposition and PCA from the command line.
//!
//! pcakit eigen --matrix-file cov.json
//! pcakit pca --data-file iris.csv --skip-column species
//! pcakit transform --model-file iris.pca.model --data-file new.csv --output scores.txt

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "pcakit",
    version,
    about = "Cyclic Jacobi eigendecomposition and PCA for small dense matrices",
    long_about = "Decomposes real symmetric matrices (JSON or plain-text fixtures) with the\n\
                   cyclic Jacobi method, and fits principal component models on numeric\n\
                   tables: standardize, covariance, eigenpairs sorted and sign-normalized.\n\
                   Fitted models can be saved and applied to new samples."
)]
struct Cli {
    /// Worker threads for decomposing several matrix files at once
    #[arg(long, default_value = "1", global = true)]
    threads: usize,

    /// Log detail: -v pipeline steps, -vv solver sweeps and statistics, -vvv everything.
    /// RUST_LOG overrides this.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Eigendecompose one or more symmetric matrix files
    Eigen(commands::eigen::EigenArgs),

    /// Fit PCA on a dataset and print the components
    Pca(commands::pca::PcaArgs),

    /// Project a dataset with a saved PCA model
    Transform(commands::transform::TransformArgs),
}

/// Default log filter for a `-v` count.
fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbose: u8) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(log_filter(verbose))),
        )
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(cli.threads)
        .build_global()
    {
        warn!("Could not configure {} worker threads: {}", cli.threads, e);
    }

    info!("pcakit v{} ({} threads)", env!("CARGO_PKG_VERSION"), cli.threads);

    match cli.command {
        Commands::Eigen(args) => commands::eigen::run(args),
        Commands::Pca(args) => commands::pca::run(args),
        Commands::Transform(args) => commands::transform::run(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_log_filter() {
        assert_eq!(log_filter(0), "warn");
        assert_eq!(log_filter(2), "debug");
        assert_eq!(log_filter(7), "trace");
    }

    #[test]
    fn test_parse_global_flags() {
        let cli = Cli::try_parse_from([
            "pcakit", "-vv", "--threads", "4", "eigen", "--matrix-file", "a.json",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.threads, 4);
        assert!(matches!(cli.command, Commands::Eigen(_)));
    }
}
