//! cuke-lint CLI tool.
//!
//! Usage:
//! ```bash
//! cuke-lint [OPTIONS] <PATHS>...
//! cuke-lint --format github features/
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use cuke_lint::{Config, Linter};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod format;

/// Config file searched for in the working directory when `--config` is
/// not given.
const DEFAULT_CONFIG: &str = "cuke-lint.toml";

/// Static analysis for Cucumber and Behat feature files
#[derive(Parser)]
#[command(name = "cuke-lint")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The feature file(s) or folder(s) to lint
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "auto")]
    format: OutputFormat,

    /// Exclude patterns (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,
}

/// Output format for lint results.
#[derive(Clone, Copy, Debug, Default, clap::ValueEnum)]
pub enum OutputFormat {
    /// GitHub annotations when running under GitHub Actions, else a table.
    #[default]
    Auto,
    /// Human-readable per-file table.
    Table,
    /// GitHub Actions `::error` workflow annotations.
    Github,
    /// JSON output.
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(cli.config.as_deref())?;

    let mut builder = Linter::builder().config(config);
    for pattern in cli.exclude {
        builder = builder.exclude(pattern);
    }
    let linter = builder.build();

    let results = linter.lint_paths(&cli.paths)?;

    tracing::debug!(
        files = results.files_checked(),
        findings = results.total_findings(),
        "lint finished"
    );

    let exit_code = format::render(&results, cli.format)?;
    if exit_code != 0 {
        std::process::exit(exit_code);
    }
    Ok(())
}

/// Loads the configuration from `--config`, falling back to
/// `./cuke-lint.toml` when present and defaults otherwise.
fn load_config(explicit: Option<&Path>) -> Result<Config> {
    if let Some(path) = explicit {
        return Config::from_file(path)
            .with_context(|| format!("Failed to load config: {}", path.display()));
    }

    let default = Path::new(DEFAULT_CONFIG);
    if default.exists() {
        tracing::info!("Using config: {DEFAULT_CONFIG}");
        return Config::from_file(default)
            .with_context(|| format!("Failed to load config: {DEFAULT_CONFIG}"));
    }

    Ok(Config::default())
}
