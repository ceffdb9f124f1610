//! Command-line entry point for splitting OpenAPI specifications.

#![allow(clippy::print_stdout)]

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, ValueEnum};
use tracing::error;
use tracing_subscriber::EnvFilter;

use apisplit_core::{OutputFormat, SpecSplitter, SplitError, SplitMethod};

/// Split a large OpenAPI specification into smaller groupings.
#[derive(Debug, Parser)]
#[command(name = "apisplit", version, about)]
struct Cli {
    /// Input OpenAPI file (YAML or JSON).
    input: PathBuf,

    /// Splitting method.
    #[arg(short, long, value_enum, default_value_t = Method::Tags)]
    method: Method,

    /// Output directory for the split files.
    #[arg(short, long, default_value = "split_specs")]
    output: PathBuf,

    /// Number of path levels for path-based splitting.
    #[arg(short, long, default_value = "2")]
    levels: NonZeroUsize,

    /// Output format (yaml or json).
    #[arg(short, long, default_value = "yaml")]
    format: String,

    /// Enable verbose output.
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Method {
    /// Group paths by their operation tags.
    Tags,
    /// Group paths by shared path prefixes.
    Paths,
}

impl Method {
    fn selector(self) -> &'static str {
        match self {
            Self::Tags => "tags",
            Self::Paths => "paths",
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<Vec<PathBuf>, SplitError> {
    let format: OutputFormat = cli.format.parse()?;
    let method = SplitMethod::parse(cli.method.selector(), cli.levels)?;

    let mut splitter = SpecSplitter::new(&cli.input, &cli.output, format)?;
    splitter.split(method)
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(&cli) {
        Ok(created) => {
            println!("Split complete. Output files in: {}", cli.output.display());
            for path in created {
                println!("Created: {}", path.display());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
