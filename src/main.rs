//! Doccov - Documentation coverage CLI
//!
//! Analyzes the public API surface of a C# project or solution and reports
//! how much of it carries documentation comments. Designed for CI: output
//! can be rendered as GitHub Actions or Azure Pipelines commands, or as a
//! single JSON document.

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    // Parse CLI args and run
    let cli = doccov::cli::Cli::parse();
    let code = doccov::cli::run(cli)?;
    std::process::exit(code);
}
