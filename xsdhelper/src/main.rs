//! xsdhelper CLI - writes helper classes for XSD-generated classes
//!
//! Commands:
//! - `generate` - build the helper class from flags or a descriptor document
//! - `path` - print where the helper class for a schema would be written

mod cli;
mod commands;

use anyhow::Result;
use clap::Parser;
use std::io::Write;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let report = match &cli.command {
        Commands::Generate(args) => commands::generate(args)?,
        Commands::Path { input, language } => commands::path(input, language)?,
    };
    emit(&mut std::io::stdout().lock(), &report)?;
    Ok(())
}

/// Writes a report line, or generated source verbatim.
///
/// Source already ends in a newline and is printed byte-for-byte as it would
/// be written to the helper file.
fn emit(out: &mut impl Write, report: &str) -> std::io::Result<()> {
    if report.ends_with('\n') {
        out.write_all(report.as_bytes())?;
    } else {
        writeln!(out, "{report}")?;
    }
    out.flush()
}
