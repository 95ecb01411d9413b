pub mod check;
pub mod services;

use crate::errors::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(
    name = "crossdeps",
    version,
    about = "Cross-service dependency analyzer for polyglot monorepos"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Scan services for API calls and check them against declared dependencies
    Check(check::CheckArgs),
    /// List the registered services
    Services(services::ServicesArgs),
}

/// Dispatch to the appropriate command handler.
pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Check(args) => check::run(&args),
        Commands::Services(args) => services::run(&args),
    }
}

/// Write rendered output to `path`, or to stdout when none is given.
pub(crate) fn emit(rendered: &[u8], path: Option<&std::path::Path>) -> Result<()> {
    use std::io::Write;

    match path {
        Some(path) => {
            std::fs::write(path, rendered)?;
            tracing::info!("wrote {}", path.display());
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(rendered)?;
            stdout.flush()?;
        }
    }
    Ok(())
}
