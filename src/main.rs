#![allow(dead_code)]

mod checks;
mod cli;
mod config;
mod errors;
mod extract;
mod graph;
mod output;
mod registry;
mod walk;

use clap::Parser;

/// Exit status when the tool could not run, as opposed to finding problems.
const EXIT_ERROR: i32 = 2;

fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = cli::Cli::parse();
    if let Err(err) = cli::dispatch(cli) {
        let config_error = err.is_config_error();
        eprintln!("{:?}", miette::Report::new(err));
        if config_error {
            eprintln!("No analysis was performed; fix the configuration and re-run.");
        }
        std::process::exit(EXIT_ERROR);
    }
}
