use crate::config::resolve::resolve_config;
use crate::errors::Result;
use crate::output::json::{write_services_json, ServiceListing};
use crate::output::text::write_services_text;
use crate::output::OutputFormat;
use crate::registry::ServiceRegistry;
use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Args)]
pub struct ServicesArgs {
    /// Config file (default: nearest .crossdeps.toml above the working directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
}

pub fn run(args: &ServicesArgs) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config = resolve_config(&cwd, args.config.as_deref())?;
    let registry = ServiceRegistry::from_config(&config)?;
    let sources = registry.discover_sources()?;

    let file_counts: Vec<usize> = sources.files_by_service.iter().map(Vec::len).collect();
    let listing = ServiceListing::collect(&registry, &file_counts);

    let mut rendered = Vec::new();
    match args.format {
        OutputFormat::Text => write_services_text(&mut rendered, &listing)?,
        OutputFormat::Json => write_services_json(&mut rendered, &listing)?,
    }
    super::emit(&rendered, None)
}
