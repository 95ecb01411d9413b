use crate::checks::run_checks;
use crate::config::resolve::resolve_config;
use crate::config::AnalysisToggles;
use crate::errors::{CrossdepsError, Result};
use crate::graph::builder::build_graph;
use crate::graph::scan::scan_services;
use crate::output::{dot, json, mermaid, text, DiagramFormat, OutputFormat};
use crate::registry::ServiceRegistry;
use clap::Args;
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Debug, Args)]
pub struct CheckArgs {
    /// Config file (default: nearest .crossdeps.toml above the working directory)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Only scan files under this directory
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Run the boundary-architecture check (imports across service roots)
    #[arg(long)]
    pub boundaries: bool,

    /// Run the circular-dependency check
    #[arg(long)]
    pub circular: bool,

    /// Run the per-language check
    #[arg(long)]
    pub polyglot: bool,

    /// Run the cross-service check (calls against declared dependencies)
    #[arg(long)]
    pub cross_service: bool,

    /// Report format
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,

    /// Write the report to a file instead of stdout
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Also render the service graph
    #[arg(long)]
    pub diagram: bool,

    /// Diagram format
    #[arg(long, default_value = "mermaid")]
    pub diagram_format: DiagramFormat,

    /// Write the diagram to a file instead of stdout (implies --diagram)
    #[arg(long)]
    pub diagram_output: Option<PathBuf>,

    /// Suppress progress output
    #[arg(long)]
    pub quiet: bool,
}

impl CheckArgs {
    /// Flagged checks, or the config's `[analysis]` table when none is flagged.
    fn toggles(&self, configured: AnalysisToggles) -> AnalysisToggles {
        let flagged = AnalysisToggles {
            boundaries: self.boundaries,
            circular: self.circular,
            polyglot: self.polyglot,
            cross_service: self.cross_service,
        };
        if flagged.any() {
            flagged
        } else {
            configured
        }
    }

    fn wants_diagram(&self) -> bool {
        self.diagram || self.diagram_output.is_some()
    }
}

pub fn run(args: &CheckArgs) -> Result<()> {
    let start = Instant::now();
    let cwd = std::env::current_dir()?;

    // Everything that can fail as a configuration error happens before
    // any scanning.
    let config = resolve_config(&cwd, args.config.as_deref())?;
    let toggles = args.toggles(config.analysis);
    let registry = ServiceRegistry::from_config(&config)?;
    let sources = registry.discover_sources()?;
    let subtree = args.path.as_deref().map(canonical_subtree).transpose()?;

    let scans = scan_services(&registry, &sources, subtree.as_deref(), !args.quiet);
    let graph = build_graph(&registry, &scans);
    let report = run_checks(&toggles, &registry, &scans, graph);

    let mut rendered = Vec::new();
    match args.format {
        OutputFormat::Text => text::write_analysis_text(&mut rendered, &report)?,
        OutputFormat::Json => json::write_report_json(&mut rendered, &report)?,
    }
    super::emit(&rendered, args.output.as_deref())?;

    if args.wants_diagram() {
        let mut diagram = Vec::new();
        match args.diagram_format {
            DiagramFormat::Mermaid => {
                mermaid::write_mermaid(&mut diagram, &report.edges, &registry)?
            }
            DiagramFormat::Dot => dot::write_dot(&mut diagram, &report.edges, &registry)?,
        }
        super::emit(&diagram, args.diagram_output.as_deref())?;
    }

    tracing::info!("check finished in {:.2}s", start.elapsed().as_secs_f64());

    if !report.valid {
        std::process::exit(1);
    }

    Ok(())
}

fn canonical_subtree(path: &Path) -> Result<PathBuf> {
    path.canonicalize().map_err(|e| {
        CrossdepsError::Config(format!("--path {} is not accessible: {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Debug, Parser)]
    struct Harness {
        #[command(flatten)]
        args: CheckArgs,
    }

    fn parse(argv: &[&str]) -> CheckArgs {
        let mut full = vec!["check"];
        full.extend_from_slice(argv);
        Harness::parse_from(full).args
    }

    #[test]
    fn no_flags_defers_to_config() {
        let configured = AnalysisToggles {
            boundaries: false,
            ..AnalysisToggles::default()
        };
        assert_eq!(parse(&[]).toggles(configured), configured);
    }

    #[test]
    fn flags_select_exactly_the_flagged_checks() {
        let toggles = parse(&["--circular", "--cross-service"]).toggles(AnalysisToggles::default());
        assert_eq!(
            toggles,
            AnalysisToggles {
                circular: true,
                cross_service: true,
                ..AnalysisToggles::none()
            }
        );
    }

    #[test]
    fn diagram_output_implies_diagram() {
        assert!(!parse(&[]).wants_diagram());
        assert!(parse(&["--diagram-output", "graph.mmd"]).wants_diagram());
        let args = parse(&["--diagram", "--diagram-format", "dot", "--format", "json"]);
        assert_eq!(args.diagram_format, DiagramFormat::Dot);
        assert_eq!(args.format, OutputFormat::Json);
    }
}
