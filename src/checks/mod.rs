//! The four analyses the `check` command can run over a built graph.

pub mod boundaries;
pub mod cycles;
pub mod polyglot;
pub mod validate;

use crate::config::AnalysisToggles;
use crate::extract::ApiCallSite;
use crate::graph::builder::DependencyGraph;
use crate::graph::ir::DependencyEdge;
use crate::graph::scan::{ScanWarning, ServiceScan};
use crate::registry::ServiceRegistry;
use crate::walk::Language;
use boundaries::BoundaryReport;
use cycles::CycleReport;
use polyglot::PolyglotReport;
use serde::Serialize;
use validate::ValidationResult;

/// Per-service scan summary carried into the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceSummary {
    pub name: String,
    pub language: Language,
    pub files_scanned: usize,
    pub call_sites: usize,
    pub skipped: bool,
}

/// Everything one `check` run produced. A check that did not run is `None`.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub valid: bool,
    pub services: Vec<ServiceSummary>,
    pub edges: Vec<DependencyEdge>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cross_service: Option<ValidationResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub circular: Option<CycleReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boundaries: Option<BoundaryReport>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub polyglot: Option<PolyglotReport>,
    pub unresolved: Vec<ApiCallSite>,
    pub self_calls: Vec<ApiCallSite>,
    pub warnings: Vec<ScanWarning>,
}

impl AnalysisReport {
    pub fn skipped_services(&self) -> impl Iterator<Item = &ServiceSummary> {
        self.services.iter().filter(|s| s.skipped)
    }
}

/// Run the enabled checks. Single-threaded; the graph is already complete.
pub fn run_checks(
    toggles: &AnalysisToggles,
    registry: &ServiceRegistry,
    scans: &[ServiceScan],
    graph: DependencyGraph,
) -> AnalysisReport {
    let cross_service = toggles
        .cross_service
        .then(|| validate::validate(&graph.edges, registry));
    let circular = toggles.circular.then(|| cycles::find_cycles(&graph.edges));
    let boundaries = toggles
        .boundaries
        .then(|| boundaries::check_boundaries(registry, scans));
    let polyglot = toggles
        .polyglot
        .then(|| polyglot::check_polyglot(registry, scans));

    let valid = cross_service.as_ref().map_or(true, |r| r.valid)
        && circular.as_ref().map_or(true, |r| r.is_empty())
        && boundaries.as_ref().map_or(true, |r| r.valid)
        && polyglot.as_ref().map_or(true, |r| r.valid);

    let services = registry
        .all_services()
        .iter()
        .zip(scans)
        .map(|(svc, scan)| ServiceSummary {
            name: svc.name.clone(),
            language: svc.language,
            files_scanned: scan.files_scanned,
            call_sites: scan.calls.len(),
            skipped: scan.skipped,
        })
        .collect();

    tracing::info!(
        "checks complete: {}",
        if valid { "no violations" } else { "violations found" }
    );

    AnalysisReport {
        valid,
        services,
        edges: graph.edges,
        cross_service,
        circular,
        boundaries,
        polyglot,
        unresolved: graph.unresolved,
        self_calls: graph.self_calls,
        warnings: graph.warnings,
    }
}
