use crate::extract::resolve::resolve_call;
use crate::extract::ApiCallSite;
use crate::graph::ir::DependencyEdge;
use crate::graph::scan::{ScanWarning, ServiceScan};
use crate::registry::ServiceRegistry;
use std::collections::{BTreeMap, BTreeSet};

/// The resolved service graph plus everything that did not make it in.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
    /// Sorted by (from, to); never contains self-loops.
    pub edges: Vec<DependencyEdge>,
    /// Call sites no provided API matched.
    pub unresolved: Vec<ApiCallSite>,
    /// Call sites that resolved to the calling service itself.
    pub self_calls: Vec<ApiCallSite>,
    pub warnings: Vec<ScanWarning>,
}

/// Accumulates resolved calls into one edge per (consumer, provider) pair.
pub struct GraphBuilder<'a> {
    registry: &'a ServiceRegistry,
    edges: BTreeMap<(String, String), BTreeSet<String>>,
    unresolved: Vec<ApiCallSite>,
    self_calls: Vec<ApiCallSite>,
    warnings: Vec<ScanWarning>,
}

impl<'a> GraphBuilder<'a> {
    pub fn new(registry: &'a ServiceRegistry) -> Self {
        Self {
            registry,
            edges: BTreeMap::new(),
            unresolved: Vec::new(),
            self_calls: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Resolve and add one call made by `consumer`.
    pub fn add_call(&mut self, consumer: &str, call: &ApiCallSite) {
        let resolved = resolve_call(call.clone(), self.registry);
        match (&resolved.provider, &resolved.matched_api) {
            (Some(provider), Some(api)) if provider == consumer => {
                tracing::debug!(
                    "{consumer}: self-call to `{api}` at {}:{}",
                    resolved.source_file.display(),
                    resolved.line_number
                );
                self.self_calls.push(resolved);
            }
            (Some(provider), Some(api)) => {
                self.edges
                    .entry((consumer.to_string(), provider.clone()))
                    .or_default()
                    .insert(api.clone());
            }
            _ => {
                tracing::debug!(
                    "{consumer}: unresolved call target `{}` at {}:{}",
                    resolved.raw_target,
                    resolved.source_file.display(),
                    resolved.line_number
                );
                self.unresolved.push(resolved);
            }
        }
    }

    /// Add every call and warning of a service scan.
    pub fn add_scan(&mut self, scan: &ServiceScan) {
        for call in &scan.calls {
            self.add_call(&scan.service, call);
        }
        self.warnings.extend(scan.warnings.iter().cloned());
    }

    /// Consume the builder and return the graph in canonical order.
    pub fn build(self) -> DependencyGraph {
        let edges = self
            .edges
            .into_iter()
            .map(|((from, to), apis)| DependencyEdge { from, to, apis })
            .collect();

        let mut unresolved = self.unresolved;
        unresolved.sort_by(call_order);
        let mut self_calls = self.self_calls;
        self_calls.sort_by(call_order);
        let mut warnings = self.warnings;
        warnings.sort();

        DependencyGraph {
            edges,
            unresolved,
            self_calls,
            warnings,
        }
    }
}

fn call_order(a: &ApiCallSite, b: &ApiCallSite) -> std::cmp::Ordering {
    (&a.source_file, a.line_number, &a.raw_target).cmp(&(
        &b.source_file,
        b.line_number,
        &b.raw_target,
    ))
}

/// Aggregate scans into the dependency graph.
pub fn build_graph(registry: &ServiceRegistry, scans: &[ServiceScan]) -> DependencyGraph {
    let mut builder = GraphBuilder::new(registry);
    for scan in scans {
        builder.add_scan(scan);
    }
    let graph = builder.build();
    tracing::info!(
        "graph: {} edge(s), {} unresolved call site(s), {} self-call(s)",
        graph.edges.len(),
        graph.unresolved.len(),
        graph.self_calls.len()
    );
    graph
}
