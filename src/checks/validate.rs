use crate::graph::ir::DependencyEdge;
use crate::registry::{Requirement, ServiceRegistry};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EdgeStatus {
    #[serde(flatten)]
    pub edge: DependencyEdge,
    pub declared: bool,
}

/// An edge with no matching declaration on the consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub from: String,
    pub to: String,
    pub apis: BTreeSet<String>,
}

/// A declared dependency no discovered edge uses. Informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnusedDeclaration {
    pub service: String,
    pub dependency: String,
    pub requirement: Requirement,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    /// Every registered service, with its outgoing edges.
    pub per_service: BTreeMap<String, Vec<EdgeStatus>>,
    pub violations: Vec<Violation>,
    pub unused_declarations: Vec<UnusedDeclaration>,
}

/// Compare discovered edges with each consumer's declared dependencies.
///
/// Declarations are service-level: an edge is declared when the consumer
/// lists the provider, whatever APIs the edge carries.
pub fn validate(edges: &[DependencyEdge], registry: &ServiceRegistry) -> ValidationResult {
    let mut per_service: BTreeMap<String, Vec<EdgeStatus>> = registry
        .all_services()
        .iter()
        .map(|svc| (svc.name.clone(), Vec::new()))
        .collect();
    let mut violations = Vec::new();
    let mut used: BTreeSet<(&str, &str)> = BTreeSet::new();

    for edge in edges.iter().filter(|e| !e.is_self_loop()) {
        let declared = registry
            .find_by_name(&edge.from)
            .is_some_and(|svc| svc.declares(&edge.to));

        if declared {
            used.insert((edge.from.as_str(), edge.to.as_str()));
        } else {
            tracing::debug!("undeclared dependency {} -> {}", edge.from, edge.to);
            violations.push(Violation {
                from: edge.from.clone(),
                to: edge.to.clone(),
                apis: edge.apis.clone(),
            });
        }

        per_service
            .entry(edge.from.clone())
            .or_default()
            .push(EdgeStatus {
                edge: edge.clone(),
                declared,
            });
    }

    for statuses in per_service.values_mut() {
        statuses.sort_by(|a, b| a.edge.to.cmp(&b.edge.to));
    }
    violations.sort_by(|a, b| (&a.from, &a.to).cmp(&(&b.from, &b.to)));

    let mut unused_declarations = Vec::new();
    for svc in registry.all_services() {
        for dep in &svc.declared_dependencies {
            if !used.contains(&(svc.name.as_str(), dep.service.as_str())) {
                unused_declarations.push(UnusedDeclaration {
                    service: svc.name.clone(),
                    dependency: dep.service.clone(),
                    requirement: dep.requirement,
                });
            }
        }
    }
    unused_declarations
        .sort_by(|a, b| (&a.service, &a.dependency).cmp(&(&b.service, &b.dependency)));

    ValidationResult {
        valid: violations.is_empty(),
        per_service,
        violations,
        unused_declarations,
    }
}
