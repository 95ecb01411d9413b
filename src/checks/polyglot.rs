use crate::extract::resolve::resolve_target;
use crate::graph::scan::ServiceScan;
use crate::registry::ServiceRegistry;
use crate::walk::{self, Language};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageSummary {
    pub language: Language,
    pub services: Vec<String>,
    pub files_scanned: usize,
    pub call_sites: usize,
    pub resolved: usize,
    pub unresolved: usize,
}

/// A service root with no files in its declared language but files in
/// another supported one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LanguageMismatch {
    pub service: String,
    pub declared: Language,
    pub found: BTreeMap<Language, usize>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PolyglotReport {
    pub valid: bool,
    /// One entry per language with at least one registered service.
    pub languages: Vec<LanguageSummary>,
    pub mismatches: Vec<LanguageMismatch>,
}

pub fn check_polyglot(registry: &ServiceRegistry, scans: &[ServiceScan]) -> PolyglotReport {
    let mut by_language: BTreeMap<Language, LanguageSummary> = BTreeMap::new();
    let mut mismatches = Vec::new();

    for (svc, scan) in registry.all_services().iter().zip(scans) {
        let summary = by_language
            .entry(svc.language)
            .or_insert_with(|| LanguageSummary {
                language: svc.language,
                services: Vec::new(),
                files_scanned: 0,
                call_sites: 0,
                resolved: 0,
                unresolved: 0,
            });
        summary.services.push(svc.name.clone());
        summary.files_scanned += scan.files_scanned;
        summary.call_sites += scan.calls.len();
        let resolved = scan
            .calls
            .iter()
            .filter(|call| resolve_target(&call.raw_target, registry).is_some())
            .count();
        summary.resolved += resolved;
        summary.unresolved += scan.calls.len() - resolved;

        if scan.skipped || !svc.selector.root.is_dir() {
            continue;
        }
        let mut found = walk::count_by_language(&svc.selector.root);
        if found.get(&svc.language).copied().unwrap_or(0) == 0 {
            found.retain(|_, count| *count > 0);
            if !found.is_empty() {
                tracing::warn!(
                    "{}: declared {} but contains only {}",
                    svc.name,
                    svc.language,
                    found
                        .keys()
                        .map(|l| l.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                mismatches.push(LanguageMismatch {
                    service: svc.name.clone(),
                    declared: svc.language,
                    found,
                });
            }
        }
    }

    for summary in by_language.values_mut() {
        summary.services.sort();
    }
    mismatches.sort_by(|a, b| a.service.cmp(&b.service));

    PolyglotReport {
        valid: mismatches.is_empty(),
        languages: by_language.into_values().collect(),
        mismatches,
    }
}
