use crate::extract::resolve::{contains_run, path_segments};
use crate::extract::{ImportRef, RuleKind};
use crate::graph::scan::ServiceScan;
use crate::registry::{ServiceDefinition, ServiceRegistry};
use crate::walk::Language;
use serde::Serialize;
use std::path::{Component, Path, PathBuf};

/// An import that reaches into another service's source tree.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct BoundaryViolation {
    pub from: String,
    pub to: String,
    pub file: PathBuf,
    pub line: usize,
    pub import: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BoundaryReport {
    pub valid: bool,
    pub violations: Vec<BoundaryViolation>,
}

/// Flag imports whose target lies inside a different service's root.
pub fn check_boundaries(registry: &ServiceRegistry, scans: &[ServiceScan]) -> BoundaryReport {
    let mut violations = Vec::new();

    for scan in scans {
        let Some(importer) = registry.find_by_name(&scan.service) else {
            continue;
        };
        for import in &scan.imports {
            let Some(owner) = import_owner(registry, importer, import) else {
                continue;
            };
            if owner.name == importer.name {
                continue;
            }
            tracing::debug!(
                "{}: import `{}` at {}:{} reaches into {}",
                importer.name,
                import.raw_target,
                import.source_file.display(),
                import.line_number,
                owner.name
            );
            violations.push(BoundaryViolation {
                from: importer.name.clone(),
                to: owner.name.clone(),
                file: import.source_file.clone(),
                line: import.line_number,
                import: import.raw_target.clone(),
            });
        }
    }

    violations.sort();
    BoundaryReport {
        valid: violations.is_empty(),
        violations,
    }
}

/// Service owning the module an import refers to, if any.
fn import_owner<'a>(
    registry: &'a ServiceRegistry,
    importer: &ServiceDefinition,
    import: &ImportRef,
) -> Option<&'a ServiceDefinition> {
    let relative = import.kind == RuleKind::RelativeImport || import.raw_target.starts_with('.');
    if relative {
        let target = resolve_relative(importer.language, import)?;
        return registry.owner_of_path(&registry.project_root().join(target));
    }

    let module = match importer.language {
        Language::Python => import.raw_target.replace('.', "/"),
        _ => import.raw_target.clone(),
    };
    let segments = path_segments(&module);

    registry
        .all_services()
        .iter()
        .filter(|svc| {
            let root = svc.selector.relative_root.to_string_lossy().replace('\\', "/");
            contains_run(&segments, &path_segments(&root))
        })
        .max_by_key(|svc| svc.selector.relative_root.components().count())
}

/// Project-relative path of a relative import, resolved lexically.
fn resolve_relative(language: Language, import: &ImportRef) -> Option<PathBuf> {
    let dir = import.source_file.parent().unwrap_or(Path::new(""));

    let joined = if language == Language::Python && import.raw_target.starts_with('.') {
        // One dot is the current package, each further dot one level up.
        let level = import.raw_target.chars().take_while(|&c| c == '.').count();
        let rest = &import.raw_target[level..];
        let mut base = dir.to_path_buf();
        for _ in 1..level {
            base.push("..");
        }
        if !rest.is_empty() {
            base.push(rest.replace('.', "/"));
        }
        base
    } else {
        dir.join(&import.raw_target)
    };

    normalize_lexically(&joined)
}

/// Collapse `.` and `..` without touching the filesystem. `None` when the
/// path climbs above the project root.
fn normalize_lexically(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    Some(out)
}
