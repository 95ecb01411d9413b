use crate::extract::{self, ApiCallSite, ImportRef};
use crate::registry::{ServiceRegistry, SourceIndex};
use crate::walk::Language;
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Recoverable problem met while scanning; reported, never fatal.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ScanWarning {
    /// Service selector matched no files.
    NoSourceFiles { service: String },
    /// File could not be read or is not UTF-8 text.
    UnreadableFile {
        service: String,
        file: PathBuf,
        reason: String,
    },
}

impl std::fmt::Display for ScanWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScanWarning::NoSourceFiles { service } => {
                write!(f, "{service}: source selector matched no files")
            }
            ScanWarning::UnreadableFile {
                service,
                file,
                reason,
            } => write!(f, "{service}: skipped {} ({reason})", file.display()),
        }
    }
}

/// Everything extracted from one service's files.
#[derive(Debug, Clone, Default)]
pub struct ServiceScan {
    pub service: String,
    /// Files that fell inside the scan scope.
    pub files_scanned: usize,
    /// True when `--path` excluded every file of this service.
    pub skipped: bool,
    /// Unresolved call sites, in (file, line) order.
    pub calls: Vec<ApiCallSite>,
    pub imports: Vec<ImportRef>,
    pub warnings: Vec<ScanWarning>,
}

/// Scan every service in parallel. Output is in registration order
/// regardless of which worker finishes first.
///
/// `subtree`, when given, restricts scanning to files under it. Paths stored
/// in call sites and imports are relative to the project root.
pub fn scan_services(
    registry: &ServiceRegistry,
    sources: &SourceIndex,
    subtree: Option<&Path>,
    progress: bool,
) -> Vec<ServiceScan> {
    let services = registry.all_services();

    let pb = progress.then(|| {
        let pb = indicatif::ProgressBar::new(services.len() as u64);
        if let Ok(style) = indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} services ({msg})")
        {
            pb.set_style(style.progress_chars("#>-"));
        }
        pb
    });

    let scans: Vec<ServiceScan> = services
        .par_iter()
        .zip(sources.files_by_service.par_iter())
        .map(|(svc, files)| {
            let scan = scan_service(
                &svc.name,
                svc.language,
                files,
                registry.project_root(),
                subtree,
            );
            if let Some(ref pb) = pb {
                pb.set_message(svc.name.clone());
                pb.inc(1);
            }
            scan
        })
        .collect();

    if let Some(pb) = pb {
        pb.finish_and_clear();
    }

    scans
}

fn scan_service(
    service: &str,
    language: Language,
    files: &[PathBuf],
    project_root: &Path,
    subtree: Option<&Path>,
) -> ServiceScan {
    let mut scan = ServiceScan {
        service: service.to_string(),
        ..Default::default()
    };

    if files.is_empty() {
        tracing::warn!("{service}: source selector matched no files");
        scan.warnings.push(ScanWarning::NoSourceFiles {
            service: service.to_string(),
        });
        return scan;
    }

    let in_scope: Vec<&PathBuf> = files
        .iter()
        .filter(|f| subtree.map_or(true, |root| f.starts_with(root)))
        .collect();
    if in_scope.is_empty() {
        tracing::info!("{service}: no files under the requested path, skipping");
        scan.skipped = true;
        return scan;
    }

    for file in in_scope {
        let relative = file.strip_prefix(project_root).unwrap_or(file);
        let source = match read_text(file) {
            Ok(s) => s,
            Err(reason) => {
                tracing::warn!("Skipping {}: {}", file.display(), reason);
                scan.warnings.push(ScanWarning::UnreadableFile {
                    service: service.to_string(),
                    file: relative.to_path_buf(),
                    reason,
                });
                continue;
            }
        };
        scan.files_scanned += 1;

        let calls = extract::extract_calls(language, &source, relative);
        tracing::debug!("{}: {} call site(s)", relative.display(), calls.len());
        scan.calls.extend(calls);
        scan.imports
            .extend(extract::extract_imports(language, &source, relative));
    }

    scan
}

fn read_text(path: &Path) -> std::result::Result<String, String> {
    let bytes = std::fs::read(path).map_err(|e| e.to_string())?;
    String::from_utf8(bytes).map_err(|_| "binary or non-UTF-8 content".to_string())
}
