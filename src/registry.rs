//! Static catalog of the services under analysis.
//!
//! The registry is built once from `.crossdeps.toml` and passed by reference
//! into every later phase; nothing mutates it after construction.

use crate::config::ResolvedConfig;
use crate::errors::{CrossdepsError, Result};
use crate::walk::{self, Language};
use globset::GlobSet;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

/// Strength of a declared dependency.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Requirement {
    #[default]
    Required,
    Optional,
}

impl std::fmt::Display for Requirement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Requirement::Required => write!(f, "required"),
            Requirement::Optional => write!(f, "optional"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeclaredDependency {
    pub service: String,
    pub requirement: Requirement,
}

/// Decides which files on disk belong to a service.
#[derive(Debug, Clone)]
pub struct SourceSelector {
    /// Absolute service root.
    pub root: PathBuf,
    /// Service root relative to the project root, as written in config.
    pub relative_root: PathBuf,
    include: Option<GlobSet>,
    exclude: Option<GlobSet>,
    include_tests: bool,
}

impl SourceSelector {
    /// Enumerate this selector's files for `language`, sorted.
    pub fn files(&self, language: Language) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Ok(Vec::new());
        }
        walk::discover_files(
            &self.root,
            language,
            self.include.as_ref(),
            self.exclude.as_ref(),
            self.include_tests,
        )
    }

    /// Whether `path` (absolute) lies under this selector's root.
    pub fn contains(&self, path: &Path) -> bool {
        path.starts_with(&self.root)
    }
}

#[derive(Debug, Clone)]
pub struct ServiceDefinition {
    pub name: String,
    pub language: Language,
    pub selector: SourceSelector,
    /// Ordered and deduplicated; order breaks resolution ties.
    pub provided_apis: Vec<String>,
    /// Documentation aid only, never consulted by validation.
    pub consumed_apis: Vec<String>,
    pub declared_dependencies: Vec<DeclaredDependency>,
}

impl ServiceDefinition {
    pub fn declares(&self, service: &str) -> bool {
        self.declared_dependencies
            .iter()
            .any(|dep| dep.service == service)
    }
}

/// Files discovered for each service, in registration order.
#[derive(Debug, Clone, Default)]
pub struct SourceIndex {
    pub files_by_service: Vec<Vec<PathBuf>>,
}

#[derive(Debug, Clone)]
pub struct ServiceRegistry {
    project_root: PathBuf,
    services: Vec<ServiceDefinition>,
}

impl ServiceRegistry {
    /// Build and validate the registry. Fails fast on the first
    /// configuration error.
    pub fn from_config(config: &ResolvedConfig) -> Result<Self> {
        let mut seen = HashSet::new();
        let mut services = Vec::with_capacity(config.services.len());

        for svc in &config.services {
            if !seen.insert(svc.name.as_str()) {
                return Err(CrossdepsError::DuplicateService {
                    name: svc.name.clone(),
                });
            }

            let language =
                svc.language
                    .parse::<Language>()
                    .map_err(|_| CrossdepsError::UnknownLanguage {
                        service: svc.name.clone(),
                        language: svc.language.clone(),
                    })?;

            let mut exclude = svc.exclude.clone();
            exclude.extend(config.exclude.iter().cloned());

            let relative_root = PathBuf::from(&svc.root);
            let selector = SourceSelector {
                root: config.project_root.join(&relative_root),
                relative_root,
                include: walk::build_globset(&svc.include)?,
                exclude: walk::build_globset(&exclude)?,
                include_tests: config.include_tests,
            };

            let declared_dependencies = svc
                .depends_on
                .iter()
                .map(|dep| DeclaredDependency {
                    service: dep.service().to_string(),
                    requirement: dep.requirement(),
                })
                .collect();

            services.push(ServiceDefinition {
                name: svc.name.clone(),
                language,
                selector,
                provided_apis: dedup_ordered(&svc.provides),
                consumed_apis: dedup_ordered(&svc.consumes),
                declared_dependencies,
            });
        }

        let registry = Self {
            project_root: config.project_root.clone(),
            services,
        };
        registry.check_declared_dependencies()?;
        Ok(registry)
    }

    fn check_declared_dependencies(&self) -> Result<()> {
        for svc in &self.services {
            for dep in &svc.declared_dependencies {
                if self.find_by_name(&dep.service).is_none() {
                    return Err(CrossdepsError::UnknownDependency {
                        service: svc.name.clone(),
                        missing: dep.service.clone(),
                    });
                }
            }
        }
        Ok(())
    }

    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    pub fn all_services(&self) -> &[ServiceDefinition] {
        &self.services
    }

    pub fn find_by_name(&self, name: &str) -> Option<&ServiceDefinition> {
        self.services.iter().find(|svc| svc.name == name)
    }

    /// Service whose root contains `path`; the deepest root wins.
    pub fn owner_of_path(&self, path: &Path) -> Option<&ServiceDefinition> {
        self.services
            .iter()
            .filter(|svc| svc.selector.contains(path))
            .max_by_key(|svc| svc.selector.root.components().count())
    }

    /// Enumerate every service's files and reject any file claimed by two
    /// selectors.
    pub fn discover_sources(&self) -> Result<SourceIndex> {
        let mut owners: BTreeMap<PathBuf, usize> = BTreeMap::new();
        let mut files_by_service = Vec::with_capacity(self.services.len());

        for (idx, svc) in self.services.iter().enumerate() {
            let files = svc.selector.files(svc.language)?;
            for file in &files {
                if let Some(&first) = owners.get(file) {
                    let relative = file.strip_prefix(&self.project_root).unwrap_or(file);
                    return Err(CrossdepsError::OverlappingSelectors {
                        file: relative.to_path_buf(),
                        first: self.services[first].name.clone(),
                        second: svc.name.clone(),
                    });
                }
                owners.insert(file.clone(), idx);
            }
            tracing::debug!("{}: {} source file(s)", svc.name, files.len());
            files_by_service.push(files);
        }

        Ok(SourceIndex { files_by_service })
    }
}

fn dedup_ordered(values: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    values
        .iter()
        .filter(|v| seen.insert(v.as_str()))
        .cloned()
        .collect()
}
