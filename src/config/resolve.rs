use crate::config::schema::FileConfig;
use crate::config::{AnalysisToggles, ResolvedConfig};
use crate::errors::{CrossdepsError, Result};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = ".crossdeps.toml";

/// Resolve configuration from an explicit `--config` path, or from the
/// nearest `.crossdeps.toml` walking up from `working_dir`.
pub fn resolve_config(working_dir: &Path, explicit: Option<&Path>) -> Result<ResolvedConfig> {
    let config_path = match explicit {
        Some(path) => path.to_path_buf(),
        None => find_project_config(working_dir).ok_or_else(|| CrossdepsError::NoConfig {
            path: working_dir.to_path_buf(),
        })?,
    };

    let content =
        std::fs::read_to_string(&config_path).map_err(|e| CrossdepsError::InvalidConfig {
            path: config_path.clone(),
            message: format!("could not read file: {e}"),
        })?;
    let file_config =
        FileConfig::from_toml(&content).map_err(|e| CrossdepsError::InvalidConfig {
            path: config_path.clone(),
            message: e.message().to_string(),
        })?;

    let config_path = config_path.canonicalize().unwrap_or(config_path);
    let project_root = config_path
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    tracing::info!(
        "loaded {} service(s) from {}",
        file_config.services.len(),
        config_path.display()
    );

    Ok(apply_file_config(file_config, project_root, config_path))
}

fn find_project_config(start: &Path) -> Option<PathBuf> {
    let mut dir = start.to_path_buf();
    loop {
        let config_path = dir.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if !dir.pop() {
            break;
        }
    }
    None
}

fn apply_file_config(
    file: FileConfig,
    project_root: PathBuf,
    config_path: PathBuf,
) -> ResolvedConfig {
    let defaults = AnalysisToggles::default();
    let analysis = AnalysisToggles {
        boundaries: file.analysis.boundaries.unwrap_or(defaults.boundaries),
        circular: file.analysis.circular.unwrap_or(defaults.circular),
        polyglot: file.analysis.polyglot.unwrap_or(defaults.polyglot),
        cross_service: file.analysis.cross_service.unwrap_or(defaults.cross_service),
    };

    ResolvedConfig {
        project_root,
        config_path,
        analysis,
        exclude: file.scan.exclude,
        include_tests: file.scan.include_tests.unwrap_or(false),
        services: file.services,
    }
}
