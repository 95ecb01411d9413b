use miette::Diagnostic;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum CrossdepsError {
    #[error("No .crossdeps.toml found in {path} or any parent directory")]
    #[diagnostic(
        code(crossdeps::config::not_found),
        help("create a .crossdeps.toml at the repository root or pass --config")
    )]
    NoConfig { path: PathBuf },

    #[error("Invalid config file {path}: {message}")]
    #[diagnostic(code(crossdeps::config::invalid))]
    InvalidConfig { path: PathBuf, message: String },

    #[error("Service `{name}` is registered more than once")]
    #[diagnostic(code(crossdeps::config::duplicate_service))]
    DuplicateService { name: String },

    #[error("Service `{service}` declares unsupported language `{language}`")]
    #[diagnostic(
        code(crossdeps::config::unknown_language),
        help("supported languages: typescript, python, go, ruby")
    )]
    UnknownLanguage { service: String, language: String },

    #[error("Service `{service}` depends on unknown service `{missing}`")]
    #[diagnostic(code(crossdeps::config::unknown_dependency))]
    UnknownDependency { service: String, missing: String },

    #[error(
        "{} is matched by the source selectors of both `{first}` and `{second}`",
        file.display()
    )]
    #[diagnostic(
        code(crossdeps::config::overlapping_selectors),
        help("narrow one of the services with `include`/`exclude` globs")
    )]
    OverlappingSelectors {
        file: PathBuf,
        first: String,
        second: String,
    },

    #[error("Configuration error: {0}")]
    #[diagnostic(code(crossdeps::config))]
    Config(String),

    #[error(transparent)]
    #[diagnostic(code(crossdeps::io))]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    #[diagnostic(code(crossdeps::json))]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    #[diagnostic(code(crossdeps::glob))]
    Glob(#[from] globset::Error),
}

impl CrossdepsError {
    /// True for errors that mean "the tool couldn't run" because the
    /// registry itself is broken, as opposed to I/O failures while writing.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            CrossdepsError::NoConfig { .. }
                | CrossdepsError::InvalidConfig { .. }
                | CrossdepsError::DuplicateService { .. }
                | CrossdepsError::UnknownLanguage { .. }
                | CrossdepsError::UnknownDependency { .. }
                | CrossdepsError::OverlappingSelectors { .. }
                | CrossdepsError::Config(_)
                | CrossdepsError::Glob(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, CrossdepsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_errors_are_classified() {
        let err = CrossdepsError::UnknownDependency {
            service: "api".to_string(),
            missing: "billing".to_string(),
        };
        assert!(err.is_config_error());
        assert_eq!(
            err.to_string(),
            "Service `api` depends on unknown service `billing`"
        );

        let io = CrossdepsError::Io(std::io::Error::other("disk full"));
        assert!(!io.is_config_error());
    }

    #[test]
    fn overlap_message_names_both_services() {
        let err = CrossdepsError::OverlappingSelectors {
            file: PathBuf::from("services/api/worker/main.py"),
            first: "api".to_string(),
            second: "worker".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("services/api/worker/main.py"));
        assert!(msg.contains("`api`"));
        assert!(msg.contains("`worker`"));
    }
}
