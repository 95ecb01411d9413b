pub mod resolve;
pub mod schema;

use schema::ServiceFileConfig;
use std::path::PathBuf;

/// Fully resolved configuration with no Option fields.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Directory holding the config file; service roots are relative to it.
    pub project_root: PathBuf,
    pub config_path: PathBuf,

    // Which checks run when the CLI names none
    pub analysis: AnalysisToggles,

    // Targeting
    pub exclude: Vec<String>,
    pub include_tests: bool,

    // Registry source, in registration order
    pub services: Vec<ServiceFileConfig>,
}

/// The four independently switchable analyses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnalysisToggles {
    pub boundaries: bool,
    pub circular: bool,
    pub polyglot: bool,
    pub cross_service: bool,
}

impl Default for AnalysisToggles {
    fn default() -> Self {
        Self {
            boundaries: true,
            circular: true,
            polyglot: true,
            cross_service: true,
        }
    }
}

impl AnalysisToggles {
    pub fn none() -> Self {
        Self {
            boundaries: false,
            circular: false,
            polyglot: false,
            cross_service: false,
        }
    }

    pub fn any(&self) -> bool {
        self.boundaries || self.circular || self.polyglot || self.cross_service
    }
}
