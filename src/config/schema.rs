use crate::registry::Requirement;
use serde::Deserialize;

/// TOML-deserializable `.crossdeps.toml`. Optional fields are filled in by
/// resolution, so a missing table never changes the meaning of another.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    #[serde(default)]
    pub analysis: AnalysisFileConfig,
    #[serde(default)]
    pub scan: ScanFileConfig,
    /// Array of tables; file order is registration order.
    #[serde(default)]
    pub services: Vec<ServiceFileConfig>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct AnalysisFileConfig {
    pub boundaries: Option<bool>,
    pub circular: Option<bool>,
    pub polyglot: Option<bool>,
    pub cross_service: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ScanFileConfig {
    #[serde(default)]
    pub exclude: Vec<String>,
    pub include_tests: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceFileConfig {
    pub name: String,
    pub language: String,
    pub root: String,
    #[serde(default)]
    pub include: Vec<String>,
    #[serde(default)]
    pub exclude: Vec<String>,
    #[serde(default)]
    pub provides: Vec<String>,
    #[serde(default)]
    pub consumes: Vec<String>,
    #[serde(default)]
    pub depends_on: Vec<DependencyFileConfig>,
}

/// `depends_on = ["api", { service = "reports", requirement = "optional" }]`
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum DependencyFileConfig {
    Name(String),
    Detailed {
        service: String,
        #[serde(default)]
        requirement: Requirement,
    },
}

impl DependencyFileConfig {
    pub fn service(&self) -> &str {
        match self {
            DependencyFileConfig::Name(name) => name,
            DependencyFileConfig::Detailed { service, .. } => service,
        }
    }

    pub fn requirement(&self) -> Requirement {
        match self {
            DependencyFileConfig::Name(_) => Requirement::Required,
            DependencyFileConfig::Detailed { requirement, .. } => *requirement,
        }
    }
}

impl FileConfig {
    /// Load from a TOML string.
    pub fn from_toml(s: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(s)
    }
}
