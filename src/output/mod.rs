pub mod dot;
pub mod json;
pub mod mermaid;
pub mod text;

use clap::ValueEnum;
use serde::Serialize;

/// Report format.
#[derive(Debug, Default, Clone, Copy, ValueEnum, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Diagram format.
#[derive(Debug, Default, Clone, Copy, ValueEnum, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiagramFormat {
    #[default]
    Mermaid,
    Dot,
}

/// Label carried by every diagram edge.
pub(crate) fn api_count_label(count: usize) -> String {
    format!("{count} APIs")
}
