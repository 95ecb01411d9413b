use crate::checks::AnalysisReport;
use crate::errors::Result;
use crate::registry::{DeclaredDependency, ServiceRegistry};
use crate::walk::Language;
use serde::Serialize;
use std::io::Write;
use std::path::PathBuf;

/// Write the analysis report as pretty JSON.
pub fn write_report_json<W: Write>(writer: &mut W, report: &AnalysisReport) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, report)?;
    writeln!(writer)?;
    Ok(())
}

/// Registry listing printed by `crossdeps services`.
#[derive(Debug, Serialize)]
pub struct ServiceListing {
    pub name: String,
    pub language: Language,
    pub root: PathBuf,
    pub file_count: usize,
    pub provides: Vec<String>,
    pub consumes: Vec<String>,
    pub depends_on: Vec<DeclaredDependency>,
}

impl ServiceListing {
    pub fn collect(registry: &ServiceRegistry, file_counts: &[usize]) -> Vec<Self> {
        registry
            .all_services()
            .iter()
            .zip(file_counts)
            .map(|(svc, &file_count)| ServiceListing {
                name: svc.name.clone(),
                language: svc.language,
                root: svc.selector.relative_root.clone(),
                file_count,
                provides: svc.provided_apis.clone(),
                consumes: svc.consumed_apis.clone(),
                depends_on: svc.declared_dependencies.clone(),
            })
            .collect()
    }
}

pub fn write_services_json<W: Write>(writer: &mut W, services: &[ServiceListing]) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, services)?;
    writeln!(writer)?;
    Ok(())
}
