use crate::checks::boundaries::BoundaryReport;
use crate::checks::cycles::CycleReport;
use crate::checks::polyglot::PolyglotReport;
use crate::checks::validate::{UnusedDeclaration, ValidationResult};
use crate::checks::AnalysisReport;
use crate::errors::Result;
use crate::graph::ir::DependencyEdge;
use crate::output::json::ServiceListing;
use crate::registry::Requirement;
use std::io::Write;

/// Per-service edges marked declared/undeclared, then the missing
/// dependencies, then the cycles.
pub fn write_report<W: Write>(
    writer: &mut W,
    validation: &ValidationResult,
    cycles: &CycleReport,
) -> Result<()> {
    write_validation(writer, validation)?;
    writeln!(writer)?;
    write_cycles(writer, cycles)?;
    Ok(())
}

/// Write the full `check` report: every section the run produced.
pub fn write_analysis_text<W: Write>(writer: &mut W, report: &AnalysisReport) -> Result<()> {
    writeln!(writer, "Crossdeps Dependency Report")?;
    writeln!(writer, "===========================")?;
    writeln!(writer)?;
    let skipped = report.skipped_services().count();
    writeln!(
        writer,
        "Result:    {}",
        if report.valid { "PASS" } else { "FAIL" }
    )?;
    writeln!(
        writer,
        "Services:  {} ({} skipped)",
        report.services.len(),
        skipped
    )?;
    writeln!(writer, "Edges:     {}", report.edges.len())?;
    writeln!(
        writer,
        "Calls:     {} unresolved, {} self",
        report.unresolved.len(),
        report.self_calls.len()
    )?;

    match &report.cross_service {
        Some(validation) => {
            writeln!(writer)?;
            write_validation(writer, validation)?;
        }
        None => {
            writeln!(writer)?;
            write_edges(writer, &report.edges)?;
        }
    }

    if let Some(cycles) = &report.circular {
        writeln!(writer)?;
        write_cycles(writer, cycles)?;
    }

    if let Some(boundaries) = &report.boundaries {
        writeln!(writer)?;
        write_boundaries(writer, boundaries)?;
    }

    if let Some(polyglot) = &report.polyglot {
        writeln!(writer)?;
        write_polyglot(writer, polyglot)?;
    }

    if let Some(validation) = &report.cross_service {
        if !validation.unused_declarations.is_empty() {
            writeln!(writer)?;
            write_unused(writer, &validation.unused_declarations)?;
        }
    }

    if !report.warnings.is_empty() {
        writeln!(writer)?;
        heading(writer, "Scan Warnings")?;
        for warning in &report.warnings {
            writeln!(writer, "  {warning}")?;
        }
    }

    if !report.unresolved.is_empty() {
        writeln!(writer)?;
        heading(writer, "Unresolved Calls")?;
        for call in &report.unresolved {
            writeln!(
                writer,
                "  {}:{}  {}",
                call.source_file.display(),
                call.line_number,
                call.raw_target
            )?;
        }
    }

    if skipped > 0 {
        writeln!(writer)?;
        heading(writer, "Skipped Services")?;
        for svc in report.skipped_services() {
            writeln!(writer, "  {} (no files under the requested path)", svc.name)?;
        }
    }

    Ok(())
}

fn heading<W: Write>(writer: &mut W, title: &str) -> Result<()> {
    writeln!(writer, "{title}")?;
    writeln!(writer, "{:-<1$}", "", title.chars().count())?;
    Ok(())
}

fn api_list(apis: &std::collections::BTreeSet<String>) -> String {
    apis.iter().map(String::as_str).collect::<Vec<_>>().join(", ")
}

fn write_validation<W: Write>(writer: &mut W, validation: &ValidationResult) -> Result<()> {
    heading(writer, "Services")?;
    for (service, statuses) in &validation.per_service {
        writeln!(writer, "{service}")?;
        if statuses.is_empty() {
            writeln!(writer, "  (no outgoing calls)")?;
        }
        for status in statuses {
            let mark = if status.declared { "✅" } else { "❌" };
            writeln!(
                writer,
                "  {mark} {} ({})",
                status.edge.to,
                api_list(&status.edge.apis)
            )?;
        }
    }

    writeln!(writer)?;
    heading(writer, "Missing Dependencies")?;
    if validation.violations.is_empty() {
        writeln!(writer, "  None")?;
    }
    for violation in &validation.violations {
        writeln!(
            writer,
            "  {} -> {} ({})",
            violation.from,
            violation.to,
            api_list(&violation.apis)
        )?;
    }
    Ok(())
}

fn write_edges<W: Write>(writer: &mut W, edges: &[DependencyEdge]) -> Result<()> {
    heading(writer, "Dependencies")?;
    if edges.is_empty() {
        writeln!(writer, "  None")?;
    }
    for edge in edges {
        writeln!(writer, "  {} -> {} ({})", edge.from, edge.to, api_list(&edge.apis))?;
    }
    Ok(())
}

fn write_cycles<W: Write>(writer: &mut W, cycles: &CycleReport) -> Result<()> {
    heading(writer, "Circular Dependencies")?;
    if cycles.is_empty() {
        writeln!(writer, "  None")?;
    }
    for cycle in &cycles.cycles {
        writeln!(writer, "  {}", cycle.join(" -> "))?;
    }
    Ok(())
}

fn write_boundaries<W: Write>(writer: &mut W, report: &BoundaryReport) -> Result<()> {
    heading(writer, "Boundary Violations")?;
    if report.violations.is_empty() {
        writeln!(writer, "  None")?;
    }
    for v in &report.violations {
        writeln!(
            writer,
            "  {} -> {}  {}:{}  imports \"{}\"",
            v.from,
            v.to,
            v.file.display(),
            v.line,
            v.import
        )?;
    }
    Ok(())
}

fn write_polyglot<W: Write>(writer: &mut W, report: &PolyglotReport) -> Result<()> {
    heading(writer, "Polyglot Summary")?;
    writeln!(
        writer,
        "  {:<12} {:>8} {:>6} {:>6} {:>9} {:>11}",
        "Language", "Services", "Files", "Calls", "Resolved", "Unresolved"
    )?;
    for lang in &report.languages {
        writeln!(
            writer,
            "  {:<12} {:>8} {:>6} {:>6} {:>9} {:>11}",
            lang.language.to_string(),
            lang.services.len(),
            lang.files_scanned,
            lang.call_sites,
            lang.resolved,
            lang.unresolved
        )?;
    }
    for mismatch in &report.mismatches {
        let found = mismatch
            .found
            .iter()
            .map(|(lang, count)| format!("{lang}: {count}"))
            .collect::<Vec<_>>()
            .join(", ");
        writeln!(
            writer,
            "  ❌ {} declares {} but contains {}",
            mismatch.service, mismatch.declared, found
        )?;
    }
    Ok(())
}

fn write_unused<W: Write>(writer: &mut W, unused: &[UnusedDeclaration]) -> Result<()> {
    heading(writer, "Unused Declarations")?;
    for u in unused {
        writeln!(writer, "  {} -> {} ({})", u.service, u.dependency, u.requirement)?;
    }
    Ok(())
}

/// Registry listing for `crossdeps services`.
pub fn write_services_text<W: Write>(writer: &mut W, services: &[ServiceListing]) -> Result<()> {
    writeln!(writer, "Services ({}):", services.len())?;
    for svc in services {
        writeln!(
            writer,
            "  {} ({}) - {} files at {}",
            svc.name,
            svc.language,
            svc.file_count,
            svc.root.display()
        )?;
        if !svc.provides.is_empty() {
            writeln!(writer, "    provides:   {}", svc.provides.join(", "))?;
        }
        if !svc.consumes.is_empty() {
            writeln!(writer, "    consumes:   {}", svc.consumes.join(", "))?;
        }
        if !svc.depends_on.is_empty() {
            let deps = svc
                .depends_on
                .iter()
                .map(|d| match d.requirement {
                    Requirement::Required => d.service.clone(),
                    Requirement::Optional => format!("{} (optional)", d.service),
                })
                .collect::<Vec<_>>()
                .join(", ");
            writeln!(writer, "    depends on: {deps}")?;
        }
    }
    Ok(())
}
