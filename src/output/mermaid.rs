use crate::errors::Result;
use crate::graph::ir::DependencyEdge;
use crate::output::api_count_label;
use crate::registry::ServiceRegistry;
use crate::walk::Language;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;

fn class_style(language: Language) -> &'static str {
    match language {
        Language::TypeScript => "fill:#dbeafe,stroke:#1d4ed8",
        Language::Python => "fill:#fef9c3,stroke:#a16207",
        Language::Go => "fill:#cffafe,stroke:#0e7490",
        Language::Ruby => "fill:#fee2e2,stroke:#b91c1c",
    }
}

/// Mermaid node ids allow only `[A-Za-z0-9_]`, so ids come from each
/// service's registration index rather than its name.
pub(crate) fn node_ids(registry: &ServiceRegistry) -> HashMap<&str, String> {
    registry
        .all_services()
        .iter()
        .enumerate()
        .map(|(idx, svc)| (svc.name.as_str(), format!("s{idx}")))
        .collect()
}

fn node_label(name: &str) -> String {
    name.replace('"', "#quot;")
}

/// Services grouped by language, names sorted within each group.
pub(crate) fn services_by_language(registry: &ServiceRegistry) -> BTreeMap<Language, Vec<&str>> {
    let mut groups: BTreeMap<Language, Vec<&str>> = BTreeMap::new();
    for svc in registry.all_services() {
        groups.entry(svc.language).or_default().push(svc.name.as_str());
    }
    for names in groups.values_mut() {
        names.sort_unstable();
    }
    groups
}

/// Write the service graph as a Mermaid flowchart. Undeclared edges are
/// dashed; self-loops are never drawn.
pub fn write_mermaid<W: Write>(
    writer: &mut W,
    edges: &[DependencyEdge],
    registry: &ServiceRegistry,
) -> Result<()> {
    let groups = services_by_language(registry);
    let ids = node_ids(registry);

    writeln!(writer, "graph LR")?;
    for (language, names) in &groups {
        writeln!(writer, "    subgraph lang_{language}[\"{language}\"]")?;
        for name in names {
            writeln!(writer, "        {}[\"{}\"]", ids[name], node_label(name))?;
        }
        writeln!(writer, "    end")?;
    }

    for edge in edges.iter().filter(|e| !e.is_self_loop()) {
        let (Some(from), Some(to)) = (ids.get(edge.from.as_str()), ids.get(edge.to.as_str()))
        else {
            tracing::debug!(from = %edge.from, to = %edge.to, "edge endpoint not registered");
            continue;
        };
        let declared = registry
            .find_by_name(&edge.from)
            .is_some_and(|svc| svc.declares(&edge.to));
        let arrow = if declared { "-->" } else { "-.->" };
        writeln!(
            writer,
            "    {from} {arrow}|\"{}\"| {to}",
            api_count_label(edge.apis.len())
        )?;
    }

    for (language, names) in &groups {
        writeln!(writer, "    classDef {language} {}", class_style(*language))?;
        let class_ids: Vec<&str> = names.iter().map(|n| ids[n].as_str()).collect();
        writeln!(writer, "    class {} {language}", class_ids.join(","))?;
    }

    Ok(())
}
