use crate::errors::Result;
use crate::graph::ir::DependencyEdge;
use crate::output::api_count_label;
use crate::output::mermaid::services_by_language;
use crate::registry::ServiceRegistry;
use crate::walk::Language;
use std::io::Write;

fn fill_color(language: Language) -> &'static str {
    match language {
        Language::TypeScript => "lightblue",
        Language::Python => "lightyellow",
        Language::Go => "lightcyan",
        Language::Ruby => "lightcoral",
    }
}

/// DOT quoted-string body: backslashes and double quotes escaped.
fn quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Write the service graph in Graphviz DOT format, one cluster per language.
pub fn write_dot<W: Write>(
    writer: &mut W,
    edges: &[DependencyEdge],
    registry: &ServiceRegistry,
) -> Result<()> {
    writeln!(writer, "digraph services {{")?;
    writeln!(writer, "    rankdir=LR;")?;
    writeln!(writer, "    node [shape=box, style=filled];")?;
    writeln!(writer)?;

    for (language, names) in services_by_language(registry) {
        writeln!(writer, "    subgraph cluster_{language} {{")?;
        writeln!(writer, "        label=\"{language}\";")?;
        for name in names {
            writeln!(
                writer,
                "        \"{}\" [fillcolor={}];",
                quoted(name),
                fill_color(language)
            )?;
        }
        writeln!(writer, "    }}")?;
    }
    writeln!(writer)?;

    for edge in edges.iter().filter(|e| !e.is_self_loop()) {
        let declared = registry
            .find_by_name(&edge.from)
            .is_some_and(|svc| svc.declares(&edge.to));
        let style = if declared {
            String::new()
        } else {
            ", style=dashed, color=red".to_string()
        };
        writeln!(
            writer,
            "    \"{}\" -> \"{}\" [label=\"{}\"{style}];",
            quoted(&edge.from),
            quoted(&edge.to),
            api_count_label(edge.apis.len())
        )?;
    }

    writeln!(writer, "}}")?;
    Ok(())
}
