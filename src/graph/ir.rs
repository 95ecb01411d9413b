use petgraph::graph::{DiGraph, NodeIndex};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Directed service graph; edge weight is the number of distinct APIs.
pub type ServiceDiGraph = DiGraph<String, usize>;

/// A discovered `from -> to` call relationship.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize)]
pub struct DependencyEdge {
    pub from: String,
    pub to: String,
    /// Matched API names responsible for this edge, deduplicated and sorted.
    pub apis: BTreeSet<String>,
}

impl DependencyEdge {
    pub fn is_self_loop(&self) -> bool {
        self.from == self.to
    }
}

/// Build a petgraph view of `edges` with self-loops removed.
///
/// Nodes are inserted in name order and edges in (from, to) order so that
/// traversal order does not depend on how the edge list was produced.
pub fn to_digraph(edges: &[DependencyEdge]) -> (ServiceDiGraph, BTreeMap<String, NodeIndex>) {
    let mut sorted: Vec<&DependencyEdge> = edges.iter().filter(|e| !e.is_self_loop()).collect();
    sorted.sort();
    sorted.dedup_by(|a, b| a.from == b.from && a.to == b.to);

    let names: BTreeSet<&str> = sorted
        .iter()
        .flat_map(|e| [e.from.as_str(), e.to.as_str()])
        .collect();

    let mut graph = ServiceDiGraph::new();
    let mut index = BTreeMap::new();
    for name in names {
        index.insert(name.to_string(), graph.add_node(name.to_string()));
    }
    for edge in sorted {
        graph.add_edge(index[&edge.from], index[&edge.to], edge.apis.len());
    }

    (graph, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(from: &str, to: &str, apis: &[&str]) -> DependencyEdge {
        DependencyEdge {
            from: from.to_string(),
            to: to.to_string(),
            apis: apis.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn digraph_drops_self_loops_and_duplicates() {
        let edges = vec![
            edge("b", "a", &["jobs"]),
            edge("a", "a", &["self"]),
            edge("a", "b", &["x", "y"]),
            edge("a", "b", &["x", "y"]),
        ];
        let (graph, index) = to_digraph(&edges);
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 2);
        let a = index["a"];
        assert!(graph.find_edge(a, a).is_none());
        let ab = graph.find_edge(a, index["b"]).unwrap();
        assert_eq!(graph[ab], 2);
    }

    #[test]
    fn self_loop_only_nodes_are_absent() {
        let (graph, index) = to_digraph(&[edge("solo", "solo", &["ping"])]);
        assert_eq!(graph.node_count(), 0);
        assert!(index.is_empty());
    }
}
