use crate::graph::ir::{to_digraph, DependencyEdge};
use petgraph::graph::NodeIndex;
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CycleReport {
    /// Each cycle is closed: `[s0, s1, ..., s0]`, rotated to start at its
    /// lexicographically smallest service. Sorted.
    pub cycles: Vec<Vec<String>>,
}

impl CycleReport {
    pub fn is_empty(&self) -> bool {
        self.cycles.is_empty()
    }
}

/// Find circular dependencies with an iterative depth-first search.
///
/// Every node is a DFS root (in name order) unless an earlier search already
/// visited it. Reaching a node on the current path records the path slice
/// from that node as a cycle; the search then continues. Rotations of a
/// recorded cycle are collapsed. Self-loops are ignored.
pub fn find_cycles(edges: &[DependencyEdge]) -> CycleReport {
    let (graph, index) = to_digraph(edges);

    // Successors in name order so the walk is reproducible.
    let adjacency: Vec<Vec<NodeIndex>> = graph
        .node_indices()
        .map(|node| {
            let mut succ: Vec<NodeIndex> = graph.neighbors(node).collect();
            succ.sort_by(|a, b| graph[*a].cmp(&graph[*b]));
            succ.dedup();
            succ
        })
        .collect();

    let mut visited = vec![false; graph.node_count()];
    let mut on_path = vec![false; graph.node_count()];
    let mut found: BTreeSet<Vec<String>> = BTreeSet::new();

    for &start in index.values() {
        if visited[start.index()] {
            continue;
        }

        // (node, next successor to try)
        let mut stack: Vec<(NodeIndex, usize)> = vec![(start, 0)];
        let mut path: Vec<NodeIndex> = vec![start];
        visited[start.index()] = true;
        on_path[start.index()] = true;

        while let Some(&(node, next)) = stack.last() {
            let successors = &adjacency[node.index()];
            if next >= successors.len() {
                stack.pop();
                path.pop();
                on_path[node.index()] = false;
                continue;
            }
            if let Some(top) = stack.last_mut() {
                top.1 += 1;
            }

            let succ = successors[next];
            if on_path[succ.index()] {
                if let Some(pos) = path.iter().position(|&n| n == succ) {
                    let members: Vec<String> =
                        path[pos..].iter().map(|&n| graph[n].clone()).collect();
                    found.insert(canonical_rotation(members));
                }
            } else if !visited[succ.index()] {
                visited[succ.index()] = true;
                on_path[succ.index()] = true;
                path.push(succ);
                stack.push((succ, 0));
            }
        }
    }

    let cycles = found
        .into_iter()
        .map(|mut members| {
            if let Some(first) = members.first().cloned() {
                members.push(first);
            }
            members
        })
        .collect();

    CycleReport { cycles }
}

/// Rotate an open cycle so it starts at its smallest member.
fn canonical_rotation(mut members: Vec<String>) -> Vec<String> {
    if let Some(min_pos) = members
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.cmp(b.1))
        .map(|(i, _)| i)
    {
        members.rotate_left(min_pos);
    }
    members
}
