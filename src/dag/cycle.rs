// src/dag/cycle.rs

//! Upward reachability walk used to validate new edges.

use std::collections::HashSet;

use crate::dag::graph::DagGraph;

/// Returns `true` if `task` appears among the transitive prerequisites of
/// `from`, i.e. adding `from` as a prerequisite of `task` would close a
/// cycle.
///
/// The walk uses an explicit stack and a visited set; a graph that already
/// contains a cycle terminates the walk at the first repeat visit instead of
/// re-descending.
pub(crate) fn reachable_upward(graph: &DagGraph, task: &str, from: &str) -> bool {
    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = graph
        .dependencies_of(from)
        .iter()
        .map(|s| s.as_str())
        .collect();

    while let Some(key) = stack.pop() {
        if !visited.insert(key) {
            continue;
        }

        if key == task {
            return true;
        }

        stack.extend(graph.dependencies_of(key).iter().map(|s| s.as_str()));
    }

    false
}
