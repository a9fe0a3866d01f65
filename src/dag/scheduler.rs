// src/dag/scheduler.rs

use std::collections::BTreeSet;

use tracing::debug;

use crate::dag::graph::DagGraph;
use crate::errors::{PipeflowError, Result};

/// Answers schedulability queries over a built [`DagGraph`].
///
/// The scheduler keeps no per-query state: [`get`](Scheduler::get) is a pure
/// function of the graph and the caller-supplied done-set, so the calling
/// engine is free to re-query after every state change.
#[derive(Debug, Clone)]
pub struct Scheduler {
    graph: DagGraph,
}

impl Scheduler {
    pub fn new(graph: DagGraph) -> Self {
        Self { graph }
    }

    pub fn graph(&self) -> &DagGraph {
        &self.graph
    }

    /// Compute the schedulable frontier for the given done-set: every task
    /// whose prerequisites are all done and which is not itself done.
    ///
    /// The traversal starts at the roots and walks downward with an explicit
    /// stack (no call recursion, so chain depth is not bounded by the call
    /// stack):
    ///
    /// - a done task contributes nothing itself but its dependents are
    ///   explored,
    /// - a task with every prerequisite done is emitted and its dependents
    ///   are *not* explored (they cannot be eligible yet),
    /// - a task with an unmet prerequisite ends its branch.
    ///
    /// After the walk, any supplied done key that was never visited is
    /// reported via [`PipeflowError::InvalidDoneList`] — it names a task that
    /// is unknown, or unreachable given the rest of the done-set.
    pub fn get<I, S>(&self, done: I) -> Result<BTreeSet<String>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let done: BTreeSet<String> = done.into_iter().map(|s| s.as_ref().to_string()).collect();

        let mut visited: BTreeSet<String> = BTreeSet::new();
        let mut schedulable: BTreeSet<String> = BTreeSet::new();
        let mut stack: Vec<&str> = self.graph.roots().collect();

        while let Some(key) = stack.pop() {
            if !visited.insert(key.to_string()) {
                continue;
            }

            if done.contains(key) {
                for next in self.graph.dependents_of(key) {
                    if !visited.contains(next) {
                        stack.push(next.as_str());
                    }
                }
            } else if self
                .graph
                .dependencies_of(key)
                .iter()
                .all(|prev| done.contains(prev))
            {
                schedulable.insert(key.to_string());
            }
        }

        let stale = diff_left(&done, &visited);
        if !stale.is_empty() {
            return Err(PipeflowError::InvalidDoneList { keys: stale });
        }

        debug!(?done, ?schedulable, "schedulability query resolved");

        Ok(schedulable)
    }
}

/// Elements of `left` missing from `right`, in sorted order.
fn diff_left(left: &BTreeSet<String>, right: &BTreeSet<String>) -> Vec<String> {
    left.difference(right).cloned().collect()
}
