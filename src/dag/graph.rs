// src/dag/graph.rs

use std::collections::BTreeMap;

use tracing::debug;

use crate::dag::cycle;
use crate::errors::{PipeflowError, Result};

/// An immutable unit of work identified by a unique string key.
///
/// This core carries no other task attributes; commands, retries and so on
/// live in the layers around the graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    pub key: String,
}

impl Task {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into() }
    }
}

/// Internal node structure: one task plus its adjacency.
///
/// Adjacency is stored as key lists rather than node references, so the
/// graph map is the sole owner of every node.
#[derive(Debug, Clone)]
struct Node {
    task: Task,
    /// Direct prerequisites: tasks that must be done before this one may run.
    prev: Vec<String>,
    /// Direct dependents: tasks that list this one as a prerequisite.
    next: Vec<String>,
}

/// In-memory dependency graph keyed by task key.
///
/// Built once per pipeline definition via [`DagGraph::build`] (or the
/// incremental [`add_task`](DagGraph::add_task) /
/// [`add_link`](DagGraph::add_link) pair) and treated as read-only for the
/// rest of the scheduling session.
///
/// A `BTreeMap` keeps iteration deterministic: edges are wired sorted by
/// dependent task key, then in the prerequisite order given, so the first
/// rejected edge is the same on every run.
#[derive(Debug, Clone, Default)]
pub struct DagGraph {
    nodes: BTreeMap<String, Node>,
}

impl DagGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every task, then wire every `(task, prerequisites)` entry of
    /// `deps` as edges.
    ///
    /// Fails fast: the first structural violation aborts the build and is
    /// returned with the offending keys. Nodes and edges added before the
    /// failing step remain in the graph, so a caller retrying against the
    /// same instance must account for the partial state (or start from a
    /// fresh `DagGraph`, which is what the rest of this crate does).
    pub fn build(&mut self, tasks: Vec<Task>, deps: &BTreeMap<String, Vec<String>>) -> Result<()> {
        for task in tasks {
            self.add_task(task)?;
        }

        for (task, prevs) in deps.iter() {
            for prev in prevs.iter() {
                self.add_link(task, prev)?;
            }
        }

        debug!(tasks = self.nodes.len(), "dependency graph built");

        Ok(())
    }

    /// Insert a new node for `task`.
    ///
    /// Rejects a duplicate key with [`PipeflowError::DuplicateTask`]; the
    /// graph is unchanged on failure.
    pub fn add_task(&mut self, task: Task) -> Result<()> {
        if self.nodes.contains_key(&task.key) {
            return Err(PipeflowError::DuplicateTask { key: task.key });
        }

        let key = task.key.clone();
        self.nodes.insert(
            key,
            Node {
                task,
                prev: Vec::new(),
                next: Vec::new(),
            },
        );

        Ok(())
    }

    /// Wire `prev` as a prerequisite of `task`.
    ///
    /// Both nodes must already exist ([`PipeflowError::UnknownNode`]
    /// otherwise), and the edge must not close a cycle — including the
    /// `task == prev` self-loop ([`PipeflowError::Cycle`]).
    pub fn add_link(&mut self, task: &str, prev: &str) -> Result<()> {
        if !self.nodes.contains_key(prev) {
            return Err(PipeflowError::UnknownNode {
                task: task.to_string(),
                key: prev.to_string(),
            });
        }
        if !self.nodes.contains_key(task) {
            return Err(PipeflowError::UnknownNode {
                task: prev.to_string(),
                key: task.to_string(),
            });
        }

        if task == prev || cycle::reachable_upward(self, task, prev) {
            return Err(PipeflowError::Cycle {
                task: task.to_string(),
                prev: prev.to_string(),
            });
        }

        // Checks passed; append both directions.
        if let Some(node) = self.nodes.get_mut(task) {
            node.prev.push(prev.to_string());
        }
        if let Some(node) = self.nodes.get_mut(prev) {
            node.next.push(task.to_string());
        }

        debug!(task, prev, "dependency edge added");

        Ok(())
    }

    /// All task keys, in sorted order.
    pub fn tasks(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(|s| s.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Direct prerequisites of a task (empty for roots and unknown keys).
    pub fn dependencies_of(&self, key: &str) -> &[String] {
        self.nodes
            .get(key)
            .map(|n| n.prev.as_slice())
            .unwrap_or(&[])
    }

    /// Direct dependents of a task.
    pub fn dependents_of(&self, key: &str) -> &[String] {
        self.nodes
            .get(key)
            .map(|n| n.next.as_slice())
            .unwrap_or(&[])
    }

    /// Keys of the nodes with no prerequisites.
    pub fn roots(&self) -> impl Iterator<Item = &str> {
        self.nodes
            .values()
            .filter(|n| n.prev.is_empty())
            .map(|n| n.task.key.as_str())
    }
}
