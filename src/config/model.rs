// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::dag::Task;

/// Top-level pipeline definition as read from a TOML file:
///
/// ```toml
/// [pipeline]
/// name = "release"
///
/// [task.build]
/// cmd = "cargo build"
///
/// [task.test]
/// cmd = "cargo test"
/// after = ["build"]
/// ```
///
/// `RawConfigFile` is the unvalidated deserialization target; convert it with
/// `ConfigFile::try_from` to get a validated [`ConfigFile`].
#[derive(Debug, Clone, Deserialize)]
pub struct RawConfigFile {
    /// Metadata from `[pipeline]`.
    #[serde(default)]
    pub pipeline: PipelineSection,

    /// All tasks from `[task.<name>]`, keyed by task name.
    ///
    /// A `BTreeMap` keeps the definition order deterministic regardless of
    /// file order.
    #[serde(default)]
    pub task: BTreeMap<String, TaskConfig>,
}

/// `[pipeline]` section.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct PipelineSection {
    /// Optional human-readable pipeline name, used only in logs.
    #[serde(default)]
    pub name: Option<String>,
}

/// `[task.<name>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskConfig {
    /// The command to execute for this task.
    pub cmd: String,

    /// Names of tasks that must complete before this one may run.
    #[serde(default)]
    pub after: Vec<String>,
}

/// A pipeline definition that passed [`validate`](crate::config::validate).
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub pipeline: PipelineSection,
    pub task: BTreeMap<String, TaskConfig>,
}

impl ConfigFile {
    /// Construct without validation. Only `validate` should call this.
    pub(crate) fn new_unchecked(
        pipeline: PipelineSection,
        task: BTreeMap<String, TaskConfig>,
    ) -> Self {
        Self { pipeline, task }
    }

    /// The task list in the form the graph builder consumes.
    pub fn tasks(&self) -> Vec<Task> {
        self.task.keys().map(Task::new).collect()
    }

    /// The dependency map in the form the graph builder consumes:
    /// task name → prerequisite names, in the order given in `after`.
    pub fn deps(&self) -> BTreeMap<String, Vec<String>> {
        self.task
            .iter()
            .filter(|(_, tc)| !tc.after.is_empty())
            .map(|(name, tc)| (name.clone(), tc.after.clone()))
            .collect()
    }
}
