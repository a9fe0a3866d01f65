// src/config/validate.rs

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::dag::DagGraph;
use crate::errors::{PipeflowError, Result};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = PipeflowError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.pipeline, raw.task))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    ensure_has_tasks(cfg)?;
    validate_commands(cfg)?;
    validate_dag(cfg)?;
    Ok(())
}

fn ensure_has_tasks(cfg: &RawConfigFile) -> Result<()> {
    if cfg.task.is_empty() {
        return Err(PipeflowError::ConfigError(
            "pipeline must contain at least one [task.<name>] section".to_string(),
        ));
    }
    Ok(())
}

fn validate_commands(cfg: &RawConfigFile) -> Result<()> {
    for (name, task) in cfg.task.iter() {
        if task.cmd.trim().is_empty() {
            return Err(PipeflowError::ConfigError(format!(
                "task '{}' has an empty `cmd`",
                name
            )));
        }
    }
    Ok(())
}

/// Run the core graph builder over the raw definition.
///
/// Unknown `after` references, self-dependencies and cycles all surface here
/// with the builder's own error variants, so config-time diagnostics match
/// what the engine would see.
fn validate_dag(cfg: &RawConfigFile) -> Result<()> {
    let tasks = cfg.task.keys().map(crate::dag::Task::new).collect();
    let deps = cfg
        .task
        .iter()
        .filter(|(_, tc)| !tc.after.is_empty())
        .map(|(name, tc)| (name.clone(), tc.after.clone()))
        .collect();

    let mut graph = DagGraph::new();
    graph.build(tasks, &deps)?;
    Ok(())
}
