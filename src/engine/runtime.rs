// src/engine/runtime.rs

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::dag::Scheduler;
use crate::errors::{PipeflowError, Result};
use crate::exec::ExecutorBackend;

use super::{RuntimeEvent, ScheduledTask, TaskName, TaskOutcome};

/// Drives one pipeline run to completion.
///
/// The runtime is the "external scheduler" the graph core is written for: it
/// holds the only mutable state (the done-set and the set of in-flight
/// tasks), queries [`Scheduler::get`] after every completion, and hands
/// ready tasks to an [`ExecutorBackend`].
pub struct Runtime<E: ExecutorBackend> {
    scheduler: Scheduler,
    /// Command line per task, from the validated config.
    commands: BTreeMap<TaskName, String>,
    done: BTreeSet<TaskName>,
    running: BTreeSet<TaskName>,
    event_rx: mpsc::Receiver<RuntimeEvent>,
    executor: E,
}

impl<E: ExecutorBackend> fmt::Debug for Runtime<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Runtime")
            .field("done", &self.done)
            .field("running", &self.running)
            .finish_non_exhaustive()
    }
}

impl<E: ExecutorBackend> Runtime<E> {
    pub fn new(
        scheduler: Scheduler,
        commands: BTreeMap<TaskName, String>,
        event_rx: mpsc::Receiver<RuntimeEvent>,
        executor: E,
    ) -> Self {
        Self {
            scheduler,
            commands,
            done: BTreeSet::new(),
            running: BTreeSet::new(),
            event_rx,
            executor,
        }
    }

    /// Main loop: seed the initial frontier, then react to completion events
    /// until the pipeline finishes, a task fails, or shutdown is requested.
    pub async fn run(mut self) -> Result<()> {
        info!(tasks = self.scheduler.graph().len(), "pipeline run started");

        if self.dispatch_ready().await? {
            info!("pipeline complete");
            return Ok(());
        }

        loop {
            let event = match self.event_rx.recv().await {
                Some(e) => e,
                None => {
                    info!("runtime event channel closed; exiting");
                    break;
                }
            };

            debug!(?event, "runtime received event");

            match event {
                RuntimeEvent::TaskCompleted { task, outcome } => {
                    if self.handle_completion(task, outcome).await? {
                        info!("pipeline complete");
                        break;
                    }
                }
                RuntimeEvent::ShutdownRequested => {
                    info!("shutdown requested; stopping pipeline run");
                    break;
                }
            }
        }

        Ok(())
    }

    /// Fold one completion into the done-set and dispatch whatever became
    /// schedulable. Returns `true` once every reachable task is done.
    async fn handle_completion(&mut self, task: TaskName, outcome: TaskOutcome) -> Result<bool> {
        if !self.running.remove(&task) {
            warn!(task = %task, "completion for a task that was not running; ignoring");
            return Ok(false);
        }

        match outcome {
            TaskOutcome::Success => {
                info!(task = %task, "task completed");
                self.done.insert(task);
            }
            TaskOutcome::Failed(code) => {
                return Err(PipeflowError::TaskFailed { task, code });
            }
        }

        self.dispatch_ready().await
    }

    /// Query the scheduler and hand every schedulable, not-yet-running task
    /// to the executor. Returns `true` when the frontier is empty and
    /// nothing is in flight — the pipeline is finished.
    async fn dispatch_ready(&mut self) -> Result<bool> {
        let frontier = self.scheduler.get(self.done.iter())?;

        let batch: Vec<ScheduledTask> = frontier
            .iter()
            .filter(|name| !self.running.contains(*name))
            .map(|name| ScheduledTask {
                name: name.clone(),
                cmd: self.commands.get(name).cloned().unwrap_or_default(),
            })
            .collect();

        if !batch.is_empty() {
            let names: Vec<_> = batch.iter().map(|t| t.name.as_str()).collect();
            debug!(?names, "dispatching schedulable tasks");

            for task in &batch {
                self.running.insert(task.name.clone());
            }
            self.executor.spawn_ready_tasks(batch).await?;
        }

        Ok(frontier.is_empty() && self.running.is_empty())
    }
}
