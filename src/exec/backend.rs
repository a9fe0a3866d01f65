// src/exec/backend.rs

//! Pluggable executor backend abstraction.
//!
//! The runtime talks to an [`ExecutorBackend`] instead of spawning processes
//! directly, so tests can substitute an executor that completes tasks
//! without touching the OS.

use std::future::Future;
use std::pin::Pin;

use tokio::sync::mpsc;

use crate::engine::{RuntimeEvent, ScheduledTask};
use crate::errors::Result;

/// Trait abstracting how schedulable tasks are executed.
///
/// Production code uses [`ProcessExecutorBackend`]; tests can provide their
/// own implementation that records dispatches and emits `TaskCompleted`
/// events directly.
pub trait ExecutorBackend: Send {
    fn spawn_ready_tasks(
        &mut self,
        tasks: Vec<ScheduledTask>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>>;
}

/// Real executor backend: one OS process per task, outcomes reported back to
/// the runtime over its event channel.
pub struct ProcessExecutorBackend {
    runtime_tx: mpsc::Sender<RuntimeEvent>,
}

impl ProcessExecutorBackend {
    pub fn new(runtime_tx: mpsc::Sender<RuntimeEvent>) -> Self {
        Self { runtime_tx }
    }
}

impl ExecutorBackend for ProcessExecutorBackend {
    fn spawn_ready_tasks(
        &mut self,
        tasks: Vec<ScheduledTask>,
    ) -> Pin<Box<dyn Future<Output = Result<()>> + Send + '_>> {
        // Clone the sender so the future doesn't borrow `self` across `await`.
        let tx = self.runtime_tx.clone();

        Box::pin(async move {
            for task in tasks {
                tokio::spawn(super::task_runner::run_task(task, tx.clone()));
            }
            Ok(())
        })
    }
}
