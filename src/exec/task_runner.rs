// src/exec/task_runner.rs

//! Individual task process runner.

use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::engine::{RuntimeEvent, ScheduledTask, TaskOutcome};

/// Run a single task process and emit a `TaskCompleted` event on exit.
///
/// Spawn errors are mapped to `Failed(-1)` so the runtime sees every dispatch
/// resolve exactly once.
pub async fn run_task(task: ScheduledTask, runtime_tx: mpsc::Sender<RuntimeEvent>) {
    let task_name = task.name.clone();

    let outcome = match run_task_inner(task).await {
        Ok(outcome) => outcome,
        Err(err) => {
            error!(task = %task_name, error = %err, "task execution error");
            TaskOutcome::Failed(-1)
        }
    };

    let _ = runtime_tx
        .send(RuntimeEvent::TaskCompleted {
            task: task_name,
            outcome,
        })
        .await;
}

async fn run_task_inner(task: ScheduledTask) -> Result<TaskOutcome> {
    info!(task = %task.name, cmd = %task.cmd, "starting task process");

    // Build a shell command appropriate for the platform.
    let mut cmd = if cfg!(windows) {
        let mut c = Command::new("cmd");
        c.arg("/C").arg(&task.cmd);
        c
    } else {
        let mut c = Command::new("sh");
        c.arg("-c").arg(&task.cmd);
        c
    };

    cmd.stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);

    let mut child = cmd
        .spawn()
        .with_context(|| format!("spawning process for task '{}'", task.name))?;

    if let Some(stdout) = child.stdout.take() {
        let task_name = task.name.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stdout).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                info!(task = %task_name, "stdout: {}", line);
            }
        });
    }

    // Always consume stderr so buffers don't fill; log at debug.
    if let Some(stderr) = child.stderr.take() {
        let task_name = task.name.clone();
        tokio::spawn(async move {
            let mut lines = BufReader::new(stderr).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!(task = %task_name, "stderr: {}", line);
            }
        });
    }

    let status = child
        .wait()
        .await
        .with_context(|| format!("waiting for process of task '{}'", task.name))?;

    if status.success() {
        Ok(TaskOutcome::Success)
    } else {
        Ok(TaskOutcome::Failed(status.code().unwrap_or(-1)))
    }
}
