// src/engine/mod.rs

//! Orchestration engine for pipeflow.
//!
//! The engine owns the done-set and drives the stateless scheduler: dispatch
//! every currently schedulable task, fold completion events back into the
//! done-set, re-query, repeat until the pipeline is complete or a task fails.

/// Canonical task name type used throughout the engine.
pub type TaskName = String;

/// Outcome of a task process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    Failed(i32),
}

/// A task the engine wants the executor to run now.
#[derive(Debug, Clone)]
pub struct ScheduledTask {
    pub name: TaskName,
    pub cmd: String,
}

/// Events flowing into the runtime from the executor and signal handlers.
#[derive(Debug, Clone)]
pub enum RuntimeEvent {
    /// A task process exited with a concrete outcome.
    TaskCompleted {
        task: TaskName,
        outcome: TaskOutcome,
    },
    /// Graceful shutdown requested (e.g. Ctrl-C).
    ShutdownRequested,
}

pub mod runtime;

pub use runtime::Runtime;
