// src/exec/mod.rs

//! Task process execution.
//!
//! - [`backend`] defines the [`ExecutorBackend`] seam between the runtime and
//!   anything able to "run" a task, production or fake.
//! - [`task_runner`] spawns one OS process per task and reports the outcome.

pub mod backend;
pub mod task_runner;

pub use backend::{ExecutorBackend, ProcessExecutorBackend};
