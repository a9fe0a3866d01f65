// src/dag/mod.rs

//! Task-dependency graph and scheduling queries.
//!
//! - [`graph`] owns the nodes and wires directed edges, rejecting duplicate
//!   tasks and edges that would close a cycle.
//! - [`cycle`] is the upward reachability walk backing edge validation.
//! - [`scheduler`] answers "given this done-set, which tasks may run now?".

pub mod cycle;
pub mod graph;
pub mod scheduler;

pub use graph::{DagGraph, Task};
pub use scheduler::Scheduler;
