// tests/dag_schedule.rs

//! Schedulability queries: frontier computation and done-set validation.

use std::collections::{BTreeMap, BTreeSet};

use pipeflow::dag::{DagGraph, Scheduler, Task};
use pipeflow::errors::PipeflowError;
use pipeflow_test_utils::init_tracing;

fn scheduler(tasks: &[&str], deps: &[(&str, &[&str])]) -> Scheduler {
    let mut graph = DagGraph::new();
    let task_list: Vec<Task> = tasks.iter().map(|k| Task::new(*k)).collect();
    let dep_map: BTreeMap<String, Vec<String>> = deps
        .iter()
        .map(|(task, prevs)| {
            (
                task.to_string(),
                prevs.iter().map(|p| p.to_string()).collect(),
            )
        })
        .collect();
    graph.build(task_list, &dep_map).unwrap();
    Scheduler::new(graph)
}

fn keys(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| s.to_string()).collect()
}

const NONE: [&str; 0] = [];

#[test]
fn all_tasks_schedulable_without_deps() {
    init_tracing();

    let s = scheduler(&["t1", "t2", "t3"], &[]);
    assert_eq!(s.get(NONE).unwrap(), keys(&["t1", "t2", "t3"]));
}

#[test]
fn chain_advances_one_task_per_done_step() {
    init_tracing();

    let s = scheduler(&["a", "b", "c"], &[("b", &["a"]), ("c", &["b"])]);

    assert_eq!(s.get(NONE).unwrap(), keys(&["a"]));
    assert_eq!(s.get(["a"]).unwrap(), keys(&["b"]));
    assert_eq!(s.get(["a", "b"]).unwrap(), keys(&["c"]));
    assert_eq!(s.get(["a", "b", "c"]).unwrap(), keys(&[]));
}

#[test]
fn done_set_skipping_a_level_is_invalid() {
    init_tracing();

    let s = scheduler(&["a", "b", "c"], &[("b", &["a"]), ("c", &["b"])]);

    // "c" cannot have been reached without "b" reported done first.
    let err = s.get(["a", "c"]).unwrap_err();
    assert!(matches!(err, PipeflowError::InvalidDoneList { keys } if keys == vec!["c"]));
}

#[test]
fn unknown_done_key_is_invalid() {
    init_tracing();

    let s = scheduler(&["a"], &[]);
    let err = s.get(["nonexistent-key"]).unwrap_err();
    assert!(
        matches!(err, PipeflowError::InvalidDoneList { keys } if keys == vec!["nonexistent-key"])
    );
}

#[test]
fn unknown_done_key_on_empty_graph_is_invalid() {
    init_tracing();

    let s = Scheduler::new(DagGraph::new());
    let err = s.get(["nonexistent-key"]).unwrap_err();
    assert!(matches!(err, PipeflowError::InvalidDoneList { .. }));
}

#[test]
fn get_is_idempotent() {
    init_tracing();

    let s = scheduler(
        &["a", "b", "c", "d"],
        &[("c", &["a", "b"]), ("d", &["c"])],
    );

    let first = s.get(["a"]).unwrap();
    let second = s.get(["a"]).unwrap();
    assert_eq!(first, second);
    assert_eq!(first, keys(&["b"]));
}

#[test]
fn fan_in_waits_for_every_prerequisite() {
    init_tracing();

    let s = scheduler(&["a", "b", "c"], &[("c", &["a", "b"])]);

    assert_eq!(s.get(NONE).unwrap(), keys(&["a", "b"]));
    assert_eq!(s.get(["a"]).unwrap(), keys(&["b"]));
    assert_eq!(s.get(["a", "b"]).unwrap(), keys(&["c"]));
}

#[test]
fn diamond_frontier_is_deduplicated() {
    init_tracing();

    // a -> b, a -> c, b/c -> d: d is reachable through two branches but must
    // appear once, and only when both b and c are done.
    let s = scheduler(
        &["a", "b", "c", "d"],
        &[("b", &["a"]), ("c", &["a"]), ("d", &["b", "c"])],
    );

    assert_eq!(s.get(NONE).unwrap(), keys(&["a"]));
    assert_eq!(s.get(["a"]).unwrap(), keys(&["b", "c"]));
    assert_eq!(s.get(["a", "b"]).unwrap(), keys(&["c"]));
    assert_eq!(s.get(["a", "b", "c"]).unwrap(), keys(&["d"]));
    assert_eq!(s.get(["a", "b", "c", "d"]).unwrap(), keys(&[]));
}

#[test]
fn done_task_contributes_nothing_itself() {
    init_tracing();

    let s = scheduler(&["a", "b"], &[("b", &["a"])]);

    let frontier = s.get(["a"]).unwrap();
    assert!(!frontier.contains("a"));
    assert_eq!(frontier, keys(&["b"]));
}
