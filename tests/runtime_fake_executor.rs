// tests/runtime_fake_executor.rs

//! End-to-end runtime behaviour with a fake executor (no OS processes).

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use pipeflow::config::ConfigFile;
use pipeflow::dag::{DagGraph, Scheduler};
use pipeflow::engine::{Runtime, RuntimeEvent};
use pipeflow::errors::PipeflowError;
use pipeflow_test_utils::builders::{ConfigFileBuilder, TaskConfigBuilder};
use pipeflow_test_utils::fake_executor::FakeExecutor;
use pipeflow_test_utils::{init_tracing, with_timeout};

/// Very simple chain: a -> b -> c.
fn chain_config() -> ConfigFile {
    ConfigFileBuilder::new()
        .with_task("a", TaskConfigBuilder::new("echo a").build())
        .with_task("b", TaskConfigBuilder::new("echo b").after("a").build())
        .with_task("c", TaskConfigBuilder::new("echo c").after("b").build())
        .build()
}

/// Diamond: a -> {b, c} -> d.
fn diamond_config() -> ConfigFile {
    ConfigFileBuilder::new()
        .with_task("a", TaskConfigBuilder::new("echo a").build())
        .with_task("b", TaskConfigBuilder::new("echo b").after("a").build())
        .with_task("c", TaskConfigBuilder::new("echo c").after("a").build())
        .with_task(
            "d",
            TaskConfigBuilder::new("echo d").after("b").after("c").build(),
        )
        .build()
}

fn runtime_parts(
    cfg: &ConfigFile,
) -> (
    Scheduler,
    std::collections::BTreeMap<String, String>,
    mpsc::Sender<RuntimeEvent>,
    mpsc::Receiver<RuntimeEvent>,
) {
    let mut graph = DagGraph::new();
    graph.build(cfg.tasks(), &cfg.deps()).unwrap();
    let scheduler = Scheduler::new(graph);

    let commands = cfg
        .task
        .iter()
        .map(|(name, tc)| (name.clone(), tc.cmd.clone()))
        .collect();

    let (tx, rx) = mpsc::channel::<RuntimeEvent>(64);
    (scheduler, commands, tx, rx)
}

#[tokio::test]
async fn chain_executes_in_dependency_order() {
    init_tracing();

    let cfg = chain_config();
    let (scheduler, commands, tx, rx) = runtime_parts(&cfg);

    let executed = Arc::new(Mutex::new(Vec::new()));
    let executor = FakeExecutor::new(tx.clone(), Arc::clone(&executed));

    let runtime = Runtime::new(scheduler, commands, rx, executor);
    with_timeout(runtime.run()).await.unwrap();

    let executed = executed.lock().unwrap();
    assert_eq!(*executed, vec!["a", "b", "c"]);
}

#[tokio::test]
async fn diamond_executes_every_task_once() {
    init_tracing();

    let cfg = diamond_config();
    let (scheduler, commands, tx, rx) = runtime_parts(&cfg);

    let executed = Arc::new(Mutex::new(Vec::new()));
    let executor = FakeExecutor::new(tx.clone(), Arc::clone(&executed));

    let runtime = Runtime::new(scheduler, commands, rx, executor);
    with_timeout(runtime.run()).await.unwrap();

    let executed = executed.lock().unwrap();
    assert_eq!(executed.len(), 4);
    assert_eq!(executed[0], "a");
    assert_eq!(executed[3], "d");
    // b and c are both dispatched in the middle, in either order.
    let middle: std::collections::BTreeSet<&str> =
        executed[1..3].iter().map(|s| s.as_str()).collect();
    assert_eq!(middle, ["b", "c"].into_iter().collect());
}

#[tokio::test]
async fn failed_task_aborts_the_pipeline() {
    init_tracing();

    let cfg = chain_config();
    let (scheduler, commands, tx, rx) = runtime_parts(&cfg);

    let executed = Arc::new(Mutex::new(Vec::new()));
    let executor = FakeExecutor::new(tx.clone(), Arc::clone(&executed)).failing_task("b");

    let runtime = Runtime::new(scheduler, commands, rx, executor);
    let err = with_timeout(runtime.run()).await.unwrap_err();

    assert!(matches!(
        err,
        PipeflowError::TaskFailed { task, code } if task == "b" && code == 1
    ));

    // c never ran: its prerequisite failed.
    let executed = executed.lock().unwrap();
    assert_eq!(*executed, vec!["a", "b"]);
}

#[tokio::test]
async fn shutdown_request_stops_the_run_cleanly() {
    init_tracing();

    let cfg = chain_config();
    let (scheduler, commands, tx, rx) = runtime_parts(&cfg);

    // An executor that never completes anything: dispatched tasks just hang.
    struct InertExecutor;
    impl pipeflow::exec::ExecutorBackend for InertExecutor {
        fn spawn_ready_tasks(
            &mut self,
            _tasks: Vec<pipeflow::engine::ScheduledTask>,
        ) -> std::pin::Pin<
            Box<dyn std::future::Future<Output = pipeflow::errors::Result<()>> + Send + '_>,
        > {
            Box::pin(async { Ok(()) })
        }
    }

    let runtime = Runtime::new(scheduler, commands, rx, InertExecutor);
    let handle = tokio::spawn(runtime.run());

    tx.send(RuntimeEvent::ShutdownRequested).await.unwrap();
    with_timeout(async { handle.await.unwrap() }).await.unwrap();
}

#[cfg(unix)]
#[tokio::test]
async fn real_executor_runs_a_chain_of_processes() {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .with_task("first", TaskConfigBuilder::new("true").build())
        .with_task("second", TaskConfigBuilder::new("true").after("first").build())
        .build();

    let (scheduler, commands, tx, rx) = runtime_parts(&cfg);
    let executor = pipeflow::exec::ProcessExecutorBackend::new(tx.clone());

    let runtime = Runtime::new(scheduler, commands, rx, executor);
    with_timeout(runtime.run()).await.unwrap();
}

#[cfg(unix)]
#[tokio::test]
async fn real_executor_reports_nonzero_exit_as_failure() {
    init_tracing();

    let cfg = ConfigFileBuilder::new()
        .with_task("boom", TaskConfigBuilder::new("exit 3").build())
        .build();

    let (scheduler, commands, tx, rx) = runtime_parts(&cfg);
    let executor = pipeflow::exec::ProcessExecutorBackend::new(tx.clone());

    let runtime = Runtime::new(scheduler, commands, rx, executor);
    let err = with_timeout(runtime.run()).await.unwrap_err();

    assert!(matches!(
        err,
        PipeflowError::TaskFailed { task, code } if task == "boom" && code == 3
    ));
}
