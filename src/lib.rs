// src/lib.rs

pub mod cli;
pub mod config;
pub mod dag;
pub mod engine;
pub mod errors;
pub mod exec;
pub mod logging;

use std::path::PathBuf;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::config::model::ConfigFile;
use crate::dag::{DagGraph, Scheduler};
use crate::engine::{Runtime, RuntimeEvent};
use crate::exec::ProcessExecutorBackend;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading
/// - graph build + scheduler
/// - executor
/// - Ctrl-C handling
pub async fn run(args: CliArgs) -> Result<()> {
    let config_path = PathBuf::from(&args.config);
    let cfg = load_and_validate(&config_path)?;

    if let Some(ref name) = cfg.pipeline.name {
        info!(pipeline = %name, "pipeline definition loaded");
    }

    if args.dry_run {
        print_dry_run(&cfg);
        return Ok(());
    }

    // Build the graph once per definition; read-only afterwards.
    let mut graph = DagGraph::new();
    graph.build(cfg.tasks(), &cfg.deps())?;
    let scheduler = Scheduler::new(graph);

    let commands = cfg
        .task
        .iter()
        .map(|(name, tc)| (name.clone(), tc.cmd.clone()))
        .collect();

    // Runtime event channel.
    let (rt_tx, rt_rx) = mpsc::channel::<RuntimeEvent>(64);

    // Process executor backend (real implementation in production).
    let executor = ProcessExecutorBackend::new(rt_tx.clone());

    // Ctrl-C → graceful shutdown.
    {
        let tx = rt_tx.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                eprintln!("failed to listen for Ctrl+C: {e}");
                return;
            }
            let _ = tx.send(RuntimeEvent::ShutdownRequested).await;
        });
    }

    let runtime = Runtime::new(scheduler, commands, rt_rx, executor);
    runtime.run().await?;

    Ok(())
}

/// Simple dry-run output: print tasks, deps and commands.
fn print_dry_run(cfg: &ConfigFile) {
    println!("pipeflow dry-run");
    if let Some(ref name) = cfg.pipeline.name {
        println!("  pipeline.name = {name}");
    }
    println!();

    println!("tasks ({}):", cfg.task.len());
    for (name, task) in cfg.task.iter() {
        println!("  - {name}");
        println!("      cmd: {}", task.cmd);
        if !task.after.is_empty() {
            println!("      after: {:?}", task.after);
        }
    }

    let roots: Vec<&String> = cfg
        .task
        .iter()
        .filter(|(_, tc)| tc.after.is_empty())
        .map(|(name, _)| name)
        .collect();
    println!();
    println!("roots: {roots:?}");

    debug!("dry-run complete (no execution)");
}
