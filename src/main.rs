mod simulated;

use std::num::NonZeroU32;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use ordo_config::{OnCancel, PlanDef, TaskDef};
use ordo_runner::{RetryPolicy, RetryRunner};
use ordo_task::{Reconcile, Task, TaskId};
use ordo_workflow::{CancelMode, Workflow, WorkflowConfig};

use crate::simulated::{Inert, SimulatedTask};

/// Ordo - dependency-ordered reconciliation
#[derive(Parser)]
#[command(name = "ordo")]
#[command(version, about, long_about = None)]
struct Cli {
  #[command(subcommand)]
  command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
  /// Print the execution order of a plan
  Plan {
    /// Path to the plan file (JSON or YAML)
    plan_file: PathBuf,
  },

  /// Reconcile a plan with simulated tasks until it converges
  Run {
    /// Path to the plan file (JSON or YAML)
    plan_file: PathBuf,

    /// Give up after this many passes (at least 1)
    #[arg(long)]
    max_passes: Option<NonZeroU32>,

    /// Base delay between passes, in milliseconds
    #[arg(long)]
    interval_ms: Option<u64>,
  },
}

fn main() -> Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
    .with_writer(std::io::stderr)
    .init();

  let cli = Cli::parse();

  match cli.command {
    Some(Commands::Plan { plan_file }) => show_plan(&plan_file)?,
    Some(Commands::Run {
      plan_file,
      max_passes,
      interval_ms,
    }) => {
      let rt = tokio::runtime::Runtime::new()?;
      rt.block_on(run_plan(&plan_file, max_passes, interval_ms))?;
    }
    None => {
      println!("ordo - use --help to see available commands");
    }
  }

  Ok(())
}

fn load_plan(path: &Path) -> Result<PlanDef> {
  PlanDef::from_path(path).with_context(|| format!("failed to load plan: {}", path.display()))
}

/// Register the plan's tasks and dependencies, giving each task the body
/// produced by `body`.
fn build_workflow<B, F>(plan: &PlanDef, body: F) -> Result<Workflow>
where
  B: Reconcile + 'static,
  F: Fn(&TaskDef) -> B,
{
  let on_cancel = match plan.on_cancel {
    OnCancel::Abort => CancelMode::Abort,
    OnCancel::Skip => CancelMode::Skip,
  };
  let mut workflow = Workflow::with_config(WorkflowConfig { on_cancel });

  for def in &plan.tasks {
    workflow
      .add_task(Task::new(def.task_id, def.description.clone(), body(def)))
      .with_context(|| format!("invalid task {}", def.task_id))?;
  }

  for dep in &plan.dependencies {
    let depends_on: Vec<TaskId> = dep.depends_on.iter().copied().map(TaskId::new).collect();
    workflow
      .add_dependency(TaskId::new(dep.task_id), &depends_on)
      .with_context(|| format!("invalid dependencies for task {}", dep.task_id))?;
  }

  Ok(workflow)
}

fn show_plan(path: &Path) -> Result<()> {
  let plan = load_plan(path)?;
  let workflow = build_workflow(&plan, |_| Inert)?;

  let order = workflow
    .visualize()
    .with_context(|| format!("plan '{}' has no valid order", plan.name))?;

  eprintln!("Plan: {} ({} tasks)", plan.name, workflow.len());
  println!("{order}");
  Ok(())
}

async fn run_plan(
  path: &Path,
  max_passes: Option<NonZeroU32>,
  interval_ms: Option<u64>,
) -> Result<()> {
  let plan = load_plan(path)?;
  let workflow = build_workflow(&plan, SimulatedTask::new)?;

  let mut policy = RetryPolicy::from(&plan.retry);
  if let Some(max_passes) = max_passes {
    policy.max_passes = Some(max_passes);
  }
  if let Some(interval_ms) = interval_ms {
    policy.interval = Duration::from_millis(interval_ms);
    policy.max_interval = policy.max_interval.max(policy.interval);
  }

  let cancel = CancellationToken::new();
  let on_signal = cancel.clone();
  tokio::spawn(async move {
    if tokio::signal::ctrl_c().await.is_ok() {
      tracing::warn!("interrupt_received");
      on_signal.cancel();
    }
  });

  eprintln!("Running plan: {}", plan.name);

  let summary = RetryRunner::new(policy)
    .run(&workflow, cancel)
    .await
    .with_context(|| format!("plan '{}' did not converge", plan.name))?;

  println!("converged after {} passes", summary.passes);
  Ok(())
}
