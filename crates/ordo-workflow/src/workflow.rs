use std::collections::HashMap;

use ordo_graph::{DependencyGraph, GraphError, stable_order};
use ordo_task::{FatalError, Task, TaskError, TaskId};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, instrument, warn};

use crate::config::{CancelMode, WorkflowConfig};
use crate::error::{OrderError, ReconcileError};

/// A set of tasks, the dependencies between them, and the driver that
/// reconciles them in order.
///
/// Tasks and dependencies can only be added. A pass never modifies the
/// graph; the only state that changes between passes lives inside the task
/// bodies.
#[derive(Debug, Default)]
pub struct Workflow {
  graph: DependencyGraph,
  tasks: HashMap<TaskId, Task>,
  config: WorkflowConfig,
}

impl Workflow {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn with_config(config: WorkflowConfig) -> Self {
    Self {
      config,
      ..Self::default()
    }
  }

  pub fn config(&self) -> &WorkflowConfig {
    &self.config
  }

  pub fn graph(&self) -> &DependencyGraph {
    &self.graph
  }

  pub fn task(&self, id: TaskId) -> Option<&Task> {
    self.tasks.get(&id)
  }

  pub fn len(&self) -> usize {
    self.tasks.len()
  }

  pub fn is_empty(&self) -> bool {
    self.tasks.is_empty()
  }

  /// Register a task.
  ///
  /// Fails with [`GraphError::DuplicateTask`] if a task with the same id is
  /// already registered; the existing task is kept.
  pub fn add_task(&mut self, task: Task) -> Result<(), GraphError> {
    self.graph.add_node(task.id())?;
    self.tasks.insert(task.id(), task);
    Ok(())
  }

  /// Register tasks in sequence, stopping at the first error.
  pub fn add_tasks(&mut self, tasks: impl IntoIterator<Item = Task>) -> Result<(), GraphError> {
    for task in tasks {
      self.add_task(task)?;
    }
    Ok(())
  }

  /// Declare that `task` must run after each of `dependencies`.
  ///
  /// All ids must be registered. Nothing is added unless every id checks
  /// out. Declaring a dependency twice is a no-op.
  ///
  /// Cycles are not rejected here; the next [`Workflow::reconcile`] or
  /// [`Workflow::ordered_tasks`] reports them.
  pub fn add_dependency(
    &mut self,
    task: TaskId,
    dependencies: &[TaskId],
  ) -> Result<(), GraphError> {
    let added = self.graph.add_dependencies(task, dependencies)?;
    debug!(task_id = %task, dependencies = ?dependencies, added, "dependency_added");
    Ok(())
  }

  /// Tasks in execution order.
  pub fn ordered_tasks(&self) -> Result<Vec<&Task>, OrderError> {
    stable_order(&self.graph)?
      .into_iter()
      .map(|id| {
        self
          .tasks
          .get(&id)
          .ok_or(OrderError::MissingTask { task_id: id })
      })
      .collect()
  }

  /// Run one reconciliation pass.
  ///
  /// Tasks run one at a time in [`Workflow::ordered_tasks`] order. The pass
  /// stops at the first task that fails and returns that failure; tasks
  /// after it are not attempted. Ordering failures are returned as
  /// [`ReconcileError::Fatal`].
  ///
  /// `cancel` is checked before each task starts and is handed to every
  /// task body. A running task is never interrupted by the engine.
  #[instrument(
    name = "workflow_reconcile",
    skip(self, cancel),
    fields(
      pass_id = %uuid::Uuid::new_v4(),
      tasks = self.tasks.len(),
    )
  )]
  pub async fn reconcile(&self, cancel: CancellationToken) -> Result<(), ReconcileError> {
    info!("pass_started");

    let result = self.run_pass(&cancel).await;

    match &result {
      Ok(()) => info!("pass_completed"),
      Err(e) if e.is_fatal() => error!(error = %e, "pass_failed"),
      Err(e) => warn!(error = %e, "pass_incomplete"),
    }

    result
  }

  async fn run_pass(&self, cancel: &CancellationToken) -> Result<(), ReconcileError> {
    let tasks = self.ordered_tasks().map_err(FatalError::new)?;

    for task in tasks {
      if cancel.is_cancelled() {
        match self.config.on_cancel {
          CancelMode::Abort => {
            warn!(task_id = %task.id(), "pass_cancelled");
            return Err(ReconcileError::Cancelled { task_id: task.id() });
          }
          CancelMode::Skip => {
            warn!(task_id = %task.id(), description = task.description(), "task_skipped");
            continue;
          }
        }
      }

      debug!(task_id = %task.id(), description = task.description(), "task_started");

      match task.reconcile(cancel.clone()).await {
        Ok(()) => {
          info!(task_id = %task.id(), description = task.description(), "task_reconciled");
        }
        Err(TaskError::Fatal(e)) => {
          error!(task_id = %task.id(), error = %e, "task_failed");
          return Err(ReconcileError::Fatal(e));
        }
        Err(TaskError::Retryable(cause)) => {
          warn!(task_id = %task.id(), error = %cause, "task_not_converged");
          return Err(ReconcileError::Retryable {
            task_id: task.id(),
            cause,
          });
        }
      }
    }

    Ok(())
  }

  /// Render the execution order as a single chain, e.g.
  /// `task 2 (create V2) >> task 5 (create V5) >> ...`.
  pub fn visualize(&self) -> Result<String, OrderError> {
    let rendered: Vec<String> = self
      .ordered_tasks()?
      .iter()
      .map(ToString::to_string)
      .collect();
    Ok(rendered.join(" >> "))
  }
}
