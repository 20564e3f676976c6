//! Workflow errors.

use ordo_graph::CycleError;
use ordo_task::{BoxError, FatalError, TaskId};
use thiserror::Error;

/// The execution order could not be computed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderError {
  #[error(transparent)]
  Cycle(#[from] CycleError),

  /// The graph holds a node with no registered task.
  #[error("task {task_id} is in the dependency graph but not registered")]
  MissingTask { task_id: TaskId },
}

/// Outcome of a reconciliation pass that did not succeed.
#[derive(Debug, Error)]
pub enum ReconcileError {
  /// Stop retrying. Either the graph is malformed or a task reported a
  /// failure it cannot recover from.
  #[error(transparent)]
  Fatal(#[from] FatalError),

  /// A task has not converged yet. The cause is the task's own error.
  #[error("task {task_id} has not converged")]
  Retryable {
    task_id: TaskId,
    #[source]
    cause: BoxError,
  },

  /// The pass stopped because the caller cancelled it.
  #[error("reconciliation cancelled before task {task_id}")]
  Cancelled { task_id: TaskId },
}

impl ReconcileError {
  pub fn is_fatal(&self) -> bool {
    matches!(self, Self::Fatal(_))
  }

  /// The task the pass stopped at, if the pass got as far as a task.
  pub fn task_id(&self) -> Option<TaskId> {
    match self {
      Self::Fatal(_) => None,
      Self::Retryable { task_id, .. } | Self::Cancelled { task_id } => Some(*task_id),
    }
  }
}
