use std::fmt;
use std::future::Future;
use std::sync::Arc;

use tokio_util::sync::CancellationToken;

use crate::error::TaskError;
use crate::reconcile::Reconcile;

/// Caller-assigned task identity.
///
/// Ids double as the tie-break key when ordering tasks that share no
/// dependency, so two tasks are always ordered by ascending id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TaskId(i64);

impl TaskId {
  pub const fn new(id: i64) -> Self {
    Self(id)
  }

  pub const fn get(self) -> i64 {
    self.0
  }
}

impl From<i64> for TaskId {
  fn from(id: i64) -> Self {
    Self(id)
  }
}

impl fmt::Display for TaskId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

/// A unit of reconciliation work.
///
/// Cloning a task is cheap; clones share the same body, so any state the
/// body keeps between passes is shared as well.
#[derive(Clone)]
pub struct Task {
  id: TaskId,
  description: Arc<str>,
  body: Arc<dyn Reconcile>,
}

impl Task {
  /// Create a task from any [`Reconcile`] implementation.
  pub fn new(
    id: impl Into<TaskId>,
    description: impl Into<String>,
    body: impl Reconcile + 'static,
  ) -> Self {
    Self {
      id: id.into(),
      description: Arc::from(description.into()),
      body: Arc::new(body),
    }
  }

  /// Create a task from an async closure.
  ///
  /// ```
  /// use ordo_task::{Task, TaskError};
  ///
  /// let task = Task::from_fn(2, "create V2", |_cancel, task| async move {
  ///   if task.id().get() > 0 {
  ///     Ok(())
  ///   } else {
  ///     Err(TaskError::retryable("not yet"))
  ///   }
  /// });
  /// assert_eq!(task.to_string(), "task 2 (create V2)");
  /// ```
  pub fn from_fn<F, Fut>(id: impl Into<TaskId>, description: impl Into<String>, f: F) -> Self
  where
    F: Fn(CancellationToken, Task) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
  {
    Self::new(id, description, f)
  }

  pub fn id(&self) -> TaskId {
    self.id
  }

  pub fn description(&self) -> &str {
    &self.description
  }

  /// Run the task body once.
  pub async fn reconcile(&self, cancel: CancellationToken) -> Result<(), TaskError> {
    self.body.reconcile(cancel, self).await
  }
}

impl fmt::Debug for Task {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Task")
      .field("id", &self.id)
      .field("description", &self.description)
      .finish_non_exhaustive()
  }
}

impl fmt::Display for Task {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "task {} ({})", self.id, self.description)
  }
}
