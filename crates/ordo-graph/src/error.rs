use std::fmt;

use ordo_task::TaskId;
use thiserror::Error;

/// Errors raised while building a dependency graph.
///
/// A failed call never leaves the graph partially modified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
  #[error("task {task_id} already exists")]
  DuplicateTask { task_id: TaskId },

  #[error("task {task_id} does not exist")]
  UnknownTask { task_id: TaskId },

  #[error("no dependencies given for task {task_id}")]
  NoDependencies { task_id: TaskId },
}

/// The graph has no topological order.
///
/// Each component is a set of tasks that (transitively) depend on each
/// other, listed in ascending id order. Components are sorted by their
/// smallest id.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("dependency cycle detected: {}", Components(.components))]
pub struct CycleError {
  components: Vec<Vec<TaskId>>,
}

impl CycleError {
  pub(crate) fn new(components: Vec<Vec<TaskId>>) -> Self {
    Self { components }
  }

  pub fn components(&self) -> &[Vec<TaskId>] {
    &self.components
  }

  /// Every task id taking part in some cycle, ascending.
  pub fn task_ids(&self) -> Vec<TaskId> {
    let mut ids: Vec<TaskId> = self.components.iter().flatten().copied().collect();
    ids.sort();
    ids
  }
}

struct Components<'a>(&'a [Vec<TaskId>]);

impl fmt::Display for Components<'_> {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    for (i, component) in self.0.iter().enumerate() {
      if i > 0 {
        f.write_str(", ")?;
      }
      f.write_str("{")?;
      for (j, id) in component.iter().enumerate() {
        if j > 0 {
          f.write_str(", ")?;
        }
        write!(f, "{id}")?;
      }
      f.write_str("}")?;
    }
    Ok(())
  }
}
