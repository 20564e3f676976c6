use std::collections::{BTreeMap, BTreeSet};

use ordo_task::TaskId;

use crate::error::GraphError;

/// Directed graph over task ids.
///
/// The graph is append-only: nodes and edges can be added but never removed.
#[derive(Debug, Clone, Default)]
pub struct DependencyGraph {
  /// Adjacency list: node -> nodes that must run after it.
  successors: BTreeMap<TaskId, BTreeSet<TaskId>>,
  /// Reverse adjacency: node -> nodes that must run before it.
  predecessors: BTreeMap<TaskId, BTreeSet<TaskId>>,
}

impl DependencyGraph {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of nodes.
  pub fn len(&self) -> usize {
    self.successors.len()
  }

  pub fn is_empty(&self) -> bool {
    self.successors.is_empty()
  }

  pub fn contains(&self, id: TaskId) -> bool {
    self.successors.contains_key(&id)
  }

  /// Node ids in ascending order.
  pub fn nodes(&self) -> impl Iterator<Item = TaskId> + '_ {
    self.successors.keys().copied()
  }

  /// Number of distinct edges.
  pub fn edge_count(&self) -> usize {
    self.successors.values().map(BTreeSet::len).sum()
  }

  /// True if `before` must run before `after` by a direct edge.
  pub fn has_edge(&self, before: TaskId, after: TaskId) -> bool {
    self
      .successors
      .get(&before)
      .is_some_and(|next| next.contains(&after))
  }

  /// Tasks that must run before `id`, ascending.
  pub fn dependencies_of(&self, id: TaskId) -> impl Iterator<Item = TaskId> + '_ {
    self.predecessors.get(&id).into_iter().flatten().copied()
  }

  /// Tasks that must run after `id`, ascending.
  pub fn dependents_of(&self, id: TaskId) -> impl Iterator<Item = TaskId> + '_ {
    self.successors.get(&id).into_iter().flatten().copied()
  }

  /// Add a node with no edges.
  pub fn add_node(&mut self, id: TaskId) -> Result<(), GraphError> {
    if self.contains(id) {
      return Err(GraphError::DuplicateTask { task_id: id });
    }
    self.successors.insert(id, BTreeSet::new());
    self.predecessors.insert(id, BTreeSet::new());
    Ok(())
  }

  /// Declare that `task` depends on every id in `dependencies`.
  ///
  /// Adds one edge `dependency -> task` per dependency. Every id is checked
  /// before any edge is added, so an error leaves the graph untouched.
  /// Edges that already exist are ignored. Cycles are accepted here and
  /// reported when an order is computed.
  ///
  /// Returns the number of edges that were newly added.
  pub fn add_dependencies(
    &mut self,
    task: TaskId,
    dependencies: &[TaskId],
  ) -> Result<usize, GraphError> {
    if !self.contains(task) {
      return Err(GraphError::UnknownTask { task_id: task });
    }
    if dependencies.is_empty() {
      return Err(GraphError::NoDependencies { task_id: task });
    }
    if let Some(missing) = dependencies.iter().find(|dep| !self.contains(**dep)) {
      return Err(GraphError::UnknownTask { task_id: *missing });
    }

    let mut added = 0;
    for dependency in dependencies {
      if self.insert_edge(*dependency, task) {
        added += 1;
      }
    }
    Ok(added)
  }

  fn insert_edge(&mut self, before: TaskId, after: TaskId) -> bool {
    let inserted = self.successors.entry(before).or_default().insert(after);
    self.predecessors.entry(after).or_default().insert(before);
    inserted
  }
}
