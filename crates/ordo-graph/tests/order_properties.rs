//! Property tests for stable_order.

use std::collections::HashMap;

use ordo_graph::{DependencyGraph, stable_order};
use ordo_task::TaskId;
use proptest::prelude::*;

/// Nodes `0..n` plus dependency pairs `(task, dependency)`.
fn build(n: i64, deps: &[(i64, i64)]) -> DependencyGraph {
  let mut graph = DependencyGraph::new();
  for id in 0..n {
    graph.add_node(TaskId::new(id)).unwrap();
  }
  for (task, dep) in deps {
    graph
      .add_dependencies(TaskId::new(*task), &[TaskId::new(*dep)])
      .unwrap();
  }
  graph
}

/// An acyclic set of dependencies: a task only depends on larger ids after
/// relabelling through `perm`, so the result is a DAG whose ids do not
/// follow the dependency direction.
fn dag() -> impl Strategy<Value = (i64, Vec<(i64, i64)>)> {
  (2i64..12).prop_flat_map(|n| {
    let pairs = prop::collection::vec((0..n, 0..n), 0..30);
    let perm = Just((0..n).collect::<Vec<i64>>()).prop_shuffle();
    (Just(n), pairs, perm).prop_map(|(n, pairs, perm)| {
      let deps = pairs
        .into_iter()
        .filter(|(a, b)| a != b)
        .map(|(a, b)| (a.min(b), a.max(b)))
        .map(|(a, b)| (perm[a as usize], perm[b as usize]))
        .collect();
      (n, deps)
    })
  })
}

proptest! {
  #[test]
  fn order_respects_every_edge((n, deps) in dag()) {
    let graph = build(n, &deps);
    let order = stable_order(&graph).unwrap();
    prop_assert_eq!(order.len(), n as usize);

    let position: HashMap<TaskId, usize> =
      order.iter().enumerate().map(|(i, id)| (*id, i)).collect();
    for (task, dep) in &deps {
      prop_assert!(position[&TaskId::new(*dep)] < position[&TaskId::new(*task)]);
    }
  }

  #[test]
  fn order_is_deterministic((n, deps) in dag()) {
    let graph = build(n, &deps);
    let again = build(n, &deps);
    prop_assert_eq!(stable_order(&graph).unwrap(), stable_order(&graph).unwrap());
    prop_assert_eq!(stable_order(&graph).unwrap(), stable_order(&again).unwrap());
  }

  #[test]
  fn back_edge_always_fails((n, deps) in dag(), pick in any::<prop::sample::Index>()) {
    prop_assume!(!deps.is_empty());
    let (task, dep) = deps[pick.index(deps.len())];

    let mut with_cycle = deps.clone();
    with_cycle.push((dep, task));
    let graph = build(n, &with_cycle);

    let err = stable_order(&graph).unwrap_err();
    let ids = err.task_ids();
    prop_assert!(ids.contains(&TaskId::new(task)));
    prop_assert!(ids.contains(&TaskId::new(dep)));
  }
}
