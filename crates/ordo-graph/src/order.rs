//! Deterministic topological ordering.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BTreeSet, BinaryHeap};

use ordo_task::TaskId;
use petgraph::algo::kosaraju_scc;
use petgraph::graphmap::DiGraphMap;

use crate::error::CycleError;
use crate::graph::DependencyGraph;

/// Compute the execution order of `graph`.
///
/// Every edge `a -> b` places `a` before `b`. Among tasks that are ready at
/// the same time the smallest id goes first, which makes the result the
/// lexicographically smallest valid order and identical across calls on an
/// unchanged graph.
///
/// Fails with [`CycleError`] naming every cyclic component when no order
/// exists. A partial order is never returned.
pub fn stable_order(graph: &DependencyGraph) -> Result<Vec<TaskId>, CycleError> {
  let mut in_degree: BTreeMap<TaskId, usize> = graph
    .nodes()
    .map(|id| (id, graph.dependencies_of(id).count()))
    .collect();

  let mut ready: BinaryHeap<Reverse<TaskId>> = in_degree
    .iter()
    .filter(|(_, degree)| **degree == 0)
    .map(|(id, _)| Reverse(*id))
    .collect();

  let mut order = Vec::with_capacity(graph.len());
  while let Some(Reverse(id)) = ready.pop() {
    order.push(id);
    for next in graph.dependents_of(id) {
      if let Some(degree) = in_degree.get_mut(&next) {
        *degree -= 1;
        if *degree == 0 {
          ready.push(Reverse(next));
        }
      }
    }
  }

  if order.len() == graph.len() {
    return Ok(order);
  }

  // Whatever is left either sits on a cycle or depends on one.
  let blocked: BTreeSet<TaskId> = in_degree
    .into_iter()
    .filter(|(_, degree)| *degree > 0)
    .map(|(id, _)| id)
    .collect();

  Err(CycleError::new(cyclic_components(graph, &blocked)))
}

/// Strongly connected components of the subgraph induced by `scope` that
/// contain a cycle: more than one node, or a single node with a self-edge.
fn cyclic_components(graph: &DependencyGraph, scope: &BTreeSet<TaskId>) -> Vec<Vec<TaskId>> {
  let mut blocked: DiGraphMap<TaskId, ()> = DiGraphMap::with_capacity(scope.len(), 0);
  for id in scope {
    blocked.add_node(*id);
  }
  for id in scope {
    for next in graph.dependents_of(*id).filter(|next| scope.contains(next)) {
      blocked.add_edge(*id, next, ());
    }
  }

  let mut cyclic: Vec<Vec<TaskId>> = kosaraju_scc(&blocked)
    .into_iter()
    .filter(|component| match component.as_slice() {
      [single] => blocked.contains_edge(*single, *single),
      _ => true,
    })
    .map(|mut component| {
      component.sort();
      component
    })
    .collect();
  cyclic.sort();
  cyclic
}
