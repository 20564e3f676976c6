//! Ordo Graph
//!
//! The dependency graph over task ids and the ordering computed from it.
//!
//! Edges point in the "must come before" direction: declaring that task B
//! depends on task A stores the edge `A -> B`. A topological order of the
//! graph is therefore directly the execution order.
//!
//! The graph does not reject cycles on insertion. [`stable_order`] detects
//! them every time an order is computed and reports each cyclic component.

mod error;
mod graph;
mod order;

pub use error::{CycleError, GraphError};
pub use graph::DependencyGraph;
pub use order::stable_order;
