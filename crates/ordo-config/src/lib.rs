//! Ordo Config
//!
//! Serializable plan definitions. A plan names a set of tasks, the
//! dependencies between them, and how the caller should retry passes that
//! have not converged.
//!
//! Plans are loaded from JSON or YAML files. These types check shape only;
//! unknown or duplicate task ids surface when a plan is turned into a
//! workflow.

mod enums;
mod error;
mod plan;
mod retry;
mod task;

pub use enums::{OnCancel, RetryBackoff};
pub use error::ConfigError;
pub use plan::PlanDef;
pub use retry::RetryDef;
pub use task::{DependencyDef, TaskDef};
