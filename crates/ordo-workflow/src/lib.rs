//! Ordo Workflow
//!
//! A [`Workflow`] owns a task registry and the dependency graph over it, and
//! drives one reconciliation pass per call to [`Workflow::reconcile`].
//!
//! # Pass semantics
//!
//! ```text
//! reconcile(cancel)
//! ├── stable_order(graph)        cycle -> ReconcileError::Fatal
//! └── for task in order
//!     ├── cancel sampled         see CancelMode
//!     └── task.reconcile(cancel)
//!         ├── Ok                 next task
//!         ├── Fatal              stop, ReconcileError::Fatal
//!         └── Retryable          stop, ReconcileError::Retryable
//! ```
//!
//! Tasks after a failure are not attempted in that pass, even when they do
//! not depend on the failed task. Retrying is left to the caller: call
//! `reconcile` again until it returns `Ok` or a fatal error.
//!
//! # Usage
//!
//! ```
//! use ordo_task::Task;
//! use ordo_workflow::Workflow;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let v1 = Task::from_fn(1, "create V1", |_, _| async { Ok(()) });
//! let v2 = Task::from_fn(2, "create V2", |_, _| async { Ok(()) });
//!
//! let mut workflow = Workflow::new();
//! workflow.add_tasks([v1.clone(), v2.clone()])?;
//! workflow.add_dependency(v1.id(), &[v2.id()])?;
//!
//! assert_eq!(workflow.visualize()?, "task 2 (create V2) >> task 1 (create V1)");
//! workflow.reconcile(CancellationToken::new()).await?;
//! # Ok(())
//! # }
//! ```

mod config;
mod error;
mod workflow;

pub use config::{CancelMode, WorkflowConfig};
pub use error::{OrderError, ReconcileError};
pub use workflow::Workflow;
