//! Ordo Task
//!
//! A [`Task`] is the unit of work driven by a reconciliation pass: a stable
//! integer identity, a description used in diagnostics, and a body that
//! implements [`Reconcile`].
//!
//! Task bodies classify their own failures. Returning
//! [`TaskError::Fatal`] means the workflow cannot make progress without
//! outside intervention; [`TaskError::Retryable`] means "not converged yet,
//! try again on a later pass".

mod error;
mod reconcile;
mod task;

pub use error::{BoxError, FatalError, TaskError};
pub use reconcile::Reconcile;
pub use task::{Task, TaskId};
