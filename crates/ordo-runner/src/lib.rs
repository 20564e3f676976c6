//! Ordo Runner
//!
//! The caller side of the reconciliation contract: a [`RetryRunner`] calls
//! [`ordo_workflow::Workflow::reconcile`] until a pass succeeds, fails
//! fatally, runs out of passes, or is cancelled, sleeping between passes
//! according to a [`RetryPolicy`].
//!
//! # Usage
//!
//! ```ignore
//! use ordo_runner::{RetryPolicy, RetryRunner};
//! use tokio_util::sync::CancellationToken;
//!
//! let runner = RetryRunner::new(RetryPolicy::from(&plan.retry));
//! let summary = runner.run(&workflow, CancellationToken::new()).await?;
//! println!("converged after {} passes", summary.passes);
//! ```

mod error;
mod policy;
mod runner;

pub use error::RunError;
pub use policy::RetryPolicy;
pub use runner::{RetryRunner, RunSummary};
