//! The task body capability.

use std::future::Future;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::TaskError;
use crate::task::Task;

/// Brings one task towards its desired state.
///
/// Implementations must be idempotent: a reconciliation pass re-runs every
/// task from the top, so a body is expected to check whether its desired
/// state is already present before acting. Any state needed for that check
/// belongs to the implementation.
///
/// The cancellation token is the caller's; the engine only samples it before
/// invoking a body, so long-running bodies should observe it themselves.
#[async_trait]
pub trait Reconcile: Send + Sync {
  async fn reconcile(&self, cancel: CancellationToken, task: &Task) -> Result<(), TaskError>;
}

#[async_trait]
impl<F, Fut> Reconcile for F
where
  F: Fn(CancellationToken, Task) -> Fut + Send + Sync + 'static,
  Fut: Future<Output = Result<(), TaskError>> + Send + 'static,
{
  async fn reconcile(&self, cancel: CancellationToken, task: &Task) -> Result<(), TaskError> {
    (self)(cancel, task.clone()).await
  }
}
