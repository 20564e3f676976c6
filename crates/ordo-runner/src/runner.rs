use std::error::Error as _;

use ordo_workflow::{ReconcileError, Workflow};
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};

use crate::error::RunError;
use crate::policy::RetryPolicy;

/// Outcome of a run that converged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
  /// Passes executed, including the one that succeeded.
  pub passes: u32,
}

/// Repeats reconciliation passes until the workflow converges.
#[derive(Debug, Clone, Default)]
pub struct RetryRunner {
  policy: RetryPolicy,
}

impl RetryRunner {
  pub fn new(policy: RetryPolicy) -> Self {
    Self { policy }
  }

  pub fn policy(&self) -> &RetryPolicy {
    &self.policy
  }

  /// Drive `workflow` to convergence.
  ///
  /// The first pass starts immediately. After a retryable failure the runner
  /// sleeps for [`RetryPolicy::delay`] and starts another pass. The run ends
  /// on the first successful pass, the first fatal error, when
  /// `max_passes` is reached, or when `cancel` fires. Cancellation also cuts
  /// a pending sleep short.
  #[instrument(name = "workflow_run", skip_all, fields(max_passes = ?self.policy.max_passes))]
  pub async fn run(
    &self,
    workflow: &Workflow,
    cancel: CancellationToken,
  ) -> Result<RunSummary, RunError> {
    let mut pass = 0;

    loop {
      pass += 1;

      let err = match workflow.reconcile(cancel.clone()).await {
        Ok(()) => {
          info!(passes = pass, "workflow_converged");
          return Ok(RunSummary { passes: pass });
        }
        Err(ReconcileError::Fatal(source)) => {
          return Err(RunError::Fatal {
            passes: pass,
            source,
          });
        }
        Err(ReconcileError::Cancelled { .. }) => {
          return Err(RunError::Cancelled { passes: pass });
        }
        Err(err) => err,
      };

      if self.policy.max_passes.is_some_and(|max| pass >= max.get()) {
        warn!(passes = pass, error = %err, "retries_exhausted");
        return Err(RunError::Exhausted {
          passes: pass,
          last: err,
        });
      }

      let delay = self.policy.delay(pass);
      warn!(
        pass,
        error = %err,
        cause = err.source().map(tracing::field::display),
        delay_ms = delay.as_millis() as u64,
        "pass_retrying"
      );

      tokio::select! {
        _ = cancel.cancelled() => {
          info!(passes = pass, "workflow_run_cancelled");
          return Err(RunError::Cancelled { passes: pass });
        }
        _ = tokio::time::sleep(delay) => {}
      }
    }
  }
}
