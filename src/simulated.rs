//! Stand-in task bodies for plans loaded from disk.

use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use async_trait::async_trait;
use ordo_config::TaskDef;
use ordo_task::{Reconcile, Task, TaskError};
use tokio_util::sync::CancellationToken;

/// Reports "not converged" until its `attempts`-th invocation, then settles.
///
/// A settled task stays converged on later passes. With `fatal` set it
/// settles on a fatal error instead.
#[derive(Debug)]
pub struct SimulatedTask {
  attempts: u32,
  fatal: bool,
  invocations: AtomicU32,
  converged: AtomicBool,
}

impl SimulatedTask {
  pub fn new(def: &TaskDef) -> Self {
    Self {
      attempts: def.attempts.max(1),
      fatal: def.fatal,
      invocations: AtomicU32::new(0),
      converged: AtomicBool::new(false),
    }
  }
}

#[async_trait]
impl Reconcile for SimulatedTask {
  async fn reconcile(&self, _cancel: CancellationToken, task: &Task) -> Result<(), TaskError> {
    if self.converged.load(Ordering::SeqCst) {
      return Ok(());
    }

    let call = self.invocations.fetch_add(1, Ordering::SeqCst) + 1;
    if call < self.attempts {
      return Err(TaskError::retryable(format!(
        "{task} not ready ({call}/{})",
        self.attempts
      )));
    }

    if self.fatal {
      return Err(TaskError::fatal(format!("{task} failed permanently")));
    }
    self.converged.store(true, Ordering::SeqCst);
    Ok(())
  }
}

/// Body used when a plan is only inspected, never run.
pub struct Inert;

#[async_trait]
impl Reconcile for Inert {
  async fn reconcile(&self, _cancel: CancellationToken, _task: &Task) -> Result<(), TaskError> {
    Ok(())
  }
}
