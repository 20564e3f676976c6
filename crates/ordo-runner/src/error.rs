//! Runner errors.

use ordo_task::FatalError;
use ordo_workflow::ReconcileError;

/// Why a run ended without converging.
#[derive(Debug, thiserror::Error)]
pub enum RunError {
  /// A pass failed fatally. Retrying will not help.
  #[error("workflow failed fatally on pass {passes}")]
  Fatal {
    passes: u32,
    #[source]
    source: FatalError,
  },

  /// The pass limit was reached while the workflow was still converging.
  #[error("workflow did not converge after {passes} passes")]
  Exhausted {
    passes: u32,
    #[source]
    last: ReconcileError,
  },

  /// The run was cancelled.
  #[error("workflow run cancelled after {passes} passes")]
  Cancelled { passes: u32 },
}

impl RunError {
  /// Number of passes attempted before the run ended.
  pub fn passes(&self) -> u32 {
    match self {
      Self::Fatal { passes, .. } | Self::Exhausted { passes, .. } | Self::Cancelled { passes } => {
        *passes
      }
    }
  }
}
