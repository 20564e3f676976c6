//! Engine configuration.

/// What a pass does when it finds the cancellation token already cancelled
/// before starting a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CancelMode {
  /// Stop the pass and report [`crate::ReconcileError::Cancelled`].
  #[default]
  Abort,
  /// Leave the task out and keep walking the order. A pass that skips
  /// tasks this way can still report success.
  Skip,
}

/// Configuration for a [`crate::Workflow`].
#[derive(Debug, Clone, Default)]
pub struct WorkflowConfig {
  pub on_cancel: CancelMode,
}
