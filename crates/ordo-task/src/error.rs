//! Task outcome errors.

use std::error::Error;

/// A boxed, thread-safe error cause.
pub type BoxError = Box<dyn Error + Send + Sync + 'static>;

/// A terminal failure. The pass that produced it must not be retried as-is.
#[derive(Debug, thiserror::Error)]
#[error("fatal error: {source}")]
pub struct FatalError {
  source: BoxError,
}

impl FatalError {
  /// Wrap an underlying cause.
  pub fn new(source: impl Into<BoxError>) -> Self {
    Self {
      source: source.into(),
    }
  }

  /// The wrapped cause.
  pub fn cause(&self) -> &(dyn Error + Send + Sync + 'static) {
    self.source.as_ref()
  }

  /// Downcast the wrapped cause to a concrete error type.
  pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
    self.source.downcast_ref::<E>()
  }

  pub fn into_inner(self) -> BoxError {
    self.source
  }
}

/// Errors a task body may return.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
  /// The task cannot converge without reconfiguration.
  #[error(transparent)]
  Fatal(#[from] FatalError),

  /// The task has not converged yet; a later pass may succeed.
  #[error("{0}")]
  Retryable(BoxError),
}

impl TaskError {
  pub fn fatal(source: impl Into<BoxError>) -> Self {
    Self::Fatal(FatalError::new(source))
  }

  pub fn retryable(source: impl Into<BoxError>) -> Self {
    Self::Retryable(source.into())
  }

  pub fn is_fatal(&self) -> bool {
    matches!(self, Self::Fatal(_))
  }
}
