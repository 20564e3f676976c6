//! Delay between passes.

use std::num::NonZeroU32;
use std::time::Duration;

use ordo_config::{RetryBackoff, RetryDef};

/// Retry schedule for a [`crate::RetryRunner`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
  pub interval: Duration,
  pub backoff: RetryBackoff,
  pub max_interval: Duration,
  /// Stop after this many passes. `None` retries until success, a fatal
  /// error, or cancellation.
  pub max_passes: Option<NonZeroU32>,
}

impl RetryPolicy {
  /// Fixed delay between passes with no pass limit.
  pub fn constant(interval: Duration) -> Self {
    Self {
      interval,
      backoff: RetryBackoff::Constant,
      max_interval: interval,
      max_passes: None,
    }
  }

  pub fn with_max_passes(mut self, max_passes: NonZeroU32) -> Self {
    self.max_passes = Some(max_passes);
    self
  }

  /// Delay after the `pass`-th pass failed (passes count from 1).
  ///
  /// - constant: `interval`
  /// - linear: `interval * pass`
  /// - exponential: `interval * 2^(pass - 1)`
  ///
  /// The result never exceeds `max_interval`.
  pub fn delay(&self, pass: u32) -> Duration {
    let pass = pass.max(1);
    let delay = match self.backoff {
      RetryBackoff::Constant => self.interval,
      RetryBackoff::Linear => self.interval.saturating_mul(pass),
      RetryBackoff::Exponential => {
        let factor = 2u32.checked_pow(pass - 1).unwrap_or(u32::MAX);
        self.interval.saturating_mul(factor)
      }
    };
    delay.min(self.max_interval)
  }
}

impl Default for RetryPolicy {
  fn default() -> Self {
    Self::from(&RetryDef::default())
  }
}

impl From<&RetryDef> for RetryPolicy {
  fn from(def: &RetryDef) -> Self {
    Self {
      interval: Duration::from_millis(def.interval_ms),
      backoff: def.backoff,
      max_interval: Duration::from_millis(def.max_interval_ms),
      max_passes: def.max_passes,
    }
  }
}
