use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

use crate::enums::RetryBackoff;

/// How a caller re-runs passes that have not converged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryDef {
  #[serde(default = "default_interval_ms")]
  pub interval_ms: u64,
  #[serde(default)]
  pub backoff: RetryBackoff,
  #[serde(default = "default_max_interval_ms")]
  pub max_interval_ms: u64,
  /// Give up after this many passes. Unbounded when absent; zero is
  /// rejected.
  #[serde(skip_serializing_if = "Option::is_none")]
  pub max_passes: Option<NonZeroU32>,
}

impl Default for RetryDef {
  fn default() -> Self {
    Self {
      interval_ms: default_interval_ms(),
      backoff: RetryBackoff::default(),
      max_interval_ms: default_max_interval_ms(),
      max_passes: None,
    }
  }
}

fn default_interval_ms() -> u64 {
  2_000
}

fn default_max_interval_ms() -> u64 {
  60_000
}
