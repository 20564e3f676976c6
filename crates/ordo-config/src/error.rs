use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading a plan.
#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("failed to read plan file {path}")]
  Read {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("failed to parse plan file {path}: {message}")]
  Parse { path: PathBuf, message: String },

  #[error("unsupported plan format for {path} (expected .json, .yaml or .yml)")]
  UnsupportedFormat { path: PathBuf },
}
