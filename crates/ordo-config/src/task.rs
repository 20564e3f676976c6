use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskDef {
  pub task_id: i64,
  pub description: String,
  /// Invocation on which the task settles; 1 settles on the first call.
  #[serde(default = "default_attempts")]
  pub attempts: u32,
  /// Settle with a fatal error instead of converging.
  #[serde(default, skip_serializing_if = "std::ops::Not::not")]
  pub fatal: bool,
}

fn default_attempts() -> u32 {
  1
}

/// `task_id` runs after every task in `depends_on`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyDef {
  pub task_id: i64,
  pub depends_on: Vec<i64>,
}
