use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::enums::OnCancel;
use crate::error::ConfigError;
use crate::retry::RetryDef;
use crate::task::{DependencyDef, TaskDef};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDef {
  pub name: String,
  pub tasks: Vec<TaskDef>,
  #[serde(default)]
  pub dependencies: Vec<DependencyDef>,
  #[serde(default)]
  pub retry: RetryDef,
  #[serde(default)]
  pub on_cancel: OnCancel,
}

impl PlanDef {
  /// Load a plan, choosing the parser from the file extension.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
    let path = path.as_ref();
    let extension = path
      .extension()
      .and_then(|e| e.to_str())
      .map(str::to_ascii_lowercase);

    let parse: fn(&str) -> Result<Self, String> = match extension.as_deref() {
      Some("json") => |s| serde_json::from_str(s).map_err(|e| e.to_string()),
      Some("yaml" | "yml") => |s| serde_yaml::from_str(s).map_err(|e| e.to_string()),
      _ => {
        return Err(ConfigError::UnsupportedFormat {
          path: path.to_path_buf(),
        });
      }
    };

    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
      path: path.to_path_buf(),
      source,
    })?;

    parse(&content).map_err(|message| ConfigError::Parse {
      path: path.to_path_buf(),
      message,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::enums::RetryBackoff;

  #[test]
  fn minimal_plan_uses_defaults() {
    let plan: PlanDef = serde_json::from_str(
      r#"{
        "name": "volumes",
        "tasks": [{ "task_id": 1, "description": "create V1" }]
      }"#,
    )
    .unwrap();

    assert_eq!(plan.tasks[0].attempts, 1);
    assert!(!plan.tasks[0].fatal);
    assert!(plan.dependencies.is_empty());
    assert_eq!(plan.retry, RetryDef::default());
    assert_eq!(plan.retry.interval_ms, 2_000);
    assert_eq!(plan.on_cancel, OnCancel::Abort);
  }

  #[test]
  fn full_plan_from_yaml() {
    let plan: PlanDef = serde_yaml::from_str(
      r#"
name: volumes
tasks:
  - task_id: 1
    description: create V1
    attempts: 3
  - task_id: 2
    description: create V2
    fatal: true
dependencies:
  - task_id: 1
    depends_on: [2]
retry:
  interval_ms: 100
  backoff: exponential
  max_interval_ms: 800
  max_passes: 5
on_cancel: skip
"#,
    )
    .unwrap();

    assert_eq!(plan.tasks[0].attempts, 3);
    assert!(plan.tasks[1].fatal);
    assert_eq!(plan.dependencies[0].depends_on, vec![2]);
    assert_eq!(plan.retry.backoff, RetryBackoff::Exponential);
    assert_eq!(plan.retry.max_passes.map(|n| n.get()), Some(5));
    assert_eq!(plan.on_cancel, OnCancel::Skip);
  }

  #[test]
  fn zero_max_passes_is_rejected() {
    let err = serde_json::from_str::<PlanDef>(
      r#"{
        "name": "volumes",
        "tasks": [],
        "retry": { "max_passes": 0 }
      }"#,
    )
    .unwrap_err();
    assert!(err.is_data(), "{err}");

    let plan: PlanDef = serde_json::from_str(
      r#"{ "name": "volumes", "tasks": [], "retry": { "max_passes": 1 } }"#,
    )
    .unwrap();
    assert_eq!(plan.retry.max_passes.map(|n| n.get()), Some(1));
  }

  #[test]
  fn serialization_omits_defaults() {
    let task = TaskDef {
      task_id: 4,
      description: "create V4".to_string(),
      attempts: 2,
      fatal: false,
    };
    let json = serde_json::to_value(&task).unwrap();
    assert!(json.get("fatal").is_none());
  }
}
