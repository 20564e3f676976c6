//! RetryRunner behaviour under tokio's paused clock.

use std::num::NonZeroU32;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;

use ordo_config::RetryBackoff;
use ordo_runner::{RetryPolicy, RetryRunner, RunError};
use ordo_task::{Task, TaskError, TaskId};
use ordo_workflow::{CancelMode, ReconcileError, Workflow, WorkflowConfig};
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// A task that fails `failures` times before it settles, counting every call.
fn flaky(id: i64, failures: u32, calls: &Arc<AtomicU32>) -> Task {
  let calls = calls.clone();
  Task::from_fn(id, format!("flaky {id}"), move |_, task| {
    let call = calls.fetch_add(1, Ordering::SeqCst) + 1;
    async move {
      if call <= failures {
        Err(TaskError::retryable(format!("{task} still settling")))
      } else {
        Ok(())
      }
    }
  })
}

fn single(task: Task) -> Workflow {
  let mut workflow = Workflow::new();
  workflow.add_task(task).unwrap();
  workflow
}

#[tokio::test(start_paused = true)]
async fn converges_after_retries() {
  let calls = Arc::new(AtomicU32::new(0));
  let workflow = single(flaky(1, 2, &calls));
  let runner = RetryRunner::new(RetryPolicy::constant(Duration::from_secs(2)));

  let start = Instant::now();
  let summary = runner
    .run(&workflow, CancellationToken::new())
    .await
    .unwrap();

  assert_eq!(summary.passes, 3);
  assert_eq!(calls.load(Ordering::SeqCst), 3);
  // Two sleeps of two seconds each.
  let elapsed = start.elapsed();
  assert!(elapsed >= Duration::from_secs(4), "{elapsed:?}");
  assert!(elapsed < Duration::from_secs(5), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn first_pass_success_does_not_sleep() {
  let calls = Arc::new(AtomicU32::new(0));
  let workflow = single(flaky(1, 0, &calls));
  let runner = RetryRunner::new(RetryPolicy::constant(Duration::from_secs(30)));

  let start = Instant::now();
  let summary = runner
    .run(&workflow, CancellationToken::new())
    .await
    .unwrap();

  assert_eq!(summary.passes, 1);
  assert!(start.elapsed() < Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn exponential_backoff_spacing() {
  let calls = Arc::new(AtomicU32::new(0));
  let workflow = single(flaky(1, 3, &calls));
  let runner = RetryRunner::new(RetryPolicy {
    interval: Duration::from_secs(1),
    backoff: RetryBackoff::Exponential,
    max_interval: Duration::from_secs(60),
    max_passes: None,
  });

  let start = Instant::now();
  let summary = runner
    .run(&workflow, CancellationToken::new())
    .await
    .unwrap();

  assert_eq!(summary.passes, 4);
  // 1 + 2 + 4 seconds.
  let elapsed = start.elapsed();
  assert!(elapsed >= Duration::from_secs(7), "{elapsed:?}");
  assert!(elapsed < Duration::from_secs(8), "{elapsed:?}");
}

#[tokio::test(start_paused = true)]
async fn fatal_error_stops_immediately() {
  let workflow = single(Task::from_fn(7, "doomed", |_, task| async move {
    Err(TaskError::fatal(format!("{task} cannot be created")))
  }));
  let runner = RetryRunner::new(RetryPolicy::constant(Duration::from_secs(1)));

  let err = runner
    .run(&workflow, CancellationToken::new())
    .await
    .unwrap_err();

  let RunError::Fatal { passes, source } = err else {
    panic!("expected a fatal run error");
  };
  assert_eq!(passes, 1);
  assert_eq!(
    source.to_string(),
    "fatal error: task 7 (doomed) cannot be created"
  );
}

#[tokio::test(start_paused = true)]
async fn pass_limit_reports_last_failure() {
  let calls = Arc::new(AtomicU32::new(0));
  let workflow = single(flaky(4, u32::MAX, &calls));
  let policy = RetryPolicy::constant(Duration::from_millis(500))
    .with_max_passes(NonZeroU32::new(3).unwrap());
  let runner = RetryRunner::new(policy);

  let err = runner
    .run(&workflow, CancellationToken::new())
    .await
    .unwrap_err();

  assert_eq!(err.passes(), 3);
  assert_eq!(calls.load(Ordering::SeqCst), 3);
  let RunError::Exhausted { last, .. } = err else {
    panic!("expected exhaustion");
  };
  assert!(matches!(
    last,
    ReconcileError::Retryable { task_id, .. } if task_id == TaskId::new(4)
  ));
}

#[tokio::test(start_paused = true)]
async fn cancellation_cuts_sleep_short() {
  let calls = Arc::new(AtomicU32::new(0));
  let workflow = single(flaky(1, u32::MAX, &calls));
  let runner = RetryRunner::new(RetryPolicy::constant(Duration::from_secs(3600)));
  let cancel = CancellationToken::new();

  let trigger = cancel.clone();
  tokio::spawn(async move {
    tokio::time::sleep(Duration::from_secs(5)).await;
    trigger.cancel();
  });

  let start = Instant::now();
  let err = runner.run(&workflow, cancel).await.unwrap_err();

  assert!(matches!(err, RunError::Cancelled { passes: 1 }));
  assert_eq!(calls.load(Ordering::SeqCst), 1);
  assert!(start.elapsed() < Duration::from_secs(3600));
}

#[tokio::test(start_paused = true)]
async fn cancelled_pass_ends_the_run() {
  let calls = Arc::new(AtomicU32::new(0));
  let workflow = single(flaky(1, 0, &calls));
  let runner = RetryRunner::default();
  let cancel = CancellationToken::new();
  cancel.cancel();

  let err = runner.run(&workflow, cancel).await.unwrap_err();

  assert!(matches!(err, RunError::Cancelled { passes: 1 }));
  assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn skip_mode_converges_when_cancelled() {
  let calls = Arc::new(AtomicU32::new(0));
  let mut workflow = Workflow::with_config(WorkflowConfig {
    on_cancel: CancelMode::Skip,
  });
  workflow.add_task(flaky(1, 0, &calls)).unwrap();
  let cancel = CancellationToken::new();
  cancel.cancel();

  let summary = RetryRunner::default()
    .run(&workflow, cancel)
    .await
    .unwrap();

  assert_eq!(summary.passes, 1);
  assert_eq!(calls.load(Ordering::SeqCst), 0);
}
