// tests/retry_timing.rs

use std::time::Duration;

use stagehand::errors::StagehandError;
use stagehand::retry::retry;
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn always_failing_operation_stops_once_timeout_is_reached() {
    let timeout = Duration::from_millis(1000);
    let pause = Duration::from_millis(300);
    let mut calls = 0u32;

    let started = Instant::now();
    let outcome = retry(timeout, pause, || {
        calls += 1;
        async { Ok(false) }
    })
    .await
    .unwrap();
    let blocked = started.elapsed();

    assert!(!outcome.succeeded);
    // Attempts at 0, 300, 600, 900 and 1200ms; the last one starts after the budget ran out.
    assert_eq!(calls, 5);
    assert_eq!(outcome.attempts, 5);
    assert!(blocked >= timeout, "blocked {blocked:?}");
    assert!(blocked < timeout + pause, "blocked {blocked:?}");
    assert!(outcome.elapsed >= timeout);
}

#[tokio::test(start_paused = true)]
async fn succeeds_on_nth_attempt_after_n_minus_one_pauses() {
    let pause = Duration::from_millis(200);
    let mut calls = 0u32;

    let outcome = retry(Duration::from_secs(10), pause, || {
        calls += 1;
        let n = calls;
        async move { Ok(n == 3) }
    })
    .await
    .unwrap();

    assert!(outcome.succeeded);
    assert_eq!(calls, 3);
    assert_eq!(outcome.attempts, 3);
    assert!(outcome.elapsed >= pause * 2);
    assert!(outcome.elapsed < pause * 3);
}

#[tokio::test(start_paused = true)]
async fn succeeds_on_the_attempt_right_after_the_budget_is_crossed() {
    let mut calls = 0u32;

    let outcome = retry(Duration::from_millis(1000), Duration::from_millis(300), || {
        calls += 1;
        let n = calls;
        async move { Ok(n == 5) }
    })
    .await
    .unwrap();

    assert!(outcome.succeeded);
    assert_eq!(calls, 5);
    assert_eq!(outcome.elapsed, Duration::from_millis(1200));
}

#[tokio::test(start_paused = true)]
async fn every_pause_is_followed_by_an_attempt() {
    let timeout = Duration::from_millis(1);
    let pause = Duration::from_secs(30);
    let mut calls = 0u32;

    let started = Instant::now();
    let outcome = retry(timeout, pause, || {
        calls += 1;
        async { Ok(false) }
    })
    .await
    .unwrap();

    assert!(!outcome.succeeded);
    assert_eq!(calls, 2);
    assert_eq!(started.elapsed(), pause);
}

#[tokio::test(start_paused = true)]
async fn first_attempt_runs_without_waiting() {
    let started = Instant::now();
    let outcome = retry(Duration::from_secs(5), Duration::from_secs(1), || async {
        Ok(true)
    })
    .await
    .unwrap();

    assert!(outcome.succeeded);
    assert_eq!(outcome.attempts, 1);
    assert_eq!(started.elapsed(), Duration::ZERO);
}

#[tokio::test(start_paused = true)]
async fn zero_timeout_is_rejected_before_any_attempt() {
    let mut calls = 0u32;
    let result = retry(Duration::ZERO, Duration::from_millis(10), || {
        calls += 1;
        async { Ok(true) }
    })
    .await;

    assert!(matches!(result, Err(StagehandError::InvalidArgument(_))));
    assert_eq!(calls, 0);
}

#[tokio::test(start_paused = true)]
async fn zero_pause_is_rejected_before_any_attempt() {
    let mut calls = 0u32;
    let result = retry(Duration::from_millis(10), Duration::ZERO, || {
        calls += 1;
        async { Ok(true) }
    })
    .await;

    assert!(matches!(result, Err(StagehandError::InvalidArgument(_))));
    assert_eq!(calls, 0);
}

#[tokio::test(start_paused = true)]
async fn sub_millisecond_intervals_are_rejected() {
    let result = retry(
        Duration::from_micros(500),
        Duration::from_millis(10),
        || async { Ok(true) },
    )
    .await;

    assert!(matches!(result, Err(StagehandError::InvalidArgument(_))));
}

#[tokio::test(start_paused = true)]
async fn operation_errors_propagate_without_retrying() {
    let mut calls = 0u32;
    let result = retry(Duration::from_secs(10), Duration::from_millis(100), || {
        calls += 1;
        async { Err(StagehandError::Config("boom".to_string())) }
    })
    .await;

    match result {
        Err(StagehandError::Config(msg)) => assert_eq!(msg, "boom"),
        other => panic!("expected the operation's error, got {other:?}"),
    }
    assert_eq!(calls, 1);
}

#[tokio::test(start_paused = true)]
async fn slow_operation_is_attempted_once_when_it_outlasts_the_timeout() {
    let mut calls = 0u32;
    let outcome = retry(Duration::from_secs(1), Duration::from_millis(100), || {
        calls += 1;
        async {
            tokio::time::sleep(Duration::from_secs(2)).await;
            Ok(false)
        }
    })
    .await
    .unwrap();

    assert!(!outcome.succeeded);
    assert_eq!(calls, 1);
}
