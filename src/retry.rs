// src/retry.rs

//! Bounded-time retry loop.
//!
//! The operation is attempted immediately. After each failed attempt the
//! loop gives up if the wall-clock time since the first attempt has reached
//! `timeout`; otherwise it sleeps `pause` and attempts again, so every pause
//! is followed by an attempt. There is no attempt cap beyond the time budget.

use std::future::Future;
use std::time::Duration;

use tokio::time::Instant;
use tracing::{debug, info, warn};

use crate::errors::{Result, StagehandError};

/// Smallest accepted `timeout` / `pause`.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Result of a [`retry`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryOutcome {
    pub succeeded: bool,
    /// Wall-clock time from the first attempt until the loop stopped.
    pub elapsed: Duration,
    pub attempts: u32,
}

/// Run `operation` until it returns `Ok(true)` or `timeout` elapses.
///
/// `Ok(false)` from the operation is retried; `Err` is not, and is returned
/// as-is. Both `timeout` and `pause` must be at least [`MIN_INTERVAL`],
/// otherwise `InvalidArgument` is returned without calling `operation`.
pub async fn retry<F, Fut>(timeout: Duration, pause: Duration, mut operation: F) -> Result<RetryOutcome>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<bool>>,
{
    if timeout < MIN_INTERVAL {
        return Err(StagehandError::InvalidArgument(format!(
            "retry timeout must be at least {MIN_INTERVAL:?} (got {timeout:?})"
        )));
    }
    if pause < MIN_INTERVAL {
        return Err(StagehandError::InvalidArgument(format!(
            "retry pause must be at least {MIN_INTERVAL:?} (got {pause:?})"
        )));
    }

    let start = Instant::now();
    let mut attempts: u32 = 0;

    loop {
        attempts += 1;
        if operation().await? {
            let elapsed = start.elapsed();
            info!(attempts, ?elapsed, "operation succeeded");
            return Ok(RetryOutcome {
                succeeded: true,
                elapsed,
                attempts,
            });
        }

        let elapsed = start.elapsed();
        if elapsed >= timeout {
            warn!(attempts, ?elapsed, ?timeout, "operation did not succeed before timeout");
            return Ok(RetryOutcome {
                succeeded: false,
                elapsed,
                attempts,
            });
        }

        debug!(attempt = attempts, ?pause, "operation failed; pausing before retry");
        tokio::time::sleep(pause).await;
    }
}
