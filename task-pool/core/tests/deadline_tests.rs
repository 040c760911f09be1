// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use task_pool_core::{instant_after, with_deadline, PoolError};
use tokio::time::Instant;

#[tokio::test(start_paused = true)]
async fn test_result_before_deadline_wins() {
    let result = with_deadline(Duration::from_secs(1), async {
        tokio::time::sleep(Duration::from_millis(10)).await;
        7
    })
    .await;

    assert_eq!(result, Ok(7));
}

#[tokio::test(start_paused = true)]
async fn test_deadline_before_result_times_out() {
    let after = Duration::from_millis(100);
    let result = with_deadline(after, async {
        tokio::time::sleep(Duration::from_secs(5)).await;
        7
    })
    .await;

    assert_eq!(result, Err(PoolError::Timeout { after }));
    assert!(result.unwrap_err().is_timeout());
}

#[tokio::test(start_paused = true)]
async fn test_pending_forever_times_out() {
    let result = with_deadline(Duration::from_millis(1), std::future::pending::<()>()).await;

    assert!(matches!(result, Err(PoolError::Timeout { .. })));
}

#[tokio::test(start_paused = true)]
async fn test_instant_after_adds_duration() {
    let before = Instant::now();

    assert_eq!(instant_after(Duration::from_millis(250)), before + Duration::from_millis(250));
}

#[tokio::test(start_paused = true)]
async fn test_instant_after_saturates_instead_of_overflowing() {
    let far = instant_after(Duration::MAX);

    assert!(far > Instant::now() + Duration::from_secs(86_400 * 365));
}
