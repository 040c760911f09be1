// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Concurrent atomic counting: many tasks bump one `OperationCounter`.

use std::time::Duration;
use task_pool_core::OperationCounter;
use task_pool_core::instant_after;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{error, info};

/// Runs `tasks` incrementing tasks for `duration` and returns the final count,
/// read once all of them have stopped
pub async fn count_concurrently(counter: &OperationCounter, tasks: usize, duration: Duration) -> u64 {
    let deadline = instant_after(duration);
    let mut set = JoinSet::new();

    for _ in 0..tasks {
        let counter = counter.clone();
        set.spawn(async move {
            while Instant::now() < deadline {
                counter.increment();
                tokio::task::yield_now().await;
            }
        });
    }

    while let Some(joined) = set.join_next().await {
        if let Err(e) = joined {
            error!(error = %e, "counting task failed");
        }
    }

    let total = counter.get();
    info!(tasks, total, "atomic counting finished");
    total
}
