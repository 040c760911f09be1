// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;
use std::time::Duration;
use task_pool_core::shutdown_signal::ShutdownSignal;
use task_pool_core::state_access::StateAccess;
use task_pool_core::{FastrandRandom, Random};
use task_pool_core::instant_after;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{error, info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Role {
    Reader,
    Writer,
}

/// Totals of one load run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub reads: u64,
    pub writes: u64,
    /// Operation counter of the state once every task has stopped
    pub operations: u64,
}

/// Concurrent readers and writers hammering a `StateAccess` with random
/// keys and values for a fixed duration
pub struct StateLoad {
    readers: usize,
    writers: usize,
    duration: Duration,
    random: Arc<dyn Random>,
}

impl StateLoad {
    pub fn new(readers: usize, writers: usize, duration: Duration) -> Self {
        Self {
            readers,
            writers,
            duration,
            random: Arc::new(FastrandRandom),
        }
    }

    pub fn with_random(mut self, random: Arc<dyn Random>) -> Self {
        self.random = random;
        self
    }

    /// Runs until the duration elapses or shutdown fires
    pub async fn run<S, SD>(&self, state: S, shutdown: SD) -> LoadReport
    where
        S: StateAccess,
        SD: ShutdownSignal,
    {
        let deadline = instant_after(self.duration);
        let roles = std::iter::repeat(Role::Reader)
            .take(self.readers)
            .chain(std::iter::repeat(Role::Writer).take(self.writers));

        let mut tasks = JoinSet::new();
        for role in roles {
            tasks.spawn(drive(
                role,
                state.clone(),
                self.random.clone(),
                deadline,
                shutdown.clone(),
            ));
        }

        let mut report = LoadReport::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((reads, writes)) => {
                    report.reads += reads;
                    report.writes += writes;
                }
                Err(e) => error!(error = %e, "load task failed"),
            }
        }
        report.operations = state.operations();

        info!(
            readers = self.readers,
            writers = self.writers,
            reads = report.reads,
            writes = report.writes,
            operations = report.operations,
            "state load finished"
        );
        report
    }
}

async fn drive<S, SD>(
    role: Role,
    state: S,
    random: Arc<dyn Random>,
    deadline: Instant,
    shutdown: SD,
) -> (u64, u64)
where
    S: StateAccess,
    SD: ShutdownSignal,
{
    let (mut reads, mut writes) = (0, 0);
    let mut observed_total: u64 = 0;

    while Instant::now() < deadline && !shutdown.is_cancelled() {
        let outcome = match role {
            Role::Reader => state.read(random.key()).await.map(|value| {
                observed_total += u64::from(value.unwrap_or(0));
                reads += 1;
            }),
            Role::Writer => state.write(random.key(), random.value()).await.map(|()| {
                writes += 1;
            }),
        };

        if let Err(e) = outcome {
            warn!(?role, error = %e, "state access failed, stopping");
            break;
        }

        tokio::task::yield_now().await;
    }

    tracing::trace!(?role, reads, writes, observed_total, "load task stopped");
    (reads, writes)
}
