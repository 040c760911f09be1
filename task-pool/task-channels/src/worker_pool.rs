// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::tokio_runtime::TokioRuntime;
use crate::worker::Worker;
use std::marker::PhantomData;
use std::sync::Arc;
use std::time::Duration;
use task_pool_core::shutdown_signal::ShutdownSignal;
use task_pool_core::worker_io::{AsyncResultSender, AsyncWorkReceiver};
use task_pool_core::worker_runtime::WorkerRuntime;
use task_pool_core::{PoolError, PoolReport, Result, Timer, WorkItem};
use tracing::{error, info};

/// Fixed-size group of workers with a join barrier
pub struct WorkerPool<RT: WorkerRuntime = TokioRuntime> {
    handles: Vec<(usize, RT::Handle)>,
    _runtime: PhantomData<RT>,
}

impl<RT: WorkerRuntime> WorkerPool<RT> {
    /// Launches `num_workers` workers sharing `receiver` and publishing into `sink`
    pub fn start<R, S, SD>(
        num_workers: usize,
        receiver: R,
        sink: S,
        timer: Arc<dyn Timer>,
        latency: Duration,
        shutdown: SD,
    ) -> Result<Self>
    where
        R: AsyncWorkReceiver<WorkItem> + Clone + 'static,
        S: AsyncResultSender + 'static,
        SD: ShutdownSignal,
    {
        if num_workers == 0 {
            return Err(PoolError::InvalidConfig(
                "worker pool needs at least 1 worker".into(),
            ));
        }

        info!(num_workers, latency_ms = latency.as_millis() as u64, "starting worker pool");

        let handles = (1..=num_workers)
            .map(|worker_id| {
                let worker = Worker::new(
                    worker_id,
                    receiver.clone(),
                    sink.clone(),
                    timer.clone(),
                    latency,
                    shutdown.clone(),
                );
                (worker_id, RT::spawn(move || worker.run()))
            })
            .collect();

        Ok(Self {
            handles,
            _runtime: PhantomData,
        })
    }

    pub fn size(&self) -> usize {
        self.handles.len()
    }

    /// Waits for every worker to terminate
    pub async fn join(self) -> PoolReport {
        let mut report = PoolReport::default();

        for (worker_id, handle) in self.handles {
            match RT::join(handle).await {
                Ok(summary) => report.workers.push(summary),
                Err(e) => {
                    error!(worker_id, error = %e, "worker task failed");
                    report.failed += 1;
                }
            }
        }

        info!(
            processed = report.total_processed(),
            failed = report.failed,
            "worker pool finished"
        );
        report
    }
}
