// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::channel_wrappers::result_sink;
use crate::task_queue::TaskQueue;
use crate::tokio_runtime::{TokenShutdownSignal, TokioRuntime};
use crate::worker_pool::WorkerPool;
use std::sync::Arc;
use std::time::Duration;
use task_pool_core::{
    PoolReport, PoolSettings, RateLimiter, Result, Timer, TokioTimer, WorkItem, WorkResult,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// Results of one batch run through the pool
#[derive(Debug)]
pub struct BatchOutcome {
    pub submitted: usize,
    pub results: Vec<WorkResult>,
    pub report: PoolReport,
}

impl BatchOutcome {
    /// True when every submitted item produced a result
    pub fn is_complete(&self) -> bool {
        self.results.len() == self.submitted
    }
}

/// Orchestrator wires producer, task queue, worker pool and result sink together
pub struct Orchestrator {
    num_workers: usize,
    queue_capacity: usize,
    latency: Duration,
    timer: Arc<dyn Timer>,
    limiter: Option<Arc<dyn RateLimiter>>,
    cancellation_token: CancellationToken,
}

impl Orchestrator {
    pub fn new(num_workers: usize, queue_capacity: usize, latency: Duration) -> Self {
        Self {
            num_workers,
            queue_capacity,
            latency,
            timer: Arc::new(TokioTimer),
            limiter: None,
            cancellation_token: CancellationToken::new(),
        }
    }

    pub fn from_settings(settings: &PoolSettings) -> Self {
        Self::new(
            settings.num_workers,
            settings.queue_capacity,
            settings.processing_latency(),
        )
    }

    pub fn with_timer(mut self, timer: Arc<dyn Timer>) -> Self {
        self.timer = timer;
        self
    }

    /// Paces submissions through `limiter`
    pub fn with_rate_limiter(mut self, limiter: Arc<dyn RateLimiter>) -> Self {
        self.limiter = Some(limiter);
        self
    }

    pub fn with_cancellation_token(mut self, token: CancellationToken) -> Self {
        self.cancellation_token = token;
        self
    }

    /// Submits every item, closes the queue and drains results until all
    /// workers have terminated
    pub async fn run_batch(&self, items: Vec<WorkItem>) -> Result<BatchOutcome> {
        let queue = TaskQueue::new(self.queue_capacity)?;
        let (sink, mut results_rx) = result_sink(self.queue_capacity);

        let pool = WorkerPool::<TokioRuntime>::start(
            self.num_workers,
            queue.receiver(),
            sink,
            self.timer.clone(),
            self.latency,
            TokenShutdownSignal::new(self.cancellation_token.clone()),
        )?;

        info!(items = items.len(), workers = pool.size(), "running batch");

        // Results are drained while submitting, so a batch larger than both
        // buffers cannot stall the producer.
        let produce = async {
            let submitted = self.submit_all(&queue, items).await;
            // Close even after a failed submission so workers can drain and exit.
            let closed = queue.close();
            submitted.and(closed)
        };

        let consume = async {
            let mut results = Vec::new();
            while let Some(result) = results_rx.recv().await {
                results.push(result);
            }
            results
        };

        let (produced, results) = tokio::join!(produce, consume);
        let report = pool.join().await;
        produced?;

        let outcome = BatchOutcome {
            submitted: queue.submitted(),
            results,
            report,
        };

        if outcome.is_complete() {
            info!(results = outcome.results.len(), "batch complete");
        } else {
            warn!(
                submitted = outcome.submitted,
                results = outcome.results.len(),
                "batch interrupted before all results arrived"
            );
        }
        Ok(outcome)
    }

    async fn submit_all(&self, queue: &TaskQueue<WorkItem>, items: Vec<WorkItem>) -> Result<()> {
        for item in items {
            if let Some(limiter) = &self.limiter {
                tokio::select! {
                    biased;
                    _ = self.cancellation_token.cancelled() => return Ok(()),
                    _ = limiter.allow() => {}
                }
            }
            tokio::select! {
                biased;
                _ = self.cancellation_token.cancelled() => return Ok(()),
                submitted = queue.submit(item) => submitted?,
            }
            debug!(item = item.id(), "submitted work item");
        }
        Ok(())
    }
}
