// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::Arc;
use std::time::Duration;
use task_pool_core::shutdown_signal::ShutdownSignal;
use task_pool_core::worker_io::{AsyncResultSender, AsyncWorkReceiver};
use task_pool_core::{Timer, WorkItem, WorkResult, WorkerSummary};
use tracing::{debug, warn};

/// Drains work items, applies the transform after a fixed latency and
/// publishes results, until the source is exhausted or shutdown fires
pub struct Worker<R, S, SD> {
    id: usize,
    receiver: R,
    sink: S,
    timer: Arc<dyn Timer>,
    latency: Duration,
    shutdown: SD,
}

impl<R, S, SD> Worker<R, S, SD>
where
    R: AsyncWorkReceiver<WorkItem>,
    S: AsyncResultSender,
    SD: ShutdownSignal,
{
    pub fn new(
        id: usize,
        receiver: R,
        sink: S,
        timer: Arc<dyn Timer>,
        latency: Duration,
        shutdown: SD,
    ) -> Self {
        Self {
            id,
            receiver,
            sink,
            timer,
            latency,
            shutdown,
        }
    }

    pub async fn run(mut self) -> WorkerSummary {
        let mut processed = 0;

        loop {
            let item = tokio::select! {
                biased;
                _ = self.shutdown.cancelled() => {
                    debug!(worker_id = self.id, "worker cancelled");
                    break;
                }
                next = self.receiver.recv() => match next {
                    Some(item) => item,
                    None => break,
                },
            };

            debug!(worker_id = self.id, item = item.id(), "processing work item");
            processed += 1;
            self.timer.sleep(self.latency).await;

            if let Err(e) = self.sink.send(WorkResult::new(item, self.id)).await {
                warn!(worker_id = self.id, error = %e, "dropping result, worker stopping");
                break;
            }
        }

        debug!(worker_id = self.id, processed, "worker finished");
        WorkerSummary {
            worker_id: self.id,
            processed,
        }
    }
}
