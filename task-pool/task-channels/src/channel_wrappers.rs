// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use task_pool_core::worker_io::AsyncResultSender;
use task_pool_core::{PoolError, Result, WorkResult};
use tokio::sync::mpsc;

/// Creates a bounded result sink; workers publish into the sender half
pub fn result_sink(capacity: usize) -> (ChannelResultSender, mpsc::Receiver<WorkResult>) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    (ChannelResultSender { tx }, rx)
}

#[derive(Clone)]
pub struct ChannelResultSender {
    pub tx: mpsc::Sender<WorkResult>,
}

#[async_trait]
impl AsyncResultSender for ChannelResultSender {
    async fn send(&self, result: WorkResult) -> Result<()> {
        self.tx.send(result).await.map_err(|_| PoolError::SinkClosed)
    }
}
