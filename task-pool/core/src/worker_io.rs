// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Result, WorkResult};
use async_trait::async_trait;

/// Trait for receiving work items asynchronously
#[async_trait]
pub trait AsyncWorkReceiver<A>: Send {
    /// Receive the next work item
    /// Returns None once the source is closed and drained
    async fn recv(&mut self) -> Option<A>;
}

/// Trait for publishing results asynchronously
#[async_trait]
pub trait AsyncResultSender: Send + Sync + Clone {
    /// Fails with `PoolError::SinkClosed` if nobody consumes results anymore
    async fn send(&self, result: WorkResult) -> Result<()>;
}
