// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::WorkerSummary;
use std::future::Future;

/// Trait for abstracting how workers are spawned and joined
pub trait WorkerRuntime: Send + 'static {
    type Handle: Send;
    type Error: std::fmt::Display + Send;

    /// Spawn a worker
    fn spawn<F, Fut>(f: F) -> Self::Handle
    where
        F: FnOnce() -> Fut + Send + 'static,
        Fut: Future<Output = WorkerSummary> + Send + 'static;

    /// Wait for the worker to complete
    fn join(
        handle: Self::Handle,
    ) -> impl Future<Output = Result<WorkerSummary, Self::Error>> + Send;
}
