// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::future::Future;

/// Trait for shutdown signaling
pub trait ShutdownSignal: Clone + Send + Sync + 'static {
    fn is_cancelled(&self) -> bool;

    /// Resolves once shutdown has been requested
    fn cancelled(&self) -> impl Future<Output = ()> + Send;
}
