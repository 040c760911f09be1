// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Count of completed state operations, shared by every clone.
/// Only for observability, never for control flow.
#[derive(Debug, Clone, Default)]
pub struct OperationCounter {
    ops: Arc<AtomicU64>,
}

impl OperationCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one completed operation and returns the new total
    pub fn increment(&self) -> u64 {
        self.ops.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn get(&self) -> u64 {
        self.ops.load(Ordering::SeqCst)
    }
}
