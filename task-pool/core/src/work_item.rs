// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

/// One unit of work, identified by an opaque integer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WorkItem(pub u32);

impl WorkItem {
    pub fn id(&self) -> u32 {
        self.0
    }

    /// Deterministic transform applied by workers
    pub fn process(self) -> u64 {
        u64::from(self.0) * 2
    }
}

impl From<u32> for WorkItem {
    fn from(id: u32) -> Self {
        WorkItem(id)
    }
}

/// Output of processing one WorkItem
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkResult {
    pub item: WorkItem,
    pub value: u64,
    pub worker_id: usize,
}

impl WorkResult {
    pub fn new(item: WorkItem, worker_id: usize) -> Self {
        Self {
            item,
            value: item.process(),
            worker_id,
        }
    }
}

/// What a single worker did before it terminated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WorkerSummary {
    pub worker_id: usize,
    pub processed: usize,
}

/// Completion report of a whole worker pool
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PoolReport {
    pub workers: Vec<WorkerSummary>,
    /// Workers whose task panicked or was aborted before reporting
    pub failed: usize,
}

impl PoolReport {
    pub fn total_processed(&self) -> usize {
        self.workers.iter().map(|w| w.processed).sum()
    }

    pub fn processed_by(&self, worker_id: usize) -> Option<usize> {
        self.workers
            .iter()
            .find(|w| w.worker_id == worker_id)
            .map(|w| w.processed)
    }
}
