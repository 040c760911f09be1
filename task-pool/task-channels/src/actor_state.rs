// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Shared mapping owned by a single coordinator task.
//!
//! Callers never touch the mapping. They send a request carrying its own
//! one-shot reply channel and wait for the coordinator to answer on it, so
//! a caller can only ever observe its own reply. Mutual exclusion follows
//! from the coordinator handling one request at a time.

use async_trait::async_trait;
use std::sync::{Arc, Mutex, PoisonError};
use task_pool_core::state_access::StateAccess;
use task_pool_core::{OperationCounter, PoolError, Result, StateKey, StateSnapshot, StateValue};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

const REQUEST_BUFFER: usize = 1;

struct ReadRequest {
    key: StateKey,
    reply: oneshot::Sender<Option<StateValue>>,
}

struct WriteRequest {
    key: StateKey,
    value: StateValue,
    reply: oneshot::Sender<()>,
}

#[derive(Clone)]
pub struct ActorState {
    reads: mpsc::Sender<ReadRequest>,
    writes: mpsc::Sender<WriteRequest>,
    ops: OperationCounter,
    shutdown: CancellationToken,
    coordinator: Arc<Mutex<Option<JoinHandle<StateSnapshot>>>>,
}

impl ActorState {
    /// Starts the coordinator task. Must be called from within a Tokio runtime.
    pub fn spawn() -> Self {
        let (reads, read_rx) = mpsc::channel(REQUEST_BUFFER);
        let (writes, write_rx) = mpsc::channel(REQUEST_BUFFER);
        let shutdown = CancellationToken::new();
        let coordinator = tokio::spawn(coordinate(read_rx, write_rx, shutdown.clone()));

        Self {
            reads,
            writes,
            ops: OperationCounter::new(),
            shutdown,
            coordinator: Arc::new(Mutex::new(Some(coordinator))),
        }
    }

    pub fn counter(&self) -> OperationCounter {
        self.ops.clone()
    }

    /// Stops the coordinator and hands back the mapping it owned.
    /// Requests still in flight fail with `PoolError::CoordinatorClosed`.
    pub async fn shutdown(&self) -> Result<StateSnapshot> {
        self.shutdown.cancel();
        let handle = self
            .coordinator
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
            .ok_or(PoolError::CoordinatorClosed)?;

        handle.await.map_err(|e| {
            error!(error = %e, "state coordinator task failed");
            PoolError::CoordinatorClosed
        })
    }
}

async fn coordinate(
    mut reads: mpsc::Receiver<ReadRequest>,
    mut writes: mpsc::Receiver<WriteRequest>,
    shutdown: CancellationToken,
) -> StateSnapshot {
    let mut state = StateSnapshot::new();
    debug!("state coordinator started");

    // No `biased`: when both kinds are pending the branch is picked at random.
    // Both senders live in the same handle, so one closed channel means every
    // handle is gone.
    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            request = reads.recv() => match request {
                Some(request) => {
                    let _ = request.reply.send(state.get(&request.key).copied());
                }
                None => break,
            },
            request = writes.recv() => match request {
                Some(request) => {
                    state.insert(request.key, request.value);
                    let _ = request.reply.send(());
                }
                None => break,
            },
        }
    }

    debug!(keys = state.len(), "state coordinator stopped");
    state
}

#[async_trait]
impl StateAccess for ActorState {
    async fn read(&self, key: StateKey) -> Result<Option<StateValue>> {
        let (reply, response) = oneshot::channel();
        self.reads
            .send(ReadRequest { key, reply })
            .await
            .map_err(|_| PoolError::CoordinatorClosed)?;
        let value = response.await.map_err(|_| PoolError::CoordinatorClosed)?;
        self.ops.increment();
        Ok(value)
    }

    async fn write(&self, key: StateKey, value: StateValue) -> Result<()> {
        let (reply, response) = oneshot::channel();
        self.writes
            .send(WriteRequest { key, value, reply })
            .await
            .map_err(|_| PoolError::CoordinatorClosed)?;
        response.await.map_err(|_| PoolError::CoordinatorClosed)?;
        self.ops.increment();
        Ok(())
    }

    fn operations(&self) -> u64 {
        self.ops.get()
    }
}
