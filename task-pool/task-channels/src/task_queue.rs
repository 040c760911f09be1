// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

//! Bounded, closable FIFO queue of pending work.
//!
//! A single producer submits items and closes the queue once everything is
//! submitted. Any number of `QueueReceiver` clones compete for the items;
//! each item is handed to exactly one of them.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use task_pool_core::worker_io::AsyncWorkReceiver;
use task_pool_core::{with_deadline, PoolError, Result};
use tokio::sync::mpsc::{self, error::TrySendError};

pub struct TaskQueue<T> {
    sender: Mutex<Option<mpsc::Sender<T>>>,
    receiver: QueueReceiver<T>,
    capacity: usize,
    submitted: AtomicUsize,
}

impl<T: Send> TaskQueue<T> {
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(PoolError::InvalidConfig(
                "task queue capacity must be at least 1".into(),
            ));
        }
        let (tx, rx) = mpsc::channel(capacity);
        Ok(Self {
            sender: Mutex::new(Some(tx)),
            receiver: QueueReceiver {
                rx: Arc::new(tokio::sync::Mutex::new(rx)),
            },
            capacity,
            submitted: AtomicUsize::new(0),
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of items accepted so far
    pub fn submitted(&self) -> usize {
        self.submitted.load(Ordering::SeqCst)
    }

    pub fn is_closed(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_none()
    }

    /// A handle to consume items from this queue
    pub fn receiver(&self) -> QueueReceiver<T> {
        self.receiver.clone()
    }

    fn open_sender(&self) -> Result<mpsc::Sender<T>> {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
            .ok_or_else(|| PoolError::ContractViolation("submit on a closed task queue".into()))
    }

    /// Enqueue an item, waiting while the queue is at capacity
    pub async fn submit(&self, item: T) -> Result<()> {
        let sender = self.open_sender()?;
        // The queue keeps its own receiver alive, so the channel cannot close under us.
        sender
            .send(item)
            .await
            .map_err(|_| PoolError::ContractViolation("task queue receiver dropped".into()))?;
        self.submitted.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    /// Enqueue an item without waiting
    pub fn try_submit(&self, item: T) -> Result<()> {
        let sender = self.open_sender()?;
        match sender.try_send(item) {
            Ok(()) => {
                self.submitted.fetch_add(1, Ordering::SeqCst);
                Ok(())
            }
            Err(TrySendError::Full(_)) => Err(PoolError::QueueFull),
            Err(TrySendError::Closed(_)) => Err(PoolError::ContractViolation(
                "task queue receiver dropped".into(),
            )),
        }
    }

    pub async fn submit_timeout(&self, item: T, deadline: Duration) -> Result<()> {
        with_deadline(deadline, self.submit(item)).await?
    }

    /// Signals that no more items will be submitted.
    /// Closing twice is a contract violation.
    pub fn close(&self) -> Result<()> {
        let mut sender = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        match sender.take() {
            Some(_) => Ok(()),
            None => Err(PoolError::ContractViolation(
                "task queue closed more than once".into(),
            )),
        }
    }
}

/// Consumer side of a `TaskQueue`
pub struct QueueReceiver<T> {
    rx: Arc<tokio::sync::Mutex<mpsc::Receiver<T>>>,
}

impl<T> Clone for QueueReceiver<T> {
    fn clone(&self) -> Self {
        Self {
            rx: self.rx.clone(),
        }
    }
}

impl<T: Send> QueueReceiver<T> {
    /// Next item in submission order.
    /// Returns None once the queue is closed and drained.
    pub async fn next(&self) -> Option<T> {
        self.rx.lock().await.recv().await
    }

    pub async fn next_timeout(&self, deadline: Duration) -> Result<Option<T>> {
        with_deadline(deadline, self.next()).await
    }
}

#[async_trait]
impl<T: Send> AsyncWorkReceiver<T> for QueueReceiver<T> {
    async fn recv(&mut self) -> Option<T> {
        self.next().await
    }
}
