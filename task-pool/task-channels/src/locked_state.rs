// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use task_pool_core::state_access::StateAccess;
use task_pool_core::{OperationCounter, Result, StateKey, StateSnapshot, StateValue};

/// Shared mapping protected by a mutex.
///
/// The lock is held only for the single map access; the operation counter is
/// bumped afterwards, outside the critical section.
#[derive(Clone, Default)]
pub struct LockedState {
    state: Arc<Mutex<HashMap<StateKey, StateValue>>>,
    ops: OperationCounter,
}

impl LockedState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn counter(&self) -> OperationCounter {
        self.ops.clone()
    }

    /// Copy of the current mapping
    pub fn snapshot(&self) -> StateSnapshot {
        self.lock().iter().map(|(k, v)| (*k, *v)).collect()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<StateKey, StateValue>> {
        // A panic while holding the lock cannot leave a half-written entry behind.
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[async_trait]
impl StateAccess for LockedState {
    async fn read(&self, key: StateKey) -> Result<Option<StateValue>> {
        let value = self.lock().get(&key).copied();
        self.ops.increment();
        Ok(value)
    }

    async fn write(&self, key: StateKey, value: StateValue) -> Result<()> {
        self.lock().insert(key, value);
        self.ops.increment();
        Ok(())
    }

    fn operations(&self) -> u64 {
        self.ops.get()
    }
}
