// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{Result, StateKey, StateValue};
use async_trait::async_trait;

/// Trait for accessing the shared key/value mapping
/// Abstracts the coordination strategy (mutex, single owner task, etc.)
#[async_trait]
pub trait StateAccess: Clone + Send + Sync + 'static {
    /// Read the value stored for a key
    /// Returns None if no write has stored the key yet
    async fn read(&self, key: StateKey) -> Result<Option<StateValue>>;

    /// Store a value for a key
    async fn write(&self, key: StateKey, value: StateValue) -> Result<()>;

    /// Number of completed operations so far
    fn operations(&self) -> u64;
}
