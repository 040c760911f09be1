// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    /// The caller broke the usage contract of a component (submit after close, double close).
    /// Indicates a programming defect, not a runtime condition.
    #[error("Contract violation: {0}")]
    ContractViolation(String),

    #[error("Timed out after {after:?}")]
    Timeout { after: Duration },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Task queue is full")]
    QueueFull,

    #[error("State coordinator is not running")]
    CoordinatorClosed,

    #[error("Result sink is closed")]
    SinkClosed,

    #[error("Configuration error: {0}")]
    Config(String),
}

impl PoolError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, PoolError::Timeout { .. })
    }

    pub fn is_contract_violation(&self) -> bool {
        matches!(self, PoolError::ContractViolation(_))
    }
}

pub type Result<T> = std::result::Result<T, PoolError>;
