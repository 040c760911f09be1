// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod error;
pub use error::{PoolError, Result};

mod work_item;
pub use work_item::{PoolReport, WorkItem, WorkResult, WorkerSummary};

mod shared_state;
pub use shared_state::{StateKey, StateSnapshot, StateValue, KEY_SPACE, VALUE_RANGE};

mod operation_counter;
pub use operation_counter::OperationCounter;

pub mod deadline;
pub use deadline::{instant_after, with_deadline};

pub mod config;
pub use config::{PoolSettings, RatePolicy};

pub mod state_access;
pub use state_access::StateAccess;

pub mod rate_limiter;
pub use rate_limiter::RateLimiter;

pub mod worker_io;
pub use worker_io::{AsyncResultSender, AsyncWorkReceiver};

pub mod worker_runtime;
pub use worker_runtime::WorkerRuntime;

pub mod shutdown_signal;
pub use shutdown_signal::ShutdownSignal;

pub mod timer;
pub use timer::{Timer, TokioTimer};

pub mod random;
pub use random::Random;

pub mod fastrand_random;
pub use fastrand_random::FastrandRandom;
