// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod task_queue;
pub use task_queue::{QueueReceiver, TaskQueue};

pub mod channel_wrappers;
pub use channel_wrappers::{result_sink, ChannelResultSender};

pub mod tokio_runtime;
pub use tokio_runtime::{TokenShutdownSignal, TokioRuntime};

mod worker;
pub use worker::Worker;

mod worker_pool;
pub use worker_pool::WorkerPool;

mod orchestrator;
pub use orchestrator::{BatchOutcome, Orchestrator};

mod steady_limiter;
pub use steady_limiter::SteadyLimiter;

mod bursty_limiter;
pub use bursty_limiter::BurstyLimiter;

pub mod limiter_factory;
pub use limiter_factory::build_limiter;

mod locked_state;
pub use locked_state::LockedState;

mod actor_state;
pub use actor_state::ActorState;

mod state_load;
pub use state_load::{LoadReport, StateLoad};

pub mod counting;

pub mod logging;
