// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Instant;
use task_pool_core::{OperationCounter, PoolSettings, RateLimiter, RatePolicy, WorkItem};
use task_pool_task_channels::counting::count_concurrently;
use task_pool_task_channels::logging::init_logging;
use task_pool_task_channels::{
    build_limiter, ActorState, LockedState, Orchestrator, StateLoad, TokenShutdownSignal,
};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Scenario {
    All,
    Pool,
    Steady,
    Bursty,
    Locked,
    Actor,
    Counter,
}

#[derive(Debug, Parser)]
#[command(name = "task-pool-demo", about = "Worker pool, rate limiting and shared state demo")]
struct Args {
    /// JSON settings file; defaults are used when it is missing or invalid
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    #[arg(long, value_enum, default_value_t = Scenario::All)]
    scenario: Scenario,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();
    let start_time = Instant::now();

    let settings = match PoolSettings::load(&args.config) {
        Ok(settings) => settings,
        Err(e) => {
            warn!(error = %e, "failed to load settings, using defaults");
            PoolSettings::default()
        }
    };
    info!(?settings, "configuration");

    let cancel_token = CancellationToken::new();
    let ctrl_c_token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Ctrl+C received, initiating shutdown");
            ctrl_c_token.cancel();
        }
    });

    let selected = |scenario: Scenario| args.scenario == Scenario::All || args.scenario == scenario;

    if selected(Scenario::Pool) {
        run_pool(&settings, cancel_token.clone()).await?;
    }
    if selected(Scenario::Steady) {
        run_rate_limited(settings.steady_policy(), settings.rate_requests, &cancel_token).await?;
    }
    if selected(Scenario::Bursty) {
        run_rate_limited(settings.bursty_policy(), settings.rate_requests, &cancel_token).await?;
    }
    if selected(Scenario::Locked) {
        run_locked_state(&settings, &cancel_token).await;
    }
    if selected(Scenario::Actor) {
        run_actor_state(&settings, &cancel_token).await?;
    }
    if selected(Scenario::Counter) {
        let counter = OperationCounter::new();
        count_concurrently(&counter, settings.counter_tasks, settings.run_duration()).await;
    }

    info!(
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "demo complete"
    );
    Ok(())
}

async fn run_pool(settings: &PoolSettings, cancel_token: CancellationToken) -> Result<()> {
    let orchestrator =
        Orchestrator::from_settings(settings).with_cancellation_token(cancel_token);
    let items = (1..=settings.num_items).map(WorkItem::from).collect();

    let outcome = orchestrator.run_batch(items).await?;

    let mut values: Vec<u64> = outcome.results.iter().map(|r| r.value).collect();
    values.sort_unstable();
    info!(
        submitted = outcome.submitted,
        ?values,
        per_worker = ?outcome.report.workers,
        "worker pool results"
    );
    Ok(())
}

async fn run_rate_limited(
    policy: RatePolicy,
    requests: u32,
    cancel_token: &CancellationToken,
) -> Result<()> {
    let limiter = build_limiter(policy)?;
    let started = Instant::now();

    for request in 1..=requests {
        tokio::select! {
            _ = cancel_token.cancelled() => break,
            _ = limiter.allow() => {}
        }
        info!(
            ?policy,
            request,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "request allowed"
        );
    }
    Ok(())
}

async fn run_locked_state(settings: &PoolSettings, cancel_token: &CancellationToken) {
    let state = LockedState::new();
    let load = StateLoad::new(
        settings.state_readers,
        settings.state_writers,
        settings.run_duration(),
    );

    let report = load
        .run(state.clone(), TokenShutdownSignal::new(cancel_token.clone()))
        .await;
    info!(
        operations = report.operations,
        state = ?state.snapshot(),
        "lock-based state finished"
    );
}

async fn run_actor_state(settings: &PoolSettings, cancel_token: &CancellationToken) -> Result<()> {
    let state = ActorState::spawn();
    let load = StateLoad::new(0, settings.actor_writers, settings.run_duration());

    let report = load
        .run(state.clone(), TokenShutdownSignal::new(cancel_token.clone()))
        .await;
    let final_state = state.shutdown().await?;
    info!(
        operations = report.operations,
        state = ?final_state,
        "message-passing state finished"
    );
    Ok(())
}
