// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use std::time::Duration;
use task_pool_core::{instant_after, RateLimiter, RatePolicy, Result};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::trace;

/// Limiter with a buffer of up to `burst` banked permits.
///
/// The buffer starts full. A refiller task adds one permit per interval,
/// starting one interval after construction. While the buffer is full the
/// refiller waits for a free slot before taking its next tick, so after an
/// idle stretch at most one overdue permit is added on top of the buffer.
pub struct BurstyLimiter {
    permits: Mutex<mpsc::Receiver<Instant>>,
    refiller: JoinHandle<()>,
}

impl BurstyLimiter {
    /// Must be called from within a Tokio runtime
    pub fn new(period: Duration, burst: usize) -> Result<Self> {
        RatePolicy::Bursty {
            interval: period,
            burst,
        }
        .validate()?;

        let (tx, rx) = mpsc::channel(burst);
        let now = Instant::now();
        for _ in 0..burst {
            if tx.try_send(now).is_err() {
                break;
            }
        }

        let refiller = tokio::spawn(async move {
            let mut ticker = interval_at(instant_after(period), period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                let Ok(slot) = tx.reserve().await else {
                    break;
                };
                slot.send(ticker.tick().await);
                trace!("permit refilled");
            }
        });

        Ok(Self {
            permits: Mutex::new(rx),
            refiller,
        })
    }
}

#[async_trait]
impl RateLimiter for BurstyLimiter {
    async fn allow(&self) {
        // The refiller only stops once this limiter is dropped, so recv never yields None here.
        let _ = self.permits.lock().await.recv().await;
    }
}

impl Drop for BurstyLimiter {
    fn drop(&mut self) {
        self.refiller.abort();
    }
}
