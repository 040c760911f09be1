// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use async_trait::async_trait;
use std::time::Duration;
use task_pool_core::{RateLimiter, RatePolicy, Result};
use tokio::sync::Mutex;
use tokio::time::{interval, Interval, MissedTickBehavior};

/// Strictly paced limiter: one permit every interval.
///
/// The first permit is available immediately. Permits are not banked while
/// nobody asks for them; at most the single overdue tick is granted, after
/// which pacing restarts from that moment.
pub struct SteadyLimiter {
    ticker: Mutex<Interval>,
}

impl SteadyLimiter {
    /// Must be called from within a Tokio runtime
    pub fn new(period: Duration) -> Result<Self> {
        RatePolicy::Steady { interval: period }.validate()?;

        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        Ok(Self {
            ticker: Mutex::new(ticker),
        })
    }
}

#[async_trait]
impl RateLimiter for SteadyLimiter {
    async fn allow(&self) {
        self.ticker.lock().await.tick().await;
    }
}
