// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{BurstyLimiter, SteadyLimiter};
use std::sync::Arc;
use task_pool_core::{RateLimiter, RatePolicy, Result};

/// Builds the limiter matching `policy`.
/// Must be called from within a Tokio runtime.
pub fn build_limiter(policy: RatePolicy) -> Result<Arc<dyn RateLimiter>> {
    let limiter: Arc<dyn RateLimiter> = match policy {
        RatePolicy::Steady { interval } => Arc::new(SteadyLimiter::new(interval)?),
        RatePolicy::Bursty { interval, burst } => Arc::new(BurstyLimiter::new(interval, burst)?),
    };
    Ok(limiter)
}
