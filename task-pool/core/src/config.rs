// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{PoolError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Runtime settings for the pool, the rate limiters and the state load.
/// Every field has a default, so a partial JSON file is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolSettings {
    pub num_workers: usize,
    pub queue_capacity: usize,
    pub num_items: u32,
    pub processing_latency_ms: u64,
    pub rate_interval_ms: u64,
    pub rate_requests: u32,
    pub burst_capacity: usize,
    pub state_readers: usize,
    pub state_writers: usize,
    pub actor_writers: usize,
    pub counter_tasks: usize,
    pub run_duration_ms: u64,
}

impl Default for PoolSettings {
    fn default() -> Self {
        Self {
            num_workers: 3,
            queue_capacity: 100,
            num_items: 9,
            processing_latency_ms: 1000,
            rate_interval_ms: 200,
            rate_requests: 5,
            burst_capacity: 3,
            state_readers: 100,
            state_writers: 10,
            actor_writers: 100,
            counter_tasks: 50,
            run_duration_ms: 1000,
        }
    }
}

impl PoolSettings {
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| PoolError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json(&contents)
    }

    pub fn from_json(contents: &str) -> Result<Self> {
        let settings: PoolSettings =
            serde_json::from_str(contents).map_err(|e| PoolError::Config(e.to_string()))?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.num_workers == 0 {
            return Err(PoolError::InvalidConfig("num_workers must be at least 1".into()));
        }
        if self.queue_capacity == 0 {
            return Err(PoolError::InvalidConfig("queue_capacity must be at least 1".into()));
        }
        if self.rate_interval_ms == 0 {
            return Err(PoolError::InvalidConfig("rate_interval_ms must be positive".into()));
        }
        if self.burst_capacity == 0 {
            return Err(PoolError::InvalidConfig("burst_capacity must be at least 1".into()));
        }
        Ok(())
    }

    pub fn processing_latency(&self) -> Duration {
        Duration::from_millis(self.processing_latency_ms)
    }

    pub fn run_duration(&self) -> Duration {
        Duration::from_millis(self.run_duration_ms)
    }

    pub fn steady_policy(&self) -> RatePolicy {
        RatePolicy::Steady {
            interval: Duration::from_millis(self.rate_interval_ms),
        }
    }

    pub fn bursty_policy(&self) -> RatePolicy {
        RatePolicy::Bursty {
            interval: Duration::from_millis(self.rate_interval_ms),
            burst: self.burst_capacity,
        }
    }
}

/// Permit issuing policy of a rate limiter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatePolicy {
    /// One permit every `interval`, unconsumed permits are not accumulated
    Steady { interval: Duration },
    /// Up to `burst` pre-accumulated permits, refilled one per `interval`
    Bursty { interval: Duration, burst: usize },
}

impl RatePolicy {
    pub fn interval(&self) -> Duration {
        match self {
            RatePolicy::Steady { interval } | RatePolicy::Bursty { interval, .. } => *interval,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval().is_zero() {
            return Err(PoolError::InvalidConfig(
                "rate limiter interval must be positive".into(),
            ));
        }
        if let RatePolicy::Bursty { burst: 0, .. } = self {
            return Err(PoolError::InvalidConfig(
                "bursty limiter needs a burst capacity of at least 1".into(),
            ));
        }
        Ok(())
    }
}
