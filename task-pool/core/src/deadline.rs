// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{PoolError, Result};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

// Roughly 30 years; stands in for "never" when `now + duration` overflows.
const FAR_FUTURE: Duration = Duration::from_secs(86_400 * 365 * 30);

/// Races `future` against a timer of length `after`.
/// Whichever resolves first decides the outcome; expiry yields `PoolError::Timeout`.
pub async fn with_deadline<F, T>(after: Duration, future: F) -> Result<T>
where
    F: Future<Output = T>,
{
    tokio::time::timeout(after, future)
        .await
        .map_err(|_| PoolError::Timeout { after })
}

/// The instant `duration` from now, saturating to a far-future instant
/// instead of overflowing.
pub fn instant_after(duration: Duration) -> Instant {
    let now = Instant::now();
    now.checked_add(duration).unwrap_or(now + FAR_FUTURE)
}
