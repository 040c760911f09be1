// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::{with_deadline, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Permit issuing gate pacing rate limited operations
#[async_trait]
pub trait RateLimiter: Send + Sync {
    /// Waits until the next permit is available and consumes it
    async fn allow(&self);

    /// Like `allow`, but gives up once `deadline` has elapsed
    async fn allow_timeout(&self, deadline: Duration) -> Result<()> {
        with_deadline(deadline, self.allow()).await
    }
}
