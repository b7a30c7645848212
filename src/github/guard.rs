//! Rate limit reporting around gateway calls.
//!
//! [`RateLimitGuard`] runs a unit of work against the gateway. When that work
//! fails with [`WatchError::RateLimitExceeded`] it reads the current rate
//! limit and reports it on the diagnostic channel before handing the original
//! error back. Nothing is retried.

use std::future::Future;

use tracing::debug;

use crate::diagnostics::{DiagnosticEvent, DiagnosticSink};

use super::error::WatchError;
use super::gateway::RepositoryGateway;

/// Wraps gateway operations with rate limit diagnostics.
pub struct RateLimitGuard<'client, Gateway>
where
    Gateway: RepositoryGateway + ?Sized,
{
    client: &'client Gateway,
    sink: &'client dyn DiagnosticSink,
}

impl<'client, Gateway> RateLimitGuard<'client, Gateway>
where
    Gateway: RepositoryGateway + ?Sized,
{
    /// Create a guard reporting through `sink`.
    #[must_use]
    pub const fn new(client: &'client Gateway, sink: &'client dyn DiagnosticSink) -> Self {
        Self { client, sink }
    }

    /// Run `operation`, reporting a rate limit snapshot if it was rejected
    /// by the rate limiter.
    ///
    /// # Errors
    ///
    /// Returns whatever error `operation` produced, unchanged.
    pub async fn run<T, Operation, Fut>(&self, operation: Operation) -> Result<T, WatchError>
    where
        Operation: FnOnce() -> Fut,
        Fut: Future<Output = Result<T, WatchError>>,
    {
        let result = operation().await;

        if let Err(error) = &result
            && error.is_rate_limit()
        {
            self.report_rate_limit().await;
        }

        result
    }

    async fn report_rate_limit(&self) {
        let event = match self.client.rate_limit().await {
            Ok(rate_limit) => DiagnosticEvent::RateLimitSnapshot { rate_limit },
            Err(error) => {
                debug!(%error, "rate limit snapshot failed");
                DiagnosticEvent::RateLimitSnapshotUnavailable {
                    reason: error.to_string(),
                }
            }
        };

        self.sink.emit(&event);
    }
}
