//! Rate limit snapshots read from the GitHub API.
//!
//! The snapshot is only ever read after a request has been rejected for
//! exceeding the rate limit, so that an operator can see when the quota
//! resets. Nothing in the crate waits or retries based on it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Rate limit state reported by `GET /rate_limit`.
///
/// # Example
///
/// ```
/// use orgwatch::github::rate_limit::RateLimitInfo;
///
/// let info = RateLimitInfo::new(5000, 4999, 1700000000);
/// assert!(!info.is_exhausted());
/// assert_eq!(info.remaining(), 4999);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateLimitInfo {
    /// Maximum requests allowed in the current window.
    limit: u32,
    /// Remaining requests in the current window.
    remaining: u32,
    /// Unix timestamp when the rate limit resets.
    reset_at: u64,
}

impl RateLimitInfo {
    /// Creates a new rate limit snapshot.
    #[must_use]
    pub const fn new(limit: u32, remaining: u32, reset_at: u64) -> Self {
        Self {
            limit,
            remaining,
            reset_at,
        }
    }

    /// Returns the maximum requests allowed in the current window.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Returns the remaining requests in the current window.
    #[must_use]
    pub const fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Returns the Unix timestamp when the rate limit resets.
    #[must_use]
    pub const fn reset_at(&self) -> u64 {
        self.reset_at
    }

    /// Returns true if the rate limit has been exhausted.
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// Returns the reset time as a UTC timestamp, if representable.
    #[must_use]
    pub fn reset_time(&self) -> Option<DateTime<Utc>> {
        let seconds = i64::try_from(self.reset_at).ok()?;
        DateTime::from_timestamp(seconds, 0)
    }
}

impl fmt::Display for RateLimitInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{} requests remaining", self.remaining, self.limit)?;
        match self.reset_time() {
            Some(reset) => write!(f, ", resets at {}", reset.to_rfc3339()),
            None => write!(f, ", resets at {}", self.reset_at),
        }
    }
}
