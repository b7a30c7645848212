//! Diagnostic events and sinks.
//!
//! Progress and warnings are reported on a channel separate from results so
//! that stdout can be piped into other tools. Components receive a
//! [`DiagnosticSink`] explicitly; the binary installs a stderr sink and tests
//! install a [`RecordingSink`].

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};

use crate::github::rate_limit::RateLimitInfo;

/// Which subscription mutation a batch performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchAction {
    /// Turn notifications on.
    Subscribe,
    /// Remove the subscription.
    Unsubscribe,
}

/// A structured diagnostic emitted by the core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DiagnosticEvent {
    /// A topic search is about to be issued.
    TopicSearchStarted {
        /// Organisation being searched.
        org: String,
        /// Topic filter.
        topic: String,
    },
    /// A topic search returned.
    TopicSearchCompleted {
        /// Number of repositories on the returned page.
        found: usize,
    },
    /// The search matched more repositories than one page holds.
    TruncatedResults {
        /// Provider's total match count.
        total_count: u64,
        /// Repositories actually returned.
        retrieved: usize,
    },
    /// Rate limit state read after a rate limit failure.
    RateLimitSnapshot {
        /// The snapshot.
        rate_limit: RateLimitInfo,
    },
    /// Reading the rate limit after a rate limit failure also failed.
    RateLimitSnapshotUnavailable {
        /// Why the snapshot could not be read.
        reason: String,
    },
    /// A subscription batch is starting.
    BatchStarted {
        /// Mutation applied to every repository.
        action: BatchAction,
        /// Number of repositories in the batch.
        count: usize,
    },
    /// A single subscription mutation is starting.
    SubscriptionStarted {
        /// Mutation being applied.
        action: BatchAction,
        /// Target repository.
        full_name: String,
    },
    /// A single subscription mutation succeeded.
    SubscriptionCompleted {
        /// Mutation that was applied.
        action: BatchAction,
        /// Target repository.
        full_name: String,
    },
    /// There were no repositories to act on.
    NothingToDo,
}

impl fmt::Display for DiagnosticEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TopicSearchStarted { org, topic } => {
                write!(f, "Retrieving list of {org} repos with topic {topic} ...")
            }
            Self::TopicSearchCompleted { found } => write!(f, "{found} repos found"),
            Self::TruncatedResults {
                total_count,
                retrieved,
            } => write!(
                f,
                "Warning! There may be additional matching repos that weren't retrieved! \
                 ({retrieved} of {total_count} retrieved)"
            ),
            Self::RateLimitSnapshot { rate_limit } => write!(f, "Rate limit: {rate_limit}"),
            Self::RateLimitSnapshotUnavailable { reason } => {
                write!(f, "Rate limit snapshot unavailable: {reason}")
            }
            Self::BatchStarted { action, count } => match action {
                BatchAction::Subscribe => write!(f, "Subscribing to {count} repos:"),
                BatchAction::Unsubscribe => write!(f, "Unsubscribing from {count} repos:"),
            },
            Self::SubscriptionStarted { full_name, .. } => write!(f, "{full_name} ..."),
            Self::SubscriptionCompleted { full_name, .. } => write!(f, "{full_name} ... 👍"),
            Self::NothingToDo => write!(f, "No repos, nothing to do."),
        }
    }
}

/// A one-way channel for diagnostic events.
pub trait DiagnosticSink: Send + Sync {
    /// Emits one event as one line.
    fn emit(&self, event: &DiagnosticEvent);
}

/// Sink that drops all events.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl DiagnosticSink for NoopSink {
    fn emit(&self, _event: &DiagnosticEvent) {}
}

/// Writes human-readable lines to stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConsoleSink;

impl DiagnosticSink for ConsoleSink {
    fn emit(&self, event: &DiagnosticEvent) {
        let _ignored = writeln_stderr(&event.to_string());
    }
}

/// Writes events to stderr as JSON lines (JSONL).
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonlSink;

impl DiagnosticSink for JsonlSink {
    fn emit(&self, event: &DiagnosticEvent) {
        let Ok(serialised) = serde_json::to_string(event) else {
            return;
        };

        let _ignored = writeln_stderr(&serialised);
    }
}

fn writeln_stderr(message: &str) -> io::Result<()> {
    use io::Write;

    let mut stderr = io::stderr().lock();
    writeln!(stderr, "{message}")?;
    stderr.flush()
}

#[cfg(any(test, feature = "test-support"))]
pub use recording::RecordingSink;

#[cfg(any(test, feature = "test-support"))]
mod recording {
    use std::sync::{Mutex, PoisonError};

    use super::{DiagnosticEvent, DiagnosticSink};

    /// Sink that keeps every event in memory for later inspection.
    #[derive(Debug, Default)]
    pub struct RecordingSink {
        events: Mutex<Vec<DiagnosticEvent>>,
    }

    impl RecordingSink {
        /// Returns a copy of the events recorded so far.
        #[must_use]
        pub fn events(&self) -> Vec<DiagnosticEvent> {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        /// Returns the recorded events rendered as console lines.
        #[must_use]
        pub fn lines(&self) -> Vec<String> {
            self.events().iter().map(ToString::to_string).collect()
        }

        /// Returns true if any recorded event satisfies `predicate`.
        pub fn contains(&self, predicate: impl Fn(&DiagnosticEvent) -> bool) -> bool {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .any(predicate)
        }
    }

    impl DiagnosticSink for RecordingSink {
        fn emit(&self, event: &DiagnosticEvent) {
            self.events
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(event.clone());
        }
    }
}
