//! Subscription workflows for an organisation's repositories.
//!
//! Batches run one repository at a time in input order and stop at the first
//! failure. They do not guard themselves; wrap a batch in a
//! [`RateLimitGuard`](super::guard::RateLimitGuard) when rate limit
//! diagnostics are wanted.

use crate::diagnostics::{BatchAction, DiagnosticEvent, DiagnosticSink};

use super::error::WatchError;
use super::gateway::RepositoryGateway;
use super::guard::RateLimitGuard;
use super::locator::OrganisationName;
use super::models::{RepositoryRecord, SubscriptionRequest};
use super::ownership::is_owned_by;

/// Lists and mutates the caller's repository subscriptions.
pub struct SubscriptionManager<'client, Gateway>
where
    Gateway: RepositoryGateway + ?Sized,
{
    client: &'client Gateway,
    sink: &'client dyn DiagnosticSink,
}

impl<'client, Gateway> SubscriptionManager<'client, Gateway>
where
    Gateway: RepositoryGateway + ?Sized,
{
    /// Create a manager reporting progress through `sink`.
    #[must_use]
    pub const fn new(client: &'client Gateway, sink: &'client dyn DiagnosticSink) -> Self {
        Self { client, sink }
    }

    /// List the caller's subscriptions owned by `org`.
    ///
    /// # Errors
    ///
    /// Propagates any gateway failure.
    pub async fn list_subscribed(
        &self,
        org: &OrganisationName,
    ) -> Result<Vec<RepositoryRecord>, WatchError> {
        let guard = RateLimitGuard::new(self.client, self.sink);
        let subscriptions = guard.run(|| self.client.list_subscriptions()).await?;

        Ok(subscriptions
            .into_iter()
            .filter(|repo| is_owned_by(repo, org))
            .collect())
    }

    /// Subscribe to `org/<name>` for every name, in order.
    ///
    /// # Errors
    ///
    /// Returns the first gateway failure; later names are not attempted.
    pub async fn subscribe_all<Name>(
        &self,
        names: &[Name],
        org: &OrganisationName,
    ) -> Result<(), WatchError>
    where
        Name: AsRef<str> + Sync,
    {
        self.apply(BatchAction::Subscribe, names, org).await
    }

    /// Remove the subscription to `org/<name>` for every name, in order.
    ///
    /// # Errors
    ///
    /// Returns the first gateway failure; later names are not attempted.
    pub async fn unsubscribe_all<Name>(
        &self,
        names: &[Name],
        org: &OrganisationName,
    ) -> Result<(), WatchError>
    where
        Name: AsRef<str> + Sync,
    {
        self.apply(BatchAction::Unsubscribe, names, org).await
    }

    async fn apply<Name>(
        &self,
        action: BatchAction,
        names: &[Name],
        org: &OrganisationName,
    ) -> Result<(), WatchError>
    where
        Name: AsRef<str> + Sync,
    {
        self.sink.emit(&DiagnosticEvent::BatchStarted {
            action,
            count: names.len(),
        });

        for name in names {
            let full_name = SubscriptionRequest::new(org, name.as_ref()).full_name();
            self.sink.emit(&DiagnosticEvent::SubscriptionStarted {
                action,
                full_name: full_name.clone(),
            });

            match action {
                BatchAction::Subscribe => self.client.set_subscription(&full_name, true).await?,
                BatchAction::Unsubscribe => self.client.delete_subscription(&full_name).await?,
            }

            self.sink
                .emit(&DiagnosticEvent::SubscriptionCompleted { action, full_name });
        }

        Ok(())
    }
}
