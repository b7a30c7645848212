//! Subscribe and unsubscribe operations.

use std::io::BufRead;

use orgwatch::diagnostics::{BatchAction, DiagnosticEvent};
use orgwatch::github::RateLimitGuard;
use orgwatch::{OrganisationName, RepositoryGateway, SubscriptionManager, WatchError};

use super::Session;
use super::listing::resolve_repositories;
use super::names::read_names;

/// Subscribes to repositories named on `input` when the topic is `-`, or to
/// the repositories the topic search (or full listing) selects otherwise.
///
/// # Errors
///
/// Returns the first I/O or GitHub failure.
pub async fn subscribe<G, R>(
    session: &Session<'_, G>,
    org: &OrganisationName,
    input: R,
) -> Result<(), WatchError>
where
    G: RepositoryGateway,
    R: BufRead,
{
    let names = if session.config.reads_names_from_stdin() {
        read_names(input)?
    } else {
        resolve_repositories(session, org)
            .await?
            .into_iter()
            .map(|repo| repo.name)
            .collect()
    };

    run_batch(session, org, BatchAction::Subscribe, &names).await
}

/// Unsubscribes from the repositories named on `input`.
///
/// # Errors
///
/// Returns the first I/O or GitHub failure.
pub async fn unsubscribe<G, R>(
    session: &Session<'_, G>,
    org: &OrganisationName,
    input: R,
) -> Result<(), WatchError>
where
    G: RepositoryGateway,
    R: BufRead,
{
    let names = read_names(input)?;
    run_batch(session, org, BatchAction::Unsubscribe, &names).await
}

async fn run_batch<G>(
    session: &Session<'_, G>,
    org: &OrganisationName,
    action: BatchAction,
    names: &[String],
) -> Result<(), WatchError>
where
    G: RepositoryGateway,
{
    if names.is_empty() {
        session.sink.emit(&DiagnosticEvent::NothingToDo);
        return Ok(());
    }

    let manager = SubscriptionManager::new(session.gateway, session.sink);
    let guard = RateLimitGuard::new(session.gateway, session.sink);
    match action {
        BatchAction::Subscribe => guard.run(|| manager.subscribe_all(names, org)).await,
        BatchAction::Unsubscribe => guard.run(|| manager.unsubscribe_all(names, org)).await,
    }
}
