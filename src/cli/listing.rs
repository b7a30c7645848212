//! Repository and subscription listing operations.

use std::io::Write;

use orgwatch::github::{FilterChain, HasCodeowners, RateLimitGuard};
use orgwatch::{
    OrganisationName, RepositoryFinder, RepositoryGateway, RepositoryRecord, SubscriptionManager,
    WatchError,
};

use super::Session;
use super::output::write_repository_names;

/// Prints the organisation's repositories, narrowed by topic and filters.
///
/// # Errors
///
/// Returns any configuration, I/O, or GitHub failure.
pub async fn list<G, W>(
    session: &Session<'_, G>,
    org: &OrganisationName,
    writer: &mut W,
) -> Result<(), WatchError>
where
    G: RepositoryGateway,
    W: Write,
{
    let repos = resolve_repositories(session, org).await?;
    write_repository_names(writer, &repos, org)
}

/// Prints the caller's subscriptions owned by the organisation.
///
/// # Errors
///
/// Returns any I/O or GitHub failure.
pub async fn subscribed<G, W>(
    session: &Session<'_, G>,
    org: &OrganisationName,
    writer: &mut W,
) -> Result<(), WatchError>
where
    G: RepositoryGateway,
    W: Write,
{
    let manager = SubscriptionManager::new(session.gateway, session.sink);
    let repos = manager.list_subscribed(org).await?;
    write_repository_names(writer, &repos, org)
}

/// Resolves the repositories selected by `topic`, `repo_type`, and the
/// configured filters.
pub(super) async fn resolve_repositories<G>(
    session: &Session<'_, G>,
    org: &OrganisationName,
) -> Result<Vec<RepositoryRecord>, WatchError>
where
    G: RepositoryGateway,
{
    let finder = RepositoryFinder::new(session.gateway, session.sink);
    let repos = finder
        .resolve(
            org,
            session.config.topic(),
            session.config.repository_type()?,
        )
        .await?;

    let chain = filter_chain(session.config.codeowners);
    let guard = RateLimitGuard::new(session.gateway, session.sink);
    guard.run(|| chain.retain(repos, session.gateway)).await
}

fn filter_chain<G>(codeowners: bool) -> FilterChain<G>
where
    G: RepositoryGateway,
{
    let chain = FilterChain::new();
    if codeowners {
        chain.with(HasCodeowners)
    } else {
        chain
    }
}

#[cfg(test)]
mod tests {
    use orgwatch::diagnostics::{DiagnosticEvent, RecordingSink};
    use orgwatch::github::models::test_support::{numbered_repositories, repository, search_page};
    use orgwatch::{OrganisationName, OrgwatchConfig};
    use rstest::{fixture, rstest};

    use super::{list, subscribed};
    use crate::cli::Session;
    use crate::cli::test_utils::StubGateway;

    #[fixture]
    fn org() -> OrganisationName {
        OrganisationName::new("acme").expect("organisation should be valid")
    }

    async fn run_list(
        gateway: &StubGateway,
        config: &OrgwatchConfig,
        org: &OrganisationName,
    ) -> String {
        let sink = RecordingSink::default();
        let session = Session {
            gateway,
            sink: &sink,
            config,
        };
        let mut buffer = Vec::new();
        list(&session, org, &mut buffer)
            .await
            .expect("listing should succeed");
        String::from_utf8(buffer).expect("output should be valid UTF-8")
    }

    #[rstest]
    #[tokio::test]
    async fn list_without_topic_uses_org_listing_and_repo_type(org: OrganisationName) {
        let gateway = StubGateway {
            org_repositories: vec![repository("acme", "widget"), repository("other", "fork")],
            ..StubGateway::default()
        };
        let config = OrgwatchConfig {
            repo_type: Some("forks".to_owned()),
            ..OrgwatchConfig::default()
        };

        let output = run_list(&gateway, &config, &org).await;

        assert_eq!(output, "widget\nother/fork\n");
        assert_eq!(gateway.calls(), vec!["list acme forks"]);
    }

    #[rstest]
    #[tokio::test]
    async fn list_with_topic_uses_search(org: OrganisationName) {
        let gateway = StubGateway {
            search: search_page("acme", 3, 3),
            ..StubGateway::default()
        };
        let config = OrgwatchConfig {
            topic: Some("ops".to_owned()),
            ..OrgwatchConfig::default()
        };

        let output = run_list(&gateway, &config, &org).await;

        assert_eq!(output, "repo-1\nrepo-2\nrepo-3\n");
        assert_eq!(gateway.calls(), vec!["search user:acme topic:ops"]);
    }

    #[rstest]
    #[tokio::test]
    async fn codeowners_flag_filters_listing(org: OrganisationName) {
        let gateway = StubGateway {
            org_repositories: numbered_repositories("acme", 3),
            codeowners: vec!["acme/repo-2".to_owned()],
            ..StubGateway::default()
        };
        let config = OrgwatchConfig {
            codeowners: true,
            ..OrgwatchConfig::default()
        };

        let output = run_list(&gateway, &config, &org).await;

        assert_eq!(output, "repo-2\n");
        assert_eq!(
            gateway.calls(),
            vec![
                "list acme all",
                "contents acme/repo-1 .github/CODEOWNERS",
                "contents acme/repo-2 .github/CODEOWNERS",
                "contents acme/repo-3 .github/CODEOWNERS",
            ]
        );
    }

    #[rstest]
    #[tokio::test]
    async fn truncated_search_still_prints_first_page(org: OrganisationName) {
        let gateway = StubGateway {
            search: search_page("acme", 250, 100),
            ..StubGateway::default()
        };
        let config = OrgwatchConfig {
            topic: Some("ops".to_owned()),
            ..OrgwatchConfig::default()
        };
        let sink = RecordingSink::default();
        let session = Session {
            gateway: &gateway,
            sink: &sink,
            config: &config,
        };
        let mut buffer = Vec::new();

        list(&session, &org, &mut buffer)
            .await
            .expect("listing should succeed");

        let output = String::from_utf8(buffer).expect("output should be valid UTF-8");
        assert_eq!(output.lines().count(), 100);
        assert!(sink.contains(|event| matches!(
            event,
            DiagnosticEvent::TruncatedResults {
                total_count: 250,
                retrieved: 100
            }
        )));
    }

    #[rstest]
    #[tokio::test]
    async fn subscribed_prints_only_owned_subscriptions(org: OrganisationName) {
        let gateway = StubGateway {
            subscriptions: vec![
                repository("ACME", "widget"),
                repository("someone", "dotfiles"),
            ],
            ..StubGateway::default()
        };
        let config = OrgwatchConfig::default();
        let sink = RecordingSink::default();
        let session = Session {
            gateway: &gateway,
            sink: &sink,
            config: &config,
        };
        let mut buffer = Vec::new();

        subscribed(&session, &org, &mut buffer)
            .await
            .expect("listing should succeed");

        let output = String::from_utf8(buffer).expect("output should be valid UTF-8");
        assert_eq!(output, "widget\n");
    }
}
